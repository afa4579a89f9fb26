use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::filter::{Filterable, keys};

/// Anything ordered by its creation instant in list views.
pub trait Timestamped {
    /// Creation timestamp exactly as the service sent it.
    fn created_at(&self) -> &str;
}

/// Metadata that lets one generic client and one generic list serve every
/// record type the service exposes.
pub trait Entity: Timestamped + Clone + fmt::Debug + DeserializeOwned + 'static {
    type Id: fmt::Display + fmt::Debug + Clone + PartialEq + 'static;

    /// Collection path below `/api/v1/`.
    const PATH: &'static str;
    /// Singular, human readable name used in log lines and prompts.
    const LABEL: &'static str;

    fn id(&self) -> &Self::Id;
}

/// Records the dashboard may create, update and delete. Ids are minted on
/// the client.
pub trait EditableEntity: Entity<Id = Uuid> {
    type Create: Serialize + Clone + fmt::Debug + PartialEq + 'static;
    type Update: Serialize + Clone + fmt::Debug + PartialEq + 'static;
}

// ===== Contact groups =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl EmergencyLevel {
    pub const ALL: [EmergencyLevel; 4] = [
        EmergencyLevel::Low,
        EmergencyLevel::Medium,
        EmergencyLevel::High,
        EmergencyLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyLevel::Low => "low",
            EmergencyLevel::Medium => "medium",
            EmergencyLevel::High => "high",
            EmergencyLevel::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmergencyLevel::Low => "Low",
            EmergencyLevel::Medium => "Medium",
            EmergencyLevel::High => "High",
            EmergencyLevel::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactGroup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub emergency_level: Option<EmergencyLevel>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactGroupCreate {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_level: Option<EmergencyLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ContactGroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_level: Option<EmergencyLevel>,
}

impl ContactGroup {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    pub fn level(&self) -> EmergencyLevel {
        self.emergency_level.unwrap_or_default()
    }
}

impl Timestamped for ContactGroup {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Entity for ContactGroup {
    type Id = Uuid;
    const PATH: &'static str = "contact-groups";
    const LABEL: &'static str = "contact group";

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl EditableEntity for ContactGroup {
    type Create = ContactGroupCreate;
    type Update = ContactGroupUpdate;
}

impl Filterable for ContactGroup {
    fn field_values(&self, key: &str) -> Vec<Cow<'_, str>> {
        match key {
            keys::SEARCH => {
                let mut values = vec![Cow::Borrowed(self.name.as_str())];
                values.extend(self.description.as_deref().map(Cow::Borrowed));
                values
            }
            keys::STATUS => vec![Cow::Owned(self.active().to_string())],
            keys::LEVEL => vec![Cow::Borrowed(self.level().as_str())],
            _ => Vec::new(),
        }
    }
}

// ===== Contacts =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub priority: Option<u8>,
    pub is_active: Option<bool>,
    pub role: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub group_ids: Vec<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactCreate {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    pub group_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<Uuid>>,
}

impl Contact {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    pub fn priority_or_default(&self) -> u8 {
        self.priority.unwrap_or(1)
    }
}

impl Timestamped for Contact {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Entity for Contact {
    type Id = Uuid;
    const PATH: &'static str = "contacts";
    const LABEL: &'static str = "contact";

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl EditableEntity for Contact {
    type Create = ContactCreate;
    type Update = ContactUpdate;
}

impl Filterable for Contact {
    fn field_values(&self, key: &str) -> Vec<Cow<'_, str>> {
        match key {
            keys::SEARCH => {
                let mut values = vec![
                    Cow::Borrowed(self.name.as_str()),
                    Cow::Borrowed(self.phone_number.as_str()),
                ];
                values.extend(self.role.as_deref().map(Cow::Borrowed));
                values.extend(self.department.as_deref().map(Cow::Borrowed));
                values
            }
            keys::GROUP => self
                .group_ids
                .iter()
                .map(|id| Cow::Owned(id.to_string()))
                .collect(),
            keys::STATUS => vec![Cow::Owned(self.active().to_string())],
            keys::PRIORITY => vec![Cow::Owned(self.priority_or_default().to_string())],
            _ => Vec::new(),
        }
    }
}

/// Display name for a contact id, falling back when the contact is not in
/// the lookup.
pub fn contact_name(contacts: &[Contact], id: &Uuid) -> String {
    contacts
        .iter()
        .find(|contact| &contact.id == id)
        .map(|contact| contact.name.clone())
        .unwrap_or_else(|| "Unknown contact".to_string())
}

/// Display name for a group id; the raw id is shown when the group is unknown.
pub fn group_name(groups: &[ContactGroup], id: &Uuid) -> String {
    groups
        .iter()
        .find(|group| &group.id == id)
        .map(|group| group.name.clone())
        .unwrap_or_else(|| id.to_string())
}

// ===== Triggers =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: Uuid,
    pub name: String,
    pub trigger_string: String,
    pub description: Option<String>,
    pub group_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub priority: Option<u8>,
    pub custom_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerCreate {
    pub id: Uuid,
    pub name: String,
    pub trigger_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TriggerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

impl Trigger {
    pub fn active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }

    pub fn priority_or_default(&self) -> u8 {
        self.priority.unwrap_or(1)
    }
}

impl Timestamped for Trigger {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Entity for Trigger {
    type Id = Uuid;
    const PATH: &'static str = "triggers";
    const LABEL: &'static str = "trigger";

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl EditableEntity for Trigger {
    type Create = TriggerCreate;
    type Update = TriggerUpdate;
}

impl Filterable for Trigger {
    fn field_values(&self, key: &str) -> Vec<Cow<'_, str>> {
        match key {
            keys::SEARCH => vec![
                Cow::Borrowed(self.name.as_str()),
                Cow::Borrowed(self.trigger_string.as_str()),
            ],
            keys::STATUS => vec![Cow::Owned(self.active().to_string())],
            keys::GROUP => self
                .group_id
                .iter()
                .map(|id| Cow::Owned(id.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

// ===== Call logs =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Completed,
    Failed,
    Busy,
    NoAnswer,
    InProgress,
}

impl CallStatus {
    pub const ALL: [CallStatus; 5] = [
        CallStatus::Completed,
        CallStatus::Failed,
        CallStatus::Busy,
        CallStatus::NoAnswer,
        CallStatus::InProgress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Busy => "busy",
            CallStatus::NoAnswer => "no-answer",
            CallStatus::InProgress => "in-progress",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallStatus::Completed => "Completed",
            CallStatus::Failed => "Failed",
            CallStatus::Busy => "Busy",
            CallStatus::NoAnswer => "No answer",
            CallStatus::InProgress => "In progress",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLog {
    pub id: i64,
    pub email_event_id: Uuid,
    pub contact_id: Uuid,
    pub phone_number: String,
    pub call_sid: Option<String>,
    pub status: String,
    /// Seconds.
    pub duration: Option<u32>,
    pub attempt_number: Option<u32>,
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl CallLog {
    /// Human label for the status; unknown statuses are shown verbatim.
    pub fn status_label(&self) -> &str {
        CallStatus::parse(&self.status)
            .map(|status| status.label())
            .unwrap_or(&self.status)
    }
}

impl Timestamped for CallLog {
    fn created_at(&self) -> &str {
        &self.created_at
    }
}

impl Entity for CallLog {
    type Id = i64;
    const PATH: &'static str = "call-logs";
    const LABEL: &'static str = "call log";

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// A call log joined with the display name of the contact it called, so the
/// free-text filter can match on the name.
#[derive(Debug, Clone, PartialEq)]
pub struct CallLogRow {
    pub log: CallLog,
    pub contact_name: String,
}

impl CallLogRow {
    pub fn join(logs: &[CallLog], contacts: &[Contact]) -> Vec<CallLogRow> {
        logs.iter()
            .map(|log| CallLogRow {
                contact_name: contact_name(contacts, &log.contact_id),
                log: log.clone(),
            })
            .collect()
    }
}

impl Timestamped for CallLogRow {
    fn created_at(&self) -> &str {
        &self.log.created_at
    }
}

impl Filterable for CallLogRow {
    fn field_values(&self, key: &str) -> Vec<Cow<'_, str>> {
        match key {
            keys::STATUS => vec![Cow::Borrowed(self.log.status.as_str())],
            keys::SEARCH => vec![
                Cow::Borrowed(self.contact_name.as_str()),
                Cow::Borrowed(self.log.phone_number.as_str()),
            ],
            _ => Vec::new(),
        }
    }
}

// ===== Email events =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStatus {
    Pending,
    Processed,
    Completed,
    Failed,
}

impl EmailStatus {
    pub const ALL: [EmailStatus; 4] = [
        EmailStatus::Pending,
        EmailStatus::Processed,
        EmailStatus::Completed,
        EmailStatus::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Pending => "pending",
            EmailStatus::Processed => "processed",
            EmailStatus::Completed => "completed",
            EmailStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmailStatus::Pending => "Pending",
            EmailStatus::Processed => "Processed",
            EmailStatus::Completed => "Completed",
            EmailStatus::Failed => "Failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailEvent {
    pub id: Uuid,
    pub from_email: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub trigger_matched: Option<String>,
    pub status: Option<String>,
    pub received_at: String,
    pub processed_at: Option<String>,
}

impl EmailEvent {
    pub fn status_label(&self) -> &str {
        match self.status.as_deref() {
            Some(raw) => EmailStatus::parse(raw)
                .map(|status| status.label())
                .unwrap_or(raw),
            None => EmailStatus::Pending.label(),
        }
    }
}

impl Timestamped for EmailEvent {
    fn created_at(&self) -> &str {
        &self.received_at
    }
}

impl Entity for EmailEvent {
    type Id = Uuid;
    const PATH: &'static str = "email-events";
    const LABEL: &'static str = "email event";

    fn id(&self) -> &Uuid {
        &self.id
    }
}

impl Filterable for EmailEvent {
    fn field_values(&self, key: &str) -> Vec<Cow<'_, str>> {
        match key {
            keys::STATUS => self.status.as_deref().map(Cow::Borrowed).into_iter().collect(),
            keys::TRIGGER => self
                .trigger_matched
                .as_deref()
                .map(Cow::Borrowed)
                .into_iter()
                .collect(),
            keys::SEARCH => {
                let mut values = vec![Cow::Borrowed(self.from_email.as_str())];
                values.extend(self.subject.as_deref().map(Cow::Borrowed));
                values
            }
            _ => Vec::new(),
        }
    }
}

/// Distinct, sorted, non-empty trigger phrases matched by the given events.
pub fn matched_triggers(events: &[EmailEvent]) -> Vec<String> {
    let mut triggers: Vec<String> = events
        .iter()
        .filter_map(|event| event.trigger_matched.as_deref())
        .filter(|trigger| !trigger.is_empty())
        .map(str::to_string)
        .collect();
    triggers.sort();
    triggers.dedup();
    triggers
}

// ===== Auth =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl LoginCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_decodes_with_missing_optional_fields() {
        let contact: Contact = serde_json::from_value(json!({
            "id": "0b6f4c1e-8d7a-4c36-9a59-2f0b1f1d6a11",
            "name": "Ana Ruiz",
            "phone_number": "+34600111222",
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T10:00:00"
        }))
        .unwrap();

        assert!(contact.group_ids.is_empty());
        assert!(contact.active());
        assert_eq!(contact.priority_or_default(), 1);
    }

    #[test]
    fn update_payload_omits_absent_fields() {
        let update = ContactUpdate {
            name: Some("Ana".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "name": "Ana" }));
    }

    #[test]
    fn emergency_level_uses_lowercase_on_the_wire() {
        let group: ContactGroup = serde_json::from_value(json!({
            "id": "5d1c2f8e-0a8b-4f43-8c5e-6f6d0d6e9b01",
            "name": "On call",
            "emergency_level": "critical",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(group.level(), EmergencyLevel::Critical);
        assert_eq!(EmergencyLevel::parse("low"), Some(EmergencyLevel::Low));
        assert_eq!(EmergencyLevel::parse("extreme"), None);
    }

    #[test]
    fn call_log_has_an_integer_id_and_readable_status() {
        let log: CallLog = serde_json::from_value(json!({
            "id": 42,
            "email_event_id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "contact_id": "0b6f4c1e-8d7a-4c36-9a59-2f0b1f1d6a11",
            "phone_number": "+34600111222",
            "status": "no-answer",
            "attempt_number": 2,
            "created_at": "2024-05-01T10:00:00",
            "updated_at": "2024-05-01T10:00:05"
        }))
        .unwrap();
        assert_eq!(*log.id(), 42);
        assert_eq!(log.status_label(), "No answer");

        let odd = CallLog {
            status: "queued".to_string(),
            ..log
        };
        assert_eq!(odd.status_label(), "queued");
    }

    #[test]
    fn email_event_orders_by_received_at() {
        let event: EmailEvent = serde_json::from_value(json!({
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "from_email": "alerts@plant.example",
            "received_at": "2024-05-02T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(event.created_at(), "2024-05-02T08:30:00Z");
        assert_eq!(event.status_label(), "Pending");
    }

    #[test]
    fn unknown_contacts_get_a_placeholder_name() {
        assert_eq!(contact_name(&[], &Uuid::nil()), "Unknown contact");
        assert_eq!(group_name(&[], &Uuid::nil()), Uuid::nil().to_string());
    }

    #[test]
    fn matched_triggers_are_distinct_and_sorted() {
        let event = |trigger: Option<&str>| EmailEvent {
            id: Uuid::new_v4(),
            from_email: "a@b.c".to_string(),
            subject: None,
            body: None,
            trigger_matched: trigger.map(str::to_string),
            status: None,
            received_at: "2024-05-02T08:30:00Z".to_string(),
            processed_at: None,
        };
        let events = vec![
            event(Some("FIRE")),
            event(None),
            event(Some("")),
            event(Some("FLOOD")),
            event(Some("FIRE")),
        ];
        assert_eq!(matched_triggers(&events), vec!["FIRE", "FLOOD"]);
    }

    #[test]
    fn credentials_need_both_fields() {
        assert!(LoginCredentials::new("admin", "secret").is_complete());
        assert!(!LoginCredentials::new("  ", "secret").is_complete());
        assert!(!LoginCredentials::new("admin", "").is_complete());
    }
}
