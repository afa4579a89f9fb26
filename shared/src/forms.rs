//! Create/edit form state for the records the dashboard owns.

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::api::WritableResourceApi;
use crate::error::ApiResult;
use crate::models::{
    Contact, ContactCreate, ContactGroup, ContactGroupCreate, ContactGroupUpdate, ContactUpdate,
    EditableEntity, EmergencyLevel, Entity, Trigger, TriggerCreate, TriggerUpdate,
};

/// Client-side validation failure. No request is made.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("form is invalid: {0}")]
pub struct FormError(#[from] pub ValidationErrors);

impl FormError {
    /// Names of the offending fields, sorted.
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self
            .0
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields().iter().any(|name| name == field)
    }
}

/// Editable values of one record type.
pub trait EntityForm: Validate + Clone + Default + PartialEq {
    type Entity: EditableEntity;

    fn from_entity(entity: &Self::Entity) -> Self;

    /// Copy with surrounding whitespace stripped, as it will be sent.
    fn normalized(&self) -> Self;

    fn create_payload(&self, id: Uuid) -> <Self::Entity as EditableEntity>::Create;

    fn update_payload(&self) -> <Self::Entity as EditableEntity>::Update;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// A validated form, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<E: EditableEntity> {
    Create(E::Create),
    Update { id: Uuid, payload: E::Update },
}

impl<E: EditableEntity> Submission<E> {
    pub async fn send<C>(&self, client: &C) -> ApiResult<E>
    where
        C: WritableResourceApi<E> + ?Sized,
    {
        match self {
            Submission::Create(payload) => client.create(payload).await,
            Submission::Update { id, payload } => client.update(id, payload).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<F> {
    pub values: F,
    mode: FormMode,
    open: bool,
    saving: bool,
}

impl<F: EntityForm> Default for FormState<F> {
    fn default() -> Self {
        Self {
            values: F::default(),
            mode: FormMode::Create,
            open: false,
            saving: false,
        }
    }
}

impl<F: EntityForm> FormState<F> {
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn open_create(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    pub fn open_edit(&mut self, entity: &F::Entity) {
        *self = Self {
            values: F::from_entity(entity),
            mode: FormMode::Edit(*entity.id()),
            open: true,
            saving: false,
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Validates the values and maps them to the request the current mode
    /// calls for.
    pub fn submission(&self) -> Result<Submission<F::Entity>, FormError> {
        let values = self.values.normalized();
        values.validate().map_err(|errors| {
            debug!(?errors, "form rejected");
            FormError(errors)
        })?;

        Ok(match self.mode {
            FormMode::Create => Submission::Create(values.create_payload(Uuid::new_v4())),
            FormMode::Edit(id) => Submission::Update {
                id,
                payload: values.update_payload(),
            },
        })
    }

    pub fn begin_saving(&mut self) {
        self.saving = true;
    }

    /// A successful save closes the form; a failed one leaves it open with
    /// the operator's input intact.
    pub fn finish_saving(&mut self, succeeded: bool) {
        if succeeded {
            self.close();
        } else {
            self.saving = false;
        }
    }
}

/// `None` for blank input.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ===== Contacts =====

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(range(min = 1, max = 5))]
    pub priority: u8,
    pub is_active: bool,
    pub role: String,
    pub department: String,
    #[validate(length(min = 1, message = "Select at least one group"))]
    pub group_ids: Vec<Uuid>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone_number: String::new(),
            priority: 1,
            is_active: true,
            role: String::new(),
            department: String::new(),
            group_ids: Vec::new(),
        }
    }
}

impl ContactForm {
    /// Adds or removes `group_id` from the selection.
    pub fn toggle_group(&mut self, group_id: Uuid) {
        if let Some(index) = self.group_ids.iter().position(|id| *id == group_id) {
            self.group_ids.remove(index);
        } else {
            self.group_ids.push(group_id);
        }
    }
}

impl EntityForm for ContactForm {
    type Entity = Contact;

    fn from_entity(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone_number: contact.phone_number.clone(),
            priority: contact.priority_or_default(),
            is_active: contact.active(),
            role: contact.role.clone().unwrap_or_default(),
            department: contact.department.clone().unwrap_or_default(),
            group_ids: contact.group_ids.clone(),
        }
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            role: self.role.trim().to_string(),
            department: self.department.trim().to_string(),
            ..self.clone()
        }
    }

    fn create_payload(&self, id: Uuid) -> ContactCreate {
        ContactCreate {
            id,
            name: self.name.clone(),
            phone_number: self.phone_number.clone(),
            priority: Some(self.priority),
            is_active: Some(self.is_active),
            role: non_blank(&self.role),
            department: non_blank(&self.department),
            group_ids: self.group_ids.clone(),
        }
    }

    fn update_payload(&self) -> ContactUpdate {
        ContactUpdate {
            name: non_blank(&self.name),
            phone_number: non_blank(&self.phone_number),
            priority: Some(self.priority),
            is_active: Some(self.is_active),
            role: non_blank(&self.role),
            department: non_blank(&self.department),
            group_ids: (!self.group_ids.is_empty()).then(|| self.group_ids.clone()),
        }
    }
}

// ===== Contact groups =====

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ContactGroupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub emergency_level: EmergencyLevel,
}

impl Default for ContactGroupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            is_active: true,
            emergency_level: EmergencyLevel::Medium,
        }
    }
}

impl EntityForm for ContactGroupForm {
    type Entity = ContactGroup;

    fn from_entity(group: &ContactGroup) -> Self {
        Self {
            name: group.name.clone(),
            description: group.description.clone().unwrap_or_default(),
            is_active: group.active(),
            emergency_level: group.level(),
        }
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            ..self.clone()
        }
    }

    fn create_payload(&self, id: Uuid) -> ContactGroupCreate {
        ContactGroupCreate {
            id,
            name: self.name.clone(),
            description: non_blank(&self.description),
            is_active: Some(self.is_active),
            emergency_level: Some(self.emergency_level),
        }
    }

    fn update_payload(&self) -> ContactGroupUpdate {
        ContactGroupUpdate {
            name: non_blank(&self.name),
            description: non_blank(&self.description),
            is_active: Some(self.is_active),
            emergency_level: Some(self.emergency_level),
        }
    }
}

// ===== Triggers =====

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct TriggerForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Trigger phrase is required"))]
    pub trigger_string: String,
    pub description: String,
    pub group_id: Option<Uuid>,
    pub is_active: bool,
    #[validate(range(min = 1, max = 5))]
    pub priority: u8,
    pub custom_message: String,
}

impl Default for TriggerForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            trigger_string: String::new(),
            description: String::new(),
            group_id: None,
            is_active: true,
            priority: 1,
            custom_message: String::new(),
        }
    }
}

impl EntityForm for TriggerForm {
    type Entity = Trigger;

    fn from_entity(trigger: &Trigger) -> Self {
        Self {
            name: trigger.name.clone(),
            trigger_string: trigger.trigger_string.clone(),
            description: trigger.description.clone().unwrap_or_default(),
            group_id: trigger.group_id,
            is_active: trigger.active(),
            priority: trigger.priority_or_default(),
            custom_message: trigger.custom_message.clone().unwrap_or_default(),
        }
    }

    fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            trigger_string: self.trigger_string.trim().to_string(),
            description: self.description.trim().to_string(),
            custom_message: self.custom_message.trim().to_string(),
            ..self.clone()
        }
    }

    fn create_payload(&self, id: Uuid) -> TriggerCreate {
        TriggerCreate {
            id,
            name: self.name.clone(),
            trigger_string: self.trigger_string.clone(),
            description: non_blank(&self.description),
            group_id: self.group_id,
            is_active: Some(self.is_active),
            priority: Some(self.priority),
            custom_message: non_blank(&self.custom_message),
        }
    }

    fn update_payload(&self) -> TriggerUpdate {
        TriggerUpdate {
            name: non_blank(&self.name),
            trigger_string: non_blank(&self.trigger_string),
            description: non_blank(&self.description),
            group_id: self.group_id,
            is_active: Some(self.is_active),
            priority: Some(self.priority),
            custom_message: non_blank(&self.custom_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact() -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: "Ana Ruiz".to_string(),
            phone_number: "+34600111222".to_string(),
            priority: Some(2),
            is_active: Some(true),
            role: None,
            department: Some("Maintenance".to_string()),
            group_ids: vec![Uuid::new_v4()],
            created_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn new_forms_start_from_defaults() {
        let mut form: FormState<ContactGroupForm> = FormState::default();
        form.values.name = "left over".to_string();
        form.open_create();

        assert!(form.is_open());
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.values.emergency_level, EmergencyLevel::Medium);
        assert!(form.values.name.is_empty());
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let mut form: FormState<ContactForm> = FormState::default();
        form.open_create();
        form.values.name = "   ".to_string();
        form.values.phone_number = "+34600111222".to_string();

        let error = form.submission().unwrap_err();
        assert_eq!(error.fields(), vec!["group_ids", "name"]);
    }

    #[test]
    fn priority_must_be_between_one_and_five() {
        let mut form: FormState<TriggerForm> = FormState::default();
        form.open_create();
        form.values.name = "Fire".to_string();
        form.values.trigger_string = "FIRE ALARM".to_string();
        form.values.priority = 6;

        assert!(form.submission().unwrap_err().has_field("priority"));
        form.values.priority = 5;
        assert!(form.submission().is_ok());
    }

    #[test]
    fn create_mints_an_id_and_trims_input() {
        let mut form: FormState<ContactGroupForm> = FormState::default();
        form.open_create();
        form.values.name = "  Night shift ".to_string();

        match form.submission().unwrap() {
            Submission::Create(payload) => {
                assert_ne!(payload.id, Uuid::nil());
                assert_eq!(payload.name, "Night shift");
                assert_eq!(payload.description, None);
            }
            other => panic!("expected a create, got {:?}", other),
        }
    }

    #[test]
    fn edit_maps_to_a_partial_update_of_the_same_record() {
        let existing = contact();
        let mut form: FormState<ContactForm> = FormState::default();
        form.open_edit(&existing);
        assert!(form.is_editing());
        assert_eq!(form.mode(), FormMode::Edit(existing.id));
        assert_eq!(form.values.department, "Maintenance");

        form.values.department.clear();
        let Submission::Update { id, payload } = form.submission().unwrap() else {
            panic!("expected an update");
        };
        assert_eq!(id, existing.id);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Ana Ruiz",
                "phone_number": "+34600111222",
                "priority": 2,
                "is_active": true,
                "group_ids": [existing.group_ids[0]],
            })
        );
    }

    #[test]
    fn group_selection_toggles() {
        let mut values = ContactForm::default();
        let id = Uuid::new_v4();
        values.toggle_group(id);
        assert_eq!(values.group_ids, vec![id]);
        values.toggle_group(id);
        assert!(values.group_ids.is_empty());
    }

    #[test]
    fn failed_save_keeps_the_form_open() {
        let mut form: FormState<TriggerForm> = FormState::default();
        form.open_create();
        form.values.name = "Flood".to_string();
        form.begin_saving();
        form.finish_saving(false);
        assert!(form.is_open());
        assert!(!form.is_saving());
        assert_eq!(form.values.name, "Flood");

        form.finish_saving(true);
        assert!(!form.is_open());
        assert!(form.values.name.is_empty());
    }
}
