//! URL layout of the notification service API.

use std::fmt;
use std::marker::PhantomData;

use crate::models::{CallLog, Contact, EmailEvent, Entity};
use crate::stats::CountKind;

pub const API_PREFIX: &str = "/api/v1";
pub const AUTH_TOKEN_PATH: &str = "/api/v1/auth/token";
pub const STATS_COUNTS_PATH: &str = "/api/v1/system-stats/counts";

/// Builds absolute URLs below a configured base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET`/`POST` target of a collection. Keeps the trailing slash the
    /// service routes on.
    pub fn collection<E: Entity>(&self) -> String {
        format!("{}{}/{}/", self.base_url, API_PREFIX, E::PATH)
    }

    pub fn page<E: Entity>(&self, page: u32, per_page: u32) -> String {
        format!("{}?page={}&per_page={}", self.collection::<E>(), page, per_page)
    }

    pub fn item<E: Entity>(&self, id: &E::Id) -> String {
        format!(
            "{}{}/{}/{}",
            self.base_url,
            API_PREFIX,
            E::PATH,
            urlencoding::encode(&id.to_string())
        )
    }

    pub fn scoped<E: Entity>(&self, scope: &Scope<E>) -> String {
        format!(
            "{}{}/{}/{}/{}",
            self.base_url,
            API_PREFIX,
            E::PATH,
            scope.segment,
            urlencoding::encode(&scope.key)
        )
    }

    pub fn trigger_by_string(&self, phrase: &str) -> String {
        format!(
            "{}{}/triggers/by-string/{}",
            self.base_url,
            API_PREFIX,
            urlencoding::encode(phrase)
        )
    }

    pub fn token(&self) -> String {
        format!("{}{}", self.base_url, AUTH_TOKEN_PATH)
    }

    pub fn count(&self, kind: CountKind) -> String {
        format!("{}{}/{}", self.base_url, STATS_COUNTS_PATH, kind.path())
    }
}

/// A server-side filtered read of a collection (`/by-<field>/<key>`),
/// typed by the entity it returns.
pub struct Scope<E> {
    segment: &'static str,
    key: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Scope<E> {
    fn new(segment: &'static str, key: impl fmt::Display) -> Self {
        Self {
            segment,
            key: key.to_string(),
            _entity: PhantomData,
        }
    }

    pub fn segment(&self) -> &'static str {
        self.segment
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<E> Clone for Scope<E> {
    fn clone(&self) -> Self {
        Self::new(self.segment, &self.key)
    }
}

impl<E> PartialEq for Scope<E> {
    fn eq(&self, other: &Self) -> bool {
        self.segment == other.segment && self.key == other.key
    }
}

impl<E> fmt::Debug for Scope<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.segment, self.key)
    }
}

impl Scope<Contact> {
    pub fn by_group(group_id: &uuid::Uuid) -> Self {
        Self::new("by-group", group_id)
    }
}

impl Scope<CallLog> {
    pub fn by_contact(contact_id: &uuid::Uuid) -> Self {
        Self::new("by-contact", contact_id)
    }

    pub fn by_email_event(email_event_id: &uuid::Uuid) -> Self {
        Self::new("by-email-event", email_event_id)
    }
}

impl Scope<EmailEvent> {
    pub fn by_status(status: &str) -> Self {
        Self::new("by-status", status)
    }

    pub fn by_trigger(trigger: &str) -> Self {
        Self::new("by-trigger", trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactGroup, Trigger};
    use uuid::Uuid;

    fn endpoints() -> Endpoints {
        Endpoints::new("https://api.example.com/")
    }

    #[test]
    fn collections_keep_the_trailing_slash() {
        assert_eq!(
            endpoints().collection::<ContactGroup>(),
            "https://api.example.com/api/v1/contact-groups/"
        );
        assert_eq!(
            endpoints().page::<Contact>(2, 20),
            "https://api.example.com/api/v1/contacts/?page=2&per_page=20"
        );
    }

    #[test]
    fn items_are_addressed_by_id() {
        let id = Uuid::nil();
        assert_eq!(
            endpoints().item::<Trigger>(&id),
            format!("https://api.example.com/api/v1/triggers/{}", id)
        );
        assert_eq!(
            endpoints().item::<CallLog>(&7),
            "https://api.example.com/api/v1/call-logs/7"
        );
    }

    #[test]
    fn scoped_reads_encode_their_key() {
        assert_eq!(
            endpoints().scoped(&Scope::<EmailEvent>::by_trigger("gas leak")),
            "https://api.example.com/api/v1/email-events/by-trigger/gas%20leak"
        );
        assert_eq!(
            endpoints().scoped(&Scope::<EmailEvent>::by_status("failed")),
            "https://api.example.com/api/v1/email-events/by-status/failed"
        );
        let contact = Uuid::nil();
        assert_eq!(
            endpoints().scoped(&Scope::by_contact(&contact)),
            format!("https://api.example.com/api/v1/call-logs/by-contact/{}", contact)
        );
        assert_eq!(
            endpoints().trigger_by_string("FIRE/ALARM"),
            "https://api.example.com/api/v1/triggers/by-string/FIRE%2FALARM"
        );
    }

    #[test]
    fn auth_and_stats_paths() {
        assert_eq!(endpoints().token(), "https://api.example.com/api/v1/auth/token");
        assert_eq!(
            endpoints().count(CountKind::DailyCalls),
            "https://api.example.com/api/v1/system-stats/counts/daily-calls"
        );
    }
}
