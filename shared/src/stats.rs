//! Headline counts shown on the home view.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountKind {
    ActiveTriggers,
    Contacts,
    ContactGroups,
    DailyCalls,
}

impl CountKind {
    pub const ALL: [CountKind; 4] = [
        CountKind::ActiveTriggers,
        CountKind::Contacts,
        CountKind::ContactGroups,
        CountKind::DailyCalls,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            CountKind::ActiveTriggers => "active-triggers",
            CountKind::Contacts => "contacts",
            CountKind::ContactGroups => "contact-groups",
            CountKind::DailyCalls => "daily-calls",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CountKind::ActiveTriggers => "Active triggers",
            CountKind::Contacts => "Contacts",
            CountKind::ContactGroups => "Contact groups",
            CountKind::DailyCalls => "Calls today",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TriggerStats {
    #[serde(alias = "count")]
    pub total_active_triggers: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ContactStats {
    #[serde(alias = "count")]
    pub total_contacts: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ContactGroupStats {
    #[serde(alias = "count")]
    pub total_contact_groups: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DailyCallStats {
    #[serde(alias = "count")]
    pub total_daily_calls: u64,
}

/// All four counts; zero until a fetch succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemCounts {
    pub active_triggers: u64,
    pub contacts: u64,
    pub contact_groups: u64,
    pub daily_calls: u64,
}

impl SystemCounts {
    pub fn from_parts(
        triggers: TriggerStats,
        contacts: ContactStats,
        groups: ContactGroupStats,
        calls: DailyCallStats,
    ) -> Self {
        Self {
            active_triggers: triggers.total_active_triggers,
            contacts: contacts.total_contacts,
            contact_groups: groups.total_contact_groups,
            daily_calls: calls.total_daily_calls,
        }
    }

    pub fn get(&self, kind: CountKind) -> u64 {
        match kind {
            CountKind::ActiveTriggers => self.active_triggers,
            CountKind::Contacts => self.contacts,
            CountKind::ContactGroups => self.contact_groups,
            CountKind::DailyCalls => self.daily_calls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_named_and_generic_count_fields() {
        let named: ContactStats = serde_json::from_str(r#"{"total_contacts": 12}"#).unwrap();
        let generic: ContactStats = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        assert_eq!(named, generic);
    }

    #[test]
    fn counts_are_assembled_per_kind() {
        let counts = SystemCounts::from_parts(
            TriggerStats { total_active_triggers: 3 },
            ContactStats { total_contacts: 40 },
            ContactGroupStats { total_contact_groups: 5 },
            DailyCallStats { total_daily_calls: 17 },
        );
        let values: Vec<u64> = CountKind::ALL.iter().map(|kind| counts.get(*kind)).collect();
        assert_eq!(values, vec![3, 40, 5, 17]);
        assert_eq!(SystemCounts::default().get(CountKind::Contacts), 0);
    }
}
