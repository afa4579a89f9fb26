//! Client-side filtering of the page currently held by a list view.

use std::borrow::Cow;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::format::parse_timestamp;
use crate::models::Timestamped;

/// Filter keys understood by the record types.
pub mod keys {
    pub const SEARCH: &str = "search";
    pub const STATUS: &str = "status";
    pub const GROUP: &str = "group";
    pub const PRIORITY: &str = "priority";
    pub const TRIGGER: &str = "trigger";
    pub const LEVEL: &str = "level";
}

/// Records that expose named fields to filter predicates.
pub trait Filterable: Timestamped {
    /// Values a predicate registered under `key` is tested against. A record
    /// matches when any of them does; unknown keys yield nothing.
    fn field_values(&self, key: &str) -> Vec<Cow<'_, str>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Case-insensitive substring.
    Contains(String),
    /// Exact equality, for enumerated values.
    Equals(String),
}

impl Predicate {
    pub fn contains(needle: impl Into<String>) -> Self {
        Self::Contains(needle.into())
    }

    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals(value.into())
    }

    pub fn value(&self) -> &str {
        match self {
            Predicate::Contains(value) | Predicate::Equals(value) => value,
        }
    }

    /// An empty predicate means "no filter".
    pub fn is_active(&self) -> bool {
        match self {
            Predicate::Contains(needle) => !needle.trim().is_empty(),
            Predicate::Equals(value) => !value.is_empty(),
        }
    }

    fn matches(&self, values: &[Cow<'_, str>]) -> bool {
        match self {
            Predicate::Contains(needle) => {
                let needle = needle.trim().to_lowercase();
                values
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
            }
            Predicate::Equals(expected) => values.iter().any(|value| value == expected),
        }
    }
}

/// Filter state of one list view: filter key to current predicate.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    predicates: BTreeMap<String, Predicate>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, predicate: Predicate) -> Self {
        self.set(key, predicate);
        self
    }

    /// Sets or replaces the predicate for `key`. Setting an empty predicate
    /// removes the filter.
    pub fn set(&mut self, key: &str, predicate: Predicate) {
        if predicate.is_active() {
            self.predicates.insert(key.to_string(), predicate);
        } else {
            self.predicates.remove(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Predicate> {
        self.predicates.get(key)
    }

    /// Current value for `key`, empty when unset. Convenient for binding
    /// inputs.
    pub fn value(&self, key: &str) -> &str {
        self.get(key).map(Predicate::value).unwrap_or("")
    }

    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    pub fn is_active(&self) -> bool {
        self.predicates.values().any(Predicate::is_active)
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        self.predicates
            .iter()
            .filter(|(_, predicate)| predicate.is_active())
            .all(|(key, predicate)| predicate.matches(&item.field_values(key)))
    }
}

/// Items that satisfy every active predicate, newest first.
///
/// Returns a fresh copy; the sort is stable and records whose timestamp
/// cannot be parsed go last.
pub fn apply_filters<T: Filterable + Clone>(items: &[T], filters: &Filters) -> Vec<T> {
    let mut matching: Vec<T> = items
        .iter()
        .filter(|item| filters.matches(*item))
        .cloned()
        .collect();
    sort_newest_first(&mut matching);
    matching
}

pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
    items.sort_by_cached_key(|item| Reverse(creation_instant(item)));
}

fn creation_instant<T: Timestamped>(item: &T) -> Option<DateTime<Utc>> {
    parse_timestamp(item.created_at())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        phone: &'static str,
        status: &'static str,
        created_at: &'static str,
    }

    impl Timestamped for Row {
        fn created_at(&self) -> &str {
            self.created_at
        }
    }

    impl Filterable for Row {
        fn field_values(&self, key: &str) -> Vec<Cow<'_, str>> {
            match key {
                keys::SEARCH => vec![Cow::Borrowed(self.name), Cow::Borrowed(self.phone)],
                keys::STATUS => vec![Cow::Borrowed(self.status)],
                _ => Vec::new(),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "Marta Gil",
                phone: "+34 600 100 200",
                status: "completed",
                created_at: "2024-03-01T09:00:00Z",
            },
            Row {
                name: "Luis Peña",
                phone: "+34 600 300 400",
                status: "failed",
                created_at: "2024-03-03T09:00:00Z",
            },
            Row {
                name: "Carmen Gil",
                phone: "+34 611 000 111",
                status: "completed",
                created_at: "2024-03-02T09:00:00Z",
            },
        ]
    }

    #[test]
    fn no_filters_keeps_membership_and_sorts_newest_first() {
        let result = apply_filters(&rows(), &Filters::new());
        let names: Vec<_> = result.iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Luis Peña", "Carmen Gil", "Marta Gil"]);
    }

    #[test]
    fn text_filter_is_case_insensitive_over_several_fields() {
        let filters = Filters::new().with(keys::SEARCH, Predicate::contains("GIL"));
        let names: Vec<_> = apply_filters(&rows(), &filters)
            .iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(names, vec!["Carmen Gil", "Marta Gil"]);

        let by_phone = Filters::new().with(keys::SEARCH, Predicate::contains("300 4"));
        assert_eq!(apply_filters(&rows(), &by_phone).len(), 1);
    }

    #[test]
    fn enum_filter_requires_exact_equality() {
        let filters = Filters::new().with(keys::STATUS, Predicate::equals("complete"));
        assert!(apply_filters(&rows(), &filters).is_empty());

        let filters = Filters::new().with(keys::STATUS, Predicate::equals("failed"));
        assert_eq!(apply_filters(&rows(), &filters).len(), 1);
    }

    #[test]
    fn every_active_predicate_must_match() {
        let filters = Filters::new()
            .with(keys::SEARCH, Predicate::contains("gil"))
            .with(keys::STATUS, Predicate::equals("failed"));
        assert!(apply_filters(&rows(), &filters).is_empty());
    }

    #[test]
    fn applying_twice_equals_applying_once() {
        let filters = Filters::new().with(keys::STATUS, Predicate::equals("completed"));
        let once = apply_filters(&rows(), &filters);
        let twice = apply_filters(&once, &filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_predicates_are_not_filters() {
        let mut filters = Filters::new().with(keys::SEARCH, Predicate::contains("   "));
        assert!(!filters.is_active());
        assert_eq!(apply_filters(&rows(), &filters).len(), 3);

        filters.set(keys::STATUS, Predicate::equals("failed"));
        assert!(filters.is_active());
        filters.set(keys::STATUS, Predicate::equals(""));
        assert!(!filters.is_active());
        assert_eq!(filters.value(keys::STATUS), "");
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let mut items = rows();
        items[1].created_at = "not a date";
        let result = apply_filters(&items, &Filters::new());
        assert_eq!(result.last().map(|row| row.name), Some("Luis Peña"));
    }
}
