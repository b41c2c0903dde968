#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record storage.
//!
//! The statistics engine only needs a snapshot of every stored report,
//! expressed by the [`RecordSource`] trait. The intake side also appends
//! reports through [`RecordStore`]. Two implementations are provided: a
//! flat JSON file ([`json_file::JsonFileStore`]) and an in-memory store
//! ([`memory::MemoryStore`]) used in tests and demos.

pub mod json_file;
pub mod memory;
pub mod paths;

use async_trait::async_trait;
use chrono::NaiveDate;
use theft_map_incident_models::IncidentRecord;

/// Errors that can occur while reading or writing records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data file is not a valid JSON record array.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supplies the full current set of incident records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns every stored record in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the underlying storage cannot be read.
    async fn list_all(&self) -> Result<Vec<IncidentRecord>, StoreError>;
}

/// A [`RecordSource`] that also accepts new records.
#[async_trait]
pub trait RecordStore: RecordSource {
    /// Appends a record to the end of the store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be persisted.
    async fn append(&self, record: IncidentRecord) -> Result<(), StoreError>;
}

/// Listing filter for the incidents endpoint and CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Raw category to match exactly. `"todos"` and `"all"` disable the
    /// filter.
    pub category: Option<String>,
    /// Earliest occurrence date, inclusive.
    pub from: Option<NaiveDate>,
    /// Latest occurrence date, inclusive.
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    /// Whether `record` passes every configured bound.
    ///
    /// Records with an unparseable date never pass a date bound.
    #[must_use]
    pub fn matches(&self, record: &IncidentRecord) -> bool {
        if let Some(category) = self.category.as_deref()
            && category != "todos"
            && category != "all"
            && record.category != category
        {
            return false;
        }

        if self.from.is_none() && self.to.is_none() {
            return true;
        }

        let Ok(date) = record.occurred_on() else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// Keeps only the records that match, preserving order.
    #[must_use]
    pub fn apply(&self, records: Vec<IncidentRecord>) -> Vec<IncidentRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = RecordFilter::default();
        assert!(filter.matches(&record("a", "hurto", "2024-01-01")));
        assert!(filter.matches(&record("b", "robo_casa", "not a date")));
    }

    #[test]
    fn category_filter_is_exact_unless_wildcard() {
        let records = vec![
            record("a", "hurto", "2024-01-01"),
            record("b", "asalto", "2024-01-02"),
        ];

        let only_hurto = RecordFilter {
            category: Some("hurto".to_string()),
            ..RecordFilter::default()
        };
        let ids: Vec<_> = only_hurto
            .apply(records.clone())
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["a"]);

        let todos = RecordFilter {
            category: Some("todos".to_string()),
            ..RecordFilter::default()
        };
        assert_eq!(todos.apply(records).len(), 2);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let filter = RecordFilter {
            category: None,
            from: Some(ymd(2024, 1, 10)),
            to: Some(ymd(2024, 1, 20)),
        };
        assert!(filter.matches(&record("a", "hurto", "2024-01-10")));
        assert!(filter.matches(&record("b", "hurto", "2024-01-20T23:00:00Z")));
        assert!(!filter.matches(&record("c", "hurto", "2024-01-09")));
        assert!(!filter.matches(&record("d", "hurto", "2024-01-21")));
        assert!(!filter.matches(&record("e", "hurto", "garbage")));
    }
}
