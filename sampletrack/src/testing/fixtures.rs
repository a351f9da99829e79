//! Builders for raw record forests.

use chrono::{Duration, Utc};

use crate::source::{Principal, RawSampleRecord};
use crate::tree::RecordId;

/// The principal used across test scenarios.
#[must_use]
pub fn test_principal() -> Principal {
    Principal::new("labuser")
}

/// A builder for raw record forests.
///
/// Each record gets a distinct start/update time derived from its id so
/// stage time windows are deterministic.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    records: Vec<RawSampleRecord>,
}

impl ForestBuilder {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the root record.
    #[must_use]
    pub fn root(self, record_id: RecordId, status: impl Into<String>) -> Self {
        self.record(record_id, None, status)
    }

    /// Adds a child record under `parent_id`.
    #[must_use]
    pub fn child(
        self,
        record_id: RecordId,
        parent_id: RecordId,
        status: impl Into<String>,
    ) -> Self {
        self.record(record_id, Some(parent_id), status)
    }

    /// Adds a record with an explicit parent link.
    #[must_use]
    pub fn record(
        mut self,
        record_id: RecordId,
        parent_id: Option<RecordId>,
        status: impl Into<String>,
    ) -> Self {
        let base = Utc::now();
        let offset = Duration::seconds(i64::try_from(record_id).unwrap_or(i64::MAX));
        self.records.push(RawSampleRecord::new(
            record_id,
            parent_id,
            status,
            base + offset,
            base + offset * 10,
        ));
        self
    }

    /// Returns the assembled forest.
    #[must_use]
    pub fn build(self) -> Vec<RawSampleRecord> {
        self.records
    }
}
