//! External record-source boundary.
//!
//! The engine never fetches, caches, or persists records itself. An upstream
//! collaborator (the LIMS query layer) produces one forest of raw
//! sample-tracking records per request; [`SampleRecordSource`] is the
//! capability interface that boundary implements, independent of any
//! specific vendor data store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;
use crate::tree::RecordId;
use crate::utils::from_epoch_millis;

/// The principal on whose behalf a tree is computed.
///
/// Identity only: authorization happens upstream, before records are handed
/// to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The requesting user's name.
    pub username: String,
}

impl Principal {
    /// Creates a new principal.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// One raw sample-tracking record as produced by the upstream store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSampleRecord {
    /// Unique id of the record within its request.
    pub record_id: RecordId,
    /// Parent record id; `None` marks the tree root.
    pub parent_id: Option<RecordId>,
    /// Raw free-text status attached by the tracking system.
    pub status: String,
    /// When the sample entered its current workflow.
    pub start_time: DateTime<Utc>,
    /// When the record was last updated.
    pub update_time: DateTime<Utc>,
}

impl RawSampleRecord {
    /// Creates a new raw record.
    #[must_use]
    pub fn new(
        record_id: RecordId,
        parent_id: Option<RecordId>,
        status: impl Into<String>,
        start_time: DateTime<Utc>,
        update_time: DateTime<Utc>,
    ) -> Self {
        Self {
            record_id,
            parent_id,
            status: status.into(),
            start_time,
            update_time,
        }
    }

    /// Creates a raw record from the epoch-millisecond times the LIMS
    /// transports on the wire.
    ///
    /// Returns `None` when either time is out of the representable range.
    #[must_use]
    pub fn from_epoch_millis(
        record_id: RecordId,
        parent_id: Option<RecordId>,
        status: impl Into<String>,
        start_millis: i64,
        update_millis: i64,
    ) -> Option<Self> {
        Some(Self::new(
            record_id,
            parent_id,
            status,
            from_epoch_millis(start_millis)?,
            from_epoch_millis(update_millis)?,
        ))
    }
}

/// Capability interface for the upstream record store.
#[cfg_attr(test, mockall::automock)]
pub trait SampleRecordSource {
    /// Fetches the full sample forest for one request.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Source`] when the upstream store cannot
    /// produce the forest.
    fn fetch_request_records(&self, request_id: &str) -> Result<Vec<RawSampleRecord>, TrackerError>;
}
