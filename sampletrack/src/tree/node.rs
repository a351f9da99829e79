//! A single sample-tracking record with tree linkage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::Stage;

/// Identifier of a sample-tracking record, unique within one tree.
pub type RecordId = u64;

/// One sample-tracking record enriched with its workflow stage and tree
/// linkage.
///
/// Children are an owned, ordered list of child record ids; the parent is a
/// non-owning id back-reference resolved through the tree's id→node map, so
/// it can only be used for ancestry lookups, never to free or duplicate
/// nodes. The stage is fixed at construction; the failed and complete flags
/// are monotonic and never reset within one tree's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSample {
    record_id: RecordId,
    stage: Stage,
    status: String,
    start_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
    failed: bool,
    complete: bool,
    parent: Option<RecordId>,
    children: Vec<RecordId>,
}

impl WorkflowSample {
    /// Creates a new sample node. Failed and complete default to false.
    #[must_use]
    pub fn new(
        record_id: RecordId,
        stage: Stage,
        status: impl Into<String>,
        start_time: DateTime<Utc>,
        update_time: DateTime<Utc>,
    ) -> Self {
        Self {
            record_id,
            stage,
            status: status.into(),
            start_time,
            update_time,
            failed: false,
            complete: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the record id.
    #[must_use]
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Returns the workflow stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the raw status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns when the sample entered its current workflow.
    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns when the record was last updated.
    #[must_use]
    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    /// Returns whether the sample has failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Marks the sample failed. Monotonic: there is no way back.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Returns whether the sample has completed its workflow.
    #[must_use]
    pub fn complete(&self) -> bool {
        self.complete
    }

    /// Marks the sample complete. Monotonic: there is no way back.
    pub fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// Returns the parent record id, or `None` for the tree root.
    #[must_use]
    pub fn parent(&self) -> Option<RecordId> {
        self.parent
    }

    /// Sets the parent back-reference.
    pub fn set_parent(&mut self, parent: RecordId) {
        self.parent = Some(parent);
    }

    /// Returns the owned child record ids in insertion order.
    #[must_use]
    pub fn children(&self) -> &[RecordId] {
        &self.children
    }

    /// Appends a child record id.
    pub fn add_child(&mut self, child: RecordId) {
        self.children.push(child);
    }

    /// Returns true iff the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
