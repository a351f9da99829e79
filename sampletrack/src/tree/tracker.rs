//! Per-stage aggregate counters and tri-state completion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::Stage;
use crate::tree::WorkflowSample;

/// Three-valued completion state of a stage aggregate.
///
/// `Unset` means no leaf of the stage has been observed yet, which is
/// distinct from "observed and incomplete".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// No leaf of this stage has been observed yet.
    #[default]
    Unset,
    /// Every observed leaf of this stage has completed.
    Complete,
    /// At least one observed leaf of this stage is still pending.
    Incomplete,
}

impl Completion {
    /// Returns the observed value, or `None` when no leaf has been observed.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Complete => Some(true),
            Self::Incomplete => Some(false),
        }
    }
}

/// Aggregate for one canonical stage across a whole sample tree.
///
/// Created on the first registration of a node of its stage and merged into
/// on every subsequent one; never replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTracker {
    stage: Stage,
    sample_count: u64,
    failed_sample_count: u64,
    start_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
    complete: Completion,
}

impl StageTracker {
    /// Initializes a tracker from the first node registered for its stage.
    #[must_use]
    pub fn new(stage: Stage, node: &WorkflowSample) -> Self {
        Self {
            stage,
            sample_count: 1,
            failed_sample_count: 0,
            start_time: node.start_time(),
            update_time: node.update_time(),
            complete: Completion::Unset,
        }
    }

    /// Merges another node of this stage into the aggregate: the sample
    /// count grows by one and the stage's time window widens to cover the
    /// node.
    pub fn register(&mut self, node: &WorkflowSample) {
        self.sample_count += 1;
        self.start_time = self.start_time.min(node.start_time());
        self.update_time = self.update_time.max(node.update_time());
    }

    /// Counts one leaf whose failure reached the tree root unrescued.
    pub fn add_failed_sample(&mut self) {
        self.failed_sample_count += 1;
    }

    /// Returns the stage this tracker aggregates.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the number of registered samples.
    #[must_use]
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Returns the number of unrescued failed leaves.
    #[must_use]
    pub fn failed_sample_count(&self) -> u64 {
        self.failed_sample_count
    }

    /// Returns the earliest start time over all registered nodes.
    #[must_use]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns the latest update time over all registered nodes.
    #[must_use]
    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    /// Returns the tri-state completion flag.
    #[must_use]
    pub fn complete(&self) -> Completion {
        self.complete
    }

    /// Folds one leaf observation into the completion flag.
    ///
    /// `false` makes the stage incomplete and is sticky: later completed
    /// leaves cannot clear it. `true` initializes an unset flag and
    /// otherwise ANDs with the value observed so far.
    pub fn set_complete(&mut self, value: bool) {
        self.complete = match (self.complete, value) {
            (_, false) => Completion::Incomplete,
            (Completion::Unset, true) => Completion::Complete,
            (observed, true) => observed,
        };
    }
}
