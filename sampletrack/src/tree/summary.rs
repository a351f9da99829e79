//! The per-request summary handed to the publication collaborator.

use serde::{Deserialize, Serialize};

use crate::tree::{RecordId, StageTracker};

/// Progress summary for one top-level request.
///
/// Produced by [`crate::tree::SampleTree::convert_to_project_sample`];
/// stage snapshots are in canonical stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSample {
    /// Record id of the tree root.
    pub record_id: RecordId,
    /// Per-stage aggregates in canonical stage order.
    pub stages: Vec<StageTracker>,
    /// True iff every node in the tree ended up failed.
    pub failed: bool,
    /// True iff every node in the tree ended up complete.
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Stage;
    use crate::tree::WorkflowSample;
    use chrono::Utc;

    #[test]
    fn test_project_sample_serializes_stage_labels() {
        let now = Utc::now();
        let node = WorkflowSample::new(7, Stage::DataQc, "x", now, now);
        let summary = ProjectSample {
            record_id: 7,
            stages: vec![StageTracker::new(Stage::DataQc, &node)],
            failed: false,
            complete: false,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["record_id"], 7);
        assert_eq!(json["stages"][0]["stage"], "Data QC");
        assert_eq!(json["stages"][0]["complete"], "unset");
    }
}
