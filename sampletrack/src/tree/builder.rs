//! Assembly of a [`SampleTree`] from a raw record forest.
//!
//! This is the control-flow orchestration around the tree: classify every
//! record's status, resolve stages for failed records, link parents and
//! children, register stages, and fold in each leaf exactly once. All
//! per-record problems (unrecognized statuses, orphaned parent links) are
//! logged and skipped so that a few malformed records never prevent
//! reporting progress on the rest of the tree.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::errors::TrackerError;
use crate::registry::{classify_status, is_failed_status, Stage};
use crate::source::{Principal, RawSampleRecord, SampleRecordSource};
use crate::tree::{ProjectSample, RecordId, SampleTree, WorkflowSample};

/// Builds a fully populated sample tree from a forest of raw records.
///
/// Records whose parent id points outside the forest are logged and
/// skipped. When the forest contains more than one parentless record the
/// first becomes the root and the rest are logged and kept as unlinked
/// nodes.
#[must_use]
pub fn build_sample_tree(records: &[RawSampleRecord], principal: Principal) -> SampleTree {
    let mut tree = SampleTree::new(principal);

    let by_id: HashMap<RecordId, &RawSampleRecord> = records
        .iter()
        .map(|record| (record.record_id, record))
        .collect();

    // Classify every status up front; failed records then inherit their
    // stage from the nearest ancestor in a known stage.
    let classified: HashMap<RecordId, Stage> = records
        .iter()
        .map(|record| {
            let stage = classify_status(&record.status).unwrap_or_else(|err| {
                warn!(record_id = record.record_id, %err, "excluding record from stage aggregates");
                Stage::Unknown
            });
            (record.record_id, stage)
        })
        .collect();

    for record in records {
        if let Some(parent_id) = record.parent_id {
            if !by_id.contains_key(&parent_id) {
                warn!(
                    record_id = record.record_id,
                    parent_id, "skipping record with a parent missing from the forest"
                );
                continue;
            }
        }

        let stage = resolve_stage(record, &classified, &by_id);
        let mut sample = WorkflowSample::new(
            record.record_id,
            stage,
            record.status.clone(),
            record.start_time,
            record.update_time,
        );
        if is_failed_status(&record.status) {
            sample.mark_failed();
        }
        tree.add_sample(sample);

        if record.parent_id.is_none() {
            if tree.root().is_some() {
                warn!(record_id = record.record_id, "forest has more than one root");
            } else {
                tree.set_root(record.record_id);
            }
        }
    }

    for record in records {
        if let Some(parent_id) = record.parent_id {
            if tree.sample(record.record_id).is_some() {
                tree.link_child(parent_id, record.record_id);
            }
        }
    }

    for record in records {
        if tree.sample(record.record_id).is_some() {
            tree.add_stage_to_tracked(record.record_id);
        }
    }

    let leaves: Vec<RecordId> = tree
        .samples()
        .filter(|sample| sample.is_leaf())
        .map(WorkflowSample::record_id)
        .collect();
    for leaf_id in leaves {
        tree.update_tree_on_leaf_status(leaf_id);
    }

    tree
}

/// Builds the tree and converts it into its summary in one step.
#[must_use]
pub fn build_project_sample(
    records: &[RawSampleRecord],
    principal: Principal,
) -> Option<ProjectSample> {
    build_sample_tree(records, principal).convert_to_project_sample()
}

/// Fetches the record forest for one request and summarizes it.
///
/// # Errors
///
/// Returns [`TrackerError::Source`] when the record source cannot produce
/// the forest.
pub fn track_request(
    source: &dyn SampleRecordSource,
    request_id: &str,
    principal: Principal,
) -> Result<Option<ProjectSample>, TrackerError> {
    let records = source.fetch_request_records(request_id)?;
    Ok(build_project_sample(&records, principal))
}

/// Resolves the stage for one record.
///
/// Failed statuses classify to the unknown sentinel; their true stage is
/// taken from the nearest ancestor in a known stage, since a failed sample
/// fails inside the workflow its parent was undergoing.
fn resolve_stage(
    record: &RawSampleRecord,
    classified: &HashMap<RecordId, Stage>,
    by_id: &HashMap<RecordId, &RawSampleRecord>,
) -> Stage {
    let stage = classified
        .get(&record.record_id)
        .copied()
        .unwrap_or(Stage::Unknown);
    if stage.is_valid() || !is_failed_status(&record.status) {
        return stage;
    }

    let mut seen = HashSet::new();
    let mut current = record.parent_id;
    while let Some(parent_id) = current {
        if !seen.insert(parent_id) {
            // Cycle in the raw parent links; give up on resolution.
            break;
        }
        if let Some(parent_stage) = classified.get(&parent_id) {
            if parent_stage.is_valid() {
                return *parent_stage;
            }
        }
        current = by_id.get(&parent_id).and_then(|parent| parent.parent_id);
    }
    stage
}
