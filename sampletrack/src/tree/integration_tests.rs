//! End-to-end scenarios over assembly, propagation and conversion.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use crate::registry::Stage;
use crate::source::{MockSampleRecordSource, RawSampleRecord};
use crate::testing::{test_principal, ForestBuilder};
use crate::tree::{build_sample_tree, track_request, Completion, StageTracker};

#[test]
fn test_request_with_mixed_stage_progress() {
    // Root R with leaf A (library prep, completed) and leaf B (sequencing,
    // still in process).
    let records = ForestBuilder::new()
        .root(1, "Ready for - Library/Pool Quality Control")
        .child(2, 1, "Completed - KAPA Library Preparation")
        .child(3, 1, "In Process - Illumina Sequencing")
        .build();

    let tree = build_sample_tree(&records, test_principal());
    let summary = tree.convert_to_project_sample().unwrap();

    assert_eq!(summary.record_id, 1);
    let stages: Vec<(Stage, u64, Completion)> = summary
        .stages
        .iter()
        .map(|t| (t.stage(), t.sample_count(), t.complete()))
        .collect();
    assert_eq!(
        stages,
        vec![
            (Stage::LibraryPreparation, 1, Completion::Complete),
            (Stage::QualityControl, 1, Completion::Unset),
            (Stage::Sequencing, 1, Completion::Incomplete),
        ]
    );
    // Neither B nor the root ever completes, and nothing failed.
    assert!(!summary.complete);
    assert!(!summary.failed);
}

#[test]
fn test_stage_completion_fold_is_order_independent() {
    let forward = ForestBuilder::new()
        .root(1, "Ready for - Library/Pool Quality Control")
        .child(2, 1, "Completed - Illumina Sequencing")
        .child(3, 1, "In Process - Illumina Sequencing")
        .build();
    let mut reversed = forward.clone();
    reversed[1..].reverse();

    for records in [forward, reversed] {
        let tree = build_sample_tree(&records, test_principal());
        let sequencing: &StageTracker = tree
            .stages()
            .find(|t| t.stage() == Stage::Sequencing)
            .unwrap();
        assert_eq!(sequencing.complete(), Completion::Incomplete);
        assert_eq!(sequencing.sample_count(), 2);
    }
}

#[test]
fn test_partial_failure_is_rescued_by_surviving_branch() {
    // One aliquot fails mid-prep, its sibling carries the sample through.
    let records = ForestBuilder::new()
        .root(1, "Ready for - Library/Pool Quality Control")
        .child(2, 1, "In Process - KAPA Library Preparation")
        .child(3, 2, "Failed - Pending User Decision")
        .child(4, 2, "Completed - Illumina Sequencing")
        .build();

    let tree = build_sample_tree(&records, test_principal());

    assert!(tree.sample(3).unwrap().failed());
    assert!(!tree.sample(2).unwrap().failed());
    assert!(!tree.sample(1).unwrap().failed());
    // The failed aliquot inherits library prep from its parent, and its
    // rescued failure is not counted against the stage.
    let library_prep = tree
        .stages()
        .find(|t| t.stage() == Stage::LibraryPreparation)
        .unwrap();
    assert_eq!(library_prep.failed_sample_count(), 0);
}

#[test]
fn test_whole_request_failure_reaches_root_and_is_counted() {
    let records = ForestBuilder::new()
        .root(1, "Failed - Completed")
        .child(2, 1, "In Process - KAPA Library Preparation")
        .child(3, 2, "Failed - Library/Pool Quality Control")
        .build();

    let tree = build_sample_tree(&records, test_principal());

    // The failed path climbs through the library prep node to the root.
    assert!(tree.sample(2).unwrap().failed());
    assert!(tree.sample(1).unwrap().failed());
    let library_prep = tree
        .stages()
        .find(|t| t.stage() == Stage::LibraryPreparation)
        .unwrap();
    assert_eq!(library_prep.failed_sample_count(), 1);

    let summary = tree.convert_to_project_sample().unwrap();
    assert!(summary.failed);
    assert!(!summary.complete);
}

#[test]
fn test_stage_time_window_covers_all_registered_nodes() {
    let base = Utc::now();
    let earlier = RawSampleRecord::new(
        2,
        Some(1),
        "In Process - Illumina Sequencing",
        base - Duration::hours(4),
        base - Duration::hours(3),
    );
    let later = RawSampleRecord::new(
        3,
        Some(1),
        "Completed - Illumina Sequencing",
        base - Duration::hours(2),
        base,
    );
    let root = RawSampleRecord::new(
        1,
        None,
        "Ready for - Library/Pool Quality Control",
        base - Duration::hours(5),
        base,
    );
    let records = vec![root, earlier.clone(), later.clone()];

    let tree = build_sample_tree(&records, test_principal());
    let sequencing = tree
        .stages()
        .find(|t| t.stage() == Stage::Sequencing)
        .unwrap();
    assert_eq!(sequencing.start_time(), earlier.start_time);
    assert_eq!(sequencing.update_time(), later.update_time);
}

#[test]
fn test_track_request_through_record_source() {
    let mut source = MockSampleRecordSource::new();
    source
        .expect_fetch_request_records()
        .withf(|request_id| request_id == "IGO-012345")
        .returning(|_| {
            Ok(ForestBuilder::new()
                .root(1, "Ready for - Library/Pool Quality Control")
                .child(2, 1, "Completed - Illumina Sequencing")
                .build())
        });

    let summary = track_request(&source, "IGO-012345", test_principal())
        .unwrap()
        .unwrap();

    assert_eq!(summary.record_id, 1);
    assert_eq!(summary.stages.len(), 2);
    assert!(!summary.failed);
}

#[test]
fn test_track_request_propagates_source_errors() {
    use crate::errors::TrackerError;

    let mut source = MockSampleRecordSource::new();
    source
        .expect_fetch_request_records()
        .returning(|_| Err(TrackerError::source("connection refused")));

    let err = track_request(&source, "IGO-012345", test_principal()).unwrap_err();
    assert_eq!(err, TrackerError::source("connection refused"));
}

#[test]
fn test_malformed_records_do_not_prevent_partial_results() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // An unmappable status and an orphaned parent link are logged and
    // skipped; the rest of the tree still reports progress.
    let records = ForestBuilder::new()
        .root(1, "Ready for - Library/Pool Quality Control")
        .child(2, 1, "Ready for - Teleportation")
        .child(3, 99, "Completed - Illumina Sequencing")
        .child(4, 1, "Completed - KAPA Library Preparation")
        .build();

    let tree = build_sample_tree(&records, test_principal());
    let summary = tree.convert_to_project_sample().unwrap();

    assert_eq!(tree.sample(3), None);
    assert_eq!(tree.sample(2).unwrap().stage(), Stage::Unknown);
    let stages: Vec<Stage> = summary.stages.iter().map(StageTracker::stage).collect();
    assert_eq!(stages, vec![Stage::LibraryPreparation, Stage::QualityControl]);
    assert!(!summary.failed);
}

#[test]
fn test_summary_serializes_for_publication() {
    let records = ForestBuilder::new()
        .root(1, "Ready for - Library/Pool Quality Control")
        .child(2, 1, "Completed - KAPA Library Preparation")
        .build();

    let summary = build_sample_tree(&records, test_principal())
        .convert_to_project_sample()
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["record_id"], 1);
    assert_eq!(json["failed"], false);
    assert_eq!(json["stages"][0]["stage"], "Library Preparation");
    assert_eq!(json["stages"][0]["complete"], "complete");
}
