//! Status→stage classification buckets.
//!
//! The buckets mirror the workflow names used by the upstream LIMS. A status
//! belongs to exactly one bucket; membership in the failed set is independent
//! of the stage a status maps to.

use crate::errors::TrackerError;
use crate::registry::Stage;

/// Status of a sample queued ahead of its first workflow.
pub const STATUS_AWAITING_PROCESSING: &str = "Awaiting Processing";

/// Failed statuses map to the unknown sentinel stage; the true stage must be
/// recovered from surrounding samples.
const FAILED_STATUSES: &[&str] = &[
    "Failed - Completed",
    "Failed - Pending User Decision",
    "Failed - Library/Pool Quality Control",
];

const EXTRACTION_STATUSES: &[&str] = &["Completed - DNA Extraction", "Returned to User"];

const QUALITY_CONTROL_STATUSES: &[&str] = &[
    "Ready for - Library/Pool Quality Control",
    "Completed - Library/Pool Quality Control",
];

const LIBRARY_PREP_STATUSES: &[&str] = &[
    "Completed - Generic Library Preparation",
    "Completed - Library Clean Up/Size Selection",
    "In Process - KAPA Library Preparation",
    "Completed - KAPA Library Preparation",
    "Completed - Capture from KAPA Library",
    "Completed - Generic Normalization Plate Setup",
    "Completed - MSK Access Normalization Plate Setup",
    "Completed - Pooling of Sample Libraries by Volume",
    "Ready for - Pooling of Sample Libraries by Volume",
    "In Process - Pooling of Sample Libraries for Sequencing",
    "In Process - Capture - Hybridization",
    "Ready for - MSK Access Capture - Hybridization",
    "Completed - Capture - Hybridization",
    "Completed - MSK Access Capture - Hybridization",
    "Completed - MSK Access Library Preparation",
    "Completed - Normalization Plate Setup",
    "Ready for - Normalization Plate Setup",
    "Completed - Archer Library Preparation Experiment",
    "Completed - TruSeqRNA Poly-A cDNA Preparation",
    "Completed - STR/Fragment Analysis Profiling",
    "Completed - STR PCR Human",
    "STR",
    "Ready for - Digital Droplet PCR",
    "Completed - Digital Droplet PCR",
    "Completed - PCR Cycle Re-Amplification",
    "Completed - 10X Genomics cDNA Preparation",
    "Completed - 10X Genomics Library Preparation",
];

const SEQUENCING_STATUSES: &[&str] = &[
    "Ready for - Pooling of Sample Libraries for Sequencing",
    "Ready for - Illumina Sequencing",
    "In Process - Illumina Sequencing",
    "Completed - Pooling of Sample Libraries for Sequencing",
    "Completed - Illumina Sequencing",
    "Completed - Illumina Sequencing Setup",
    "Completed - Illumina Sequencing Planning/Denaturing",
    "Completed - Illumina Sequencing Analysis",
];

/// Classifies a raw status string into its workflow stage.
///
/// Failed statuses classify to [`Stage::Unknown`] because their true stage
/// has to be recovered from surrounding samples.
///
/// # Errors
///
/// Returns [`TrackerError::UnrecognizedStatus`] when the status matches no
/// bucket. Callers catch this at the record boundary and exclude the record
/// from stage aggregation; it must never abort a whole tree computation.
pub fn classify_status(status: &str) -> Result<Stage, TrackerError> {
    if LIBRARY_PREP_STATUSES.contains(&status) {
        Ok(Stage::LibraryPreparation)
    } else if SEQUENCING_STATUSES.contains(&status) {
        Ok(Stage::Sequencing)
    } else if QUALITY_CONTROL_STATUSES.contains(&status) {
        Ok(Stage::QualityControl)
    } else if status == STATUS_AWAITING_PROCESSING {
        Ok(Stage::AwaitingProcessing)
    } else if EXTRACTION_STATUSES.contains(&status) {
        Ok(Stage::Extraction)
    } else if FAILED_STATUSES.contains(&status) {
        Ok(Stage::Unknown)
    } else {
        Err(TrackerError::unrecognized_status(status))
    }
}

/// Returns true iff the status belongs to the fixed failed-status set.
#[must_use]
pub fn is_failed_status(status: &str) -> bool {
    FAILED_STATUSES.contains(&status)
}

/// Returns true iff the status reports a finished workflow step.
#[must_use]
pub fn is_completed_status(status: &str) -> bool {
    status.starts_with("Completed")
}
