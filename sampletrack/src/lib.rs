//! # Sampletrack
//!
//! A workflow-stage classification and tree-aggregation engine for
//! laboratory sample tracking.
//!
//! Sampletrack turns the raw, free-text statuses attached to sample-tracking
//! records by an upstream LIMS into a per-request progress report:
//!
//! - **Stage classification**: a fixed registry maps each raw status into one
//!   canonical, ordered workflow stage (submission through completion)
//! - **Tree aggregation**: records form a parent/child sample tree; per-leaf
//!   failure and completion observations are propagated upward into per-stage
//!   aggregates and a single verdict for the whole request
//! - **Partial-failure semantics**: a failed branch only counts against its
//!   stage when no sibling branch anywhere on the path to the root survives
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sampletrack::prelude::*;
//!
//! // Fetch the sample forest for a request from the record source,
//! // assemble the tree, and summarize it.
//! let records = source.fetch_request_records("IGO-012345")?;
//! let tree = build_sample_tree(records, Principal::new("labuser"));
//! let summary = tree.convert_to_project_sample();
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod errors;
pub mod registry;
pub mod source;
pub mod testing;
pub mod tree;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::errors::TrackerError;
    pub use crate::registry::{
        classify_status, is_completed_status, is_failed_status, stage_order, Stage,
        CANONICAL_STAGES,
    };
    pub use crate::source::{Principal, RawSampleRecord, SampleRecordSource};
    pub use crate::tree::{
        build_project_sample, build_sample_tree, track_request, Completion, ProjectSample,
        RecordId, SampleTree, StageTracker, WorkflowSample,
    };
}
