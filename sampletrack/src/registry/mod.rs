//! Canonical stage registry for the sample-processing workflow.
//!
//! This module is the process-wide, immutable classification configuration:
//! - The canonical ordered stage list and its ordering/successor functions
//! - The status→stage classification buckets
//! - The failed-status and completed-status predicates
//!
//! All tables are `const` and every operation is pure, so the registry is
//! safe to share across concurrent tree computations without locking.

mod classify;
mod stage;

pub use classify::{
    classify_status, is_completed_status, is_failed_status, STATUS_AWAITING_PROCESSING,
};
pub use stage::{stage_order, Stage, CANONICAL_STAGES};
