//! Hierarchical sample tree and per-request aggregation.
//!
//! This module contains the aggregation side of the engine:
//! - [`WorkflowSample`]: one sample-tracking record with tree linkage
//! - [`StageTracker`]: per-stage aggregate counters and tri-state completion
//! - [`SampleTree`]: node storage, stage registration, leaf propagation and
//!   conversion to the final [`ProjectSample`] summary
//! - [`build_sample_tree`]: assembly of a tree from a raw record forest

mod builder;
#[cfg(test)]
mod integration_tests;
mod node;
mod project_tree;
mod summary;
mod tracker;

pub use builder::{build_project_sample, build_sample_tree, track_request};
pub use node::{RecordId, WorkflowSample};
pub use project_tree::SampleTree;
pub use summary::ProjectSample;
pub use tracker::{Completion, StageTracker};
