//! Test fixtures for building record forests.
//!
//! Exposed as a public module so downstream crates implementing a
//! [`crate::source::SampleRecordSource`] can reuse the same fixtures in
//! their own tests.

mod fixtures;

pub use fixtures::{test_principal, ForestBuilder};
