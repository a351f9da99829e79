//! Utility functions for timestamp handling.

pub mod timestamps;

pub use timestamps::{from_epoch_millis, now_utc, Timestamp};
