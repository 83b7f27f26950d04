//! Test helpers shared across crates.
//!
//! [`fixtures`] holds the record types the `record_sync` suites propagate
//! between; [`text`] parses placeholders captured by behavioural steps.

pub mod fixtures;
pub mod text;
