//! Testing infrastructure for apexlog unit and integration tests.
//!
//! This crate provides utilities for writing readable parser tests:
//! - `fixtures`: `LogBuilder`, a fluent builder for well-formed log text
//! - `assertions`: tree outlines for snapshots and invariant checks

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_tree_invariants, outline};
pub use fixtures::LogBuilder;
