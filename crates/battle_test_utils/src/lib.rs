//! # Battle Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Catalog, unit and army fixtures
//! - Scripted targeting strategies
//! - Determinism harness for seeded battles
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
