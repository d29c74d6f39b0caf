//! Service layer for doccompare business logic.
//!
//! This module contains domain logic separated from UI concerns.
//! Services can be used by the CLI, the web server, or other interfaces.

pub mod compare;

pub use compare::{clean_completion, CompareError, CompareRequest, ComparisonService};
