//! Acceptance tests for the cachectl workspace.
//!
//! Scenarios live in `tests/features` and are run by the `bdd` test target
//! against [`CachectlWorld`](core::CachectlWorld).

pub mod core;
pub mod steps;
pub mod tracing;
