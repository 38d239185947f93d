//! Provide the shared, pure vocabulary of the testbed harness.
//!
//! This crate is intentionally small and dependency-light. It describes *what* a harness run is made of:
//! - the suite registry (which tests, in which order, under which lifecycle), and
//! - the state vocabulary the run controller moves through.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no process spawning, no global state.
//! - Executing anything (make, test binaries) lives in the `testbed` crate behind traits.

pub mod lifecycle;
pub mod suites;

pub use lifecycle::{BuildState, Lifecycle, Parallelism, RunState};
pub use suites::{SuiteId, SuiteInfo, TestId};
