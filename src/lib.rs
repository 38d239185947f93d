#![forbid(unsafe_code)]
//! testbed: clean-build-run harness for the storage-layer test suites
//!
//! A run resets the component's workspace, builds every test executable, then runs the suite's tests one at a
//! time in their declared order, stopping at the first failure. The `rbf` suite resets the workspace again on
//! every exit path; the `rm` suite leaves a failed build in place for inspection.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli`, `backend`, and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a harness bug (logic error), use `.expect("INVARIANT: reason")`
//!   with a clear explanation.

pub mod backend;
pub mod cli;
pub mod harness;
pub mod version;

pub use testbed_core::{suites, BuildState, Lifecycle, Parallelism, RunState, SuiteId, SuiteInfo, TestId};

pub use harness::{HarnessError, HarnessResult, RunController, RunSession};
