//! Orchestration core: reset, build, and run a suite's tests in order.
//!
//! ## Modules
//!
//! - `interfaces` - `Workspace`, `Builder`, `TestExecutor` traits (the only way out to processes)
//! - `sequencer` - fail-fast, strictly sequential test runs
//! - `controller` - strict and loose lifecycles
//! - `guard` - the strict lifecycle's scoped final reset
//! - `session` - per-run state record
//! - `errors` - `HarnessError` and exit-code mapping

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod controller;
pub mod errors;
pub mod guard;
pub mod interfaces;
pub mod sequencer;
pub mod session;

pub use controller::RunController;
pub use errors::{HarnessError, HarnessResult, ProcessStatus};
pub use guard::ResetGuard;
pub use interfaces::{Builder, TestExecutor, TestOutcome, Workspace};
pub use sequencer::TestSequencer;
pub use session::RunSession;
