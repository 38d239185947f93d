//! Harness I/O boundary interfaces
//!
//! The run controller never spawns anything itself. It talks to three collaborators:
//! - [`Workspace`]: the clean operation (`make clean`)
//! - [`Builder`]: the compile-all operation (`make`, `make -j`, ...)
//! - [`TestExecutor`]: one test executable, judged by its exit status
//!
//! Process-backed and dry-run implementations live in `crate::backend`. Tests substitute recording fakes.

use testbed_core::{Parallelism, TestId};

use super::errors::{HarnessResult, ProcessStatus};

/// Outcome of a single test executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed(ProcessStatus),
}

impl From<ProcessStatus> for TestOutcome {
    fn from(status: ProcessStatus) -> Self {
        if status.success() {
            TestOutcome::Passed
        } else {
            TestOutcome::Failed(status)
        }
    }
}

/// Mutating "clean" rights over the shared workspace.
pub trait Workspace {
    /// Remove build artifacts and stray fixture files.
    ///
    /// A nonzero status from the clean operation is returned as [`super::HarnessError::Reset`].
    fn reset(&self) -> HarnessResult<()>;
}

/// Produces the test executables.
pub trait Builder {
    /// Build every test executable, using `parallelism` as an opaque hint.
    ///
    /// A nonzero status is returned as [`super::HarnessError::Build`].
    fn build(&self, parallelism: Parallelism) -> HarnessResult<()>;
}

/// Runs one test executable to completion.
pub trait TestExecutor {
    /// Spawn `id` with no arguments and block until it exits.
    ///
    /// Returns `Err` only when the executable could not be run at all; a nonzero exit is `Ok(Failed)`.
    fn execute(&self, id: &TestId) -> HarnessResult<TestOutcome>;
}

impl<T: Workspace + ?Sized> Workspace for &T {
    fn reset(&self) -> HarnessResult<()> {
        (**self).reset()
    }
}

impl<T: Builder + ?Sized> Builder for &T {
    fn build(&self, parallelism: Parallelism) -> HarnessResult<()> {
        (**self).build(parallelism)
    }
}

impl<T: TestExecutor + ?Sized> TestExecutor for &T {
    fn execute(&self, id: &TestId) -> HarnessResult<TestOutcome> {
        (**self).execute(id)
    }
}
