//! Test sequencer: runs an ordered list of test executables, fail-fast.

use testbed_core::TestId;
use tracing::{info, info_span};

use super::errors::{HarnessError, HarnessResult};
use super::interfaces::{TestExecutor, TestOutcome};

/// Walks a test list in declared order, one blocking child at a time.
pub struct TestSequencer<E> {
    executor: E,
}

impl<E: TestExecutor> TestSequencer<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Run every id in order and stop at the first one that does not pass.
    ///
    /// Ids after a failure are never invoked. An empty list succeeds without spawning anything.
    pub fn run_all(&self, ids: &[TestId]) -> HarnessResult<()> {
        for (index, id) in ids.iter().enumerate() {
            let _span = info_span!("test", id = %id, position = index + 1, of = ids.len()).entered();

            match self.executor.execute(id)? {
                TestOutcome::Passed => info!("passed"),
                TestOutcome::Failed(status) => {
                    return Err(HarnessError::Test { id: *id, status });
                }
            }
        }
        Ok(())
    }
}
