//! Test executor that spawns each test id as `<workdir>/<id>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use testbed_core::TestId;
use tracing::debug;

use crate::harness::{HarnessError, HarnessResult, ProcessStatus, TestExecutor, TestOutcome};

/// Spawns test executables with no arguments and inherited stdio.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    workdir: PathBuf,
}

impl ProcessExecutor {
    /// `workdir` should already be canonical (see [`super::resolve_workdir`]); relative program paths combined
    /// with `current_dir` resolve differently across platforms.
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn program_for(&self, id: &TestId) -> PathBuf {
        self.workdir.join(id.as_str())
    }
}

impl TestExecutor for ProcessExecutor {
    fn execute(&self, id: &TestId) -> HarnessResult<TestOutcome> {
        let program = self.program_for(id);
        debug!(program = %program.display(), "spawning");

        let status = Command::new(&program)
            .current_dir(&self.workdir)
            .status()
            .map_err(|source| HarnessError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        Ok(ProcessStatus::from(status).into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_program_path_is_workdir_relative() {
        let executor = ProcessExecutor::new("/work/rbf");
        assert_eq!(
            executor.program_for(&TestId::new("rbftest_08b")),
            PathBuf::from("/work/rbf/rbftest_08b")
        );
    }

    #[test]
    fn test_missing_executable_is_a_spawn_error() {
        let executor = ProcessExecutor::new(std::env::temp_dir());
        let err = executor.execute(&TestId::new("testbed_no_such_test_binary")).unwrap_err();
        assert!(matches!(err, HarnessError::Spawn { .. }));
    }
}
