//! Harness error taxonomy.
//!
//! Every variant is terminal for the current run; there is no retryable category.

use std::fmt;
use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use testbed_core::TestId;

/// Completion status of a child process.
///
/// `code` is `None` when the child was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Errors that end a harness run.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("workspace reset failed ({status})")]
    #[diagnostic(
        code(testbed::reset),
        help("`{command}` must succeed before anything else runs")
    )]
    Reset { command: String, status: ProcessStatus },

    #[error("build failed ({status})")]
    #[diagnostic(code(testbed::build), help("`{command}` reported an error; no tests were run"))]
    Build { command: String, status: ProcessStatus },

    #[error("test `{id}` failed ({status})")]
    #[diagnostic(code(testbed::test), help("later tests in the suite were not run"))]
    Test { id: TestId, status: ProcessStatus },

    #[error("failed to start `{program}`: {source}")]
    #[diagnostic(code(testbed::spawn), help("check that the program exists and is executable"))]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot use `{}` as the working directory: {source}", .path.display())]
    #[diagnostic(code(testbed::workdir))]
    Workdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HarnessError {
    /// Process exit code the harness should terminate with.
    ///
    /// The failing step's own exit code is propagated when it is usable (1..=255); anything else maps to 1.
    pub fn exit_code(&self) -> i32 {
        let status = match self {
            HarnessError::Reset { status, .. }
            | HarnessError::Build { status, .. }
            | HarnessError::Test { status, .. } => Some(*status),
            HarnessError::Spawn { .. } | HarnessError::Workdir { .. } => None,
        };
        match status.and_then(|s| s.code) {
            Some(code) if (1..=255).contains(&code) => code,
            _ => 1,
        }
    }
}

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
