//! `make`-driven workspace reset and build.
//!
//! Mirrors how the suites were always driven by hand: `make clean`, then `make` (or `make -j`). Stdout of both
//! is captured and logged at debug level; stderr goes straight to the console so compiler errors stay visible.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use testbed_core::Parallelism;
use tracing::debug;

use crate::harness::{Builder, HarnessError, HarnessResult, ProcessStatus, Workspace};

/// Default build tool.
pub const DEFAULT_MAKE: &str = "make";

/// Runs a make-compatible tool inside the workspace directory.
#[derive(Debug, Clone)]
pub struct MakeBackend {
    program: OsString,
    workdir: PathBuf,
}

impl MakeBackend {
    /// `workdir` should already be canonical (see [`super::resolve_workdir`]).
    pub fn new(program: impl Into<OsString>, workdir: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Command line for `args`, as shown in errors and logs.
    fn display(&self, args: &[String]) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Run the tool with `args` and wait for it; stdout captured, stderr inherited.
    fn invoke(&self, args: &[String]) -> HarnessResult<ProcessStatus> {
        let command = self.display(args);
        debug!(%command, workdir = %self.workdir.display(), "invoking");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| HarnessError::Spawn {
                program: command.clone(),
                source,
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!(target: "testbed::make", "{line}");
        }
        Ok(output.status.into())
    }
}

impl Workspace for MakeBackend {
    fn reset(&self) -> HarnessResult<()> {
        let args = vec!["clean".to_string()];
        let status = self.invoke(&args)?;
        if status.success() {
            Ok(())
        } else {
            Err(HarnessError::Reset {
                command: self.display(&args),
                status,
            })
        }
    }
}

impl Builder for MakeBackend {
    fn build(&self, parallelism: Parallelism) -> HarnessResult<()> {
        let args: Vec<String> = parallelism.make_flag().into_iter().collect();
        let status = self.invoke(&args)?;
        if status.success() {
            Ok(())
        } else {
            Err(HarnessError::Build {
                command: self.display(&args),
                status,
            })
        }
    }
}
