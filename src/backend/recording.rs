//! Recording backend: implements every harness interface without spawning anything.
//!
//! `testbed run --dry-run` drives a run through a default [`Recorder`], which logs each step and succeeds.
//! Tests configure failures on it to exercise the lifecycle's error paths.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use testbed_core::{Parallelism, TestId};
use tracing::info;

use crate::harness::{Builder, HarnessError, HarnessResult, ProcessStatus, TestExecutor, TestOutcome, Workspace};

/// One observed call into the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Reset,
    Build(Parallelism),
    Test(&'static str),
}

/// Records calls in order and answers with configured outcomes.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: RefCell<Vec<Call>>,
    /// 1-based reset call number that fails, with its exit code.
    failing_reset: Option<(usize, i32)>,
    failing_build: Option<i32>,
    failing_tests: HashMap<&'static str, i32>,
    unspawnable_tests: Vec<&'static str>,
    #[cfg(test)]
    panicking_tests: Vec<&'static str>,
}

impl Recorder {
    /// Make the `nth` reset (counting from 1) exit with `code`.
    pub fn failing_reset(mut self, nth: usize, code: i32) -> Self {
        self.failing_reset = Some((nth, code));
        self
    }

    pub fn failing_build(mut self, code: i32) -> Self {
        self.failing_build = Some(code);
        self
    }

    /// Every invocation of `name` exits with `code`.
    pub fn failing_test(mut self, name: &'static str, code: i32) -> Self {
        self.failing_tests.insert(name, code);
        self
    }

    /// Invoking `name` fails as if the executable did not exist.
    pub fn unspawnable_test(mut self, name: &'static str) -> Self {
        self.unspawnable_tests.push(name);
        self
    }

    /// Invoking `name` panics inside the executor.
    #[cfg(test)]
    pub(crate) fn panicking_test(mut self, name: &'static str) -> Self {
        self.panicking_tests.push(name);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Names of the tests invoked, in order.
    pub fn executed(&self) -> Vec<&'static str> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Test(name) => Some(*name),
                _ => None,
            })
            .collect()
    }

    pub fn reset_count(&self) -> usize {
        self.calls.borrow().iter().filter(|call| **call == Call::Reset).count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    #[cfg(test)]
    fn panic_if_configured(&self, name: &str) {
        if self.panicking_tests.contains(&name) {
            panic!("executor panicked while running {name}");
        }
    }

    #[cfg(not(test))]
    fn panic_if_configured(&self, _name: &str) {}
}

impl Workspace for Recorder {
    fn reset(&self) -> HarnessResult<()> {
        self.record(Call::Reset);
        info!("dry run: reset workspace");
        match self.failing_reset {
            Some((nth, code)) if nth == self.reset_count() => Err(HarnessError::Reset {
                command: "reset".to_string(),
                status: ProcessStatus::exited(code),
            }),
            _ => Ok(()),
        }
    }
}

impl Builder for Recorder {
    fn build(&self, parallelism: Parallelism) -> HarnessResult<()> {
        self.record(Call::Build(parallelism));
        info!(?parallelism, "dry run: build");
        match self.failing_build {
            Some(code) => Err(HarnessError::Build {
                command: "build".to_string(),
                status: ProcessStatus::exited(code),
            }),
            None => Ok(()),
        }
    }
}

impl TestExecutor for Recorder {
    fn execute(&self, id: &TestId) -> HarnessResult<TestOutcome> {
        let name = id.as_str();
        self.record(Call::Test(name));
        info!("dry run: execute");

        self.panic_if_configured(name);
        if self.unspawnable_tests.contains(&name) {
            return Err(HarnessError::Spawn {
                program: name.to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }
        Ok(match self.failing_tests.get(name) {
            Some(&code) => TestOutcome::Failed(ProcessStatus::exited(code)),
            None => TestOutcome::Passed,
        })
    }
}
