//! Lifecycle and state vocabulary for a harness run.
//!
//! ## Notes
//! - [`RunState`] and [`BuildState`] are plain data; the transition rules are enforced by the run controller.
//! - [`Parallelism`] is a build hint only. The harness never observes individual compilation units.

use std::fmt;

/// Which lifecycle a suite runs under.
///
/// ## Notes
/// - `Strict` arms a cleanup obligation after the initial reset; the workspace is reset again on every exit path.
/// - `Loose` never resets after the run, so a failing build stays on disk for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    Strict,
    Loose,
}

impl Lifecycle {
    /// Whether a final reset is owed once the build/test phase ends.
    pub fn resets_after_run(self) -> bool {
        matches!(self, Lifecycle::Strict)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lifecycle::Strict => "strict",
            Lifecycle::Loose => "loose",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Concurrency hint passed to the build operation.
///
/// ## Examples
/// ```rust
/// use testbed_core::Parallelism;
///
/// assert_eq!(Parallelism::Serial.make_flag(), None);
/// assert_eq!(Parallelism::Unbounded.make_flag().as_deref(), Some("-j"));
/// assert_eq!(Parallelism::Jobs(4).make_flag().as_deref(), Some("-j4"));
/// assert_eq!(Parallelism::from_jobs(0), Parallelism::Unbounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parallelism {
    Serial,
    Unbounded,
    Jobs(usize),
}

impl Parallelism {
    /// Interpret a `--jobs` value: `0` means "as many as make wants", `1` means serial.
    pub fn from_jobs(jobs: usize) -> Self {
        match jobs {
            0 => Parallelism::Unbounded,
            1 => Parallelism::Serial,
            n => Parallelism::Jobs(n),
        }
    }

    /// The `make` flag for this hint, if any.
    pub fn make_flag(self) -> Option<String> {
        match self {
            Parallelism::Serial => None,
            Parallelism::Unbounded => Some("-j".to_string()),
            Parallelism::Jobs(n) => Some(format!("-j{n}")),
        }
    }
}

/// Whether test executables currently exist in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildState {
    #[default]
    Clean,
    Built,
}

/// States of a single run session.
///
/// ```text
/// Init -> Reset -> Built -> Running -> Done
///           |        |         |
///           +--------+---------+----> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    #[default]
    Init,
    Reset,
    Built,
    Running,
    Done,
    Failed,
}

impl RunState {
    /// `Done` and `Failed` end a session.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// Whether `self -> next` is an edge of the run state machine.
    pub fn can_transition_to(self, next: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, next),
            (Init, Reset)
                | (Reset, Built)
                | (Built, Running)
                | (Running, Done)
                | (Init | Reset | Built | Running, Failed)
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Init => "init",
            RunState::Reset => "reset",
            RunState::Built => "built",
            RunState::Running => "running",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.pad(s)
    }
}
