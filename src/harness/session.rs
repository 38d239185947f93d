//! Run session: the per-invocation record of state transitions.

use testbed_core::{BuildState, Lifecycle, RunState};
use tracing::debug;

use super::errors::HarnessResult;

/// Lifecycle instance for one harness invocation. Nothing in it outlives the process.
#[derive(Debug, Clone)]
pub struct RunSession {
    lifecycle: Lifecycle,
    state: RunState,
    build: BuildState,
    history: Vec<RunState>,
    reset_after_run: bool,
}

impl RunSession {
    pub fn new(lifecycle: Lifecycle) -> Self {
        Self {
            lifecycle,
            state: RunState::Init,
            build: BuildState::Clean,
            history: vec![RunState::Init],
            reset_after_run: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn build_state(&self) -> BuildState {
        self.build
    }

    /// Every state visited, starting with `Init`.
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Whether the strict lifecycle's final reset completed successfully.
    pub fn reset_after_run(&self) -> bool {
        self.reset_after_run
    }

    pub(crate) fn workspace_reset(&mut self) {
        self.build = BuildState::Clean;
        if self.state == RunState::Init {
            self.advance(RunState::Reset);
        } else {
            debug_assert!(self.lifecycle.resets_after_run(), "{} runs do not reset after the run", self.lifecycle);
            self.reset_after_run = true;
        }
    }

    pub(crate) fn workspace_built(&mut self) {
        self.build = BuildState::Built;
        self.advance(RunState::Built);
    }

    pub(crate) fn tests_started(&mut self) {
        debug_assert_eq!(self.build, BuildState::Built, "tests must not run in a clean workspace");
        self.advance(RunState::Running);
    }

    pub(crate) fn finish(&mut self, result: &HarnessResult<()>) {
        let next = if result.is_ok() { RunState::Done } else { RunState::Failed };
        self.advance(next);
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal run state transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "run state");
        self.state = next;
        self.history.push(next);
    }
}
