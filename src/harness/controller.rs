//! Run controller: composes reset, build, and the test sequencer into a lifecycle.
//!
//! ## Lifecycles
//!
//! - **Strict**: reset → build → run all, then reset again on every exit path. The second reset is owned by a
//!   [`ResetGuard`] armed right after the first reset succeeds, so a failed build or test still leaves a clean
//!   workspace behind.
//! - **Loose**: reset → build → run all. No reset afterwards; artifacts of a failing run stay on disk.
//!
//! Both stop at the first failing step and return its error.

use testbed_core::{Lifecycle, Parallelism, SuiteInfo, TestId};
use tracing::{error, info};

use super::errors::HarnessResult;
use super::guard::ResetGuard;
use super::interfaces::{Builder, TestExecutor, Workspace};
use super::sequencer::TestSequencer;
use super::session::RunSession;

pub struct RunController<W, B, E> {
    lifecycle: Lifecycle,
    parallelism: Parallelism,
    tests: Vec<TestId>,
    workspace: W,
    builder: B,
    executor: E,
}

impl<W: Workspace, B: Builder, E: TestExecutor> RunController<W, B, E> {
    pub fn new(lifecycle: Lifecycle, tests: &[TestId], workspace: W, builder: B, executor: E) -> Self {
        Self {
            lifecycle,
            parallelism: Parallelism::Serial,
            tests: tests.to_vec(),
            workspace,
            builder,
            executor,
        }
    }

    /// Controller for a registered suite, using its lifecycle, build parallelism, and test list.
    pub fn for_suite(suite: &SuiteInfo, workspace: W, builder: B, executor: E) -> Self {
        Self::new(suite.lifecycle, suite.tests, workspace, builder, executor).with_parallelism(suite.parallelism)
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Run the whole lifecycle in a fresh session.
    pub fn execute(&self) -> HarnessResult<()> {
        let mut session = RunSession::new(self.lifecycle);
        self.run(&mut session)
    }

    /// Run the whole lifecycle, recording transitions in `session`.
    ///
    /// On return the session is `Done` or `Failed`.
    #[tracing::instrument(skip_all, fields(lifecycle = %self.lifecycle, tests = self.tests.len()))]
    pub fn run(&self, session: &mut RunSession) -> HarnessResult<()> {
        let result = if self.lifecycle.resets_after_run() {
            self.run_strict(session)
        } else {
            self.run_loose(session)
        };
        session.finish(&result);
        debug_assert!(session.state().is_terminal());
        match &result {
            Ok(()) => info!("all tests passed"),
            Err(err) => error!(%err, "run failed"),
        }
        result
    }

    fn run_strict(&self, session: &mut RunSession) -> HarnessResult<()> {
        self.reset(session)?;

        let guard = ResetGuard::arm(&self.workspace);
        let phase = self.build_and_test(session);

        info!("resetting workspace after run");
        let cleanup = guard.release();
        if cleanup.is_ok() {
            session.workspace_reset();
        }

        match (phase, cleanup) {
            (Ok(()), cleanup) => cleanup,
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(cleanup_err)) => {
                error!(err = %cleanup_err, "final reset failed after an earlier failure");
                Err(err)
            }
        }
    }

    fn run_loose(&self, session: &mut RunSession) -> HarnessResult<()> {
        self.reset(session)?;
        self.build_and_test(session)
    }

    fn reset(&self, session: &mut RunSession) -> HarnessResult<()> {
        info!("resetting workspace");
        self.workspace.reset()?;
        session.workspace_reset();
        Ok(())
    }

    fn build_and_test(&self, session: &mut RunSession) -> HarnessResult<()> {
        info!(parallelism = ?self.parallelism, "building");
        self.builder.build(self.parallelism)?;
        session.workspace_built();

        session.tests_started();
        TestSequencer::new(&self.executor).run_all(&self.tests)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use testbed_core::suites::{self, SuiteId};
    use testbed_core::{BuildState, RunState};

    use super::*;
    use crate::backend::recording::{Call, Recorder};
    use crate::harness::HarnessError;

    const T123: &[TestId] = &[TestId::new("t1"), TestId::new("t2"), TestId::new("t3")];

    fn controller(lifecycle: Lifecycle, recorder: &Recorder) -> RunController<&Recorder, &Recorder, &Recorder> {
        RunController::new(lifecycle, T123, recorder, recorder, recorder)
    }

    #[test]
    fn test_strict_success_resets_before_and_after() {
        let recorder = Recorder::default();
        let mut session = RunSession::new(Lifecycle::Strict);
        controller(Lifecycle::Strict, &recorder).run(&mut session).unwrap();

        assert_eq!(
            recorder.calls(),
            [
                Call::Reset,
                Call::Build(Parallelism::Serial),
                Call::Test("t1"),
                Call::Test("t2"),
                Call::Test("t3"),
                Call::Reset,
            ]
        );
        assert_eq!(session.state(), RunState::Done);
        assert_eq!(session.build_state(), BuildState::Clean);
        assert!(session.reset_after_run());
    }

    #[test]
    fn test_strict_test_failure_still_resets() {
        let recorder = Recorder::default().failing_test("t2", 1);
        let mut session = RunSession::new(Lifecycle::Strict);
        let err = controller(Lifecycle::Strict, &recorder).run(&mut session).unwrap_err();

        assert!(matches!(err, HarnessError::Test { id, .. } if id.as_str() == "t2"));
        assert_eq!(recorder.executed(), ["t1", "t2"]);
        assert_eq!(recorder.calls().last(), Some(&Call::Reset));
        assert_eq!(recorder.reset_count(), 2);
        assert_eq!(session.state(), RunState::Failed);
    }

    #[test]
    fn test_strict_build_failure_still_resets() {
        let recorder = Recorder::default().failing_build(2);
        let mut session = RunSession::new(Lifecycle::Strict);
        let err = controller(Lifecycle::Strict, &recorder).run(&mut session).unwrap_err();

        assert!(matches!(err, HarnessError::Build { .. }));
        assert_eq!(
            recorder.calls(),
            [Call::Reset, Call::Build(Parallelism::Serial), Call::Reset]
        );
        assert!(recorder.executed().is_empty());
        assert_eq!(session.history(), [RunState::Init, RunState::Reset, RunState::Failed]);
    }

    #[test]
    fn test_strict_initial_reset_failure_does_not_arm_cleanup() {
        let recorder = Recorder::default().failing_reset(1, 2);
        let err = controller(Lifecycle::Strict, &recorder).execute().unwrap_err();

        assert!(matches!(err, HarnessError::Reset { .. }));
        assert_eq!(recorder.calls(), [Call::Reset]);
    }

    #[test]
    fn test_strict_test_failure_wins_over_cleanup_failure() {
        let recorder = Recorder::default().failing_test("t1", 4).failing_reset(2, 9);
        let err = controller(Lifecycle::Strict, &recorder).execute().unwrap_err();

        assert_eq!(err.exit_code(), 4);
        assert_eq!(recorder.reset_count(), 2);
    }

    #[test]
    fn test_strict_cleanup_failure_fails_a_passing_run() {
        let recorder = Recorder::default().failing_reset(2, 9);
        let mut session = RunSession::new(Lifecycle::Strict);
        let err = controller(Lifecycle::Strict, &recorder).run(&mut session).unwrap_err();

        assert!(matches!(err, HarnessError::Reset { .. }));
        assert_eq!(recorder.executed(), ["t1", "t2", "t3"]);
        assert_eq!(session.state(), RunState::Failed);
        assert!(!session.reset_after_run());
    }

    #[test]
    fn test_strict_panicking_test_still_resets() {
        let recorder = Recorder::default().panicking_test("t2");
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            controller(Lifecycle::Strict, &recorder).execute()
        }));

        assert!(result.is_err());
        assert_eq!(recorder.reset_count(), 2);
        assert_eq!(recorder.calls().last(), Some(&Call::Reset));
    }

    #[test]
    fn test_loose_success_has_no_final_reset() {
        let recorder = Recorder::default();
        let mut session = RunSession::new(Lifecycle::Loose);
        controller(Lifecycle::Loose, &recorder).run(&mut session).unwrap();

        assert_eq!(recorder.reset_count(), 1);
        assert_eq!(recorder.calls().last(), Some(&Call::Test("t3")));
        assert_eq!(session.state(), RunState::Done);
        assert_eq!(session.build_state(), BuildState::Built);
    }

    #[test]
    fn test_loose_failure_leaves_artifacts() {
        let recorder = Recorder::default().failing_test("t2", 1);
        let mut session = RunSession::new(Lifecycle::Loose);
        controller(Lifecycle::Loose, &recorder).run(&mut session).unwrap_err();

        assert_eq!(
            recorder.calls(),
            [Call::Reset, Call::Build(Parallelism::Serial), Call::Test("t1"), Call::Test("t2")]
        );
        assert_eq!(session.state(), RunState::Failed);
        assert_eq!(session.build_state(), BuildState::Built);
    }

    #[test]
    fn test_rm_suite_creates_tables_twice() {
        let recorder = Recorder::default();
        let rm = suites::info_for(SuiteId::Rm);
        RunController::for_suite(rm, &recorder, &recorder, &recorder)
            .execute()
            .unwrap();

        let executed = recorder.executed();
        assert_eq!(executed.len(), rm.tests.len());
        assert_eq!(
            &executed[..3],
            ["rmtest_create_tables", "rmtest_delete_tables", "rmtest_create_tables"]
        );
        assert_eq!(recorder.calls()[1], Call::Build(Parallelism::Serial));
    }

    #[test]
    fn test_rbf_suite_builds_in_parallel_and_cleans_up() {
        let recorder = Recorder::default();
        let rbf = suites::info_for(SuiteId::Rbf);
        RunController::for_suite(rbf, &recorder, &recorder, &recorder)
            .execute()
            .unwrap();

        assert_eq!(recorder.calls()[1], Call::Build(Parallelism::Unbounded));
        assert_eq!(recorder.reset_count(), 2);
    }

    #[test]
    fn test_parallelism_override() {
        let recorder = Recorder::default();
        let rbf = suites::info_for(SuiteId::Rbf);
        RunController::for_suite(rbf, &recorder, &recorder, &recorder)
            .with_parallelism(Parallelism::Jobs(2))
            .execute()
            .unwrap();

        assert_eq!(recorder.calls()[1], Call::Build(Parallelism::Jobs(2)));
    }
}
