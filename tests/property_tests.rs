//! Property-based tests for the run controller
//!
//! These tests use proptest to check the sequencing guarantees across many generated test lists:
//! declared order, fail-fast, and the strict lifecycle's reset-on-every-path.

use proptest::prelude::*;
use testbed::backend::recording::{Call, Recorder};
use testbed::{HarnessError, Lifecycle, RunController, TestId};

/// Names the generated lists draw from; repeats are expected.
const POOL: [&str; 6] = ["t_create", "t_delete", "t_00", "t_01", "t_02", "t_03"];

fn ids_from(indices: &[usize]) -> Vec<TestId> {
    indices.iter().map(|&i| TestId::new(POOL[i])).collect()
}

fn names_from(indices: &[usize]) -> Vec<&'static str> {
    indices.iter().map(|&i| POOL[i]).collect()
}

fn lifecycle_for(strict: bool) -> Lifecycle {
    if strict { Lifecycle::Strict } else { Lifecycle::Loose }
}

fn expected_resets(lifecycle: Lifecycle) -> usize {
    if lifecycle.resets_after_run() { 2 } else { 1 }
}

proptest! {
    /// Property: when every test passes, each id runs exactly once, in declared order
    #[test]
    fn all_pass_runs_every_id_in_order(
        indices in prop::collection::vec(0..POOL.len(), 0..16),
        strict in any::<bool>(),
    ) {
        let lifecycle = lifecycle_for(strict);
        let ids = ids_from(&indices);
        let recorder = Recorder::default();

        let result = RunController::new(lifecycle, &ids, &recorder, &recorder, &recorder).execute();

        prop_assert!(result.is_ok());
        prop_assert_eq!(recorder.executed(), names_from(&indices));
        prop_assert_eq!(recorder.reset_count(), expected_resets(lifecycle));
    }

    /// Property: nothing after the first failing id is invoked
    #[test]
    fn fail_fast_stops_at_first_failure(
        indices in prop::collection::vec(0..POOL.len(), 1..16),
        failing in 0..POOL.len(),
        code in 1i32..=255,
        strict in any::<bool>(),
    ) {
        let lifecycle = lifecycle_for(strict);
        let ids = ids_from(&indices);
        let recorder = Recorder::default().failing_test(POOL[failing], code);

        let result = RunController::new(lifecycle, &ids, &recorder, &recorder, &recorder).execute();
        let names = names_from(&indices);

        match indices.iter().position(|&i| i == failing) {
            Some(k) => {
                let err = result.unwrap_err();
                prop_assert!(matches!(err, HarnessError::Test { .. }), "expected a test failure, got {:?}", err);
                prop_assert_eq!(err.exit_code(), code);
                prop_assert_eq!(recorder.executed(), names[..=k].to_vec());
            }
            None => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(recorder.executed(), names);
            }
        }
    }

    /// Property: strict runs end with exactly one more reset whatever the outcome; loose runs never do
    #[test]
    fn final_reset_follows_lifecycle(
        indices in prop::collection::vec(0..POOL.len(), 0..16),
        failing in prop::option::of(0..POOL.len()),
        build_fails in any::<bool>(),
        strict in any::<bool>(),
    ) {
        let lifecycle = lifecycle_for(strict);
        let ids = ids_from(&indices);
        let mut recorder = Recorder::default();
        if let Some(failing) = failing {
            recorder = recorder.failing_test(POOL[failing], 1);
        }
        if build_fails {
            recorder = recorder.failing_build(2);
        }

        let result = RunController::new(lifecycle, &ids, &recorder, &recorder, &recorder).execute();
        let calls = recorder.calls();

        let test_fails = failing.is_some_and(|failing| indices.contains(&failing));
        if build_fails || test_fails {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
        }

        prop_assert_eq!(calls.first(), Some(&Call::Reset));
        prop_assert_eq!(recorder.reset_count(), expected_resets(lifecycle));
        if lifecycle.resets_after_run() {
            prop_assert_eq!(calls.last(), Some(&Call::Reset));
        }
        if build_fails {
            prop_assert!(recorder.executed().is_empty());
        }
    }
}
