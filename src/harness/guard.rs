//! Scoped cleanup obligation for the strict lifecycle.
//!
//! A [`ResetGuard`] is armed once the initial reset has succeeded. From then on the workspace is reset exactly
//! once more, however the build/test phase ends:
//! - [`ResetGuard::release`] runs the reset and hands back its result (normal and error returns), or
//! - `Drop` runs it if the guard is still armed (unwinding out of a panic).

use tracing::{debug, error};

use super::errors::HarnessResult;
use super::interfaces::Workspace;

#[must_use = "dropping the guard immediately resets the workspace"]
pub struct ResetGuard<W: Workspace> {
    workspace: W,
    armed: bool,
}

impl<W: Workspace> ResetGuard<W> {
    pub fn arm(workspace: W) -> Self {
        debug!("final reset armed");
        Self { workspace, armed: true }
    }

    /// Perform the owed reset now and disarm the guard.
    pub fn release(mut self) -> HarnessResult<()> {
        self.armed = false;
        self.workspace.reset()
    }
}

impl<W: Workspace> Drop for ResetGuard<W> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.armed = false;
        debug!("guard dropped while armed; resetting workspace");
        if let Err(err) = self.workspace.reset() {
            error!(%err, "final reset failed");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::backend::recording::Recorder;

    #[test]
    fn test_release_resets_once() {
        let recorder = Recorder::default();
        let guard = ResetGuard::arm(&recorder);
        guard.release().unwrap();
        assert_eq!(recorder.reset_count(), 1);
    }

    #[test]
    fn test_release_returns_reset_error() {
        let recorder = Recorder::default().failing_reset(1, 2);
        let err = ResetGuard::arm(&recorder).release().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(recorder.reset_count(), 1);
    }

    #[test]
    fn test_drop_resets_when_unreleased() {
        let recorder = Recorder::default();
        {
            let _guard = ResetGuard::arm(&recorder);
        }
        assert_eq!(recorder.reset_count(), 1);
    }

    #[test]
    fn test_unwind_still_resets() {
        let recorder = Recorder::default();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = ResetGuard::arm(&recorder);
            panic!("phase blew up");
        }));
        assert!(result.is_err());
        assert_eq!(recorder.reset_count(), 1);
    }
}
