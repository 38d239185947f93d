//! Backends that implement the harness interfaces.
//!
//! ## Module Organization
//!
//! - `make.rs` - `make clean` / `make [-j]` as the workspace reset and build
//! - `process.rs` - one child process per test id
//! - `recording.rs` - no-op backend for `--dry-run` (and the test suite's fake)

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod make;
pub mod process;
pub mod recording;

use std::path::{Path, PathBuf};

use crate::harness::{HarnessError, HarnessResult};

pub use make::{DEFAULT_MAKE, MakeBackend};
pub use process::ProcessExecutor;
pub use recording::Recorder;

/// Canonicalize the workspace directory before any child is spawned.
pub fn resolve_workdir(path: &Path) -> HarnessResult<PathBuf> {
    let resolved = path.canonicalize().map_err(|source| HarnessError::Workdir {
        path: path.to_path_buf(),
        source,
    })?;
    if !resolved.is_dir() {
        return Err(HarnessError::Workdir {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_workdir_absolutizes() {
        let resolved = resolve_workdir(Path::new(".")).unwrap();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_resolve_workdir_rejects_missing_dir() {
        let err = resolve_workdir(Path::new("definitely/not/a/testbed/dir")).unwrap_err();
        assert!(matches!(err, HarnessError::Workdir { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
