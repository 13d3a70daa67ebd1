//! RAII lock guard implementation.

use super::Lockfile;
use crate::error::Result;
use std::path::Path;

/// RAII guard for a held lock file.
///
/// When dropped, the lock file is deleted. If deletion fails, a warning is
/// logged but no panic occurs.
#[derive(Debug)]
pub struct LockGuard {
    lockfile: Lockfile,

    /// Whether the lock has been released manually.
    released: bool,
}

impl LockGuard {
    pub(super) fn new(lockfile: Lockfile) -> Self {
        Self {
            lockfile,
            released: false,
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        self.lockfile.path()
    }

    /// Manually release the lock.
    ///
    /// Use this instead of dropping the guard when the release error matters.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.lockfile.unlock()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if !self.released
            && let Err(e) = self.lockfile.unlock()
        {
            tracing::warn!(error = %e, "failed to release lock on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guard_releases_on_drop() {
        let temp_dir = TempDir::new().unwrap();
        let lockfile = Lockfile::new(temp_dir.path().join("app.lock")).unwrap();

        {
            let guard = lockfile.lock().unwrap();
            assert!(guard.path().exists());
        }

        assert!(!lockfile.path().exists());
    }

    #[test]
    fn test_guard_manual_release() {
        let temp_dir = TempDir::new().unwrap();
        let lockfile = Lockfile::new(temp_dir.path().join("app.lock")).unwrap();

        let guard = lockfile.lock().unwrap();
        guard.release().unwrap();

        assert!(!lockfile.path().exists());
    }

    #[test]
    fn test_guard_release_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let lockfile = Lockfile::new(temp_dir.path().join("app.lock")).unwrap();

        let guard = lockfile.lock().unwrap();
        std::fs::remove_file(lockfile.path()).unwrap();

        assert!(guard.release().is_err());
    }

    #[test]
    fn test_guard_drop_tolerates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let lockfile = Lockfile::new(temp_dir.path().join("app.lock")).unwrap();

        let guard = lockfile.lock().unwrap();
        std::fs::remove_file(lockfile.path()).unwrap();

        // Must not panic.
        drop(guard);
    }
}
