//! Publishing a lock file.
//!
//! A contender writes its PID into a uniquely named temporary file next to the
//! lock path, then hard-links that file to the lock path. The link call's
//! result is deliberately ignored: on some filesystems it can report failure
//! after succeeding (or the reverse). Whether this contender won is decided by
//! comparing the identity of the temporary file with whatever now sits at the
//! lock path.
//!
//! The temporary file lives in the lock's own directory so that the link never
//! crosses a filesystem boundary. It is removed on every exit path when the
//! `NamedTempFile` is dropped; a winning link keeps the data alive under the
//! lock path.

use super::content;
use crate::config::Config;
use crate::error::{LockfileError, Result};
use crate::fs::same_file;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Result of one publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Publish {
    /// Our temporary file is now the lock file.
    Won,
    /// Some other file occupies the lock path.
    Lost,
}

/// Attempt to publish a lock file for `pid` at `path`.
///
/// # Panics
///
/// Panics if `path` is relative. [`super::Lockfile::new`] rejects such paths,
/// so reaching this with one means a caller bypassed validation.
pub(super) fn publish(path: &Path, pid: u32, config: &Config) -> Result<Publish> {
    assert!(
        path.is_absolute(),
        "{}",
        LockfileError::NeedAbsPath(path.to_path_buf())
    );

    let dir = path.parent().ok_or_else(|| {
        LockfileError::io(
            format!("lock path '{}' has no parent directory", path.display()),
            io::Error::from(io::ErrorKind::InvalidInput),
        )
    })?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".lockfile-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            LockfileError::io(
                format!("failed to create temporary file in '{}'", dir.display()),
                e,
            )
        })?;

    tmp.write_all(content::encode(pid).as_bytes()).map_err(|e| {
        LockfileError::io(
            format!("failed to write temporary file '{}'", tmp.path().display()),
            e,
        )
    })?;

    if config.sync_on_write {
        tmp.as_file().sync_all().map_err(|e| {
            LockfileError::io(
                format!("failed to sync temporary file '{}'", tmp.path().display()),
                e,
            )
        })?;
    }

    // Ignored on purpose: the identity check below is authoritative.
    let _ = fs::hard_link(tmp.path(), path);

    if same_file(tmp.path(), path)? {
        tracing::debug!(path = %path.display(), pid, "published lock file");
        Ok(Publish::Won)
    } else {
        tracing::debug!(path = %path.display(), pid, "lock path occupied by another file");
        Ok(Publish::Lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_publish_on_empty_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.lock");

        let outcome = publish(&path, 1234, &Config::default()).unwrap();

        assert_eq!(outcome, Publish::Won);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1234\n");
    }

    #[test]
    fn test_publish_on_occupied_path_loses_and_keeps_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.lock");
        fs::write(&path, "999\n").unwrap();

        let outcome = publish(&path, 1234, &Config::default()).unwrap();

        assert_eq!(outcome, Publish::Lost);
        assert_eq!(fs::read_to_string(&path).unwrap(), "999\n");
    }

    #[test]
    fn test_publish_leaves_no_temporary_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.lock");

        publish(&path, 1, &Config::default()).unwrap();
        publish(&path, 2, &Config::default()).unwrap();

        assert_eq!(dir_entries(temp_dir.path()), vec!["app.lock".to_string()]);
    }

    #[test]
    fn test_publish_without_sync() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.lock");
        let config = Config {
            sync_on_write: false,
            ..Config::default()
        };

        assert_eq!(publish(&path, 7, &config).unwrap(), Publish::Won);
        assert_eq!(fs::read_to_string(&path).unwrap(), "7\n");
    }

    #[test]
    fn test_publish_into_missing_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("app.lock");

        let err = publish(&path, 1, &Config::default()).unwrap_err();

        assert!(matches!(err, LockfileError::Io { .. }));
        assert!(err.to_string().contains("failed to create temporary file"));
    }

    #[test]
    #[should_panic(expected = "absolute path")]
    fn test_publish_relative_path_panics() {
        let _ = publish(Path::new("relative.lock"), 1, &Config::default());
    }
}
