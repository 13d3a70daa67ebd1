//! Error types for lockfile.
//!
//! Uses thiserror for derive macros. Callers see exactly one of success,
//! [`LockfileError::Busy`], [`LockfileError::Contention`] or a wrapped I/O
//! error from `try_lock`; liveness probe failures never escape as their own
//! variant.

use crate::exit_codes;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lockfile operations.
#[derive(Error, Debug)]
pub enum LockfileError {
    /// The lock path was not absolute.
    #[error("lock files must be given as absolute path names (got '{}')", .0.display())]
    NeedAbsPath(PathBuf),

    /// A live process holds the lock.
    #[error("locked by other process (pid {pid})")]
    Busy { pid: u32 },

    /// Every reclamation round lost to another contender republishing.
    #[error("lock still contended after {attempts} reclamation attempts")]
    Contention { attempts: u32 },

    /// Filesystem or process I/O failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Configuration could not be read or failed validation.
    #[error("{0}")]
    Config(String),
}

impl LockfileError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        LockfileError::Io {
            context: context.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockfileError::NeedAbsPath(_) => exit_codes::USER_ERROR,
            LockfileError::Config(_) => exit_codes::USER_ERROR,
            LockfileError::Io { .. } => exit_codes::IO_FAILURE,
            LockfileError::Busy { .. } => exit_codes::LOCK_BUSY,
            LockfileError::Contention { .. } => exit_codes::LOCK_CONTENTION,
        }
    }

    /// Whether waiting and trying again could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LockfileError::Busy { .. } | LockfileError::Contention { .. }
        )
    }
}

/// Result type alias for lockfile operations.
pub type Result<T> = std::result::Result<T, LockfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn need_abs_path_is_user_error() {
        let err = LockfileError::NeedAbsPath(PathBuf::from("relative.lock"));
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("relative.lock"));
    }

    #[test]
    fn busy_has_lock_exit_code() {
        let err = LockfileError::Busy { pid: 42 };
        assert_eq!(err.exit_code(), exit_codes::LOCK_BUSY);
        assert_eq!(err.to_string(), "locked by other process (pid 42)");
    }

    #[test]
    fn contention_has_its_own_exit_code() {
        let err = LockfileError::Contention { attempts: 8 };
        assert_eq!(err.exit_code(), exit_codes::LOCK_CONTENTION);
        assert!(err.to_string().contains("8 reclamation attempts"));
    }

    #[test]
    fn io_error_keeps_context_and_source() {
        let err = LockfileError::io(
            "failed to remove lock '/tmp/x.lock'",
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert_eq!(err.exit_code(), exit_codes::IO_FAILURE);
        assert!(err.to_string().starts_with("failed to remove lock '/tmp/x.lock': "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn only_lock_conflicts_are_retryable() {
        assert!(LockfileError::Busy { pid: 1 }.is_retryable());
        assert!(LockfileError::Contention { attempts: 1 }.is_retryable());
        assert!(!LockfileError::Config("bad".to_string()).is_retryable());
        assert!(!LockfileError::NeedAbsPath(PathBuf::from("x")).is_retryable());
    }
}
