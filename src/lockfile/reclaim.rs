//! Classifying and clearing a lock file that a publish attempt lost to.

use super::content;
use crate::error::{LockfileError, Result};
use crate::process::{self, Liveness};
use std::fs;
use std::path::Path;

/// What the existing lock file says about its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Claim {
    /// The recorded owner is alive, or its liveness could not be disproven.
    Live { pid: u32 },
    /// The recorded owner is no longer running.
    Stale { pid: u32 },
    /// Empty, unparseable or zero PID.
    Invalid,
}

/// Classify lock file content.
///
/// Probe errors count as live so that a lock is never stolen from an owner
/// whose liveness is merely unknown.
pub(super) fn classify(content: &str) -> Claim {
    let pid = match content::decode(content) {
        Some(0) | None => return Claim::Invalid,
        Some(pid) => pid,
    };

    match process::probe(pid) {
        Ok(Liveness::Alive) => Claim::Live { pid },
        Ok(Liveness::Dead) => Claim::Stale { pid },
        Err(e) => {
            tracing::debug!(pid, error = %e, "liveness unknown, treating owner as alive");
            Claim::Live { pid }
        }
    }
}

/// Read and classify the lock file at `path`.
///
/// An unreadable lock file is as good as an invalid one.
pub(super) fn inspect(path: &Path) -> Claim {
    match fs::read_to_string(path) {
        Ok(content) => classify(&content),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "lock file unreadable");
            Claim::Invalid
        }
    }
}

/// Remove a stale or invalid lock file.
///
/// A failed removal, including one caused by another contender removing it
/// first, is surfaced rather than retried.
pub(super) fn remove(path: &Path, claim: Claim) -> Result<()> {
    match claim {
        Claim::Stale { pid } => tracing::warn!(
            path = %path.display(),
            pid,
            "removing stale lock file left by dead process"
        ),
        Claim::Invalid => tracing::warn!(path = %path.display(), "removing invalid lock file"),
        Claim::Live { pid } => {
            return Err(LockfileError::Busy { pid });
        }
    }

    fs::remove_file(path).map_err(|e| {
        LockfileError::io(
            format!("failed to remove stale lock '{}'", path.display()),
            e,
        )
    })
}
