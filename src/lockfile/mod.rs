//! PID lock files.
//!
//! A [`Lockfile`] names an absolute path. Holding the lock means a file exists
//! at that path containing the holder's PID followed by a newline. There is no
//! in-memory ownership state: the filesystem is the only truth, and any
//! process following the same protocol sees the same answer.
//!
//! # Acquisition
//!
//! [`Lockfile::try_lock`] publishes a temporary file via hard link and checks
//! by file identity whether it won. When it loses, the existing file is
//! inspected:
//!
//! - owner alive (or liveness unknown): the call fails with `Busy`
//! - owner dead, content empty, unparseable or zero: the file is removed and
//!   the publish is retried
//!
//! Retries are bounded by [`Config::max_reclaim_attempts`]; exhausting them
//! yields `Contention`.
//!
//! # Release
//!
//! [`Lockfile::unlock`] removes the file without checking who owns it. The
//! protocol is cooperative: callers release only what they acquired. Use
//! [`Lockfile::unlock_if_owned`] when an ownership check is wanted.

mod acquire;
pub mod content;
mod guard;
mod reclaim;
mod retry;


pub use guard::LockGuard;
pub use retry::{RetryPolicy, acquire_with_retry};

use crate::config::Config;
use crate::error::{LockfileError, Result};
use acquire::Publish;
use reclaim::Claim;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

/// Observed state of a lock file, without modifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LockState {
    /// No lock file exists.
    Absent,
    /// The recorded owner is alive (or could not be proven dead).
    Held { pid: u32 },
    /// The recorded owner has exited; the next acquirer will reclaim it.
    Stale { pid: u32 },
    /// The lock file is empty or does not contain a usable PID.
    Invalid,
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Absent => write!(f, "unlocked"),
            LockState::Held { pid } => write!(f, "held by pid {}", pid),
            LockState::Stale { pid } => write!(f, "stale (pid {} is not running)", pid),
            LockState::Invalid => write!(f, "invalid (no usable pid recorded)"),
        }
    }
}

impl From<Claim> for LockState {
    fn from(claim: Claim) -> Self {
        match claim {
            Claim::Live { pid } => LockState::Held { pid },
            Claim::Stale { pid } => LockState::Stale { pid },
            Claim::Invalid => LockState::Invalid,
        }
    }
}

/// Handle to a lock file at an absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lockfile {
    path: PathBuf,
    config: Config,
}

impl Lockfile {
    /// Describe a lock file at `path` using the default config.
    ///
    /// Fails with [`LockfileError::NeedAbsPath`] if `path` is relative.
    /// Nothing is touched on disk.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_config(path, Config::default())
    }

    /// Describe a lock file at `path` with explicit tuning.
    pub fn with_config<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(LockfileError::NeedAbsPath(path.to_path_buf()));
        }
        config.validate()?;

        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// The lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The config this handle acquires with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Try once to take the lock for the current process.
    ///
    /// Returns `Ok(())` when the lock file now records our PID. Stale and
    /// invalid lock files are removed along the way. This never blocks waiting
    /// for a live owner; see [`acquire_with_retry`] for polling.
    ///
    /// Not reentrant: calling this while already holding the lock returns
    /// `Busy` with our own PID.
    pub fn try_lock(&self) -> Result<()> {
        let pid = process::id();

        acquire_bounded(
            self.config.max_reclaim_attempts,
            || acquire::publish(&self.path, pid, &self.config),
            || reclaim::inspect(&self.path),
            |claim| reclaim::remove(&self.path, claim),
        )
    }

    /// Take the lock and return a guard that releases it on drop.
    pub fn lock(&self) -> Result<LockGuard> {
        self.try_lock()?;
        Ok(LockGuard::new(self.clone()))
    }

    /// Remove the lock file.
    ///
    /// Ownership is not verified.
    pub fn unlock(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|e| {
            LockfileError::io(format!("failed to release lock '{}'", self.path.display()), e)
        })
    }

    /// Remove the lock file only if it records the current process.
    ///
    /// Returns `Ok(false)` and leaves the file alone when it is absent or
    /// records another PID.
    pub fn unlock_if_owned(&self) -> Result<bool> {
        if self.owner()? != Some(process::id()) {
            return Ok(false);
        }
        self.unlock()?;
        Ok(true)
    }

    /// The PID recorded in the lock file, if there is a usable one.
    pub fn owner(&self) -> Result<Option<u32>> {
        Ok(self
            .read_content()?
            .and_then(|content| content::decode(&content))
            .filter(|&pid| pid != 0))
    }

    /// Inspect the lock file without modifying it.
    pub fn state(&self) -> Result<LockState> {
        Ok(match self.read_content()? {
            None => LockState::Absent,
            Some(content) => reclaim::classify(&content).into(),
        })
    }

    fn read_content(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            // Not valid UTF-8: there is no PID to be found in it.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => Ok(Some(String::new())),
            Err(e) => Err(LockfileError::io(
                format!("failed to read lock file '{}'", self.path.display()),
                e,
            )),
        }
    }
}

/// Publish, inspect and reclaim until the lock is won, a live owner is found,
/// or `max` lock files have been removed.
///
/// After the `max`-th removal one more publish is attempted; finding yet
/// another stale or invalid file then yields `Contention`.
fn acquire_bounded(
    max: u32,
    mut publish: impl FnMut() -> Result<Publish>,
    mut inspect: impl FnMut() -> Claim,
    mut remove: impl FnMut(Claim) -> Result<()>,
) -> Result<()> {
    let mut reclaimed = 0;

    loop {
        if publish()? == Publish::Won {
            return Ok(());
        }

        let claim = inspect();
        if let Claim::Live { pid } = claim {
            return Err(LockfileError::Busy { pid });
        }

        if reclaimed == max {
            return Err(LockfileError::Contention { attempts: reclaimed });
        }

        remove(claim)?;
        reclaimed += 1;
    }
}

impl fmt::Display for Lockfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
