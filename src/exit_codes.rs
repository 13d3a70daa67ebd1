//! Exit code constants for the lockfile CLI.
//!
//! - 0: Success
//! - 1: User error (relative path, bad config, bad arguments)
//! - 2: Filesystem or process I/O failure
//! - 3: Lock is held by a live process
//! - 4: Stale-lock reclamation kept losing to other contenders

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: relative lock path, invalid config, or unusable arguments.
pub const USER_ERROR: i32 = 1;

/// I/O failure while creating, inspecting or removing a lock file.
pub const IO_FAILURE: i32 = 2;

/// The lock is held by a process that is still alive.
pub const LOCK_BUSY: i32 = 3;

/// Reclamation rounds were exhausted without settling ownership.
pub const LOCK_CONTENTION: i32 = 4;
