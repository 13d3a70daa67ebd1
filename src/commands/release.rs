//! Implementation of the `lockfile release` command.

use super::open_lock;
use crate::cli::ReleaseArgs;
use lockfile::LockState;
use lockfile::config::Config;
use lockfile::error::{LockfileError, Result};
use lockfile::exit_codes;

/// Remove a lock file from outside the owning process.
///
/// This process can never be the owner, so without `--force` only lock files
/// whose owner is gone (or unrecorded) are removed.
pub fn cmd_release(args: ReleaseArgs, config: Config) -> Result<i32> {
    let lock = open_lock(&args.path, config)?;

    if args.force {
        lock.unlock()?;
        println!("Released lock '{}'", lock);
        return Ok(exit_codes::SUCCESS);
    }

    match lock.state()? {
        LockState::Absent => {
            println!("Lock '{}' is not held", lock);
        }
        LockState::Held { pid } => {
            return Err(LockfileError::Busy { pid });
        }
        state @ (LockState::Stale { .. } | LockState::Invalid) => {
            lock.unlock()?;
            println!("Released lock '{}' ({})", lock, state);
        }
    }

    Ok(exit_codes::SUCCESS)
}
