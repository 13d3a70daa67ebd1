//! Implementation of the `lockfile run` command.

use super::open_lock;
use crate::cli::RunArgs;
use lockfile::config::Config;
use lockfile::error::{LockfileError, Result};
use lockfile::exit_codes;
use lockfile::{RetryPolicy, acquire_with_retry};
use std::process::{Command, ExitStatus};
use std::time::Duration;

/// Run a command while holding the lock.
///
/// The lock records this process's PID, which stays alive for as long as the
/// child runs. The lock is released before returning, whatever the child's
/// outcome.
pub fn cmd_run(args: RunArgs, config: Config) -> Result<i32> {
    let lock = open_lock(&args.path, config)?;

    let policy = RetryPolicy::new()
        .with_timeout(Duration::from_secs(args.wait))
        .with_base_delay(Duration::from_millis(args.interval_ms));
    let guard = acquire_with_retry(&lock, &policy)?;

    let (program, program_args) = args
        .command
        .split_first()
        .ok_or_else(|| LockfileError::Config("no command given to run".to_string()))?;

    tracing::debug!(lock = %lock, program = %program, "running command under lock");
    let status = Command::new(program).args(program_args).status();

    guard.release()?;

    let status = status
        .map_err(|e| LockfileError::io(format!("failed to run '{}'", program), e))?;
    Ok(exit_code_of(status))
}

/// Map a child's exit status to our own exit code.
///
/// A child killed by a signal follows the shell convention of 128 + signal.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    exit_codes::USER_ERROR
}
