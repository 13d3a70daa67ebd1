//! Implementation of the `lockfile status` command.

use super::open_lock;
use crate::cli::StatusArgs;
use lockfile::config::Config;
use lockfile::error::{LockfileError, Result};
use lockfile::exit_codes;
use serde_json::json;

/// Print the state of a lock file.
///
/// Always exits successfully when the state could be read; scripts inspect
/// the output (or `--json`) rather than the exit code.
pub fn cmd_status(args: StatusArgs, config: Config) -> Result<i32> {
    let lock = open_lock(&args.path, config)?;
    let state = lock.state()?;

    if args.json {
        let output = json!({
            "path": lock.path().display().to_string(),
            "lock": state,
        });
        let rendered = serde_json::to_string_pretty(&output).map_err(|e| {
            LockfileError::io("failed to render status as JSON", std::io::Error::other(e))
        })?;
        println!("{}", rendered);
    } else {
        println!("{}: {}", lock, state);
    }

    Ok(exit_codes::SUCCESS)
}
