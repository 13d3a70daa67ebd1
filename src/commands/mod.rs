//! Command implementations for lockfile.
//!
//! The dispatcher routes parsed CLI commands to their handlers. Each handler
//! returns the process exit code on success; errors carry their own code.

mod release;
mod run;
mod status;

use crate::cli::{Cli, Command};
use lockfile::Lockfile;
use lockfile::config::Config;
use lockfile::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Status(args) => status::cmd_status(args, config),
        Command::Run(args) => run::cmd_run(args, config),
        Command::Release(args) => release::cmd_release(args, config),
    }
}

/// Load the config file if one was given, otherwise use defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Build a lock handle for a command's path argument.
fn open_lock(path: &Path, config: Config) -> Result<Lockfile> {
    Lockfile::with_config(path, config)
}
