//! CLI argument parsing for lockfile.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Advisory PID lock files for cooperating processes.
///
/// A lock is a file at an absolute path containing the PID of its holder.
/// Lock files left behind by dead processes are reclaimed automatically.
#[derive(Parser, Debug)]
#[command(name = "lockfile")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML config file with acquisition settings.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lockfile.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show who holds a lock.
    ///
    /// Reports whether the lock file is absent, held by a live process,
    /// stale, or invalid. Never modifies the lock file.
    Status(StatusArgs),

    /// Run a command while holding a lock.
    ///
    /// Takes the lock, runs the command, releases the lock, and exits with
    /// the command's exit code.
    Run(RunArgs),

    /// Remove a lock file.
    ///
    /// Only stale or invalid lock files are removed unless --force is given.
    Release(ReleaseArgs),
}

/// Arguments for the `status` command.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Absolute path of the lock file.
    pub path: PathBuf,

    /// Print the state as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Absolute path of the lock file.
    pub path: PathBuf,

    /// Seconds to keep retrying while the lock is busy (0 fails immediately).
    #[arg(long, default_value_t = 0, value_name = "SECS")]
    pub wait: u64,

    /// Initial delay between retries in milliseconds.
    #[arg(long, default_value_t = 50, value_name = "MS")]
    pub interval_ms: u64,

    /// Command and arguments to run under the lock.
    #[arg(last = true, required = true, num_args = 1..)]
    pub command: Vec<String>,
}

/// Arguments for the `release` command.
#[derive(Parser, Debug)]
pub struct ReleaseArgs {
    /// Absolute path of the lock file.
    pub path: PathBuf,

    /// Remove the lock file even if its owner is alive.
    #[arg(long)]
    pub force: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["lockfile", "status", "/tmp/app.lock"]).unwrap();
        if let Command::Status(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("/tmp/app.lock"));
            assert!(!args.json);
        } else {
            panic!("Expected Status command");
        }
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_status_json() {
        let cli = Cli::try_parse_from(["lockfile", "status", "/tmp/app.lock", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Status(StatusArgs { json: true, .. })));
    }

    #[test]
    fn parse_run_minimal() {
        let cli =
            Cli::try_parse_from(["lockfile", "run", "/tmp/app.lock", "--", "make"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("/tmp/app.lock"));
            assert_eq!(args.wait, 0);
            assert_eq!(args.interval_ms, 50);
            assert_eq!(args.command, vec!["make"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_full() {
        let cli = Cli::try_parse_from([
            "lockfile",
            "--config",
            "/etc/lockfile.yaml",
            "run",
            "/tmp/app.lock",
            "--wait",
            "30",
            "--interval-ms",
            "200",
            "--",
            "cargo",
            "build",
            "--release",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/lockfile.yaml")));
        if let Command::Run(args) = cli.command {
            assert_eq!(args.wait, 30);
            assert_eq!(args.interval_ms, 200);
            assert_eq!(args.command, vec!["cargo", "build", "--release"]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_requires_command() {
        assert!(Cli::try_parse_from(["lockfile", "run", "/tmp/app.lock"]).is_err());
    }

    #[test]
    fn parse_release() {
        let cli = Cli::try_parse_from(["lockfile", "release", "/tmp/app.lock"]).unwrap();
        assert!(matches!(cli.command, Command::Release(ReleaseArgs { force: false, .. })));
    }

    #[test]
    fn parse_release_force_with_trailing_config() {
        let cli = Cli::try_parse_from([
            "lockfile",
            "release",
            "/tmp/app.lock",
            "--force",
            "--config",
            "cfg.yaml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Release(ReleaseArgs { force: true, .. })));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yaml")));
    }
}
