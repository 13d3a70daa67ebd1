//! lockfile: advisory PID lock files for cooperating processes.
//!
//! This is the entry point for the `lockfile` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod cli;
mod commands;

use cli::Cli;
use lockfile::exit_codes;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with `status` output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lockfile=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(code) => ExitCode::from(to_exit_status(code)),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(to_exit_status(err.exit_code()))
        }
    }
}

/// Narrow an exit code to the portable 0..=255 range.
///
/// Codes that do not fit (Windows NTSTATUS values, negative codes) would be
/// truncated and could wrap to 0, so they become a plain failure instead.
fn to_exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(exit_codes::USER_ERROR as u8)
}
