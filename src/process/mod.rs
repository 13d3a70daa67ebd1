//! Process liveness probing.
//!
//! There is no portable "is this PID alive" primitive, so each target gets its
//! own implementation behind [`probe`]:
//!
//! - **Unix**: sends the null signal with `kill(pid, 0)`. Only `ESRCH` proves
//!   the process is gone; `EPERM` means it exists under another user.
//! - **Windows**: opens a query handle and reads the exit code. `STILL_ACTIVE`
//!   means running, any other code means the process already terminated.
//!
//! Anything inconclusive is reported as a [`ProbeError`]. Callers deciding
//! whether to steal a lock must treat that as "possibly alive".

use std::io;
use thiserror::Error;

#[cfg(unix)]
mod unix;
#[cfg(unix)]
use unix as imp;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
use windows as imp;

/// Outcome of a conclusive liveness probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The process exists and has not terminated.
    Alive,
    /// No such process, or it has already exited.
    Dead,
}

/// The probe could not decide whether the process is alive.
#[derive(Error, Debug)]
#[error("failed to probe process {pid}: {source}")]
pub struct ProbeError {
    /// The PID that was queried.
    pub pid: u32,
    #[source]
    pub source: io::Error,
}

/// Ask the operating system whether `pid` denotes a running process.
pub fn probe(pid: u32) -> Result<Liveness, ProbeError> {
    let result = imp::probe(pid);
    tracing::debug!(pid, ?result, "probed process liveness");
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_process_is_alive() {
        assert_eq!(probe(std::process::id()).unwrap(), Liveness::Alive);
    }

    #[test]
    fn absurd_pid_is_dead() {
        assert_eq!(probe(999_999_999).unwrap(), Liveness::Dead);
    }

    #[test]
    fn exited_child_is_dead() {
        let mut child = spawn_short_lived();
        let pid = child.id();
        child.wait().unwrap();

        assert_eq!(probe(pid).unwrap(), Liveness::Dead);
    }

    #[test]
    fn running_child_is_alive() {
        let mut child = spawn_long_lived();
        let pid = child.id();

        let liveness = probe(pid).unwrap();

        child.kill().unwrap();
        child.wait().unwrap();
        assert_eq!(liveness, Liveness::Alive);
    }

    #[cfg(unix)]
    fn spawn_short_lived() -> std::process::Child {
        std::process::Command::new("true").spawn().unwrap()
    }

    #[cfg(windows)]
    fn spawn_short_lived() -> std::process::Child {
        std::process::Command::new("cmd")
            .args(["/C", "exit 0"])
            .spawn()
            .unwrap()
    }

    #[cfg(unix)]
    fn spawn_long_lived() -> std::process::Child {
        std::process::Command::new("sleep").arg("30").spawn().unwrap()
    }

    #[cfg(windows)]
    fn spawn_long_lived() -> std::process::Child {
        std::process::Command::new("cmd")
            .args(["/C", "ping -n 30 127.0.0.1 > NUL"])
            .spawn()
            .unwrap()
    }
}
