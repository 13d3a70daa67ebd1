//! Signal-based liveness probe.

use super::{Liveness, ProbeError};
use std::io;

pub(super) fn probe(pid: u32) -> Result<Liveness, ProbeError> {
    // kill() treats 0 and negative values as process groups; such PIDs never
    // name a single process.
    let raw = match libc::pid_t::try_from(pid) {
        Ok(raw) if raw > 0 => raw,
        _ => return Ok(Liveness::Dead),
    };

    // SAFETY: signal 0 performs permission and existence checks only; nothing
    // is delivered to the target.
    let rc = unsafe { libc::kill(raw, 0) };
    if rc == 0 {
        return Ok(Liveness::Alive);
    }

    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        Some(libc::ESRCH) => Ok(Liveness::Dead),
        // EPERM: the process exists but belongs to someone else.
        _ => Err(ProbeError { pid, source: err }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_out_of_range_pids_are_dead() {
        assert_eq!(probe(0).unwrap(), Liveness::Dead);
        assert_eq!(probe(u32::MAX).unwrap(), Liveness::Dead);
    }

    #[test]
    fn foreign_process_is_not_reported_dead() {
        // PID 1 always exists; unprivileged callers get EPERM instead of ESRCH.
        match probe(1) {
            Ok(liveness) => assert_eq!(liveness, Liveness::Alive),
            Err(e) => assert_eq!(e.source.raw_os_error(), Some(libc::EPERM)),
        }
    }
}
