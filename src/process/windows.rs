//! Handle and exit-code based liveness probe.

use super::{Liveness, ProbeError};
use std::io;
use windows_sys::Win32::Foundation::{CloseHandle, ERROR_INVALID_PARAMETER, STILL_ACTIVE};
use windows_sys::Win32::System::Threading::{
    GetExitCodeProcess, OpenProcess, PROCESS_QUERY_INFORMATION,
};

pub(super) fn probe(pid: u32) -> Result<Liveness, ProbeError> {
    // SAFETY: OpenProcess has no preconditions; the returned handle is checked
    // before use and closed on every path below.
    let handle = unsafe { OpenProcess(PROCESS_QUERY_INFORMATION, 0, pid) };
    if handle.is_null() {
        let err = io::Error::last_os_error();
        // OpenProcess reports an unknown PID as an invalid parameter.
        if err.raw_os_error() == Some(ERROR_INVALID_PARAMETER as i32) {
            return Ok(Liveness::Dead);
        }
        return Err(ProbeError { pid, source: err });
    }

    let mut code: u32 = 0;
    // SAFETY: `handle` is a valid process handle opened above and `code` is a
    // live local.
    let ok = unsafe { GetExitCodeProcess(handle, &mut code) };
    let err = (ok == 0).then(io::Error::last_os_error);
    // SAFETY: `handle` came from OpenProcess and is not used afterwards.
    unsafe { CloseHandle(handle) };

    if let Some(err) = err {
        return Err(ProbeError { pid, source: err });
    }

    if code == STILL_ACTIVE as u32 {
        Ok(Liveness::Alive)
    } else {
        Ok(Liveness::Dead)
    }
}
