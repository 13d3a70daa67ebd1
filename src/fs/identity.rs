//! Filesystem identity of a directory entry.
//!
//! Two paths denote the same file when they resolve to the same underlying
//! storage object, regardless of the names used to reach it. Symlinks are not
//! followed: the identity is that of the entry itself.
//!
//! - **Unix**: device number and inode number from `lstat`.
//! - **Windows**: volume serial number and 64-bit file index, read from a
//!   handle opened with `FILE_FLAG_OPEN_REPARSE_POINT`.

use crate::error::{LockfileError, Result};
use std::path::Path;

/// Storage identity of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    volume: u64,
    index: u64,
}

impl FileIdentity {
    /// Look up the identity of `path` without following a final symlink.
    #[cfg(unix)]
    pub fn of(path: &Path) -> Result<Self> {
        use std::os::unix::fs::MetadataExt;

        let meta = std::fs::symlink_metadata(path)
            .map_err(|e| LockfileError::io(format!("failed to stat '{}'", path.display()), e))?;

        Ok(Self {
            volume: meta.dev(),
            index: meta.ino(),
        })
    }

    /// Look up the identity of `path` without following a final reparse point.
    #[cfg(windows)]
    pub fn of(path: &Path) -> Result<Self> {
        use std::fs::OpenOptions;
        use std::os::windows::fs::OpenOptionsExt;
        use std::os::windows::io::AsRawHandle;
        use windows_sys::Win32::Storage::FileSystem::{
            BY_HANDLE_FILE_INFORMATION, FILE_FLAG_BACKUP_SEMANTICS, FILE_FLAG_OPEN_REPARSE_POINT,
            GetFileInformationByHandle,
        };

        let context = || format!("failed to stat '{}'", path.display());

        // Access mode 0 queries attributes without needing read permission.
        let file = OpenOptions::new()
            .access_mode(0)
            .custom_flags(FILE_FLAG_BACKUP_SEMANTICS | FILE_FLAG_OPEN_REPARSE_POINT)
            .open(path)
            .map_err(|e| LockfileError::io(context(), e))?;

        // SAFETY: BY_HANDLE_FILE_INFORMATION is plain data; all-zero is valid.
        let mut info: BY_HANDLE_FILE_INFORMATION = unsafe { std::mem::zeroed() };
        // SAFETY: the handle is owned by `file`, which outlives this call.
        let ok = unsafe { GetFileInformationByHandle(file.as_raw_handle() as _, &mut info) };
        if ok == 0 {
            return Err(LockfileError::io(context(), std::io::Error::last_os_error()));
        }

        Ok(Self {
            volume: u64::from(info.dwVolumeSerialNumber),
            index: (u64::from(info.nFileIndexHigh) << 32) | u64::from(info.nFileIndexLow),
        })
    }
}

/// Whether `a` and `b` name the same underlying file.
pub fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(FileIdentity::of(a)? == FileIdentity::of(b)?)
}
