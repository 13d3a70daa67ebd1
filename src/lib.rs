//! Advisory, cooperative mutual exclusion between processes using a lock file.
//!
//! ```no_run
//! use lockfile::{Lockfile, LockfileError};
//!
//! let lock = Lockfile::new("/tmp/my-app.lock")?;
//! match lock.try_lock() {
//!     Ok(()) => {
//!         // do work under the lock
//!         lock.unlock()?;
//!     }
//!     Err(LockfileError::Busy { pid }) => eprintln!("already running as pid {}", pid),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), LockfileError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod lockfile;
pub mod process;

pub use config::Config;
pub use error::{LockfileError, Result};
pub use lockfile::{LockGuard, LockState, Lockfile, RetryPolicy, acquire_with_retry};
