//! Filesystem utilities for lockfile.
//!
//! Lock publication is decided by comparing file identities rather than by
//! trusting the return value of the link call, so identity lookup lives here.

pub mod identity;

pub use identity::{FileIdentity, same_file};
