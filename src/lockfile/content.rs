//! Lock file payload: the owner's PID in decimal followed by a newline.

/// Render the lock file content for `pid`.
pub fn encode(pid: u32) -> String {
    format!("{}\n", pid)
}

/// Extract the PID from lock file content.
///
/// Only the first whitespace-separated token is considered. Returns `None`
/// for empty or non-numeric content. A zero PID parses successfully; callers
/// decide what it means.
pub fn decode(content: &str) -> Option<u32> {
    content.split_whitespace().next()?.parse().ok()
}
