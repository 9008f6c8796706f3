//! Tool-usage audit trail.
//!
//! Every tool invocation the host reports is appended to
//! `<state_dir>/tool_usage.json`, a JSON array that is never pruned.

mod entry;
mod journal;

pub use entry::{EntryData, LogEntry, now_iso8601};
pub use journal::JsonArrayLog;

use tracing::debug;

use crate::error::Result;
use crate::hooks::ToolEvent;
use crate::paths::Paths;

/// Record `event` in the tool-usage log and return the new entry count.
pub fn record_tool_use(paths: &Paths, event: &ToolEvent) -> Result<usize> {
    paths.ensure_dirs()?;
    let entry = LogEntry::new(event);
    let count = JsonArrayLog::new(paths.tool_usage_log()).append(&entry)?;
    debug!(
        tool = %entry.tool,
        session_id = %entry.session_id,
        "Audit entry logged"
    );
    Ok(count)
}
