//! Audit entry types.
//!
//! Defines the structure of tool-usage log entries.

use chrono::{Local, SecondsFormat};
use serde::Serialize;
use serde_json::Value;

use crate::hooks::{ToolCall, ToolEvent};

/// Tool-specific fields recorded with an entry.
///
/// Serialized untagged, so each variant becomes a plain JSON object holding
/// only its own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntryData {
    Shell {
        command: String,
        description: String,
    },
    File {
        file_path: String,
    },
    Search {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Empty {},
}

impl From<&ToolCall> for EntryData {
    fn from(call: &ToolCall) -> Self {
        match call {
            ToolCall::Bash {
                command,
                description,
            } => EntryData::Shell {
                command: command.clone(),
                description: description.clone(),
            },
            ToolCall::Edit { file_path } | ToolCall::Write { file_path } => EntryData::File {
                file_path: file_path.clone(),
            },
            ToolCall::Read { path } | ToolCall::Glob { path } => EntryData::Search {
                path: path.clone(),
                pattern: None,
            },
            ToolCall::Grep { path, pattern } => EntryData::Search {
                path: path.clone(),
                pattern: Some(pattern.clone()),
            },
            ToolCall::Other { .. } => EntryData::Empty {},
        }
    }
}

/// A single tool-usage log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// ISO 8601 local timestamp when the event was recorded.
    pub timestamp: String,
    /// Recorded as received, so a non-string id stays as it was sent.
    pub session_id: Value,
    pub tool: String,
    pub data: EntryData,
}

impl LogEntry {
    /// Create an entry for `event`, stamped with the current time.
    pub fn new(event: &ToolEvent) -> Self {
        Self::at(now_iso8601(), event)
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(timestamp: String, event: &ToolEvent) -> Self {
        Self {
            timestamp,
            session_id: event.session_id.clone(),
            tool: event.tool_name().to_string(),
            data: EntryData::from(&event.call),
        }
    }
}

/// Current local time as ISO 8601 with microseconds and UTC offset
pub fn now_iso8601() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
