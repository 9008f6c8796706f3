//! Tool-invocation events delivered to hooks on stdin

use serde_json::Value;

use crate::error::{HookError, Result};

/// Placeholder for a missing tool name or session id
pub const UNKNOWN: &str = "unknown";

/// The tool call an event describes, with the fields each tool carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    Bash { command: String, description: String },
    Edit { file_path: String },
    Write { file_path: String },
    Read { path: String },
    Grep { path: String, pattern: String },
    Glob { path: String },
    /// Any tool without dedicated fields
    Other { name: String },
}

impl ToolCall {
    /// Tool name as the host pipeline spells it
    pub fn name(&self) -> &str {
        match self {
            ToolCall::Bash { .. } => "Bash",
            ToolCall::Edit { .. } => "Edit",
            ToolCall::Write { .. } => "Write",
            ToolCall::Read { .. } => "Read",
            ToolCall::Grep { .. } => "Grep",
            ToolCall::Glob { .. } => "Glob",
            ToolCall::Other { name } => name,
        }
    }

    /// Path of the file being edited or written, if this is a file edit
    pub fn edited_file(&self) -> Option<&str> {
        match self {
            ToolCall::Edit { file_path } | ToolCall::Write { file_path } => {
                Some(file_path.as_str())
            }
            _ => None,
        }
    }

    /// Shell command line, if this is a Bash call
    pub fn shell_command(&self) -> Option<&str> {
        match self {
            ToolCall::Bash { command, .. } => Some(command.as_str()),
            _ => None,
        }
    }
}

/// One tool-invocation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEvent {
    /// Session id as the host sent it, `"unknown"` when absent
    pub session_id: Value,
    pub call: ToolCall,
}

impl ToolEvent {
    /// Parse a raw stdin payload.
    pub fn from_json(input: &str) -> Result<Self> {
        Self::from_slice(input.as_bytes())
    }

    /// Parse raw stdin bytes; bytes that are not UTF-8 count as malformed.
    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(input).map_err(HookError::InvalidInput)?;
        Self::from_value(value)
    }

    /// Build an event from an already-parsed JSON object.
    ///
    /// Only the outer shape is checked. Fields of an unexpected type are
    /// kept as their JSON text so the event is still processed.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(HookError::InvalidInput(serde::de::Error::custom(
                "expected a JSON object",
            )));
        };

        let name = match map.get("tool") {
            None | Some(Value::Null) => UNKNOWN.to_string(),
            Some(tool) => text(Some(tool)),
        };
        let field = |key: &str| text(map.get(key));

        let call = match name.as_str() {
            "Bash" => ToolCall::Bash {
                command: field("command"),
                description: field("description"),
            },
            "Edit" => ToolCall::Edit {
                file_path: field("file_path"),
            },
            "Write" => ToolCall::Write {
                file_path: field("file_path"),
            },
            "Read" => ToolCall::Read {
                path: field("path"),
            },
            "Glob" => ToolCall::Glob {
                path: field("path"),
            },
            "Grep" => ToolCall::Grep {
                path: field("path"),
                pattern: field("pattern"),
            },
            _ => ToolCall::Other { name },
        };

        let session_id = map
            .get("sessionId")
            .or_else(|| map.get("session_id"))
            .cloned()
            .unwrap_or_else(|| Value::from(UNKNOWN));

        Ok(ToolEvent { session_id, call })
    }

    pub fn tool_name(&self) -> &str {
        self.call.name()
    }
}

/// String fields as-is, `null`/missing as empty, anything else as JSON text.
fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
