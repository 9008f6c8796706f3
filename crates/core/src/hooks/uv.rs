//! Steer pip and venv invocations towards uv.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::event::ToolEvent;
use crate::audit::{JsonArrayLog, now_iso8601};
use crate::paths::Paths;

/// pip invocations and their uv replacements, checked in order
const PIP_TO_UV: &[(&str, &str)] = &[
    ("pip install", "uv pip install"),
    ("pip3 install", "uv pip install"),
    ("pip uninstall", "uv pip uninstall"),
    ("pip3 uninstall", "uv pip uninstall"),
    ("pip freeze", "uv pip freeze"),
    ("pip3 freeze", "uv pip freeze"),
    ("pip list", "uv pip list"),
    ("pip3 list", "uv pip list"),
    ("pip show", "uv pip show"),
    ("pip3 show", "uv pip show"),
    ("python -m pip", "uv pip"),
    ("python3 -m pip", "uv pip"),
    ("python -m venv", "uv venv"),
    ("python3 -m venv", "uv venv"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UvVerdict {
    /// Not a shell command, or nothing to replace
    Allow,
    /// The command should go through uv instead
    Suggest { original: String, suggested: String },
}

impl UvVerdict {
    pub fn message(&self) -> Option<String> {
        let UvVerdict::Suggest {
            original,
            suggested,
        } = self
        else {
            return None;
        };
        Some(format!(
            "\n\u{26a0}\u{fe0f}  Please use UV instead of pip for better performance and reliability.\n\n\
             Original command: {original}\n\
             Suggested command: {suggested}\n\n\
             UV is faster and more reliable than pip. To install UV:\n  \
             curl -LsSf https://astral.sh/uv/install.sh | sh\n\n\
             Or if UV is not available, you can proceed with pip by acknowledging this message.\n"
        ))
    }
}

#[derive(Debug, Serialize)]
struct UvRecord<'a> {
    timestamp: String,
    session_id: &'a Value,
    original_command: &'a str,
    suggested_command: &'a str,
}

/// Rewrite `command` to use uv, if it invokes pip or venv directly.
///
/// Matching is case-insensitive and the suggestion is lower-cased.
pub fn suggest_uv(command: &str) -> Option<String> {
    let lower = command.to_lowercase();
    PIP_TO_UV
        .iter()
        .find_map(|(pip, uv)| replace_bare(&lower, pip, uv))
}

/// Replace occurrences of `needle` not already preceded by `uv `.
fn replace_bare(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    let mut out = String::with_capacity(haystack.len() + 8);
    let mut last = 0;
    let mut replaced = false;
    for (idx, _) in haystack.match_indices(needle) {
        if haystack[..idx].ends_with("uv ") {
            continue;
        }
        out.push_str(&haystack[last..idx]);
        out.push_str(replacement);
        last = idx + needle.len();
        replaced = true;
    }
    if !replaced {
        return None;
    }
    out.push_str(&haystack[last..]);
    Some(out)
}

/// Check a Bash event, logging any suggestion to the uv enforcement log.
pub fn check_event(paths: &Paths, event: &ToolEvent) -> UvVerdict {
    let Some(command) = event.call.shell_command() else {
        return UvVerdict::Allow;
    };
    let Some(suggested) = suggest_uv(command) else {
        return UvVerdict::Allow;
    };

    let record = UvRecord {
        timestamp: now_iso8601(),
        session_id: &event.session_id,
        original_command: command,
        suggested_command: &suggested,
    };
    let log = JsonArrayLog::new(paths.uv_enforcement_log());
    if let Err(e) = paths.ensure_dirs().and_then(|()| log.append(&record)) {
        warn!("Failed to log uv suggestion: {}", e);
    }

    UvVerdict::Suggest {
        original: command.to_string(),
        suggested,
    }
}
