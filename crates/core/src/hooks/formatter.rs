//! Auto-format edited source files with an external formatter.
//!
//! Fail-open: nothing here should ever make the calling pipeline fail. The
//! outcome only decides which diagnostic line, if any, gets printed.

use std::path::Path;

use tracing::debug;

use super::event::ToolEvent;
use super::runner::{CommandOutcome, CommandRunner, CommandSpec};
use crate::config::FormatterConfig;
use crate::error::Result;

/// Why a hook left an event alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The tool neither edits nor writes a file
    NotAFileEdit,
    /// The event carries no file path
    NoFilePath,
    /// The file's extension is not handled
    UnsupportedExtension,
    /// The file does not exist on disk
    FileMissing,
}

/// Result of one formatter run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatOutcome {
    Skipped(SkipReason),
    Formatted { path: String },
    /// Formatter exited non-zero; `stderr` may be empty
    Failed { path: String, stderr: String },
    /// Formatter binary is not installed
    ToolMissing,
    TimedOut { path: String },
}

impl FormatOutcome {
    /// Status line for the diagnostic stream, if this outcome has one.
    pub fn diagnostic(&self, tool: &str) -> Option<String> {
        match self {
            FormatOutcome::Formatted { path } => {
                Some(format!("\u{2705} Formatted {} with {}", path, tool))
            }
            FormatOutcome::Failed { stderr, .. } if !stderr.trim().is_empty() => Some(format!(
                "\u{26a0}\u{fe0f}  {} formatting issue: {}",
                tool,
                stderr.trim_end()
            )),
            FormatOutcome::TimedOut { path } => Some(format!(
                "\u{26a0}\u{fe0f}  {} formatting timed out for {}",
                tool, path
            )),
            _ => None,
        }
    }
}

/// Whether `path` ends in one of `extensions` (given without the dot).
pub fn has_extension(path: &str, extensions: &[String]) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|known| known == ext))
}

pub struct Formatter<'a> {
    config: &'a FormatterConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> Formatter<'a> {
    pub fn new(config: &'a FormatterConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Name used in diagnostics
    pub fn tool(&self) -> &str {
        &self.config.command
    }

    /// Decide whether `event` needs formatting without running anything.
    pub fn target<'e>(&self, event: &'e ToolEvent) -> std::result::Result<&'e str, SkipReason> {
        let path = event.call.edited_file().ok_or(SkipReason::NotAFileEdit)?;
        if path.is_empty() {
            return Err(SkipReason::NoFilePath);
        }
        if !has_extension(path, &self.config.extensions) {
            return Err(SkipReason::UnsupportedExtension);
        }
        Ok(path)
    }

    /// Format the file named by `event`, if it is one this formatter handles.
    pub async fn handle(&self, event: &ToolEvent) -> Result<FormatOutcome> {
        let path = match self.target(event) {
            Ok(path) => path,
            Err(reason) => {
                debug!("Skipping {} event: {:?}", event.tool_name(), reason);
                return Ok(FormatOutcome::Skipped(reason));
            }
        };

        let spec = CommandSpec::new(
            self.config.command.clone(),
            self.config.args_for(path),
            self.config.timeout(),
        );

        let outcome = match self.runner.run(&spec).await? {
            CommandOutcome::Completed(output) if output.success() => FormatOutcome::Formatted {
                path: path.to_string(),
            },
            CommandOutcome::Completed(output) => FormatOutcome::Failed {
                path: path.to_string(),
                stderr: output.stderr,
            },
            CommandOutcome::NotFound => FormatOutcome::ToolMissing,
            CommandOutcome::TimedOut => FormatOutcome::TimedOut {
                path: path.to_string(),
            },
        };
        Ok(outcome)
    }
}
