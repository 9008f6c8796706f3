//! Tool-use hooks.
//!
//! Each hook receives one tool-invocation event as JSON on stdin:
//! - formatter: auto-format edited source files (never blocks)
//! - lint: report lint/type issues in edited Python files (exit 2 on issues)
//! - uv: intercept pip/venv commands and suggest uv (exit 2 on match)
//!
//! The audit trail lives in [`crate::audit`].
//!
//! Example event:
//! ```json
//! {
//!   "tool": "Edit",
//!   "sessionId": "3f2c9a",
//!   "file_path": "src/app.py"
//! }
//! ```
//!
//! External tools run through a [`CommandRunner`] with a hard timeout.

mod event;
mod formatter;
mod lint;
mod runner;
mod uv;

pub use event::{ToolCall, ToolEvent, UNKNOWN};
pub use formatter::{FormatOutcome, Formatter, SkipReason, has_extension};
pub use lint::{CheckResult, LintOutcome, LintReport, Linter, save_results};
pub use runner::{CommandOutcome, CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use uv::{UvVerdict, check_event as check_uv, suggest_uv};
