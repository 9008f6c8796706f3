//! Python lint gate: formatting check, linter, and type checker.
//!
//! Runs after an edit. When any check reports issues the hook asks the host
//! to surface them (exit status 2); tool failures never block.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::event::ToolEvent;
use super::formatter::{SkipReason, has_extension};
use super::runner::{CommandOutcome, CommandOutput, CommandRunner, CommandSpec};
use crate::audit::{JsonArrayLog, now_iso8601};
use crate::config::LintConfig;
use crate::error::Result;
use crate::paths::Paths;

const BLACK: &str = "black";
const RUFF: &str = "ruff";
const FLAKE8: &str = "flake8";
const MYPY: &str = "mypy";

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub tool: String,
    pub passed: bool,
    /// One-line summary when the check found problems in the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    /// Raw tool output backing the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Why the check could not give a verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    fn passed(tool: &str) -> Self {
        Self {
            tool: tool.to_string(),
            passed: true,
            issue: None,
            details: None,
            error: None,
        }
    }

    fn failed(tool: &str, issue: Option<String>) -> Self {
        Self {
            passed: false,
            issue,
            ..Self::passed(tool)
        }
    }

    fn with_error(mut self, error: impl Into<String>) -> Self {
        let error = error.into();
        if !error.trim().is_empty() {
            self.error = Some(error);
        }
        self
    }

    fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether this check found something the author should fix
    pub fn has_issue(&self) -> bool {
        !self.passed && self.issue.is_some()
    }
}

/// All check results for one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintReport {
    pub file: String,
    pub results: Vec<CheckResult>,
}

impl LintReport {
    pub fn issues(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.has_issue())
            .filter_map(|r| r.issue.as_deref())
            .collect()
    }

    pub fn has_issues(&self) -> bool {
        self.results.iter().any(CheckResult::has_issue)
    }

    /// Human-readable report pointing at the detailed results log.
    pub fn render(&self, results_log: &Path) -> String {
        format!(
            "\n\u{26a0}\u{fe0f}  Python linting issues found in {file}\n\n{issues}\n\n\
             To fix automatically:\n  black {file}\n  ruff check --fix {file}\n\n\
             For detailed errors, check {log}\n",
            file = self.file,
            issues = self.issues().join("\n"),
            log = results_log.display(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LintOutcome {
    Skipped(SkipReason),
    Checked(LintReport),
}

/// Record persisted to the lint results log
#[derive(Debug, Serialize)]
struct LintRecord<'a> {
    timestamp: String,
    session_id: &'a Value,
    file: &'a str,
    results: &'a [CheckResult],
}

pub struct Linter<'a> {
    config: &'a LintConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> Linter<'a> {
    pub fn new(config: &'a LintConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Run every check on the file named by `event`.
    pub async fn handle(&self, event: &ToolEvent) -> LintOutcome {
        let Some(path) = event.call.edited_file() else {
            return LintOutcome::Skipped(SkipReason::NotAFileEdit);
        };
        if path.is_empty() {
            return LintOutcome::Skipped(SkipReason::NoFilePath);
        }
        if !has_extension(path, &self.config.extensions) {
            return LintOutcome::Skipped(SkipReason::UnsupportedExtension);
        }
        if !Path::new(path).exists() {
            debug!("Not linting {}: file does not exist", path);
            return LintOutcome::Skipped(SkipReason::FileMissing);
        }

        let results = vec![
            self.check_formatting(path).await,
            self.run_linter(path).await,
            self.run_mypy(path).await,
        ];
        LintOutcome::Checked(LintReport {
            file: path.to_string(),
            results,
        })
    }

    async fn run(&self, program: &str, args: Vec<String>, timeout_ms: u64) -> Result<CommandOutcome> {
        let spec = CommandSpec::new(program, args, Duration::from_millis(timeout_ms));
        self.runner.run(&spec).await
    }

    async fn check_formatting(&self, path: &str) -> CheckResult {
        let tool = "black (formatting)";
        let args = vec!["--check".into(), "--quiet".into(), path.into()];
        match self.run(BLACK, args, self.config.format_check_timeout_ms).await {
            Ok(CommandOutcome::Completed(output)) if output.success() => CheckResult::passed(tool),
            Ok(CommandOutcome::Completed(_)) => CheckResult::failed(
                tool,
                Some("Formatting: File needs formatting".to_string()),
            ),
            Ok(CommandOutcome::TimedOut) => CheckResult::passed(tool).with_error("Timeout"),
            Ok(CommandOutcome::NotFound) => {
                CheckResult::passed(tool).with_error("Black not installed")
            }
            Err(e) => CheckResult::passed(tool).with_error(e.to_string()),
        }
    }

    /// Ruff, falling back to flake8 when ruff is not installed.
    async fn run_linter(&self, path: &str) -> CheckResult {
        let args = vec![
            "check".into(),
            path.into(),
            "--output-format".into(),
            "json".into(),
        ];
        match self.run(RUFF, args, self.config.linter_timeout_ms).await {
            Ok(CommandOutcome::Completed(output)) if output.success() => CheckResult::passed(RUFF),
            Ok(CommandOutcome::Completed(output)) => ruff_failure(output),
            Ok(CommandOutcome::TimedOut) => CheckResult::failed(RUFF, None).with_error("Timeout"),
            Ok(CommandOutcome::NotFound) => self.run_flake8(path).await,
            Err(e) => CheckResult::failed(RUFF, None).with_error(e.to_string()),
        }
    }

    async fn run_flake8(&self, path: &str) -> CheckResult {
        let args = vec![
            path.into(),
            format!("--max-line-length={}", self.config.flake8_max_line_length),
        ];
        match self.run(FLAKE8, args, self.config.linter_timeout_ms).await {
            Ok(CommandOutcome::Completed(output)) if output.success() => {
                CheckResult::passed(FLAKE8)
            }
            Ok(CommandOutcome::Completed(output)) => {
                CheckResult::failed(FLAKE8, Some("flake8: Found issues".to_string()))
                    .with_details(Value::String(output.stdout))
                    .with_error(output.stderr)
            }
            Ok(CommandOutcome::TimedOut) => {
                CheckResult::failed(FLAKE8, None).with_error("Timeout")
            }
            Ok(CommandOutcome::NotFound) => {
                CheckResult::passed(FLAKE8).with_error("Flake8 not installed")
            }
            Err(e) => CheckResult::failed(FLAKE8, None).with_error(e.to_string()),
        }
    }

    async fn run_mypy(&self, path: &str) -> CheckResult {
        let args = vec![path.into(), "--ignore-missing-imports".into()];
        match self.run(MYPY, args, self.config.mypy_timeout_ms).await {
            Ok(CommandOutcome::Completed(output)) if output.success() => CheckResult::passed(MYPY),
            Ok(CommandOutcome::Completed(output)) => CheckResult::failed(
                MYPY,
                Some("Mypy: Type checking issues found".to_string()),
            )
            .with_details(Value::String(output.stdout))
            .with_error(output.stderr),
            Ok(CommandOutcome::TimedOut) => CheckResult::failed(MYPY, None).with_error("Timeout"),
            Ok(CommandOutcome::NotFound) => {
                CheckResult::passed(MYPY).with_error("Mypy not installed")
            }
            Err(e) => CheckResult::failed(MYPY, None).with_error(e.to_string()),
        }
    }
}

fn ruff_failure(output: CommandOutput) -> CheckResult {
    let details = if output.stdout.trim().is_empty() {
        Value::Array(Vec::new())
    } else {
        serde_json::from_str(&output.stdout).unwrap_or(Value::String(output.stdout))
    };
    let issue = match &details {
        Value::Array(items) => format!("{}: Found {} issues", RUFF, items.len()),
        _ => format!("{}: Found issues", RUFF),
    };
    CheckResult::failed(RUFF, Some(issue))
        .with_details(details)
        .with_error(output.stderr)
}

/// Append `report` to the lint results log, keeping the newest records.
///
/// Failures are logged and otherwise ignored.
pub fn save_results(
    paths: &Paths,
    config: &LintConfig,
    session_id: &Value,
    report: &LintReport,
) {
    let record = LintRecord {
        timestamp: now_iso8601(),
        session_id,
        file: &report.file,
        results: &report.results,
    };
    let log = JsonArrayLog::new(paths.lint_results_log()).with_retention(config.max_results);
    if let Err(e) = paths.ensure_dirs().and_then(|()| log.append(&record)) {
        warn!("Failed to save lint results: {}", e);
    }
}
