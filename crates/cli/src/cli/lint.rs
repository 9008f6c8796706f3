use anyhow::Result;
use std::process::ExitCode;
use tracing::debug;

use hookkit_core::hooks::{LintOutcome, Linter, SystemRunner, save_results};

use super::{HookContext, read_event_or_skip};

/// Exit status asking the host to show stderr to the agent
const BLOCK: u8 = 2;

pub async fn run(ctx: HookContext) -> Result<ExitCode> {
    let event = match read_event_or_skip() {
        Ok(Some(event)) => event,
        Ok(None) => return Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Linting error: {}", e);
            return Ok(ExitCode::SUCCESS);
        }
    };
    let config = match ctx.config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Linting error: {}", e);
            return Ok(ExitCode::SUCCESS);
        }
    };

    match Linter::new(&config.lint, &SystemRunner).handle(&event).await {
        LintOutcome::Skipped(reason) => {
            debug!("Skipping lint: {:?}", reason);
            Ok(ExitCode::SUCCESS)
        }
        LintOutcome::Checked(report) => {
            save_results(&config.paths, &config.lint, &event.session_id, &report);
            if report.has_issues() {
                eprintln!("{}", report.render(&config.paths.lint_results_log()));
                Ok(ExitCode::from(BLOCK))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
