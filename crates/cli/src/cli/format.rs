use anyhow::Result;
use std::process::ExitCode;
use tracing::debug;

use hookkit_core::config::FormatterConfig;
use hookkit_core::hooks::{FormatOutcome, Formatter, SkipReason, SystemRunner};
use hookkit_core::Result as HookResult;

use super::{HookContext, read_event_or_skip};

/// Format the edited file. Every path through here exits 0.
pub async fn run(ctx: HookContext) -> Result<ExitCode> {
    let tool = match &ctx.config {
        Ok(config) => config.formatter.command.clone(),
        Err(_) => FormatterConfig::default().command,
    };

    match format_event(ctx).await {
        Ok(Some(outcome)) => {
            if let Some(line) = outcome.diagnostic(&tool) {
                eprintln!("{}", line);
            } else {
                debug!("Formatter outcome: {:?}", outcome);
            }
        }
        Ok(None) => {}
        Err(e) => eprintln!("\u{26a0}\u{fe0f}  {} formatting error: {}", tool, e),
    }

    Ok(ExitCode::SUCCESS)
}

async fn format_event(ctx: HookContext) -> HookResult<Option<FormatOutcome>> {
    let Some(event) = read_event_or_skip()? else {
        return Ok(None);
    };
    // a broken config only matters once there is a file to format
    if event.call.edited_file().is_none() {
        return Ok(Some(FormatOutcome::Skipped(SkipReason::NotAFileEdit)));
    }
    let config = ctx.config?;
    let outcome = Formatter::new(&config.formatter, &SystemRunner)
        .handle(&event)
        .await?;
    Ok(Some(outcome))
}
