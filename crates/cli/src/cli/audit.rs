use anyhow::Result;
use std::process::ExitCode;
use tracing::debug;

use hookkit_core::audit::record_tool_use;

use super::{HookContext, read_event};

/// Record the event on stdin. Failures exit 1: a gap in the audit trail
/// should be visible to the host.
pub fn run(ctx: HookContext) -> Result<ExitCode> {
    let result = read_event().and_then(|event| record_tool_use(&ctx.paths, &event));

    match result {
        Ok(count) => {
            debug!(
                "Tool usage log now holds {} entries ({})",
                count,
                ctx.paths.tool_usage_log().display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_invalid_input() => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            eprintln!("Unexpected error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
