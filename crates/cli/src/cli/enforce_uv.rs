use anyhow::Result;
use std::process::ExitCode;

use hookkit_core::hooks::check_uv;

use super::{HookContext, read_event_or_skip};

/// Exit status asking the host to reconsider the command
const BLOCK: u8 = 2;

pub fn run(ctx: HookContext) -> Result<ExitCode> {
    let event = match read_event_or_skip() {
        Ok(Some(event)) => event,
        _ => return Ok(ExitCode::SUCCESS),
    };

    match check_uv(&ctx.paths, &event).message() {
        Some(message) => {
            eprintln!("{}", message);
            Ok(ExitCode::from(BLOCK))
        }
        None => Ok(ExitCode::SUCCESS),
    }
}
