use anyhow::Result;
use std::process::ExitCode;

use super::HookContext;

pub fn run(ctx: HookContext) -> Result<ExitCode> {
    let paths = &ctx.paths;
    println!("State:        {}", paths.state_dir.display());
    println!("Config:       {}", ctx.config_file.display());
    println!("Tool usage:   {}", paths.tool_usage_log().display());
    println!("Lint results: {}", paths.lint_results_log().display());
    println!("uv log:       {}", paths.uv_enforcement_log().display());
    if let Err(e) = &ctx.config {
        eprintln!("Warning: {}", e);
    }
    Ok(ExitCode::SUCCESS)
}
