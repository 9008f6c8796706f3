use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;

use cli::{Cli, Commands, HookContext};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let fail_open = cli.command.is_fail_open();

    // Hooks run one event to completion; a single-threaded runtime is enough
    // to drive the bounded wait on child processes.
    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(async_main(cli)));

    match result {
        Err(e) if fail_open => {
            eprintln!("hookkit: {:#}", e);
            Ok(ExitCode::SUCCESS)
        }
        other => other,
    }
}

async fn async_main(cli: Cli) -> Result<ExitCode> {
    let ctx = HookContext::new(&cli);

    // Initialize logging
    // Use "warn" by default so hook output stays clean, "debug" with --verbose
    let log_level = if cli.verbose {
        "debug"
    } else {
        ctx.log_level().unwrap_or("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Format => crate::cli::format::run(ctx).await,
        Commands::Audit => crate::cli::audit::run(ctx),
        Commands::Lint => crate::cli::lint::run(ctx).await,
        Commands::EnforceUv => crate::cli::enforce_uv::run(ctx),
        Commands::Paths => crate::cli::paths::run(ctx),
    }
}
