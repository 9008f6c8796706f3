pub mod audit;
pub mod enforce_uv;
pub mod format;
pub mod lint;
pub mod paths;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hookkit_core::config::Config;
use hookkit_core::env::{HOOKKIT_CONFIG, HOOKKIT_STATE_DIR};
use hookkit_core::hooks::ToolEvent;
use hookkit_core::paths::Paths;
use hookkit_core::Result as HookResult;

#[derive(Parser)]
#[command(name = "hookkit")]
#[command(author, version, about = "Event hooks for tool-use pipelines", long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: <state-dir>/hookkit.toml)
    #[arg(short, long, global = true, env = HOOKKIT_CONFIG)]
    pub config: Option<PathBuf>,

    /// State directory for logs and config (default: .claude)
    #[arg(long, global = true, env = HOOKKIT_STATE_DIR)]
    pub state_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format the file an Edit/Write event touched (always exits 0)
    Format,

    /// Append the event to the tool-usage audit log
    Audit,

    /// Lint the Python file an Edit/Write event touched (exits 2 on issues)
    Lint,

    /// Intercept pip/venv commands and suggest uv (exits 2 on a match)
    EnforceUv,

    /// Show the resolved state directory and file locations
    Paths,
}

impl Commands {
    /// Hooks that must never fail the calling pipeline
    pub fn is_fail_open(&self) -> bool {
        !matches!(self, Commands::Audit)
    }
}

/// Per-invocation state shared by all subcommands
pub struct HookContext {
    pub paths: Paths,
    pub config_file: PathBuf,
    /// Loaded eagerly; each hook decides how to treat a broken config
    pub config: HookResult<Config>,
}

impl HookContext {
    pub fn new(cli: &Cli) -> Self {
        let paths = Paths::resolve(cli.state_dir.as_deref());
        let config_file = cli.config.clone().unwrap_or_else(|| paths.config_file());
        let config = Config::load(paths.clone(), cli.config.as_deref());
        Self {
            paths,
            config_file,
            config,
        }
    }

    /// Level from the config file, if it loaded
    pub fn log_level(&self) -> Option<&str> {
        self.config.as_ref().ok().map(|c| c.logging.level.as_str())
    }
}

/// Read and parse the single event on stdin.
pub fn read_event() -> HookResult<ToolEvent> {
    let mut input = Vec::new();
    std::io::stdin().read_to_end(&mut input)?;
    ToolEvent::from_slice(&input)
}

/// Read the event, treating unreadable input as "nothing to do".
///
/// Used by the fail-open hooks; returns `Err` only for unexpected failures.
pub fn read_event_or_skip() -> HookResult<Option<ToolEvent>> {
    match read_event() {
        Ok(event) => Ok(Some(event)),
        Err(e) if e.is_invalid_input() => {
            tracing::debug!("Ignoring unreadable hook input: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
