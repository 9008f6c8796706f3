//! State directory resolution.
//!
//! Hooks run with the host project as their working directory and keep all
//! their files in one dot-prefixed state directory inside it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::env::HOOKKIT_STATE_DIR;
use crate::error::Result;

/// Default state directory, relative to the working directory
pub const DEFAULT_STATE_DIR_STR: &str = ".claude";

const CONFIG_FILE: &str = "hookkit.toml";
const TOOL_USAGE_FILE: &str = "tool_usage.json";
const LINT_RESULTS_FILE: &str = "python_lint_errors.json";
const UV_ENFORCEMENT_FILE: &str = "uv_enforcement.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub state_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::from_root(DEFAULT_STATE_DIR_STR)
    }
}

impl Paths {
    /// Resolve the state directory.
    ///
    /// Resolution order:
    /// 1. explicit override (from `--state-dir`)
    /// 2. `HOOKKIT_STATE_DIR` env var
    /// 3. `.claude` in the working directory
    pub fn resolve(override_dir: Option<&Path>) -> Self {
        if let Some(dir) = override_dir {
            return Self::from_root(dir);
        }
        match std::env::var(HOOKKIT_STATE_DIR) {
            Ok(dir) if !dir.trim().is_empty() => Self::from_root(dir),
            _ => Self::default(),
        }
    }

    /// Root every file under `state_dir`, expanding a leading `~`.
    pub fn from_root(state_dir: impl AsRef<Path>) -> Self {
        let raw = state_dir.as_ref().to_string_lossy();
        let expanded = shellexpand::tilde(&raw);
        Self {
            state_dir: PathBuf::from(expanded.as_ref()),
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }

    pub fn config_file(&self) -> PathBuf {
        self.state_dir.join(CONFIG_FILE)
    }

    /// Audit trail of every tool invocation
    pub fn tool_usage_log(&self) -> PathBuf {
        self.state_dir.join(TOOL_USAGE_FILE)
    }

    pub fn lint_results_log(&self) -> PathBuf {
        self.state_dir.join(LINT_RESULTS_FILE)
    }

    pub fn uv_enforcement_log(&self) -> PathBuf {
        self.state_dir.join(UV_ENFORCEMENT_FILE)
    }
}
