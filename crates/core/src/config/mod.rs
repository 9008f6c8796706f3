use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{HookError, Result};
use crate::paths::Paths;

/// Placeholder in formatter arguments replaced by the edited file's path
pub const FILE_PLACEHOLDER: &str = "{file}";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Resolved state directory (not serialized)
    #[serde(skip)]
    pub paths: Paths,

    #[serde(default)]
    pub formatter: FormatterConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatterConfig {
    /// Formatter executable, looked up on PATH
    #[serde(default = "default_formatter_command")]
    pub command: String,

    /// Arguments; `{file}` is replaced with the edited path, which is
    /// appended when no placeholder is present
    #[serde(default = "default_formatter_args")]
    pub args: Vec<String>,

    /// File extensions (without the dot) the formatter handles
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_formatter_timeout")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Timeout for the `black --check` formatting check
    #[serde(default = "default_format_check_timeout")]
    pub format_check_timeout_ms: u64,

    /// Timeout for ruff, or flake8 when ruff is missing
    #[serde(default = "default_linter_timeout")]
    pub linter_timeout_ms: u64,

    #[serde(default = "default_mypy_timeout")]
    pub mypy_timeout_ms: u64,

    #[serde(default = "default_flake8_max_line_length")]
    pub flake8_max_line_length: u32,

    /// Number of lint records kept in the results log
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_formatter_command() -> String {
    "black".to_string()
}
fn default_formatter_args() -> Vec<String> {
    vec![FILE_PLACEHOLDER.to_string(), "--quiet".to_string()]
}
fn default_extensions() -> Vec<String> {
    vec!["py".to_string(), "pyi".to_string(), "pyx".to_string()]
}
fn default_formatter_timeout() -> u64 {
    10_000
}
fn default_format_check_timeout() -> u64 {
    5_000
}
fn default_linter_timeout() -> u64 {
    10_000
}
fn default_mypy_timeout() -> u64 {
    15_000
}
fn default_flake8_max_line_length() -> u32 {
    88
}
fn default_max_results() -> usize {
    100
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            command: default_formatter_command(),
            args: default_formatter_args(),
            extensions: default_extensions(),
            timeout_ms: default_formatter_timeout(),
        }
    }
}

impl FormatterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the argument list for formatting `file`.
    pub fn args_for(&self, file: &str) -> Vec<String> {
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(FILE_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(FILE_PLACEHOLDER, file)
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(file.to_string());
        }
        args
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            format_check_timeout_ms: default_format_check_timeout(),
            linter_timeout_ms: default_linter_timeout(),
            mypy_timeout_ms: default_mypy_timeout(),
            flake8_max_line_length: default_flake8_max_line_length(),
            max_results: default_max_results(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the config for `paths`.
    ///
    /// Uses `config_path` when given, otherwise `<state_dir>/hookkit.toml`.
    /// A missing file yields defaults; nothing is written to disk.
    pub fn load(paths: Paths, config_path: Option<&Path>) -> Result<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| paths.config_file());

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config {
                paths,
                ..Config::default()
            });
        }

        let mut config = Self::from_file(&path)?;
        config.paths = paths;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HookError::Config(format!("{}: {}", path.display(), e)))
    }
}
