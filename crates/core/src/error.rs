//! Error type shared by all hooks.

use std::path::PathBuf;

/// Failures a hook can run into.
///
/// Expected non-events (a tool the hook ignores, a missing formatter binary)
/// are not errors; they are reported through each hook's outcome type.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// Standard input was not a JSON object of the expected shape.
    #[error("Error parsing JSON input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    /// An external program exists but could not be started or awaited.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The on-disk log is not a JSON array and will not be overwritten.
    #[error("log file {} is not a JSON array: {source}", path.display())]
    CorruptLog {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HookError {
    /// Whether this error came from unreadable hook input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HookError::InvalidInput(_))
    }
}

pub type Result<T, E = HookError> = std::result::Result<T, E>;
