//! External command execution with a hard timeout

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::{HookError, Result};

/// A program invocation: name on PATH, arguments, and time budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }
}

/// Captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// How a command run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The process ran to completion (successfully or not)
    Completed(CommandOutput),
    /// The program is not installed
    NotFound,
    /// The process exceeded its timeout and was killed
    TimedOut,
}

/// Seam between hooks and the operating system's process table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = timeout(spec.timeout, command.output()).await;

        match result {
            Ok(Ok(output)) => {
                debug!("{} exited with {:?}", spec.program, output.status.code());
                Ok(CommandOutcome::Completed(CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }))
            }
            Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found on PATH", spec.program);
                Ok(CommandOutcome::NotFound)
            }
            Ok(Err(e)) => Err(HookError::Spawn {
                program: spec.program.clone(),
                source: e,
            }),
            Err(_) => {
                // Dropping the output future kills the child
                debug!(
                    "{} timed out after {}ms",
                    spec.program,
                    spec.timeout.as_millis()
                );
                Ok(CommandOutcome::TimedOut)
            }
        }
    }
}
