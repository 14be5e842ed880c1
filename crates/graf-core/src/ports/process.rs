//! Process executor port.
//!
//! Steps describe what to run with `CommandSpec` and `RunOptions`; the
//! runtime crate decides how the child is spawned and drained.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Pre-tokenised program and arguments
    Argv(Vec<String>),
    /// A command line, split with POSIX shell-word rules
    /// (or handed to `sh -c` when `RunOptions::shell` is set)
    Line(String),
}

impl CommandSpec {
    /// Build an argv command from anything string-like.
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Argv(args.into_iter().map(Into::into).collect())
    }

    /// Build a command line.
    pub fn line(line: impl Into<String>) -> Self {
        Self::Line(line.into())
    }
}

impl From<&str> for CommandSpec {
    fn from(line: &str) -> Self {
        Self::line(line)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argv(args) => f.write_str(&args.join(" ")),
            Self::Line(line) => f.write_str(line),
        }
    }
}

/// How a command is executed and how its failure is treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Working directory for the child
    pub cwd: Option<PathBuf>,
    /// Run through `sh -c`
    pub shell: bool,
    /// Suppress the header, the live output and the footer
    pub silent: bool,
    /// Turn a non-zero exit into `ProcessError::NonZeroExit`
    pub exit_on_error: bool,
    /// Extra environment variables for the child
    pub envs: Vec<(String, String)>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            cwd: None,
            shell: false,
            silent: false,
            exit_on_error: true,
            envs: Vec::new(),
        }
    }
}

impl RunOptions {
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub const fn with_shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.silent = true;
        self
    }

    /// Return failing results to the caller instead of erroring.
    #[must_use]
    pub const fn allow_failure(mut self) -> Self {
        self.exit_on_error = false;
        self
    }

    #[must_use]
    pub fn with_envs(mut self, envs: Vec<(String, String)>) -> Self {
        self.envs.extend(envs);
        self
    }
}

/// Outcome of one finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `-1` when the child was killed by a signal
    pub code: i32,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Combined stdout/stderr lines in arrival order
    pub lines: Vec<String>,
}

impl ProcessOutput {
    pub const fn success(&self) -> bool {
        self.code == 0
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Errors raised by the process executor.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The command line could not be tokenised or is empty
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// The child could not be started
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting for the child failed
    #[error("Failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child finished with a non-zero exit code
    #[error("'{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

/// Runs external commands to completion.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &CommandSpec, options: &RunOptions) -> Result<ProcessOutput, ProcessError>;
}
