//! CLI-specific error types and exit-code mapping.

use graf_core::{PathError, ProcessError, RenderError};
use graf_runtime::InstallError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A step failed for a reason other than a child exit status.
    #[error("{0}")]
    Install(String),

    /// Argument or descriptor error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error outside a step.
    #[error("IO error: {0}")]
    Io(String),

    /// The installation context could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A child process failed.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error, including a failed subprocess
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Install(_) | Self::Process(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<InstallError> for CliError {
    fn from(err: InstallError) -> Self {
        match err {
            InstallError::Process(proc_err) => Self::from(proc_err),
            other => Self::Install(other.to_string()),
        }
    }
}

impl From<ProcessError> for CliError {
    fn from(err: ProcessError) -> Self {
        Self::Process(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Read { .. } => Self::Io(err.to_string()),
            other => Self::Arguments(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
