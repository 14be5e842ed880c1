//! Error types for installation steps.

use graf_core::{DownloadError, PathError, ProcessError, RenderError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running an installation step.
#[derive(Debug, Error)]
pub enum InstallError {
    // === Subprocess & Network ===
    /// A child process failed to start or exited non-zero
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Fetching the Miniconda installer failed
    #[error("Failed to download installer: {0}")]
    Download(#[from] DownloadError),

    /// No Miniconda build exists for this machine
    #[error("Unsupported platform for Miniconda: {os}/{arch}")]
    UnsupportedPlatform { os: String, arch: String },

    // === Rendering ===
    /// A template could not be rendered
    #[error("Failed to render template: {0}")]
    Render(#[from] RenderError),

    // === Path & IO ===
    /// Path resolution failed
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// Reading a file failed
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a generated file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing a file or directory failed
    #[error("Failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The install record could not be serialized or parsed
    #[error("Install record error: {0}")]
    Record(#[from] serde_json::Error),
}

impl InstallError {
    /// Whether the failure came from a child process exit status.
    pub const fn is_process_failure(&self) -> bool {
        matches!(self, Self::Process(ProcessError::NonZeroExit { .. }))
    }
}

/// Result type for installation steps.
pub type InstallResult<T> = Result<T, InstallError>;
