//! Errors raised while resolving the installation layout.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// `~` was used but `$HOME` is unknown
    #[error("cannot expand '~': home directory is unknown")]
    NoHomeDir,

    /// The running binary's location could not be read
    #[error("cannot locate the graf-install executable: {0}")]
    NoExecutableDir(String),

    /// Something other than a directory sits where one is needed
    #[error("{} is in the way: expected a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("cannot create {}: {reason}", path.display())]
    CreateFailed { path: PathBuf, reason: String },

    /// The top-dir override was blank
    #[error("top directory override is empty")]
    EmptyPath,

    /// A relative override could not be anchored
    #[error("cannot read the working directory: {0}")]
    CurrentDirError(String),
}
