//! Platform-specific path detection and normalisation.
//!
//! Private helpers for locating the running executable and turning
//! user-provided paths into absolute ones.

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Directory containing the running executable.
///
/// This is the default top directory when no override is configured, the
/// same way the installer script used to default to its own location.
pub fn executable_dir() -> Result<PathBuf, PathError> {
    let exe = env::current_exe().map_err(|e| PathError::NoExecutableDir(e.to_string()))?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| PathError::NoExecutableDir(exe.display().to_string()))
}

/// Normalize a user-provided path, expanding a leading `~` and making it absolute.
///
/// The path is taken as given: surrounding whitespace is part of the name
/// and non-UTF-8 components pass through unchanged.
pub(super) fn normalize_user_path(raw: &Path) -> Result<PathBuf, PathError> {
    if raw.as_os_str().is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = match raw.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
            home.join(rest)
        }
        Err(_) => raw.to_path_buf(),
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}
