//! Path resolution for the installer.
//!
//! This module provides the canonical path resolution for all graf components:
//! - Top-level installation directory (env override or executable dir)
//! - Miniconda root and environment directory
//! - Generated scripts and descriptor files
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - The resolved `InstallContext` is passed explicitly; there is no global
//! - OS-specific logic is kept private in `platform`

mod context;
mod ensure;
mod error;
mod platform;

#[cfg(test)]
mod test_utils;

pub use context::{
    CONDA_DIR_NAME, DEFAULT_ENV_NAME, ENV_NAME_TOP_DIR, INSTALL_SCRIPTS_DIR_NAME, InstallContext,
    SCRIPT_NAME_BUILD_SOFT, SCRIPT_NAME_CONDA_ENV, SCRIPT_NAME_ENV_BASH, SCRIPT_NAME_ENV_CSH,
    SCRIPT_NAME_OPENSSL_CNF, SCRIPT_NAME_SETUP_CONDA,
};
pub use ensure::ensure_directory;
pub use error::PathError;
pub use platform::executable_dir;
