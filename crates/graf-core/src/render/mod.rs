//! Pure renderers for every generated artifact.
//!
//! Each function takes the resolved context (plus the descriptor where
//! needed) and returns the file text. Writing to disk is the caller's job.

mod environment;
mod shell;

use std::path::PathBuf;
use thiserror::Error;

pub use environment::{CondaConfig, Dependency, EnvironmentSpec};
pub use shell::{activation_csh, activation_sh, build_script, openssl_cnf, setup_script};

/// Errors produced while loading or serialising descriptors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// YAML could not be parsed or produced
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Descriptor file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Descriptor is structurally valid but unusable
    #[error("Invalid environment descriptor: {0}")]
    Invalid(String),
}

/// Render the conda environment descriptor.
pub fn environment_yaml(spec: &EnvironmentSpec) -> Result<String, RenderError> {
    Ok(serde_yaml::to_string(spec)?)
}

/// Render the global `.condarc`.
pub fn condarc(config: &CondaConfig) -> Result<String, RenderError> {
    Ok(serde_yaml::to_string(config)?)
}
