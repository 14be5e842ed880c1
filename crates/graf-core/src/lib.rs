//! Core domain types and ports for graf-install.
//!
//! Everything in this crate is deterministic: path resolution, template
//! rendering and step selection never spawn processes or touch the network.
//! Adapters live in `graf-runtime`.

pub mod conda;
pub mod paths;
pub mod ports;
pub mod render;
pub mod step;

// Re-export commonly used types for convenience
pub use conda::find_env_line;
pub use paths::{ENV_NAME_TOP_DIR, InstallContext, PathError, ensure_directory};
pub use ports::{
    CommandSpec, DownloadError, Downloader, ProcessError, ProcessOutput, ProcessRunner, RunOptions,
};
pub use render::{CondaConfig, Dependency, EnvironmentSpec, RenderError};
pub use step::{Step, StepSelection, UnknownStep};
