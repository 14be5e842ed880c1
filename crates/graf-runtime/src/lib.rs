//! Runtime adapters for graf-install.
//!
//! This crate implements the ports defined in `graf-core`:
//! - `SystemProcessRunner` spawns children and streams their output
//! - `HttpDownloader` fetches the Miniconda installer
//!
//! and builds the installation steps, the step runner and the GPU and
//! hls4ml checks on top of them.

pub mod download;
pub mod fs;
pub mod gpu;
pub mod install;
pub mod process;
pub mod progress;
pub mod record;
pub mod runner;

// Re-export main types
pub use download::HttpDownloader;
pub use gpu::{GpuReport, Hls4mlReport, check_gpu, check_hls4ml};
pub use install::{InstallError, InstallResult, Installer};
pub use process::{SystemProcessRunner, run_command};
pub use progress::{DownloadProgress, SilentProgress, TerminalProgress};
pub use record::InstallRecord;
pub use runner::{RunState, StepRunner};
