//! Port definitions implemented by the runtime crate.

mod download;
mod process;

pub use download::{DownloadError, Downloader};
pub use process::{CommandSpec, ProcessError, ProcessOutput, ProcessRunner, RunOptions};
