//! Byte-level progress for the installer download.
//!
//! `HttpDownloader` reports through `DownloadProgress`; the CLI plugs in a
//! terminal bar, tests plug in `SilentProgress`.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

const BAR_TEMPLATE: &str =
    "{spinner:.green} {msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg} {bytes} ({bytes_per_sec})";

/// Receives byte counts while a file is fetched.
pub trait DownloadProgress: Send + Sync {
    /// A transfer of `total` bytes (if the server said) has started.
    fn begin(&self, label: &str, total: Option<u64>);

    /// `downloaded` bytes are on disk so far.
    fn advance(&self, downloaded: u64);

    fn complete(&self);

    fn fail(&self, reason: &str);
}

/// Ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl DownloadProgress for SilentProgress {
    fn begin(&self, _label: &str, _total: Option<u64>) {}
    fn advance(&self, _downloaded: u64) {}
    fn complete(&self) {}
    fn fail(&self, _reason: &str) {}
}

/// Draws an indicatif bar on stderr.
///
/// Falls back to a byte-counting spinner when the response carries no
/// content length.
#[derive(Default)]
pub struct TerminalProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn bar_for(total: Option<u64>) -> ProgressBar {
        match total.filter(|&bytes| bytes > 0) {
            Some(bytes) => {
                let style = ProgressStyle::with_template(BAR_TEMPLATE)
                    .map(|style| style.progress_chars("=> "))
                    .unwrap_or_else(|_| ProgressStyle::default_bar());
                ProgressBar::new(bytes).with_style(style)
            }
            None => {
                let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                ProgressBar::new_spinner().with_style(style)
            }
        }
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut guard) = self.bar.lock() {
            f(&mut guard);
        }
    }
}

impl DownloadProgress for TerminalProgress {
    fn begin(&self, label: &str, total: Option<u64>) {
        let bar = Self::bar_for(total);
        bar.set_message(label.to_string());
        self.with_bar(|slot| *slot = Some(bar));
    }

    fn advance(&self, downloaded: u64) {
        self.with_bar(|slot| {
            if let Some(bar) = slot {
                bar.set_position(downloaded);
            }
        });
    }

    fn complete(&self) {
        self.with_bar(|slot| {
            if let Some(bar) = slot.take() {
                bar.finish_with_message("installer downloaded");
            }
        });
    }

    fn fail(&self, reason: &str) {
        self.with_bar(|slot| {
            if let Some(bar) = slot.take() {
                bar.abandon_with_message(format!("download failed: {reason}"));
            }
        });
    }
}
