//! HTTP download of installer payloads.

use async_trait::async_trait;
use futures_util::StreamExt;
use graf_core::ports::{DownloadError, Downloader};
use reqwest::Client;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::progress::DownloadProgress;

const USER_AGENT: &str = concat!("graf-install/", env!("CARGO_PKG_VERSION"));

/// `Downloader` that streams a response body to disk.
pub struct HttpDownloader {
    client: Client,
    progress: Arc<dyn DownloadProgress>,
}

impl HttpDownloader {
    pub fn new(progress: Arc<dyn DownloadProgress>) -> Self {
        Self {
            client: Client::new(),
            progress,
        }
    }

    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let request_err = |e: reqwest::Error| DownloadError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let io_err = |source: std::io::Error| DownloadError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(request_err)?;

        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let total_size = response.content_length();
        debug!(url, ?total_size, "Download started");

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut file = File::create(dest).map_err(io_err)?;

        let label = url.rsplit('/').next().unwrap_or(url);
        self.progress.begin(label, total_size);

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_err)?;
            file.write_all(&chunk).map_err(io_err)?;
            downloaded += chunk.len() as u64;
            self.progress.advance(downloaded);
        }
        file.flush().map_err(io_err)?;

        Ok(downloaded)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        match self.fetch(url, dest).await {
            Ok(bytes) => {
                self.progress.complete();
                Ok(bytes)
            }
            Err(e) => {
                self.progress.fail(&e.to_string());
                if dest.exists()
                    && let Err(remove_err) = fs::remove_file(dest)
                {
                    debug!(dest = %dest.display(), "Failed to remove partial download: {}", remove_err);
                }
                Err(e)
            }
        }
    }
}
