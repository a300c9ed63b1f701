//! Result retrieval and saving
//!
//! Fetches result files by descriptor name and hands the bytes to a
//! [`SaveSink`] — the stand-in for the browser-native save. Batch
//! downloads (split results) run sequentially with a fixed delay between
//! files so the host environment is not flooded; one failed download is
//! reported on its own and does not abort the rest.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::DownloadKind;
use crate::error::DownloadError;
use crate::transport::ApiTransport;

/// Pause between files in a batch download.
pub const INTER_DOWNLOAD_DELAY: Duration = Duration::from_millis(500);

/// Destination for downloaded bytes, keyed by the descriptor's name.
pub trait SaveSink: Send {
    fn save(&mut self, name: &str, bytes: &[u8]) -> std::io::Result<()>;
}

/// Sink that writes each file into a directory.
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl SaveSink for DirSink {
    fn save(&mut self, name: &str, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::write(self.dir.join(name), bytes)
    }
}

/// Sequential downloader for operation results.
pub struct Downloader<T: ApiTransport, S: SaveSink> {
    transport: T,
    sink: S,
    delay: Duration,
}

impl<T: ApiTransport, S: SaveSink> Downloader<T, S> {
    pub fn new(transport: T, sink: S) -> Self {
        Self {
            transport,
            sink,
            delay: INTER_DOWNLOAD_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Fetch one result file and save it under its descriptor name.
    pub async fn download(&mut self, kind: DownloadKind, name: &str) -> Result<(), DownloadError> {
        let bytes = self.transport.download(kind, name).await?;
        self.sink.save(name, &bytes)?;
        info!(name = %name, size = bytes.len(), "download saved");
        Ok(())
    }

    /// Download a batch sequentially, pausing between files.
    ///
    /// Each download is independent: a failure is recorded against its
    /// name and the remaining files are still attempted.
    pub async fn download_all(
        &mut self,
        kind: DownloadKind,
        names: &[String],
    ) -> Vec<(String, Result<(), DownloadError>)> {
        let mut outcomes = Vec::with_capacity(names.len());

        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }
            let outcome = self.download(kind, name).await;
            if let Err(e) = &outcome {
                warn!(name = %name, error = %e, "download failed, continuing with remaining files");
            }
            outcomes.push((name.clone(), outcome));
        }

        outcomes
    }
}
