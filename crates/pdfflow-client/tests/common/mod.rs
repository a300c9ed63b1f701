//! Shared test helpers: an in-memory transport and save sink
//!
//! The mock transport answers the way the backend does (one file id per
//! uploaded part, in part order) and records every call so tests can
//! assert on the exact request bodies.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pdfflow_client::api::{
    MergeRequest, MergeResponse, OutputDescriptor, SplitRequest, SplitResponse, UploadResponse,
    UploadedFile,
};
use pdfflow_client::{ApiTransport, DownloadKind, SaveSink, TransportError};
use pdfflow_core::{IncomingFile, UploadSource, PDF_MIME};

/// One recorded backend call.
#[derive(Debug, Clone)]
pub enum Call {
    Upload { names: Vec<String> },
    Merge { body: serde_json::Value },
    Split { body: serde_json::Value },
    Download { name: String },
}

/// Recording mock for [`ApiTransport`].
///
/// Cloneable; all handles share the same state, so a test can keep one
/// clone for assertions and hand another to the session.
#[derive(Clone, Default)]
pub struct MockTransport {
    pub calls: Arc<Mutex<Vec<Call>>>,
    /// Respond to the next uploads with this HTTP status.
    pub fail_upload: Arc<Mutex<Option<u16>>>,
    /// Acknowledge only the first N uploaded files, as a misbehaving
    /// backend would.
    pub truncate_upload_ids: Arc<Mutex<Option<usize>>>,
    /// Respond to merge requests with this HTTP status.
    pub fail_merge: Arc<Mutex<Option<u16>>>,
    /// Respond to split requests with this HTTP status.
    pub fail_split: Arc<Mutex<Option<u16>>>,
    /// Split outputs returned on success.
    pub split_outputs: Arc<Mutex<Vec<OutputDescriptor>>>,
    /// Download names that should fail with a 404.
    pub fail_downloads: Arc<Mutex<Vec<String>>>,
    /// When each download call started (paused-clock friendly).
    pub download_starts: Arc<Mutex<Vec<tokio::time::Instant>>>,
}

/// Install a test subscriber once so `RUST_LOG`-style output shows up
/// in failing tests.
pub fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt().with_test_writer().init();
    });
}

impl MockTransport {
    pub fn new() -> Self {
        init_tracing();
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_split_outputs(&self, outputs: Vec<OutputDescriptor>) {
        *self.split_outputs.lock().unwrap() = outputs;
    }

    fn status_error(status: u16) -> TransportError {
        TransportError::Status {
            status,
            message: match status {
                404 => "Not Found".to_string(),
                500 => "Internal Server Error".to_string(),
                _ => String::new(),
            },
        }
    }

    /// Backend id for an uploaded file: "id-" + name without extension.
    pub fn backend_id(name: &str) -> String {
        format!("id-{}", name.trim_end_matches(".pdf"))
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn upload_batch(
        &self,
        sources: &[UploadSource],
    ) -> Result<UploadResponse, TransportError> {
        self.calls.lock().unwrap().push(Call::Upload {
            names: sources.iter().map(|s| s.name.clone()).collect(),
        });

        if let Some(status) = *self.fail_upload.lock().unwrap() {
            return Err(Self::status_error(status));
        }

        let limit = self
            .truncate_upload_ids
            .lock()
            .unwrap()
            .unwrap_or(sources.len());
        Ok(UploadResponse {
            files: sources
                .iter()
                .take(limit)
                .map(|s| UploadedFile {
                    file_id: Self::backend_id(&s.name),
                    original_name: s.name.clone(),
                    size: s.bytes.len() as u64,
                    path: format!("/uploads/{}", s.name),
                })
                .collect(),
        })
    }

    async fn merge(&self, request: &MergeRequest) -> Result<MergeResponse, TransportError> {
        self.calls.lock().unwrap().push(Call::Merge {
            body: serde_json::to_value(request).unwrap(),
        });

        if let Some(status) = *self.fail_merge.lock().unwrap() {
            return Err(Self::status_error(status));
        }

        Ok(MergeResponse {
            file_name: request
                .output_name
                .clone()
                .unwrap_or_else(|| "merged-document.pdf".to_string()),
            download_url: "/merge/download/merged-document.pdf".to_string(),
            message: "PDFs merged successfully".to_string(),
        })
    }

    async fn split(&self, request: &SplitRequest) -> Result<SplitResponse, TransportError> {
        self.calls.lock().unwrap().push(Call::Split {
            body: serde_json::to_value(request).unwrap(),
        });

        if let Some(status) = *self.fail_split.lock().unwrap() {
            return Err(Self::status_error(status));
        }

        Ok(SplitResponse {
            files: self.split_outputs.lock().unwrap().clone(),
        })
    }

    async fn download(&self, _kind: DownloadKind, name: &str) -> Result<Vec<u8>, TransportError> {
        self.download_starts
            .lock()
            .unwrap()
            .push(tokio::time::Instant::now());
        self.calls.lock().unwrap().push(Call::Download {
            name: name.to_string(),
        });

        if self.fail_downloads.lock().unwrap().iter().any(|n| n == name) {
            return Err(Self::status_error(404));
        }

        Ok(format!("%PDF-bytes-of-{}", name).into_bytes())
    }
}

/// Sink that keeps saved files in memory. Cloneable like the transport,
/// so a test can inspect what was saved after the downloader took the
/// sink over.
#[derive(Clone, Default)]
pub struct MemorySink {
    pub saved: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved_names(&self) -> Vec<String> {
        self.saved
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl SaveSink for MemorySink {
    fn save(&mut self, name: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.saved
            .lock()
            .unwrap()
            .push((name.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// A platform PDF file for intake.
pub fn pdf(name: &str) -> IncomingFile {
    IncomingFile::new(name, PDF_MIME, format!("%PDF-1.7 {}", name).into_bytes())
}
