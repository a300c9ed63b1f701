//! HTTP transport for the PDF processing API
//!
//! [`ApiTransport`] is the seam between orchestration and the network;
//! [`HttpTransport`] is the real implementation over reqwest. Tests plug
//! in an in-memory implementation instead.

use async_trait::async_trait;
use pdfflow_core::UploadSource;
use tracing::{debug, warn};

use crate::api::{
    DownloadKind, MergeRequest, MergeResponse, SplitRequest, SplitResponse, UploadResponse,
};
use crate::config::ClientConfig;
use crate::error::TransportError;

/// Multipart field name the backend expects for every file part.
const UPLOAD_FIELD: &str = "files";

/// The network boundary of the orchestration state machine.
///
/// One method per backend call; implementations must not retry on their
/// own, and must map any non-2xx status to [`TransportError::Status`].
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// POST `/upload/pdfs` with every source's bytes as one multipart
    /// batch. The response carries one file id per part, in part order.
    async fn upload_batch(
        &self,
        sources: &[UploadSource],
    ) -> Result<UploadResponse, TransportError>;

    /// POST `/merge`.
    async fn merge(&self, request: &MergeRequest) -> Result<MergeResponse, TransportError>;

    /// POST `/split/pattern`.
    async fn split(&self, request: &SplitRequest) -> Result<SplitResponse, TransportError>;

    /// GET the binary body of one result file.
    async fn download(&self, kind: DownloadKind, name: &str) -> Result<Vec<u8>, TransportError>;
}

/// reqwest-backed transport; cheap to clone, so the session and the
/// downloader can share one.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Turn a response into an error unless the status is 2xx.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), url = %response.url(), "API response");
            Ok(response)
        } else {
            warn!(status = status.as_u16(), url = %response.url(), "API request failed");
            Err(TransportError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            })
        }
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn upload_batch(
        &self,
        sources: &[UploadSource],
    ) -> Result<UploadResponse, TransportError> {
        let url = self.endpoint("/upload/pdfs");
        debug!(url = %url, count = sources.len(), "API request: POST upload batch");

        let mut form = reqwest::multipart::Form::new();
        for source in sources {
            let part = reqwest::multipart::Part::bytes(source.bytes.clone())
                .file_name(source.name.clone())
                .mime_str(pdfflow_core::PDF_MIME)
                .map_err(|e| TransportError::Network(e.to_string()))?;
            form = form.part(UPLOAD_FIELD, part);
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn merge(&self, request: &MergeRequest) -> Result<MergeResponse, TransportError> {
        let url = self.endpoint("/merge");
        debug!(url = %url, files = request.file_ids.len(), "API request: POST merge");

        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn split(&self, request: &SplitRequest) -> Result<SplitResponse, TransportError> {
        let url = self.endpoint("/split/pattern");
        debug!(url = %url, split_type = ?request.split_type, "API request: POST split");

        let response = self.client.post(&url).json(request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn download(&self, kind: DownloadKind, name: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.endpoint(&kind.path(name));
        debug!(url = %url, "API request: GET download");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
