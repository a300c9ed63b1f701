//! Wire contract for the PDF processing backend
//!
//! One canonical typed shape per request and response; the field names
//! are the backend's, pinned with serde renames instead of being left to
//! ad-hoc JSON assembly.

use pdfflow_core::{SplitConfig, SplitMode};
use serde::{Deserialize, Serialize};

/// One uploaded file as acknowledged by `/upload/pdfs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_id: String,
    pub original_name: String,
    pub size: u64,
    pub path: String,
}

/// Response body of the batch upload endpoint.
///
/// `files[i]` corresponds to the i-th part of the multipart request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub files: Vec<UploadedFile>,
}

/// Request body for `/merge`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    /// Backend file ids in the exact order the output pages should follow.
    pub file_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_name: Option<String>,
}

/// Response body of `/merge`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeResponse {
    pub file_name: String,
    pub download_url: String,
    pub message: String,
}

/// Mode-specific options carried alongside `splitType`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_pages: Option<String>,
    #[serde(rename = "maxSizeKB", skip_serializing_if = "Option::is_none")]
    pub max_size_kb: Option<u64>,
}

/// Request body for `/split/pattern`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    pub file_id: String,
    pub split_type: SplitMode,
    pub options: SplitOptions,
    /// Derived pattern string sent alongside the options; see
    /// [`SplitConfig::split_by_pattern`].
    pub split_by_pattern: String,
}

impl SplitRequest {
    /// Build the wire request for an uploaded file and a validated config.
    pub fn new(file_id: String, config: &SplitConfig) -> Self {
        let options = match config {
            SplitConfig::Pages { pages_per_split } => SplitOptions {
                pages: Some(vec![*pages_per_split]),
                ..Default::default()
            },
            SplitConfig::Range { ranges } => SplitOptions {
                ranges: Some(ranges.clone()),
                ..Default::default()
            },
            SplitConfig::Extract { pages } => SplitOptions {
                extract_pages: Some(pages.clone()),
                ..Default::default()
            },
            SplitConfig::Size { max_size_kb } => SplitOptions {
                max_size_kb: Some(*max_size_kb),
                ..Default::default()
            },
        };

        Self {
            file_id,
            split_type: config.mode(),
            options,
            split_by_pattern: config.split_by_pattern(),
        }
    }
}

/// One result file produced by merge or split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    pub name: String,
    pub download_url: String,
}

/// Response body of `/split/pattern`; a missing `files` array means zero
/// outputs, not a malformed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitResponse {
    #[serde(default)]
    pub files: Vec<OutputDescriptor>,
}

/// Which download endpoint a result file is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    /// `/download/{name}` — split outputs and ad-hoc files.
    Single,
    /// `/split/download/{name}`.
    Split,
    /// `/merge/download/{name}`.
    Merge,
}

impl DownloadKind {
    /// Path (relative to the API base) for a given file name.
    pub fn path(&self, name: &str) -> String {
        match self {
            DownloadKind::Single => format!("/download/{}", name),
            DownloadKind::Split => format!("/split/download/{}", name),
            DownloadKind::Merge => format!("/merge/download/{}", name),
        }
    }
}
