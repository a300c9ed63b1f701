//! File intake: platform files in, metadata records out
//!
//! Validates dropped or picked entries by declared content type and turns
//! each accepted entry into a [`FileRecord`]. Entries that are not PDFs
//! are silently dropped, matching the permissive landing/merge flows.

use crate::format_file_size;
use tracing::debug;
use uuid::Uuid;

/// The only content type intake accepts.
pub const PDF_MIME: &str = "application/pdf";

/// A platform file handle as handed over by a picker or drop event.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    /// Declared MIME type; intake trusts this, not the bytes.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Client-side metadata and raw bytes for one selected PDF
///
/// The record owns the file bytes from intake until the upload stage
/// consumes them. `backend_file_id` stays `None` until an upload succeeds
/// and is never overwritten afterwards.
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Client-generated identifier; not known to the server until upload.
    pub id: String,
    /// Original file name, display only.
    pub name: String,
    /// Human-readable size, derived once at intake and never re-computed.
    pub size_label: String,
    /// Page count as confirmed by the backend; unknown until then.
    pub page_count: Option<u32>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
    /// Server-assigned identifier after a successful upload.
    pub backend_file_id: Option<String>,
}

impl FileRecord {
    fn from_incoming(file: IncomingFile) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: file.name,
            size_label: format_file_size(file.bytes.len() as u64),
            page_count: None,
            bytes: file.bytes,
            backend_file_id: None,
        }
    }
}

/// Filter a batch of platform files down to PDFs and build records
///
/// Non-PDF entries are dropped without error; the caller appends the
/// returned records to the working set.
pub fn intake(files: Vec<IncomingFile>) -> Vec<FileRecord> {
    files
        .into_iter()
        .filter(|f| {
            if f.content_type == PDF_MIME {
                true
            } else {
                debug!(name = %f.name, content_type = %f.content_type, "dropping non-PDF entry");
                false
            }
        })
        .map(FileRecord::from_incoming)
        .collect()
}
