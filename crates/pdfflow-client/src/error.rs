//! Error types for the client crate

use thiserror::Error;

/// A failed exchange with the backend
///
/// Either the server answered with a non-2xx status or the request never
/// completed. A whole stage fails atomically on any of these; there is no
/// partial-success path.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    #[error("request failed with status {status}{}", reason_suffix(.message))]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

/// Status text for display; empty when the status has no canonical reason,
/// in which case the separator is omitted too.
fn reason_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" {message}")
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => TransportError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("").to_string(),
            },
            None => TransportError::Network(err.to_string()),
        }
    }
}

/// Failure while retrieving or saving one result file.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("download failed: {0}")]
    Transport(#[from] TransportError),

    #[error("could not save file: {0}")]
    Save(#[from] std::io::Error),
}
