//! Client configuration
//!
//! The API base URL comes from the environment with a local default; the
//! request timeout matches the upload-friendly 30 seconds the service has
//! always used.

use std::time::Duration;

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "PDFFLOW_API_URL";

const DEFAULT_API_URL: &str = "http://localhost:3001/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the PDF processing API, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout; generous because uploads carry file bytes.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Read the base URL from [`API_URL_ENV`], falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }
}
