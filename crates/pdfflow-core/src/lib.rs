//! Client-side state for a remote PDF merge/split service
//!
//! This crate holds the pure, I/O-free half of the tool: file intake,
//! the ordered working set, and split-configuration validation. All actual
//! document processing happens on the backend; nothing here parses PDF
//! bytes beyond trusting the declared content type.

pub mod error;
pub mod fileset;
pub mod intake;
pub mod split;

pub use error::ValidationError;
pub use fileset::{FileSet, UploadSource};
pub use intake::{intake, FileRecord, IncomingFile, PDF_MIME};
pub use split::{SplitConfig, SplitMode};

/// Format a byte count as a human-readable size string
///
/// Mirrors the display convention used throughout the UI: two decimal
/// places with trailing zeros trimmed, e.g. "1.5 KB", "50 MB".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}
