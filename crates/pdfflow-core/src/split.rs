//! Split configuration and its client-side validation
//!
//! Four split modes are supported, each carrying its own option payload.
//! Validation runs before any network call and surfaces one specific
//! message per violated rule.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// The backend's split mode discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Split every N pages into separate files.
    Pages,
    /// Custom page ranges, e.g. "1-5, 6-10".
    Range,
    /// Extract specific pages, e.g. "1, 3, 5-7".
    Extract,
    /// Split based on a maximum output file size.
    Size,
}

/// Split parameters as configured by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitConfig {
    Pages { pages_per_split: u32 },
    Range { ranges: String },
    Extract { pages: String },
    Size { max_size_kb: u64 },
}

impl SplitConfig {
    pub fn mode(&self) -> SplitMode {
        match self {
            SplitConfig::Pages { .. } => SplitMode::Pages,
            SplitConfig::Range { .. } => SplitMode::Range,
            SplitConfig::Extract { .. } => SplitMode::Extract,
            SplitConfig::Size { .. } => SplitMode::Size,
        }
    }

    /// Check the configuration against the selected file's page count.
    ///
    /// `total_pages` is the backend-confirmed count when known; an unknown
    /// count falls back to 1, so `pages` mode cannot be submitted until
    /// the count is confirmed.
    pub fn validate(&self, total_pages: Option<u32>) -> Result<(), ValidationError> {
        match self {
            SplitConfig::Pages { pages_per_split } => {
                let total = total_pages.unwrap_or(1);
                if *pages_per_split < 1 || *pages_per_split >= total {
                    return Err(ValidationError::PagesPerSplitOutOfRange {
                        pages_per_split: *pages_per_split,
                        total_pages: total,
                    });
                }
            }
            SplitConfig::Range { ranges } => {
                if ranges.trim().is_empty() {
                    return Err(ValidationError::EmptyRangePattern);
                }
            }
            SplitConfig::Extract { pages } => {
                if pages.trim().is_empty() {
                    return Err(ValidationError::EmptyExtractPattern);
                }
            }
            SplitConfig::Size { max_size_kb } => {
                if *max_size_kb < 100 {
                    return Err(ValidationError::MaxSizeTooSmall {
                        max_size_kb: *max_size_kb,
                    });
                }
            }
        }
        Ok(())
    }

    /// Derive the request's `splitByPattern` field.
    ///
    /// The backend receives both this and the full options payload; the
    /// pattern is the joined pages array in `pages` mode and the literal
    /// "1" otherwise, exactly as the original client sends it.
    pub fn split_by_pattern(&self) -> String {
        match self {
            SplitConfig::Pages { pages_per_split } => pages_per_split.to_string(),
            _ => "1".to_string(),
        }
    }
}
