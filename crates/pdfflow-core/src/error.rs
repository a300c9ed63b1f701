use thiserror::Error;

/// Client-side validation failures, raised before any network call
///
/// Each variant carries the message shown inline to the user; nothing
/// here is fatal to the session and no retry is needed beyond correcting
/// the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please add at least 2 PDF files to merge (currently {count})")]
    TooFewFiles { count: usize },

    #[error("Select exactly one PDF file to split (currently {count})")]
    SingleFileRequired { count: usize },

    #[error("Pages per split must be between 1 and {total_pages} (currently {pages_per_split})")]
    PagesPerSplitOutOfRange {
        pages_per_split: u32,
        total_pages: u32,
    },

    #[error("Please specify page ranges (e.g., 1-5, 6-10)")]
    EmptyRangePattern,

    #[error("Please specify pages to extract (e.g., 1, 3, 5-7)")]
    EmptyExtractPattern,

    #[error("Maximum file size must be at least 100 KB")]
    MaxSizeTooSmall { max_size_kb: u64 },

    #[error("No previous operation to retry")]
    NothingToRetry,
}
