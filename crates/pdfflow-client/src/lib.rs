//! Client orchestration for a remote PDF merge/split service
//!
//! This crate drives the full tool flow against the backend API:
//! batch upload of the working set, the merge or split request built from
//! the upload's file ids, and sequential retrieval of the result files.
//!
//! The core sequence is a small state machine,
//! `Idle → Uploading → Operating → {Succeeded, Failed}`, owned by
//! [`ToolSession`]. Network access goes through the [`ApiTransport`]
//! trait so the whole flow is testable without a server.
//!
//! # Example
//!
//! ```no_run
//! use pdfflow_client::{ClientConfig, HttpTransport, ToolSession};
//! use pdfflow_core::IncomingFile;
//!
//! # async fn example(picked: Vec<IncomingFile>) -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(&ClientConfig::from_env())?;
//! let mut session = ToolSession::new(transport);
//!
//! session.add_files(picked);
//! session.merge(Some("combined.pdf".into())).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod download;
pub mod error;
pub mod session;
pub mod transport;

pub use api::{DownloadKind, OutputDescriptor};
pub use config::ClientConfig;
pub use download::{DirSink, Downloader, SaveSink, INTER_DOWNLOAD_DELAY};
pub use error::{DownloadError, TransportError};
pub use session::{Action, OperationKind, OperationResult, SessionState, ToolSession};
pub use transport::{ApiTransport, HttpTransport};
