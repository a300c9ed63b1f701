//! Session orchestration: the upload/merge/split state machine
//!
//! A [`ToolSession`] is the session-scoped store for one tool page: it
//! owns the ordered file set and the latest operation result, and drives
//! the `Idle → Uploading → Operating → {Succeeded, Failed}` sequence
//! against an injected [`ApiTransport`].
//!
//! The file set stays mutable right up to the moment an action is
//! triggered; from then on the attempt works off a snapshot taken at
//! upload entry, so concurrent mutations cannot desynchronize the id
//! order between the upload and the follow-up operation request.

use pdfflow_core::{intake, FileSet, IncomingFile, SplitConfig, ValidationError};
use tracing::{info, warn};

use crate::api::{MergeRequest, OutputDescriptor, SplitRequest};
use crate::transport::ApiTransport;

/// Where the state machine currently is.
///
/// `Failed` is terminal for the attempt, not the session: the user may
/// retry, which re-enters `Uploading` with the current file set. There is
/// no cancelled state; in-flight requests cannot be aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Uploading,
    Operating,
    Succeeded,
    Failed,
}

/// Which operation produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Merge,
    Split,
}

/// Outcome of one upload+operation attempt
///
/// Created absent at the start of each attempt and replaced wholesale on
/// completion; never mutated field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Success {
        operation: OperationKind,
        files: Vec<OutputDescriptor>,
    },
    Failure {
        message: String,
    },
}

/// The user-triggered action a session attempt runs.
#[derive(Debug, Clone)]
pub enum Action {
    Merge { output_name: Option<String> },
    Split { config: SplitConfig },
}

type StateListener = Box<dyn Fn(SessionState) + Send + Sync>;

/// Session-scoped store and orchestrator for one tool page.
pub struct ToolSession<T: ApiTransport> {
    transport: T,
    files: FileSet,
    state: SessionState,
    result: Option<OperationResult>,
    last_action: Option<Action>,
    listener: Option<StateListener>,
}

impl<T: ApiTransport> ToolSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            files: FileSet::new(),
            state: SessionState::Idle,
            result: None,
            last_action: None,
            listener: None,
        }
    }

    /// Run platform files through intake and append the accepted records.
    /// Returns how many were accepted.
    pub fn add_files(&mut self, incoming: Vec<IncomingFile>) -> usize {
        let records = intake(incoming);
        let accepted = records.len();
        self.files.append(records);
        accepted
    }

    pub fn files(&self) -> &FileSet {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut FileSet {
        &mut self.files
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn result(&self) -> Option<&OperationResult> {
        self.result.as_ref()
    }

    /// Install a callback invoked at every state transition.
    pub fn set_state_listener(&mut self, listener: impl Fn(SessionState) + Send + Sync + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Reset the store for a fresh tool session.
    pub fn reset(&mut self) {
        self.files.clear();
        self.result = None;
        self.last_action = None;
        self.set_state(SessionState::Idle);
    }

    /// Merge every file in the set, in the set's current order.
    ///
    /// Validation errors are returned before any network call; transport
    /// failures end up in the stored [`OperationResult`] instead.
    pub async fn merge(&mut self, output_name: Option<String>) -> Result<(), ValidationError> {
        self.run(Action::Merge { output_name }).await
    }

    /// Split the single selected file with the given configuration.
    pub async fn split(&mut self, config: SplitConfig) -> Result<(), ValidationError> {
        self.run(Action::Split { config }).await
    }

    /// Re-run the last attempted action from the upload stage, with the
    /// current (possibly unchanged) file set. No hidden backoff.
    pub async fn retry(&mut self) -> Result<(), ValidationError> {
        match self.last_action.clone() {
            Some(action) => self.run(action).await,
            None => Err(ValidationError::NothingToRetry),
        }
    }

    async fn run(&mut self, action: Action) -> Result<(), ValidationError> {
        self.result = None;
        self.validate(&action)?;
        self.last_action = Some(action.clone());

        // Snapshot at entry: upload and operation both work off this,
        // never off the live set.
        let snapshot = self.files.snapshot();

        self.set_state(SessionState::Uploading);
        let upload = match self.transport.upload_batch(&snapshot).await {
            Ok(upload) => upload,
            Err(e) => {
                self.fail(format!("Upload failed: {}", e));
                return Ok(());
            }
        };

        // One id per input, in upload order; anything else is treated as
        // an atomic failure with no ids committed.
        if upload.files.len() != snapshot.len() {
            self.fail(format!(
                "Upload returned {} file ids for {} files",
                upload.files.len(),
                snapshot.len()
            ));
            return Ok(());
        }

        for (source, uploaded) in snapshot.iter().zip(&upload.files) {
            self.files
                .assign_backend_id(&source.client_id, &uploaded.file_id);
        }
        let mut file_ids: Vec<String> =
            upload.files.iter().map(|f| f.file_id.clone()).collect();

        self.set_state(SessionState::Operating);
        match action {
            Action::Merge { output_name } => {
                let request = MergeRequest {
                    file_ids,
                    output_name,
                };
                match self.transport.merge(&request).await {
                    Ok(response) => {
                        info!(file_name = %response.file_name, inputs = request.file_ids.len(), "merge completed");
                        self.succeed(
                            OperationKind::Merge,
                            vec![OutputDescriptor {
                                name: response.file_name,
                                download_url: response.download_url,
                            }],
                        );
                    }
                    Err(e) => self.fail(format!("Failed to merge PDFs: {}", e)),
                }
            }
            Action::Split { config } => {
                // Validated: exactly one record, hence exactly one id.
                let file_id = file_ids.remove(0);
                let request = SplitRequest::new(file_id, &config);
                match self.transport.split(&request).await {
                    Ok(response) => {
                        info!(split_type = ?request.split_type, outputs = response.files.len(), "split completed");
                        self.succeed(OperationKind::Split, response.files);
                    }
                    Err(e) => self.fail(format!("Failed to split PDF: {}", e)),
                }
            }
        }

        Ok(())
    }

    fn validate(&self, action: &Action) -> Result<(), ValidationError> {
        match action {
            Action::Merge { .. } => {
                let count = self.files.len();
                if count < 2 {
                    return Err(ValidationError::TooFewFiles { count });
                }
            }
            Action::Split { config } => {
                let count = self.files.len();
                if count != 1 {
                    return Err(ValidationError::SingleFileRequired { count });
                }
                let total_pages = self.files.iter().next().and_then(|r| r.page_count);
                config.validate(total_pages)?;
            }
        }
        Ok(())
    }

    fn set_state(&mut self, state: SessionState) {
        self.state = state;
        if let Some(listener) = &self.listener {
            listener(state);
        }
    }

    fn succeed(&mut self, operation: OperationKind, files: Vec<OutputDescriptor>) {
        self.result = Some(OperationResult::Success { operation, files });
        self.set_state(SessionState::Succeeded);
    }

    fn fail(&mut self, message: String) {
        warn!(message = %message, "operation attempt failed");
        self.result = Some(OperationResult::Failure { message });
        self.set_state(SessionState::Failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MergeResponse, SplitResponse, UploadResponse};
    use crate::error::TransportError;
    use async_trait::async_trait;
    use pdfflow_core::{UploadSource, PDF_MIME};

    /// Transport that panics on any call; for tests that must not reach
    /// the network.
    struct UnreachableTransport;

    #[async_trait]
    impl ApiTransport for UnreachableTransport {
        async fn upload_batch(
            &self,
            _sources: &[UploadSource],
        ) -> Result<UploadResponse, TransportError> {
            panic!("upload_batch called");
        }

        async fn merge(&self, _request: &MergeRequest) -> Result<MergeResponse, TransportError> {
            panic!("merge called");
        }

        async fn split(&self, _request: &SplitRequest) -> Result<SplitResponse, TransportError> {
            panic!("split called");
        }

        async fn download(
            &self,
            _kind: crate::api::DownloadKind,
            _name: &str,
        ) -> Result<Vec<u8>, TransportError> {
            panic!("download called");
        }
    }

    fn pdf(name: &str) -> IncomingFile {
        IncomingFile::new(name, PDF_MIME, vec![0u8; 8])
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = ToolSession::new(UnreachableTransport);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.files().is_empty());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_add_files_reports_accepted_count() {
        let mut session = ToolSession::new(UnreachableTransport);
        let accepted = session.add_files(vec![
            pdf("a.pdf"),
            IncomingFile::new("x.txt", "text/plain", vec![1]),
        ]);
        assert_eq!(accepted, 1);
        assert_eq!(session.files().len(), 1);
    }

    #[tokio::test]
    async fn test_merge_below_threshold_makes_no_network_call() {
        let mut session = ToolSession::new(UnreachableTransport);
        session.add_files(vec![pdf("a.pdf")]);

        let err = session.merge(None).await.unwrap_err();
        assert_eq!(err, ValidationError::TooFewFiles { count: 1 });
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.result().is_none());
    }

    #[tokio::test]
    async fn test_split_requires_exactly_one_file() {
        let mut session = ToolSession::new(UnreachableTransport);
        let config = SplitConfig::Size { max_size_kb: 500 };

        let err = session.split(config.clone()).await.unwrap_err();
        assert_eq!(err, ValidationError::SingleFileRequired { count: 0 });

        session.add_files(vec![pdf("a.pdf"), pdf("b.pdf")]);
        let err = session.split(config).await.unwrap_err();
        assert_eq!(err, ValidationError::SingleFileRequired { count: 2 });
    }

    #[tokio::test]
    async fn test_split_config_validated_before_network() {
        let mut session = ToolSession::new(UnreachableTransport);
        session.add_files(vec![pdf("a.pdf")]);

        let err = session
            .split(SplitConfig::Size { max_size_kb: 99 })
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::MaxSizeTooSmall { max_size_kb: 99 });
    }

    #[tokio::test]
    async fn test_retry_without_prior_attempt_is_rejected() {
        let mut session = ToolSession::new(UnreachableTransport);
        let err = session.retry().await.unwrap_err();
        assert_eq!(err, ValidationError::NothingToRetry);
    }
}
