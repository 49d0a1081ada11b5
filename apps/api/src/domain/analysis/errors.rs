use thiserror::Error;

use super::entity::ErrorKind;

/// Failures that end or degrade one image's pipeline run.
///
/// Translation problems are absent on purpose: they degrade to the original
/// text and are only logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("No readable text found: {0}")]
    Extraction(String),
    #[error("Product search did not finish after {attempts} polls")]
    SearchTimeout { attempts: u32 },
    #[error("Search backend error: {0}")]
    SearchBackend(String),
    #[error("Search job failed: {0}")]
    SearchFailed(String),
    #[error("Not configured: {0}")]
    NotConfigured(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extraction(_) => ErrorKind::Extraction,
            Self::SearchTimeout { .. } => ErrorKind::SearchTimeout,
            Self::SearchBackend(_) => ErrorKind::SearchBackend,
            Self::SearchFailed(_) => ErrorKind::SearchFailed,
            Self::NotConfigured(_) => ErrorKind::NotConfigured,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Search-side errors downgrade a result instead of failing it.
    pub fn is_search_error(&self) -> bool {
        matches!(
            self,
            Self::SearchTimeout { .. }
                | Self::SearchBackend(_)
                | Self::SearchFailed(_)
                | Self::NotConfigured(_)
        )
    }
}
