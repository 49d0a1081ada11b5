use async_trait::async_trait;

use crate::domain::analysis::errors::PipelineError;

/// Status of a submitted search job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Succeeded { dataset_id: String },
    /// Terminal failure; carries the backend's status label
    Failed(String),
}

/// Asynchronous search job backend: submit, poll until terminal, fetch items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Starts a job and returns its run id
    async fn submit(&self, actor_id: &str, input: &serde_json::Value) -> Result<String, PipelineError>;

    /// Errors here are transient; the caller keeps polling
    async fn poll(&self, run_id: &str) -> anyhow::Result<RunStatus>;

    /// Result items in provider order
    async fn fetch_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>, PipelineError>;
}
