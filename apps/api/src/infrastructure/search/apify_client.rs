use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::traits::{RunStatus, SearchBackend};
use crate::domain::analysis::errors::PipelineError;
use crate::infrastructure::http::ensure_success;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ActorRun {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    default_dataset_id: Option<String>,
}

/// Maps an Apify run status label onto [`RunStatus`].
///
/// Unknown labels (`READY`, `RUNNING`, `TIMING-OUT`, ...) count as still running.
pub fn run_status(status: &str, dataset_id: Option<String>) -> RunStatus {
    match status {
        "SUCCEEDED" => match dataset_id {
            Some(dataset_id) => RunStatus::Succeeded { dataset_id },
            None => RunStatus::Failed("SUCCEEDED without dataset".into()),
        },
        "FAILED" | "TIMED_OUT" | "TIMED-OUT" | "ABORTED" => RunStatus::Failed(status.to_string()),
        _ => RunStatus::Running,
    }
}

/// Apify REST API v2 client.
pub struct ApifyClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApifyClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    async fn get(&self, path: &str) -> anyhow::Result<reqwest::Response> {
        let resp = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        ensure_success(resp, "apify").await
    }
}

fn backend_error(err: impl std::fmt::Display) -> PipelineError {
    PipelineError::SearchBackend(err.to_string())
}

#[async_trait]
impl SearchBackend for ApifyClient {
    async fn submit(&self, actor_id: &str, input: &serde_json::Value) -> Result<String, PipelineError> {
        let resp = self
            .http
            .post(format!("{}/acts/{}/runs", self.base_url, actor_id))
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await
            .map_err(backend_error)?;
        let resp = ensure_success(resp, "apify").await.map_err(backend_error)?;

        let run: Envelope<ActorRun> = resp.json().await.map_err(backend_error)?;
        debug!(actor = %actor_id, run_id = %run.data.id, "Search job submitted");
        Ok(run.data.id)
    }

    async fn poll(&self, run_id: &str) -> anyhow::Result<RunStatus> {
        let run: Envelope<ActorRun> = self
            .get(&format!("actor-runs/{}", run_id))
            .await?
            .json()
            .await
            .context("malformed actor run")?;
        Ok(run_status(&run.data.status, run.data.default_dataset_id))
    }

    async fn fetch_items(&self, dataset_id: &str) -> Result<Vec<serde_json::Value>, PipelineError> {
        let resp = self
            .get(&format!("datasets/{}/items", dataset_id))
            .await
            .map_err(backend_error)?;
        resp.json().await.map_err(backend_error)
    }
}
