use anyhow::Context;
use std::time::Duration;

/// Body excerpts in error messages are cut to this many characters.
const ERROR_BODY_CHARS: usize = 300;

/// Shared client for every outbound collaborator call.
pub fn build_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(concat!("klar-api/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to build HTTP client")
}

/// Turns a non-2xx response into an error carrying the status and a body excerpt.
pub async fn ensure_success(
    resp: reqwest::Response,
    what: &str,
) -> anyhow::Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let excerpt: String = body.chars().take(ERROR_BODY_CHARS).collect();
    anyhow::bail!("{} returned {}: {}", what, status, excerpt)
}
