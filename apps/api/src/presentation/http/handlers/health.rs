use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProviderStatus {
    extraction: Vec<&'static str>,
    translation: Vec<&'static str>,
    remote_detection: bool,
    search: bool,
    offline: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    providers: ProviderStatus,
}

/// Liveness plus which collaborators this process was able to wire.
///
/// A process with no extraction provider cannot analyze anything, so it
/// reports `degraded` with a 503.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let pipeline = &state.pipeline;
    let providers = ProviderStatus {
        extraction: pipeline.extract.provider_names(),
        translation: pipeline.translate.provider_names(),
        remote_detection: pipeline.detect.is_remote(),
        search: pipeline.search.is_configured(),
        offline: state.config.is_offline(),
    };

    let (code, status) = if providers.extraction.is_empty() {
        tracing::warn!("Health check: no text extraction provider configured");
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    } else {
        (StatusCode::OK, "healthy")
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        providers,
    };

    (code, Json(response))
}
