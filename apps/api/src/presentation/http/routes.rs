use super::{
    handlers::{analyze, health, language, ocr, search},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/analyze", post(analyze::analyze))
        .route("/api/v1/analyze/stream", post(analyze::analyze_stream))
        .route("/api/v1/ocr", post(ocr::extract_text))
        .route("/api/v1/detect-language", post(language::detect_language))
        .route("/api/v1/translate", post(language::translate))
        .route("/api/v1/search", post(search::search_product));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
