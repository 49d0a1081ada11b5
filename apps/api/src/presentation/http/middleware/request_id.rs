use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request with a UUIDv7 span and echoes the id back to the caller.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = Uuid::now_v7().to_string();

    let span = tracing::info_span!("request", id = %request_id, path = %req.uri().path());
    let mut response = next.run(req).instrument(span).await;
    if let Ok(val) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, val);
    }
    response
}
