use axum::{Json, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};
use validator::Validate;

use crate::{
    application::extract_text::dto::{OcrRequest, OcrResponse},
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn extract_text(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<OcrResponse>, AppError> {
    request.validate()?;
    let image = STANDARD.decode(strip_data_url(&request.image_base64))?;
    if image.is_empty() {
        return Err(AppError::BadRequest("imageBase64 decoded to nothing".into()));
    }

    let text = state.pipeline.extract.execute(&image).await?;
    Ok(Json(OcrResponse { text }))
}

/// `data:image/png;base64,AAAA` → `AAAA`; bare base64 passes through.
fn strip_data_url(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, body)| body),
        None => raw,
    }
}
