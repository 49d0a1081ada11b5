use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
    response::sse::{Event, KeepAlive, Sse},
};
use tokio_stream::{Stream, StreamExt};

use crate::{
    application::analyze_products::dto::{AnalyzeRequest, AnalyzeResponse},
    domain::analysis::{entity::RawImage, value_objects::LanguageCode},
    presentation::http::{errors::AppError, state::AppState},
};

/// Analyzes every uploaded photo and answers once the whole batch is done.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request = read_request(multipart, state.config.max_images_per_request).await?;
    let response = state.pipeline.analyze.execute(request).await;
    Ok(Json(response))
}

/// Same as [`analyze`], but pushes a `snapshot` event per stage transition
/// and a final `done` event.
pub async fn analyze_stream(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, AppError> {
    let request = read_request(multipart, state.config.max_images_per_request).await?;
    tracing::info!(images = request.images.len(), "Streaming analysis");

    let events = Arc::clone(&state.pipeline.analyze)
        .stream(request)
        .map(|event| Event::default().event(event.name()).json_data(&event));
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

async fn read_request(
    mut multipart: Multipart,
    max_images: usize,
) -> Result<AnalyzeRequest, AppError> {
    let mut images = Vec::new();
    let mut display_language = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "images" | "image" => {
                if images.len() == max_images {
                    return Err(AppError::ValidationError(format!(
                        "At most {} images per request",
                        max_images
                    )));
                }
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if bytes.is_empty() {
                    return Err(AppError::BadRequest(format!(
                        "Image {} is empty",
                        images.len()
                    )));
                }
                images.push(RawImage {
                    bytes,
                    content_type,
                });
            }
            "display_language" | "displayLanguage" => {
                let raw = field.text().await?;
                if !raw.trim().is_empty() {
                    let code = raw
                        .parse::<LanguageCode>()
                        .map_err(AppError::ValidationError)?;
                    display_language = Some(code);
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    if images.is_empty() {
        return Err(AppError::BadRequest("At least one image is required".into()));
    }

    Ok(AnalyzeRequest {
        images,
        display_language,
    })
}
