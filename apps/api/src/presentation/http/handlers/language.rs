use axum::{Json, extract::State};
use validator::Validate;

use crate::{
    application::{
        detect_language::dto::{DetectLanguageRequest, DetectLanguageResponse},
        translate_text::dto::{TranslateRequest, TranslateResponse},
    },
    domain::analysis::value_objects::LanguageCode,
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn detect_language(
    State(state): State<AppState>,
    Json(request): Json<DetectLanguageRequest>,
) -> Result<Json<DetectLanguageResponse>, AppError> {
    request.validate()?;
    let locale = state.pipeline.detect.execute(&request.text).await;
    Ok(Json(DetectLanguageResponse {
        locale,
        language_name: locale.display_name().to_string(),
    }))
}

pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, AppError> {
    request.validate()?;
    let source = parse_locale(&request.source_locale)?;
    let target = parse_locale(&request.target_locale)?;

    let result = state
        .pipeline
        .translate
        .execute(&request.text, source, target)
        .await;
    Ok(Json(TranslateResponse {
        translation: result.translated_text,
    }))
}

fn parse_locale(raw: &str) -> Result<LanguageCode, AppError> {
    raw.parse().map_err(AppError::ValidationError)
}
