//! HTTP error handling and response conversion.
//!
//! Handlers return [`AppError`]; each variant maps to one status code and a
//! user-safe JSON body. The full error is logged before it is flattened.

use crate::domain::analysis::errors::PipelineError;
use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request (400).
    BadRequest(String),

    /// Request data failed validation (400).
    ValidationError(String),

    /// Image held no readable text (422).
    Unprocessable(String),

    /// Search backend rejected or failed the job (502).
    BadGateway(String),

    /// Collaborator credentials are missing (503).
    NotConfigured(String),

    /// Collaborator unreachable (503).
    ExternalService(String),

    /// Search job outlived the polling budget (504).
    GatewayTimeout(String),

    /// Unclassified internal error (500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::Unprocessable(msg) => write!(f, "Unprocessable: {}", msg),
            Self::BadGateway(msg) => write!(f, "Bad gateway: {}", msg),
            Self::NotConfigured(msg) => write!(f, "Not configured: {}", msg),
            Self::ExternalService(msg) => write!(f, "External service error: {}", msg),
            Self::GatewayTimeout(msg) => write!(f, "Gateway timeout: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::NotConfigured(_) | Self::ExternalService(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-safe error message (without implementation details).
    fn user_message(&self) -> String {
        match self {
            Self::BadRequest(msg) => msg.clone(),
            Self::ValidationError(msg) => msg.clone(),
            Self::Unprocessable(_) => "No readable text found in image".into(),
            Self::BadGateway(_) => "Product search failed".into(),
            Self::NotConfigured(msg) => format!("{} is not configured", msg),
            Self::ExternalService(_) => "External service unavailable".into(),
            Self::GatewayTimeout(_) => "Product search timed out".into(),
            Self::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
                tracing::error!("error={}", self);
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
                tracing::warn!("error={}", self);
            }
            _ => {
                tracing::info!("error={}", self);
            }
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// === Pipeline Error Conversion ===

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Extraction(msg) => AppError::Unprocessable(msg),
            PipelineError::SearchTimeout { attempts } => {
                AppError::GatewayTimeout(format!("gave up after {} polls", attempts))
            }
            PipelineError::SearchBackend(msg) | PipelineError::SearchFailed(msg) => {
                AppError::BadGateway(msg)
            }
            PipelineError::NotConfigured(msg) => AppError::NotConfigured(msg),
            PipelineError::InvalidInput(msg) => AppError::BadRequest(msg),
        }
    }
}

// === Request Parsing Conversion ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        tracing::warn!(multipart_error = %err);
        AppError::BadRequest(err.body_text())
    }
}

impl From<base64::DecodeError> for AppError {
    fn from(_: base64::DecodeError) -> Self {
        AppError::BadRequest("imageBase64 is not valid base64".into())
    }
}

// === HTTP Client Error Conversion ===

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            tracing::warn!(reqwest_timeout = %err);
            AppError::GatewayTimeout("Request timeout".into())
        } else if err.is_connect() {
            tracing::warn!(reqwest_connect = %err);
            AppError::ExternalService("Connection failed".into())
        } else if err.is_status() {
            tracing::info!(reqwest_status = %err);
            AppError::BadGateway("External service error".into())
        } else {
            tracing::error!(reqwest_error = %err);
            AppError::ExternalService("External service unavailable".into())
        }
    }
}

// === Image Processing Error Conversion ===

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(_) => {
                tracing::warn!(image_format_error = %err);
                AppError::BadRequest("Unsupported image format".into())
            }
            image::ImageError::Decoding(_) => {
                tracing::warn!(image_decode_error = %err);
                AppError::BadRequest("Invalid image data".into())
            }
            image::ImageError::Limits(_) => {
                tracing::warn!(image_limits_error = %err);
                AppError::BadRequest("Image exceeds limits".into())
            }
            _ => {
                tracing::error!(image_error = %err);
                AppError::Internal("Image processing failed".into())
            }
        }
    }
}

// === General Fallback Error Conversion ===

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(anyhow_error = %err, "Unclassified error with chain");
        err.chain().for_each(|cause| {
            tracing::error!(cause = %cause, "Error source");
        });
        AppError::Internal("Operation failed".into())
    }
}
