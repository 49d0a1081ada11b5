use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::errors::PipelineError;
use super::value_objects::LanguageCode;
use crate::domain::product::entity::ProductInfo;
use crate::domain::product::ingredients::IngredientAnalysis;

/// One user-submitted photo. Held only for the lifetime of a single run.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub bytes: bytes::Bytes,
    pub content_type: Option<String>,
}

impl RawImage {
    pub fn new(bytes: impl Into<bytes::Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
        }
    }
}

/// Per-image pipeline progress.
///
/// Stages advance strictly in declaration order; `Failed` can be entered
/// from any stage before `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnalysisStage {
    #[default]
    Pending,
    Extracting,
    DetectingLanguage,
    Translating,
    SearchingProduct,
    Complete,
    Failed,
}

impl AnalysisStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ErrorKind {
    Extraction,
    SearchTimeout,
    SearchBackend,
    SearchFailed,
    NotConfigured,
    InvalidInput,
}

/// Error attached to a single image's result instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultError {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&PipelineError> for ResultError {
    fn from(err: &PipelineError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Text before and after translation.
///
/// When `source_language == target_language` the translated text is the
/// original text, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: LanguageCode,
    pub target_language: LanguageCode,
}

impl TranslationResult {
    pub fn unchanged(text: &str, language: LanguageCode) -> Self {
        Self {
            original_text: text.to_string(),
            translated_text: text.to_string(),
            source_language: language,
            target_language: language,
        }
    }
}

/// Aggregate result for one image, filled in stage by stage.
///
/// # Lifecycle
/// 1. Created empty in `Pending` when the image is picked up
/// 2. `extracted_text` set after extraction
/// 3. Language and translations set after translation
/// 4. `product_info` and `ingredient_analysis` set after search
/// 5. Frozen in `Complete` or `Failed`
///
/// # Invariants
/// - `error` is set whenever `stage == Failed`
/// - A search error leaves `stage == Complete` with `product_info` empty
///   and `error` describing the failure
/// - `finished_at` is set only for terminal stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalysisResult {
    /// Run this result belongs to; shared by every image in a batch
    pub run_id: Uuid,

    /// Position of the image in the submitted batch
    pub image_index: usize,

    pub stage: AnalysisStage,

    /// Normalized on-package text
    pub extracted_text: Option<String>,

    pub detected_language: Option<LanguageCode>,

    /// Human-readable name of `detected_language`
    pub detected_language_name: Option<String>,

    /// English rendering of the extracted text
    pub translated_text: Option<String>,

    /// Rendering in the caller's display language, when it differs from English
    pub display_translation: Option<String>,

    /// Query actually sent to the search backend
    pub search_query: Option<String>,

    pub product_info: Option<ProductInfo>,

    pub ingredient_analysis: Option<IngredientAnalysis>,

    pub error: Option<ResultError>,

    pub started_at: DateTime<Utc>,

    pub finished_at: Option<DateTime<Utc>>,
}

impl AnalysisResult {
    pub fn pending(run_id: Uuid, image_index: usize) -> Self {
        Self {
            run_id,
            image_index,
            stage: AnalysisStage::Pending,
            extracted_text: None,
            detected_language: None,
            detected_language_name: None,
            translated_text: None,
            display_translation: None,
            search_query: None,
            product_info: None,
            ingredient_analysis: None,
            error: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn advance(&mut self, stage: AnalysisStage) {
        self.stage = stage;
        if stage.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
    }

    pub fn set_language(&mut self, language: LanguageCode) {
        self.detected_language = Some(language);
        self.detected_language_name = Some(language.display_name().to_string());
    }

    /// Records an unrecovered error and freezes the result as `Failed`.
    pub fn fail(&mut self, err: &PipelineError) {
        self.error = Some(err.into());
        self.advance(AnalysisStage::Failed);
    }
}
