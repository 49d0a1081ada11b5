use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::analysis::entity::{AnalysisResult, RawImage};
use crate::domain::analysis::value_objects::LanguageCode;

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub images: Vec<RawImage>,
    /// Second translation target; `None` or English skips the extra pass
    pub display_language: Option<LanguageCode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AnalyzeResponse {
    pub run_id: Uuid,
    pub results: Vec<AnalysisResult>,
}
