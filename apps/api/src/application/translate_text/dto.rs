use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TranslateRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    #[validate(length(min = 2, max = 16))]
    pub source_locale: String,
    #[validate(length(min = 2, max = 16))]
    pub target_locale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TranslateResponse {
    pub translation: String,
}
