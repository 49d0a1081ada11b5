use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::domain::analysis::value_objects::LanguageCode;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[ts(export)]
pub struct DetectLanguageRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DetectLanguageResponse {
    pub locale: LanguageCode,
    pub language_name: String,
}
