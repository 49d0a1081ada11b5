use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OcrRequest {
    /// Base64 image body, with or without a `data:` URL prefix
    #[validate(length(min = 1))]
    pub image_base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OcrResponse {
    pub text: String,
}
