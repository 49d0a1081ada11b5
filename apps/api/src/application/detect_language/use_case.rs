use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::analysis::value_objects::LanguageCode;
use crate::domain::text::language::detect_by_script;
use crate::infrastructure::translation::traits::LanguageRecognizer;

/// Remote recognition when a recognizer is wired in, script heuristics otherwise.
///
/// Never fails: any remote problem, or a locale outside the supported set,
/// falls back to [`detect_by_script`].
pub struct DetectLanguageUseCase {
    recognizer: Option<Arc<dyn LanguageRecognizer>>,
}

impl DetectLanguageUseCase {
    pub fn new(recognizer: Option<Arc<dyn LanguageRecognizer>>) -> Self {
        Self { recognizer }
    }

    pub fn is_remote(&self) -> bool {
        self.recognizer.is_some()
    }

    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn execute(&self, text: &str) -> LanguageCode {
        if text.trim().is_empty() {
            return LanguageCode::default();
        }

        if let Some(recognizer) = &self.recognizer {
            match recognizer.recognize(text).await {
                Ok(Some(locale)) => match locale.parse::<LanguageCode>() {
                    Ok(code) => {
                        debug!(%locale, "Remote language detection");
                        return code;
                    }
                    Err(e) => debug!(error = %e, "Remote locale unsupported, using heuristics"),
                },
                Ok(None) => debug!("Remote detection returned no locale"),
                Err(e) => warn!(error = %e, "Remote language detection failed, using heuristics"),
            }
        }

        detect_by_script(text)
    }
}
