use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::domain::analysis::entity::TranslationResult;
use crate::domain::analysis::value_objects::LanguageCode;
use crate::infrastructure::translation::traits::TranslationProvider;

/// Translates through an ordered provider chain and never fails.
///
/// When every provider fails the original text comes back unchanged and a
/// `translation degraded` warning is logged.
pub struct TranslateTextUseCase {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl TranslateTextUseCase {
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    #[instrument(skip_all, fields(chars = text.chars().count(), %source, %target))]
    pub async fn execute(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> TranslationResult {
        let unchanged = || TranslationResult {
            original_text: text.to_string(),
            translated_text: text.to_string(),
            source_language: source,
            target_language: target,
        };

        if text.trim().is_empty() {
            return unchanged();
        }
        // Covers English text bound for English as well.
        if source == target {
            return unchanged();
        }

        for provider in &self.providers {
            match provider.attempt(text, source, target).await {
                Ok(Some(translated)) => {
                    debug!(provider = provider.name(), "Translated");
                    return TranslationResult {
                        translated_text: translated,
                        ..unchanged()
                    };
                }
                Ok(None) => debug!(provider = provider.name(), "Provider returned no translation"),
                Err(e) => warn!(provider = provider.name(), error = %e, "Translation provider failed"),
            }
        }

        warn!(%source, %target, "translation degraded, returning original text");
        unchanged()
    }
}
