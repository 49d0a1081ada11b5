use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::analysis::errors::PipelineError;
use crate::domain::text::normalizer::clean;
use crate::infrastructure::ml::traits::TextExtractionProvider;

/// Runs the extraction providers in order and returns the first result that
/// survives normalization.
pub struct ExtractTextUseCase {
    providers: Vec<Arc<dyn TextExtractionProvider>>,
}

impl ExtractTextUseCase {
    pub fn new(providers: Vec<Arc<dyn TextExtractionProvider>>) -> Self {
        info!(
            providers = ?providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            "Initializing ExtractTextUseCase"
        );
        Self { providers }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    #[instrument(skip(self, image_data), fields(bytes = image_data.len()))]
    pub async fn execute(&self, image_data: &[u8]) -> Result<String, PipelineError> {
        if image_data.is_empty() {
            return Err(PipelineError::Extraction("image is empty".into()));
        }

        for provider in &self.providers {
            match provider.attempt(image_data).await {
                Ok(Some(raw)) => {
                    let cleaned = clean(&raw);
                    if !cleaned.is_empty() {
                        info!(provider = provider.name(), chars = cleaned.chars().count(), "Text extracted");
                        return Ok(cleaned);
                    }
                    debug!(provider = provider.name(), "Nothing survived cleaning");
                }
                Ok(None) => debug!(provider = provider.name(), "Provider found no usable text"),
                Err(e) => warn!(provider = provider.name(), error = %e, "Extraction provider failed"),
            }
        }

        Err(PipelineError::Extraction(
            "no readable text was found by any method".into(),
        ))
    }
}
