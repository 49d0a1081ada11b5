use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::parser::{parse_product_items, parse_web_search};
use crate::config::Config;
use crate::domain::analysis::errors::PipelineError;
use crate::domain::analysis::value_objects::SearchQuery;
use crate::domain::product::entity::ProductInfo;
use crate::infrastructure::search::traits::{RunStatus, SearchBackend};

const WEB_SEARCH_HINT: &str = "skincare product";

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub use_custom_actor: bool,
    pub product_actor_id: String,
    pub web_search_actor_id: String,
    pub results_per_page: u32,
    pub product_max_results: u32,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl From<&Config> for SearchSettings {
    fn from(config: &Config) -> Self {
        Self {
            use_custom_actor: config.use_custom_actor,
            product_actor_id: config.product_actor_id.clone(),
            web_search_actor_id: config.web_search_actor_id.clone(),
            results_per_page: config.search_results_per_page,
            product_max_results: config.product_actor_max_results,
            poll_interval: Duration::from_millis(config.search_poll_interval_ms),
            max_poll_attempts: config.search_max_poll_attempts,
        }
    }
}

/// Locates a product for a query through an asynchronous search backend.
///
/// The purpose-built product actor is tried first when enabled; any error it
/// raises falls back to the generic web search actor. Polling is bounded by
/// `max_poll_attempts`, so a stuck job ends in `SearchTimeout` rather than
/// blocking the image forever.
pub struct SearchProductUseCase {
    backend: Option<Arc<dyn SearchBackend>>,
    settings: SearchSettings,
    missing_backend_reported: AtomicBool,
}

impl SearchProductUseCase {
    pub fn new(backend: Option<Arc<dyn SearchBackend>>, settings: SearchSettings) -> Self {
        Self {
            backend,
            settings,
            missing_backend_reported: AtomicBool::new(false),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    fn backend(&self) -> Result<&Arc<dyn SearchBackend>, PipelineError> {
        self.backend.as_ref().ok_or_else(|| {
            if !self.missing_backend_reported.swap(true, Ordering::Relaxed) {
                error!("APIFY_API_KEY is not set; product search is disabled");
            }
            PipelineError::NotConfigured("search backend credentials are missing".into())
        })
    }

    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn execute(&self, query: &SearchQuery) -> Result<ProductInfo, PipelineError> {
        let backend = self.backend()?;

        if self.settings.use_custom_actor {
            let input = json!({
                "searchQuery": query.as_str(),
                "maxResults": self.settings.product_max_results,
            });
            match self
                .run_job(backend.as_ref(), &self.settings.product_actor_id, &input)
                .await
            {
                Ok(items) => {
                    let info = parse_product_items(&items);
                    info!(found = info.product.is_some(), "Product actor finished");
                    return Ok(info);
                }
                Err(e) => warn!(error = %e, "Product actor failed, falling back to web search"),
            }
        }

        let input = json!({
            "queries": [query.with_hint(WEB_SEARCH_HINT)],
            "maxPagesPerQuery": 1,
            "resultsPerPage": self.settings.results_per_page,
        });
        let pages = self
            .run_job(backend.as_ref(), &self.settings.web_search_actor_id, &input)
            .await?;
        let info = parse_web_search(&pages);
        info!(found = info.product.is_some(), "Web search finished");
        Ok(info)
    }

    /// Submit, then poll at a fixed interval until a terminal status or the attempt ceiling.
    async fn run_job(
        &self,
        backend: &dyn SearchBackend,
        actor_id: &str,
        input: &Value,
    ) -> Result<Vec<Value>, PipelineError> {
        let run_id = backend.submit(actor_id, input).await?;
        let attempts = self.settings.max_poll_attempts;

        for attempt in 1..=attempts {
            tokio::time::sleep(self.settings.poll_interval).await;

            match backend.poll(&run_id).await {
                Ok(RunStatus::Succeeded { dataset_id }) => {
                    debug!(attempt, %dataset_id, "Search job succeeded");
                    return backend.fetch_items(&dataset_id).await;
                }
                Ok(RunStatus::Failed(status)) => {
                    return Err(PipelineError::SearchFailed(format!(
                        "run {} ended with {}",
                        run_id, status
                    )));
                }
                Ok(RunStatus::Running) => debug!(attempt, attempts, "Search job still running"),
                Err(e) => warn!(attempt, error = %e, "Status poll failed"),
            }
        }

        Err(PipelineError::SearchTimeout { attempts })
    }
}
