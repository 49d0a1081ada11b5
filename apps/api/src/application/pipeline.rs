//! Composition root: builds every use case and its providers from [`Config`].

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::{
    analyze_products::use_case::AnalyzeProductsUseCase,
    detect_language::use_case::DetectLanguageUseCase,
    extract_text::use_case::ExtractTextUseCase,
    search_product::use_case::{SearchProductUseCase, SearchSettings},
    translate_text::use_case::TranslateTextUseCase,
};
use crate::config::Config;
use crate::infrastructure::{
    http::build_client,
    ml::{
        openai_vision::OpenAiVisionClient, tesseract_service::TesseractService,
        traits::TextExtractionProvider,
    },
    search::{apify_client::ApifyClient, traits::SearchBackend},
    translation::{
        lingo_client::LingoClient,
        mymemory_client::MyMemoryClient,
        traits::{LanguageRecognizer, TranslationProvider},
    },
};

/// Every use case the HTTP layer can call, sharing one set of providers.
#[derive(Clone)]
pub struct Pipeline {
    pub extract: Arc<ExtractTextUseCase>,
    pub detect: Arc<DetectLanguageUseCase>,
    pub translate: Arc<TranslateTextUseCase>,
    pub search: Arc<SearchProductUseCase>,
    pub analyze: Arc<AnalyzeProductsUseCase>,
}

impl Pipeline {
    /// Assembles use cases from already-built parts.
    pub fn new(
        extract: ExtractTextUseCase,
        detect: DetectLanguageUseCase,
        translate: TranslateTextUseCase,
        search: SearchProductUseCase,
    ) -> Self {
        let extract = Arc::new(extract);
        let detect = Arc::new(detect);
        let translate = Arc::new(translate);
        let search = Arc::new(search);
        let analyze = Arc::new(AnalyzeProductsUseCase::new(
            Arc::clone(&extract),
            Arc::clone(&detect),
            Arc::clone(&translate),
            Arc::clone(&search),
        ));
        Self {
            extract,
            detect,
            translate,
            search,
            analyze,
        }
    }

    /// Wires providers from configuration.
    ///
    /// Providers whose credentials are missing are left out of their chain;
    /// remote detection and the Lingo translator are also left out offline.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = build_client(config.http_timeout_seconds)?;
        let offline = config.is_offline();

        let mut extractors: Vec<Arc<dyn TextExtractionProvider>> = Vec::new();
        match &config.openai_api_key {
            Some(key) => extractors.push(Arc::new(OpenAiVisionClient::new(
                http.clone(),
                &config.openai_base_url,
                key,
                &config.openai_model,
            ))),
            None => warn!("OPENAI_API_KEY is not set; vision extraction is disabled"),
        }
        if config.enable_local_ocr {
            extractors.push(Arc::new(TesseractService::new(
                &config.tesseract_bin,
                &config.tesseract_languages,
            )));
        }
        if extractors.is_empty() {
            warn!("No text extraction provider is enabled; every image will fail extraction");
        }

        let lingo = match (&config.lingo_api_key, offline) {
            (Some(key), false) => Some(Arc::new(LingoClient::new(
                http.clone(),
                &config.lingo_base_url,
                key,
            ))),
            (Some(_), true) => {
                info!("Offline mode: remote detection and translation are skipped");
                None
            }
            (None, _) => {
                warn!("LINGO_API_KEY is not set; using script heuristics and the public translator");
                None
            }
        };

        let recognizer = lingo
            .clone()
            .map(|client| client as Arc<dyn LanguageRecognizer>);
        let mut translators: Vec<Arc<dyn TranslationProvider>> = Vec::new();
        if let Some(client) = lingo {
            translators.push(client);
        }
        translators.push(Arc::new(MyMemoryClient::new(http.clone(), &config.mymemory_url)));

        let backend = config.apify_api_key.as_ref().map(|key| {
            Arc::new(ApifyClient::new(http.clone(), &config.apify_base_url, key))
                as Arc<dyn SearchBackend>
        });

        let pipeline = Self::new(
            ExtractTextUseCase::new(extractors),
            DetectLanguageUseCase::new(recognizer),
            TranslateTextUseCase::new(translators),
            SearchProductUseCase::new(backend, SearchSettings::from(config)),
        );
        info!(
            extractors = ?pipeline.extract.provider_names(),
            translators = ?pipeline.translate.provider_names(),
            remote_detection = pipeline.detect.is_remote(),
            search = pipeline.search.is_configured(),
            "Pipeline wired"
        );
        Ok(pipeline)
    }
}
