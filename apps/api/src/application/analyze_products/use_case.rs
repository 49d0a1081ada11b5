use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::application::{
    detect_language::use_case::DetectLanguageUseCase,
    extract_text::use_case::ExtractTextUseCase, search_product::use_case::SearchProductUseCase,
    translate_text::use_case::TranslateTextUseCase,
};
use crate::domain::analysis::entity::{AnalysisResult, AnalysisStage, RawImage};
use crate::domain::analysis::events::AnalysisEvent;
use crate::domain::analysis::value_objects::LanguageCode;
use crate::domain::product::entity::ProductInfo;
use crate::domain::product::ingredients::classify_ingredients;
use crate::domain::text::search_terms;

const EVENT_BUFFER: usize = 32;

/// Where snapshots go while a run progresses.
struct Publisher {
    tx: Option<mpsc::Sender<AnalysisEvent>>,
}

impl Publisher {
    /// `false` once the consumer has gone away.
    async fn snapshot(&self, result: &AnalysisResult) -> bool {
        match &self.tx {
            Some(tx) => tx
                .send(AnalysisEvent::Snapshot {
                    result: Box::new(result.clone()),
                })
                .await
                .is_ok(),
            None => true,
        }
    }

    async fn done(&self, run_id: Uuid, images: usize) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(AnalysisEvent::Done { run_id, images }).await;
        }
    }
}

/// Runs the full pipeline for each image of a batch.
///
/// Images are processed one after another; a failure in one image is
/// recorded on its result and never stops the rest of the batch. Every stage
/// transition publishes a snapshot of the partial result.
///
/// # Stages
/// 1. **Extracting** - vision then local OCR, normalized
/// 2. **DetectingLanguage** - remote recognition or script heuristics
/// 3. **Translating** - English and optional display language, concurrently
/// 4. **SearchingProduct** - query building, search, ingredient scoring
pub struct AnalyzeProductsUseCase {
    extract: Arc<ExtractTextUseCase>,
    detect: Arc<DetectLanguageUseCase>,
    translate: Arc<TranslateTextUseCase>,
    search: Arc<SearchProductUseCase>,
}

impl AnalyzeProductsUseCase {
    pub fn new(
        extract: Arc<ExtractTextUseCase>,
        detect: Arc<DetectLanguageUseCase>,
        translate: Arc<TranslateTextUseCase>,
        search: Arc<SearchProductUseCase>,
    ) -> Self {
        info!("Initializing AnalyzeProductsUseCase");
        Self {
            extract,
            detect,
            translate,
            search,
        }
    }

    /// Runs the batch to completion and returns only the final results.
    pub async fn execute(&self, request: AnalyzeRequest) -> AnalyzeResponse {
        let run_id = Uuid::now_v7();
        let publisher = Publisher { tx: None };
        let results = self.run(run_id, request, &publisher).await;
        AnalyzeResponse { run_id, results }
    }

    /// Runs the batch in the background and streams every snapshot.
    ///
    /// Dropping the stream abandons the run after the stage in flight.
    pub fn stream(self: Arc<Self>, request: AnalyzeRequest) -> ReceiverStream<AnalysisEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let run_id = Uuid::now_v7();
        tokio::spawn(async move {
            let publisher = Publisher { tx: Some(tx) };
            self.run(run_id, request, &publisher).await;
        });
        ReceiverStream::new(rx)
    }

    #[instrument(skip_all, fields(%run_id, images = request.images.len()))]
    async fn run(
        &self,
        run_id: Uuid,
        request: AnalyzeRequest,
        publisher: &Publisher,
    ) -> Vec<AnalysisResult> {
        let total = request.images.len();
        let mut results = Vec::with_capacity(total);

        for (index, image) in request.images.iter().enumerate() {
            match self
                .process_image(run_id, index, image, request.display_language, publisher)
                .await
            {
                Some(result) => results.push(result),
                None => {
                    info!(image_index = index, "Consumer disconnected, abandoning run");
                    return results;
                }
            }
        }

        publisher.done(run_id, total).await;
        info!(
            failed = results.iter().filter(|r| r.stage == AnalysisStage::Failed).count(),
            "Analysis run finished"
        );
        results
    }

    /// `None` when the consumer disappeared mid-run.
    #[instrument(skip_all, fields(image_index = index))]
    async fn process_image(
        &self,
        run_id: Uuid,
        index: usize,
        image: &RawImage,
        display_language: Option<LanguageCode>,
        publisher: &Publisher,
    ) -> Option<AnalysisResult> {
        let mut result = AnalysisResult::pending(run_id, index);

        macro_rules! advance {
            ($stage:expr) => {{
                result.advance($stage);
                debug!(stage = ?result.stage, "Stage transition");
                if !publisher.snapshot(&result).await {
                    return None;
                }
            }};
        }

        if !publisher.snapshot(&result).await {
            return None;
        }
        advance!(AnalysisStage::Extracting);

        let text = match self.extract.execute(&image.bytes).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Extraction failed");
                result.fail(&e);
                publisher.snapshot(&result).await;
                return Some(result);
            }
        };
        result.extracted_text = Some(text.clone());
        advance!(AnalysisStage::DetectingLanguage);

        let language = self.detect.execute(&text).await;
        result.set_language(language);
        advance!(AnalysisStage::Translating);

        let wants_display = display_language.filter(|l| *l != LanguageCode::En);
        let (english, display) = tokio::join!(
            self.translate.execute(&text, language, LanguageCode::En),
            async {
                match wants_display {
                    Some(target) => Some(self.translate.execute(&text, language, target).await),
                    None => None,
                }
            }
        );
        result.translated_text = Some(english.translated_text.clone());
        result.display_translation = display.map(|t| t.translated_text);
        advance!(AnalysisStage::SearchingProduct);

        let product_info = match search_terms::build(&english.translated_text) {
            Some(query) => {
                result.search_query = Some(query.to_string());
                match self.search.execute(&query).await {
                    Ok(info) => info,
                    Err(e) => {
                        warn!(error = %e, "Product search failed, keeping partial result");
                        result.error = Some((&e).into());
                        ProductInfo::not_found()
                    }
                }
            }
            None => ProductInfo::not_found(),
        };

        let corpus = ingredient_corpus(&product_info, &english.translated_text);
        result.ingredient_analysis = classify_ingredients(&corpus);
        result.product_info = Some(product_info);
        advance!(AnalysisStage::Complete);

        Some(result)
    }
}

/// Ingredient list when the product page has one, otherwise whatever product
/// text is available plus the English label text.
fn ingredient_corpus(info: &ProductInfo, english_text: &str) -> String {
    match &info.product {
        Some(product) => match &product.ingredients {
            Some(ingredients) => ingredients.clone(),
            None => format!("{} {}", product.summary_text(), english_text),
        },
        None => english_text.to_string(),
    }
}
