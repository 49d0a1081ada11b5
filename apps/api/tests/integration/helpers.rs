use async_trait::async_trait;
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use klar_api::{
    application::{
        detect_language::use_case::DetectLanguageUseCase,
        extract_text::use_case::ExtractTextUseCase,
        pipeline::Pipeline,
        search_product::use_case::{SearchProductUseCase, SearchSettings},
        translate_text::use_case::TranslateTextUseCase,
    },
    config::Config,
    infrastructure::{
        http::build_client,
        ml::traits::TextExtractionProvider,
        search::{apify_client::ApifyClient, traits::SearchBackend},
        translation::{mymemory_client::MyMemoryClient, traits::TranslationProvider},
    },
    presentation::http::{routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tower::ServiceExt;
use uuid::Uuid;

pub const WEB_SEARCH_ACTOR: &str = "apify~google-search-scraper";
pub const PRODUCT_ACTOR: &str = "klar~product-scraper";

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server crashed");
    });
    format!("http://{}", addr)
}

// === Fake search backend ===

/// Scripted stand-in for the Apify REST API.
///
/// Every run walks through `statuses` one poll at a time and then repeats the
/// last one; succeeded runs serve `items` from their dataset.
pub struct FakeApify {
    pub statuses: Vec<&'static str>,
    pub items: Value,
    pub failing_actor: Option<&'static str>,
    pub submissions: Mutex<Vec<(String, Value)>>,
    pub polls: AtomicUsize,
}

impl FakeApify {
    pub fn new(statuses: Vec<&'static str>, items: Value) -> Arc<Self> {
        Arc::new(Self {
            statuses,
            items,
            failing_actor: None,
            submissions: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
        })
    }

    pub fn with_failing_actor(
        statuses: Vec<&'static str>,
        items: Value,
        actor: &'static str,
    ) -> Arc<Self> {
        Arc::new(Self {
            statuses,
            items,
            failing_actor: Some(actor),
            submissions: Mutex::new(Vec::new()),
            polls: AtomicUsize::new(0),
        })
    }

    pub fn submitted_actors(&self) -> Vec<String> {
        self.submissions
            .lock()
            .expect("submissions lock poisoned")
            .iter()
            .map(|(actor, _)| actor.clone())
            .collect()
    }

    pub fn submitted_inputs(&self) -> Vec<Value> {
        self.submissions
            .lock()
            .expect("submissions lock poisoned")
            .iter()
            .map(|(_, input)| input.clone())
            .collect()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    pub async fn serve(self: &Arc<Self>) -> String {
        let router = Router::new()
            .route("/acts/{actor}/runs", post(apify_submit))
            .route("/actor-runs/{run_id}", get(apify_poll))
            .route("/datasets/{dataset_id}/items", get(apify_items))
            .with_state(Arc::clone(self));
        spawn_server(router).await
    }
}

async fn apify_submit(
    State(fake): State<Arc<FakeApify>>,
    Path(actor): Path<String>,
    Json(input): Json<Value>,
) -> Response {
    fake.submissions
        .lock()
        .expect("submissions lock poisoned")
        .push((actor.clone(), input));
    if fake.failing_actor == Some(actor.as_str()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "actor crashed").into_response();
    }
    Json(json!({ "data": { "id": format!("run-{}", actor), "status": "READY" } })).into_response()
}

async fn apify_poll(State(fake): State<Arc<FakeApify>>, Path(run_id): Path<String>) -> Json<Value> {
    let n = fake.polls.fetch_add(1, Ordering::SeqCst);
    let status = fake
        .statuses
        .get(n)
        .or(fake.statuses.last())
        .copied()
        .unwrap_or("RUNNING");
    Json(json!({
        "data": {
            "id": run_id,
            "status": status,
            "defaultDatasetId": "dataset-1",
        }
    }))
}

async fn apify_items(State(fake): State<Arc<FakeApify>>) -> Json<Value> {
    Json(fake.items.clone())
}

// === Fake public translator ===

/// Answers every MyMemory lookup with `translated_text` and records each
/// `langpair` and `q`.
pub struct FakeMyMemory {
    pub translated_text: &'static str,
    pub langpairs: Mutex<Vec<String>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeMyMemory {
    pub fn new(translated_text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            translated_text,
            langpairs: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn langpairs(&self) -> Vec<String> {
        self.langpairs.lock().expect("langpairs lock poisoned").clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("queries lock poisoned").clone()
    }

    /// Returns the full endpoint URL, as configured in `MYMEMORY_URL`.
    pub async fn serve(self: &Arc<Self>) -> String {
        let router = Router::new()
            .route("/get", get(mymemory_get))
            .with_state(Arc::clone(self));
        format!("{}/get", spawn_server(router).await)
    }
}

async fn mymemory_get(
    State(fake): State<Arc<FakeMyMemory>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    if let Some(pair) = params.get("langpair") {
        fake.langpairs
            .lock()
            .expect("langpairs lock poisoned")
            .push(pair.clone());
    }
    if let Some(q) = params.get("q") {
        fake.queries
            .lock()
            .expect("queries lock poisoned")
            .push(q.clone());
    }
    Json(json!({
        "responseData": { "translatedText": fake.translated_text },
        "responseStatus": 200,
    }))
}

// === Fake translation engine ===

/// Stand-in for the Lingo engine's `/i18n` and `/recognize` endpoints.
///
/// Records every request body together with its `Authorization` header.
pub struct FakeLingo {
    pub translated_text: &'static str,
    pub locale: &'static str,
    pub requests: Mutex<Vec<(String, Option<String>, Value)>>,
}

impl FakeLingo {
    pub fn new(translated_text: &'static str, locale: &'static str) -> Arc<Self> {
        Arc::new(Self {
            translated_text,
            locale,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(String, Option<String>, Value)> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    pub async fn serve(self: &Arc<Self>) -> String {
        let router = Router::new()
            .route("/i18n", post(lingo_localize))
            .route("/recognize", post(lingo_recognize))
            .with_state(Arc::clone(self));
        spawn_server(router).await
    }

    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push((path.to_string(), auth, body));
    }
}

async fn lingo_localize(
    State(fake): State<Arc<FakeLingo>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    fake.record("i18n", &headers, body);
    Json(json!({ "data": { "text": fake.translated_text } }))
}

async fn lingo_recognize(
    State(fake): State<Arc<FakeLingo>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    fake.record("recognize", &headers, body);
    Json(json!({ "locale": fake.locale }))
}

// === Fake vision model ===

/// Chat-completions stand-in that always answers with `answer`.
pub struct FakeVision {
    pub answer: &'static str,
    pub requests: Mutex<Vec<Value>>,
}

impl FakeVision {
    pub fn new(answer: &'static str) -> Arc<Self> {
        Arc::new(Self {
            answer,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }

    pub async fn serve(self: &Arc<Self>) -> String {
        let router = Router::new()
            .route("/chat/completions", post(vision_complete))
            .with_state(Arc::clone(self));
        spawn_server(router).await
    }
}

async fn vision_complete(State(fake): State<Arc<FakeVision>>, Json(body): Json<Value>) -> Json<Value> {
    fake.requests
        .lock()
        .expect("requests lock poisoned")
        .push(body);
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": fake.answer } }]
    }))
}

// === Pipeline wiring ===

/// Extraction provider that answers from a plain function of the image bytes.
pub struct ScriptedExtractor {
    pub answer: fn(&[u8]) -> anyhow::Result<Option<String>>,
}

#[async_trait]
impl TextExtractionProvider for ScriptedExtractor {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn attempt(&self, image_data: &[u8]) -> anyhow::Result<Option<String>> {
        (self.answer)(image_data)
    }
}

pub fn fast_search_settings(max_poll_attempts: u32) -> SearchSettings {
    SearchSettings {
        use_custom_actor: false,
        product_actor_id: PRODUCT_ACTOR.to_string(),
        web_search_actor_id: WEB_SEARCH_ACTOR.to_string(),
        results_per_page: 5,
        product_max_results: 1,
        poll_interval: Duration::from_millis(5),
        max_poll_attempts,
    }
}

pub fn apify_backend(base_url: &str) -> Arc<dyn SearchBackend> {
    let http = build_client(5).expect("failed to build client");
    Arc::new(ApifyClient::new(http, base_url, "test-token"))
}

pub fn mymemory_translator(endpoint: &str) -> TranslateTextUseCase {
    let http = build_client(5).expect("failed to build client");
    TranslateTextUseCase::new(vec![
        Arc::new(MyMemoryClient::new(http, endpoint)) as Arc<dyn TranslationProvider>
    ])
}

/// Offline pipeline: scripted extraction, script heuristics, optional fakes.
pub fn build_pipeline(
    answer: fn(&[u8]) -> anyhow::Result<Option<String>>,
    apify_base: Option<&str>,
    settings: SearchSettings,
) -> Pipeline {
    Pipeline::new(
        ExtractTextUseCase::new(vec![
            Arc::new(ScriptedExtractor { answer }) as Arc<dyn TextExtractionProvider>
        ]),
        DetectLanguageUseCase::new(None),
        TranslateTextUseCase::new(vec![]),
        SearchProductUseCase::new(apify_base.map(apify_backend), settings),
    )
}

pub fn build_app(pipeline: Pipeline) -> Router {
    create_router(AppState::new(pipeline, Config::default()))
}

// === Request helpers ===

pub async fn send(app: &Router, req: axum::http::Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(res: Response, expected: StatusCode) -> Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// Builds a multipart body with one `images` part per entry plus optional text fields.
pub fn multipart_analyze_body(images: &[&[u8]], fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let boundary = format!("----klar-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    for (i, image) in images.iter().enumerate() {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"images\"; filename=\"label-{}.png\"\r\n",
                i
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

/// Dataset page shaped like the generic web search actor's output.
pub fn cosrx_search_page() -> Value {
    json!([{
        "searchQuery": { "term": "COSRX Snail Mucin Essence skincare product" },
        "organicResults": [
            {
                "url": "https://www.reddit.com/r/AsianBeauty/comments/snail",
                "title": "Is snail mucin worth it?",
                "description": "Thread about oily skin"
            },
            {
                "url": "https://www.cosrx.com/products/advanced-snail-96-mucin-power-essence",
                "title": "Advanced Snail 96 Mucin Power Essence",
                "description": "A lightweight hydrating essence suitable for all skin types."
            }
        ]
    }])
}
