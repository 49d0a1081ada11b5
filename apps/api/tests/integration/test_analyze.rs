use super::helpers::{
    FakeApify, build_app, build_pipeline, cosrx_search_page, expect_status,
    fast_search_settings, multipart_analyze_body, read_json, read_text, send,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use klar_api::{
    application::analyze_products::dto::AnalyzeRequest,
    domain::analysis::{
        entity::{AnalysisStage, ErrorKind, RawImage},
        value_objects::LanguageCode,
    },
};
use serde_json::{Value, json};

fn cosrx_label(_: &[u8]) -> anyhow::Result<Option<String>> {
    Ok(Some("COSRX Snail Mucin Essence 100ml".into()))
}

fn first_image_is_unreadable(bytes: &[u8]) -> anyhow::Result<Option<String>> {
    match bytes.first() {
        Some(1) => Err(anyhow::anyhow!("blurred photo")),
        _ => Ok(Some("COSRX Snail Mucin Essence 100ml".into())),
    }
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn multipart_request(uri: &str, images: &[&[u8]], fields: &[(&str, &str)]) -> Request<Body> {
    let (boundary, body) = multipart_analyze_body(images, fields);
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build multipart request")
}

#[tokio::test]
async fn english_label_flows_through_to_product_insights() {
    let fake = FakeApify::new(vec!["RUNNING", "SUCCEEDED"], cosrx_search_page());
    let base = fake.serve().await;
    let pipeline = build_pipeline(cosrx_label, Some(&base), fast_search_settings(5));

    let response = pipeline
        .analyze
        .execute(AnalyzeRequest {
            images: vec![RawImage::new(vec![7u8])],
            display_language: None,
        })
        .await;

    assert_eq!(response.results.len(), 1);
    let result = &response.results[0];
    assert_eq!(result.stage, AnalysisStage::Complete);
    assert_eq!(result.detected_language, Some(LanguageCode::En));
    assert_eq!(
        result.translated_text.as_deref(),
        Some("COSRX Snail Mucin Essence 100ml")
    );
    assert_eq!(result.search_query.as_deref(), Some("COSRX Snail Mucin Essence"));
    assert!(result.error.is_none());

    let info = result.product_info.as_ref().expect("product info missing");
    assert!(info.product.is_some());
    assert!(info.insights.benefits.contains(&"hydrating".to_string()));
    assert!(info.insights.skin_types.contains(&"all skin types".to_string()));
}

#[tokio::test]
async fn failed_image_does_not_abort_the_batch() {
    let fake = FakeApify::new(vec!["SUCCEEDED"], cosrx_search_page());
    let base = fake.serve().await;
    let pipeline = build_pipeline(first_image_is_unreadable, Some(&base), fast_search_settings(5));

    let response = pipeline
        .analyze
        .execute(AnalyzeRequest {
            images: vec![RawImage::new(vec![1u8]), RawImage::new(vec![2u8])],
            display_language: None,
        })
        .await;

    assert_eq!(response.results.len(), 2);

    let first = &response.results[0];
    assert_eq!(first.stage, AnalysisStage::Failed);
    assert_eq!(first.error.as_ref().map(|e| e.kind), Some(ErrorKind::Extraction));
    assert!(first.product_info.is_none());

    let second = &response.results[1];
    assert_eq!(second.stage, AnalysisStage::Complete);
    assert!(second.error.is_none());
    assert!(second.extracted_text.is_some());
    assert!(second.translated_text.is_some());
    assert!(second.ingredient_analysis.is_some());
    assert!(
        second
            .product_info
            .as_ref()
            .and_then(|info| info.product.as_ref())
            .is_some()
    );
    assert_eq!(first.run_id, second.run_id);
}

#[tokio::test]
async fn analyze_endpoint_accepts_multipart_batches() {
    let fake = FakeApify::new(vec!["SUCCEEDED"], cosrx_search_page());
    let base = fake.serve().await;
    let app = build_app(build_pipeline(cosrx_label, Some(&base), fast_search_settings(5)));

    let req = multipart_request("/api/v1/analyze", &[b"png-1".as_slice(), b"png-2".as_slice()], &[]);
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    assert!(res.headers().contains_key("x-request-id"));

    let body: Value = read_json(res).await;
    let results = body["results"].as_array().expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[1]["imageIndex"], json!(1));
    assert_eq!(results[0]["stage"], json!("complete"));
    assert_eq!(results[0]["searchQuery"], json!("COSRX Snail Mucin Essence"));
    assert!(body["runId"].is_string());
}

#[tokio::test]
async fn analyze_endpoint_rejects_empty_and_oversized_batches() {
    let app = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));

    let req = multipart_request("/api/v1/analyze", &[], &[("display_language", "ko")]);
    expect_status(send(&app, req).await, StatusCode::BAD_REQUEST).await;

    let eleven: Vec<&[u8]> = (0..11).map(|_| b"img".as_slice()).collect();
    let req = multipart_request("/api/v1/analyze", &eleven, &[]);
    expect_status(send(&app, req).await, StatusCode::BAD_REQUEST).await;

    let req = multipart_request("/api/v1/analyze", &[b"img".as_slice()], &[("display_language", "klingon")]);
    expect_status(send(&app, req).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn missing_search_credentials_still_return_partial_results() {
    let app = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));

    let req = multipart_request("/api/v1/analyze", &[b"img".as_slice()], &[]);
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    let result = &body["results"][0];

    assert_eq!(result["stage"], json!("complete"));
    assert_eq!(result["extractedText"], json!("COSRX Snail Mucin Essence 100ml"));
    assert_eq!(result["error"]["kind"], json!("not_configured"));
    assert_eq!(result["productInfo"]["product"], Value::Null);
}

#[tokio::test]
async fn stream_endpoint_emits_snapshots_then_done() {
    let app = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));

    let req = multipart_request("/api/v1/analyze/stream", &[b"img".as_slice()], &[]);
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"), "{}", content_type);

    let body = read_text(res).await;
    assert_eq!(body.matches("event: snapshot").count(), 6, "{}", body);
    assert_eq!(body.matches("event: done").count(), 1);
    let done_at = body.find("event: done").unwrap_or_default();
    let last_snapshot_at = body.rfind("event: snapshot").unwrap_or_default();
    assert!(last_snapshot_at < done_at);
}

#[tokio::test]
async fn ocr_endpoint_decodes_data_urls() {
    let app = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));

    let image = format!("data:image/png;base64,{}", STANDARD.encode(b"fake png"));
    let req = json_request("/api/v1/ocr", json!({ "imageBase64": image }));
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["text"], json!("COSRX Snail Mucin Essence 100ml"));

    let req = json_request("/api/v1/ocr", json!({ "imageBase64": "***" }));
    expect_status(send(&app, req).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn language_endpoints_use_heuristics_offline() {
    let app = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));

    let req = json_request("/api/v1/detect-language", json!({ "text": "라네즈 워터 슬리핑 마스크" }));
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["locale"], json!("ko"));
    assert_eq!(body["languageName"], json!("Korean"));

    let req = json_request(
        "/api/v1/translate",
        json!({ "text": "워터 슬리핑 마스크", "sourceLocale": "ko", "targetLocale": "ko-KR" }),
    );
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["translation"], json!("워터 슬리핑 마스크"));

    let req = json_request(
        "/api/v1/translate",
        json!({ "text": "hello", "sourceLocale": "xx", "targetLocale": "en" }),
    );
    expect_status(send(&app, req).await, StatusCode::BAD_REQUEST).await;

    let req = json_request("/api/v1/detect-language", json!({ "text": "" }));
    expect_status(send(&app, req).await, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn search_endpoint_maps_backend_outcomes_to_status_codes() {
    let unconfigured = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));
    let req = json_request("/api/v1/search", json!({ "searchQuery": "COSRX essence" }));
    expect_status(send(&unconfigured, req).await, StatusCode::SERVICE_UNAVAILABLE).await;

    let stuck = FakeApify::new(vec!["RUNNING"], json!([]));
    let base = stuck.serve().await;
    let app = build_app(build_pipeline(cosrx_label, Some(&base), fast_search_settings(2)));
    let req = json_request("/api/v1/search", json!({ "searchQuery": "COSRX essence" }));
    expect_status(send(&app, req).await, StatusCode::GATEWAY_TIMEOUT).await;

    let failing = FakeApify::new(vec!["FAILED"], json!([]));
    let base = failing.serve().await;
    let app = build_app(build_pipeline(cosrx_label, Some(&base), fast_search_settings(2)));
    let req = json_request("/api/v1/search", json!({ "searchQuery": "COSRX essence" }));
    expect_status(send(&app, req).await, StatusCode::BAD_GATEWAY).await;

    let healthy = FakeApify::new(vec!["SUCCEEDED"], cosrx_search_page());
    let base = healthy.serve().await;
    let app = build_app(build_pipeline(cosrx_label, Some(&base), fast_search_settings(2)));
    let req = json_request("/api/v1/search", json!({ "searchQuery": "COSRX essence" }));
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;
    assert_eq!(body["product"]["trustedSource"], json!(true));
    assert!(
        body["insights"]["benefits"]
            .as_array()
            .is_some_and(|b| b.contains(&json!("hydrating")))
    );
}

#[tokio::test]
async fn health_reports_wired_providers() {
    let app = build_app(build_pipeline(cosrx_label, None, fast_search_settings(1)));

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("failed to build request");
    let res = expect_status(send(&app, req).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["providers"]["extraction"], json!(["scripted"]));
    assert_eq!(body["providers"]["search"], json!(false));
    assert!(body["version"].is_string());
}
