use super::helpers::{
    FakeApify, PRODUCT_ACTOR, WEB_SEARCH_ACTOR, apify_backend, cosrx_search_page,
    fast_search_settings,
};
use klar_api::{
    application::search_product::use_case::SearchProductUseCase,
    domain::analysis::{errors::PipelineError, value_objects::SearchQuery},
};
use serde_json::json;

fn query(text: &str) -> SearchQuery {
    SearchQuery::new(text).expect("query must not be blank")
}

#[tokio::test]
async fn polls_until_succeeded_then_parses_dataset() {
    let fake = FakeApify::new(vec!["READY", "RUNNING", "SUCCEEDED"], cosrx_search_page());
    let base = fake.serve().await;
    let search =
        SearchProductUseCase::new(Some(apify_backend(&base)), fast_search_settings(10));

    let info = search
        .execute(&query("COSRX Snail Mucin Essence"))
        .await
        .expect("search should succeed");

    let product = info.product.expect("a product should be selected");
    assert!(product.url.contains("cosrx.com"));
    assert!(product.trusted_source);
    assert_eq!(fake.poll_count(), 3);
    assert_eq!(fake.submitted_actors(), vec![WEB_SEARCH_ACTOR.to_string()]);

    let input = &fake.submitted_inputs()[0];
    assert_eq!(
        input["queries"],
        json!(["COSRX Snail Mucin Essence skincare product"])
    );
    assert_eq!(input["maxPagesPerQuery"], json!(1));
    assert_eq!(input["resultsPerPage"], json!(5));
}

#[tokio::test]
async fn terminal_failure_status_is_reported_without_further_polling() {
    let fake = FakeApify::new(vec!["RUNNING", "ABORTED"], json!([]));
    let base = fake.serve().await;
    let search =
        SearchProductUseCase::new(Some(apify_backend(&base)), fast_search_settings(10));

    let err = search.execute(&query("LANEIGE Water Sleeping Mask")).await.unwrap_err();

    assert!(matches!(err, PipelineError::SearchFailed(ref msg) if msg.contains("ABORTED")));
    assert_eq!(fake.poll_count(), 2);
}

#[tokio::test]
async fn stuck_job_times_out_after_the_attempt_ceiling() {
    let fake = FakeApify::new(vec!["RUNNING"], json!([]));
    let base = fake.serve().await;
    let search = SearchProductUseCase::new(Some(apify_backend(&base)), fast_search_settings(4));

    let err = search.execute(&query("Sulwhasoo serum")).await.unwrap_err();

    assert_eq!(err, PipelineError::SearchTimeout { attempts: 4 });
    assert_eq!(fake.poll_count(), 4);
}

#[tokio::test]
async fn product_actor_error_falls_back_to_web_search() {
    let fake = FakeApify::with_failing_actor(vec!["SUCCEEDED"], cosrx_search_page(), PRODUCT_ACTOR);
    let base = fake.serve().await;
    let mut settings = fast_search_settings(3);
    settings.use_custom_actor = true;
    let search = SearchProductUseCase::new(Some(apify_backend(&base)), settings);

    let info = search
        .execute(&query("COSRX Snail Mucin Essence"))
        .await
        .expect("fallback search should succeed");

    assert!(info.product.is_some());
    assert_eq!(
        fake.submitted_actors(),
        vec![PRODUCT_ACTOR.to_string(), WEB_SEARCH_ACTOR.to_string()]
    );
    assert_eq!(
        fake.submitted_inputs()[0],
        json!({ "searchQuery": "COSRX Snail Mucin Essence", "maxResults": 1 })
    );
}

#[tokio::test]
async fn rejected_submission_is_a_backend_error() {
    let fake = FakeApify::with_failing_actor(vec!["SUCCEEDED"], json!([]), WEB_SEARCH_ACTOR);
    let base = fake.serve().await;
    let search =
        SearchProductUseCase::new(Some(apify_backend(&base)), fast_search_settings(3));

    let err = search.execute(&query("Innisfree toner")).await.unwrap_err();

    assert!(matches!(err, PipelineError::SearchBackend(_)));
    assert_eq!(fake.poll_count(), 0);
}
