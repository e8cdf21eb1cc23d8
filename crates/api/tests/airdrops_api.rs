//! HTTP-level integration tests for the `/airdrops` and `/cache` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router,
//! backed by an in-memory stub store holding the sample records.

mod common;

use std::sync::Arc;

use airdrop_api::catalog::Catalog;
use airdrop_api::config::ServerConfig;
use airdrop_core::store::StoreError;
use axum::http::StatusCode;
use axum::http::Method;
use common::{
    app_with_samples, body_json, build_test_app, build_test_app_with_config, catalog_over, delete,
    delete_as_operator, get, send_with_token, test_config, StubStore,
};

fn item_names(json: &serde_json::Value) -> Vec<String> {
    json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Test: unfiltered listing returns the first page with totals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_first_page() {
    let (app, _store) = app_with_samples();

    let response = get(app, "/api/v1/airdrops").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["items"].as_array().unwrap().len(), 3);
    assert_eq!(data["page"], 1);
    assert_eq!(data["page_size"], 10);
    assert_eq!(data["total_pages"], 1);
    assert_eq!(data["count"], 3);
}

// ---------------------------------------------------------------------------
// Test: a page past the end is empty but keeps the totals
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let (app, _store) = app_with_samples();

    let json = body_json(get(app, "/api/v1/airdrops?page=2").await).await;

    assert!(json["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(json["data"]["count"], 3);
    assert_eq!(json["data"]["total_pages"], 1);
}

// ---------------------------------------------------------------------------
// Test: a non-numeric page falls back to page 1
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_page_falls_back_to_first() {
    let (app, _store) = app_with_samples();

    let json = body_json(get(app, "/api/v1/airdrops?page=abc").await).await;

    assert_eq!(json["data"]["page"], 1);
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Test: chain filter narrows the listing and is echoed back
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chain_filter_narrows_results() {
    let (app, _store) = app_with_samples();

    let json = body_json(get(app, "/api/v1/airdrops?chain=Ethereum%2FEVM").await).await;

    assert_eq!(item_names(&json), vec!["Rabby Wallet", "Rainbow Wallet"]);
    assert_eq!(json["data"]["count"], 2);
    assert_eq!(json["data"]["filters"]["chain"], "Ethereum/EVM");
}

// ---------------------------------------------------------------------------
// Test: search is a case-insensitive substring match on name and subtitle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_matches_name_and_subtitle() {
    let (app, _store) = app_with_samples();

    let by_name = body_json(get(app.clone(), "/api/v1/airdrops?search=GRASS").await).await;
    assert_eq!(item_names(&by_name), vec!["Grass Protocol"]);

    let by_subtitle = body_json(get(app, "/api/v1/airdrops?search=crypto%20wallet").await).await;
    assert_eq!(by_subtitle["data"]["count"], 2);
}

// ---------------------------------------------------------------------------
// Test: cost labels map to free and paid
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cost_filter_maps_free_and_paid() {
    let (app, _store) = app_with_samples();

    let free = body_json(get(app.clone(), "/api/v1/airdrops?cost=FREE").await).await;
    assert_eq!(free["data"]["count"], 3);
    assert_eq!(free["data"]["filters"]["cost"], 0.0);

    let paid = body_json(get(app, "/api/v1/airdrops?cost=PAID&stage=active").await).await;
    assert!(paid["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(paid["data"]["count"], 0);
    assert_eq!(paid["data"]["total_pages"], 1);
}

// ---------------------------------------------------------------------------
// Test: an unknown stage is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_stage_returns_400() {
    let (app, store) = app_with_samples();

    let response = get(app, "/api/v1/airdrops?stage=retired").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(store.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Test: detail returns the record with derived cost fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_returns_record_with_cost_label() {
    let (app, _store) = app_with_samples();

    let response = get(app, "/api/v1/airdrops/1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["id"], "1");
    assert_eq!(data["name"], "Grass Protocol");
    assert_eq!(data["is_free"], true);
    assert_eq!(data["cost_label"], "Free");
    // No cover on the sample record, so the banner is the profile image.
    assert!(data["image_cover"].is_null());
    assert_eq!(data["banner_image"], data["image_url"]);
    assert!(data["banner_image"].is_string());
    assert!(data["requirements"].as_array().unwrap()[0]["title"].is_string());
    assert!(data["how_to_steps"].is_array());
}

// ---------------------------------------------------------------------------
// Test: detail for a missing id is 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn detail_for_missing_id_returns_404() {
    let (app, _store) = app_with_samples();

    let response = get(app, "/api/v1/airdrops/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: summaries and the full list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summaries_and_all_list_every_record() {
    let (app, _store) = app_with_samples();

    let summaries = body_json(get(app.clone(), "/api/v1/airdrops/summaries").await).await;
    let summaries = summaries["data"].as_array().unwrap().clone();
    assert_eq!(summaries.len(), 3);
    assert!(summaries[0].get("description").is_none());

    let all = body_json(get(app, "/api/v1/airdrops/all").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
    assert!(all["data"][0]["description"].is_string());
}

// ---------------------------------------------------------------------------
// Test: pages that need live data refuse to run without a backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unconfigured_backend_returns_config_missing() {
    let app = build_test_app(Catalog::unconfigured());

    for uri in ["/api/v1/airdrops", "/api/v1/airdrops/1"] {
        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["code"], "CONFIG_MISSING");
    }

    // The summary list still answers from the sample records.
    let response = get(app, "/api/v1/airdrops/summaries").await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: persistent rate limiting surfaces as 503 when fallback is off
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limited_backend_returns_503() {
    let store = Arc::new(StubStore::failing(StoreError::RateLimited {
        message: "Too Many Requests".into(),
    }));
    let app = build_test_app(catalog_over(store, false));

    let response = get(app, "/api/v1/airdrops").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");
}

// ---------------------------------------------------------------------------
// Test: other backend failures surface as 502 when fallback is off
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_backend_returns_502() {
    let store = Arc::new(StubStore::failing(StoreError::Transport(
        "connection reset".into(),
    )));
    let app = build_test_app(catalog_over(store, false));

    let response = get(app, "/api/v1/airdrops/1").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["retry"], true);
}

// ---------------------------------------------------------------------------
// Test: with fallback on, a failing backend serves the sample records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_backend_falls_back_to_samples() {
    let store = Arc::new(StubStore::failing(StoreError::Http {
        status: 500,
        body: "boom".into(),
    }));
    let app = build_test_app(catalog_over(store, true));

    let response = get(app, "/api/v1/airdrops?chain=Solana").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(item_names(&json), vec!["Grass Protocol"]);
}

// ---------------------------------------------------------------------------
// Test: repeated requests hit the cache until it is cleared
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_is_cached_until_cleared() {
    let (app, store) = app_with_samples();

    get(app.clone(), "/api/v1/airdrops").await;
    get(app.clone(), "/api/v1/airdrops").await;
    // One count plus one page query.
    assert_eq!(store.call_count(), 2);

    let response = delete_as_operator(app.clone(), "/api/v1/cache").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    get(app, "/api/v1/airdrops").await;
    assert_eq!(store.call_count(), 4);
}

// ---------------------------------------------------------------------------
// Test: clearing one key leaves the others cached
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clearing_one_key_keeps_the_rest() {
    let (app, store) = app_with_samples();

    get(app.clone(), "/api/v1/airdrops/1").await;
    get(app.clone(), "/api/v1/airdrops/2").await;
    assert_eq!(store.call_count(), 2);

    let response = delete_as_operator(app.clone(), "/api/v1/cache/airdrop-1").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    get(app.clone(), "/api/v1/airdrops/1").await;
    get(app, "/api/v1/airdrops/2").await;
    assert_eq!(store.call_count(), 3);
}

// ---------------------------------------------------------------------------
// Test: an anonymous flush is rejected and the cache survives it
// ---------------------------------------------------------------------------

#[tokio::test]
async fn anonymous_cache_clear_is_rejected() {
    let (app, store) = app_with_samples();

    get(app.clone(), "/api/v1/airdrops").await;
    assert_eq!(store.call_count(), 2);

    for uri in ["/api/v1/cache", "/api/v1/cache/paginated-airdrops-1-10"] {
        let response = delete(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }

    get(app, "/api/v1/airdrops").await;
    assert_eq!(store.call_count(), 2);
}

// ---------------------------------------------------------------------------
// Test: a wrong operator token is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cache_clear_with_wrong_token_is_rejected() {
    let (app, _store) = app_with_samples();

    let response =
        send_with_token(app, Method::DELETE, "/api/v1/cache", Some("not-the-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Test: without an operator token the cache routes are not mounted
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cache_routes_absent_without_operator_token() {
    let store = Arc::new(StubStore::with_samples());
    let config = ServerConfig {
        cache_admin_token: None,
        ..test_config()
    };
    let app = build_test_app_with_config(catalog_over(store, true), config);

    let response = delete_as_operator(app, "/api/v1/cache").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
