//! HTTP-level tests for the router: status codes, error bodies and the
//! degraded-but-200 contract when no provider keys are configured.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use phone_intel_api::config::{Config, RateLimitConfig};
use phone_intel_api::handlers::AppState;
use phone_intel_api::retry::{SIMULATED_CARRIER, UNAVAILABLE_CARRIER};
use phone_intel_api::router::build_router;
use std::sync::Arc;
use tower::ServiceExt;

fn build_test_app() -> axum::Router {
    let config = Config {
        lookup_rate_limit: None,
        ..Config::default()
    };
    let state = Arc::new(AppState::new(config).expect("state builds without keys"));
    build_router(state).expect("router builds")
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

async fn get(uri: &str) -> axum::response::Response {
    build_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_lookup_without_keys_returns_degraded_report() {
    let resp = get("/api/phone-info?number=+14155552671").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "no-store, no-cache, must-revalidate"
    );

    let json = body_json(resp).await;
    assert_eq!(json["inputNumber"], "+14155552671");
    assert_eq!(json["phoneDetails"]["countryCode"], "US");
    let carrier = json["phoneDetails"]["carrier"].as_str().unwrap();
    assert!(carrier == SIMULATED_CARRIER || carrier == UNAVAILABLE_CARRIER);
    assert_eq!(json["phoneDetails"]["lineType"], "mobile");
    assert_eq!(json["phoneDetails"]["timezone"], "America/New_York");
    assert_eq!(
        json["phoneDetails"]["numberComponents"]["internationalFormat"],
        "+1 415-5552671"
    );
    assert_eq!(json["countryInfo"]["capital"], "Washington D.C.");
    assert!(json["breaches"].is_null());
    assert_eq!(json["metadata"]["dataQuality"], "degraded");
}

#[tokio::test]
async fn test_encoded_plus_is_accepted() {
    let resp = get("/api/phone-info?number=%2B442071838750").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["inputNumber"], "+442071838750");
}

#[tokio::test]
async fn test_missing_number_is_bad_request() {
    let resp = get("/api/phone-info").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Phone number is required");
}

#[tokio::test]
async fn test_malformed_number_is_bad_request() {
    for uri in [
        "/api/phone-info?number=14155552671",
        "/api/phone-info?number=+123",
        "/api/phone-info?number=+1234567890123456",
    ] {
        let resp = get(uri).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let json = body_json(resp).await;
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid phone number format"));
    }
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let resp = build_test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/phone-info?number=+14155552671")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let resp = get("/api/does-not-exist").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let json = body_json(resp).await;
    assert_eq!(json["error"], "Resource not found");
}

#[tokio::test]
async fn test_health() {
    let resp = get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["primaryKeys"], 0);
    assert_eq!(json["enrichmentEnabled"], false);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let resp = get("/api-docs/openapi.json").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert!(json["paths"]["/api/phone-info"].is_object());
}

#[tokio::test]
async fn test_lookup_rate_limited_per_client_ip() {
    let config = Config {
        lookup_rate_limit: Some(RateLimitConfig {
            replenish_secs: 60,
            burst: 1,
        }),
        ..Config::default()
    };
    let state = Arc::new(AppState::new(config).unwrap());
    let app = build_router(state).unwrap();

    let mut statuses = vec![];
    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/phone-info?number=+14155552671")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        statuses.push(resp.status());
    }

    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]);

    // Other routes are not limited
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-forwarded-for", "203.0.113.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
