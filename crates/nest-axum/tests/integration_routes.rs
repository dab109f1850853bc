//! Integration tests for the Axum web server.
//!
//! These tests drive the router in-process with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use nest_core::ExportOptions;
use serde_json::json;
use tower::ServiceExt;

use common::{RECORDS, TEST_BODY_LIMIT, app, app_with, body_json, body_string, post, test_config};

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn convert_envelope_returns_tree() {
    let body = json!({
        "nestingLevels": ["currency", "country", "city"],
        "records": serde_json::from_str::<serde_json::Value>(RECORDS).unwrap(),
    });

    let response = app()
        .oneshot(post("/api/convert", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(
        body_json(response).await,
        json!({
            "EUR": {"FR": {"Lyon": [{"amount": 11.4}], "Paris": [{"amount": 20}]}},
            "USD": {"US": {"Boston": [{"amount": 100}]}}
        })
    );
}

#[tokio::test]
async fn nest_with_query_levels_returns_indented_sorted_json() {
    let response = app()
        .oneshot(post("/api/nest?levels=currency,country,city", RECORDS))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(text.starts_with("{\n  \"EUR\": {"), "got: {text}");
    assert!(text.find("\"EUR\"").unwrap() < text.find("\"USD\"").unwrap());
}

#[tokio::test]
async fn nest_honours_export_indent() {
    let mut config = test_config();
    config.export = ExportOptions { indent: 4 };

    let response = app_with(&config)
        .oneshot(post("/api/nest?levels=currency", r#"[{"currency": "EUR", "a": 1}]"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.starts_with("{\n    \"EUR\""));
}

#[tokio::test]
async fn render_returns_plain_text_tree() {
    let response = app()
        .oneshot(post("/api/render?levels=currency,country,city", RECORDS))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap().clone();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));

    let text = body_string(response).await;
    assert!(text.starts_with("Node('/root')\n├── Node('/root/USD')"));
    assert!(text.contains("Node('/root/EUR/FR/Lyon', values=[{\"amount\":11.4}])"));
}

#[tokio::test]
async fn nest_without_levels_is_bad_request() {
    let response = app().oneshot(post("/api/nest", RECORDS)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["type"], "BAD_REQUEST");
}

#[tokio::test]
async fn invalid_json_is_bad_request() {
    let response = app()
        .oneshot(post("/api/nest?levels=currency", "[{"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["type"], "INVALID_JSON");
}

#[tokio::test]
async fn duplicate_records_conflict() {
    let records = r#"[
        {"currency": "EUR", "country": "FR", "amount": 1},
        {"currency": "EUR", "country": "FR", "amount": 2}
    ]"#;

    let response = app()
        .oneshot(post("/api/nest?levels=currency,country", records))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["type"], "DUPLICATE_NODES");
    assert!(body["error"].as_str().unwrap().starts_with("Duplicate found at"));
}

#[tokio::test]
async fn missing_attributes_are_counted() {
    let records = r#"[{"currency": "EUR"}, {"country": "FR"}, {"currency": "USD", "country": "US"}]"#;

    let response = app()
        .oneshot(post("/api/nest?levels=currency,country", records))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["type"], "DATA_ATTRIBUTE_MISSING");
    assert_eq!(body["error"], "Key elements were missing in 2 records");
}

#[tokio::test]
async fn empty_list_is_invalid_data() {
    let response = app()
        .oneshot(post("/api/nest?levels=currency", "[]"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["type"], "INVALID_DATA");
}

#[tokio::test]
async fn envelope_without_levels_is_rejected() {
    let body = json!({"nestingLevels": [], "records": [{"a": 1}]});

    let response = app()
        .oneshot(post("/api/convert", body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["type"], "INVALID_NESTING_LEVELS");
}

#[tokio::test]
async fn too_many_levels_are_rejected_before_conversion() {
    let levels: Vec<String> = (0..1_000).map(|i| format!("l{i}")).collect();
    let record: serde_json::Map<String, serde_json::Value> =
        levels.iter().map(|l| (l.clone(), json!("x"))).collect();
    let body = json!({"nestingLevels": levels, "records": [record]}).to_string();

    let mut config = test_config();
    config.max_body_bytes = 64 * 1024;
    assert!(body.len() < config.max_body_bytes);

    let response = app_with(&config)
        .oneshot(post("/api/convert", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["type"], "INVALID_NESTING_LEVELS");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let big = format!(
        "[{}]",
        vec![r#"{"currency": "EUR", "pad": "xxxxxxxxxxxxxxxx"}"#; TEST_BODY_LIMIT / 16].join(",")
    );
    assert!(big.len() > TEST_BODY_LIMIT);

    let response = app()
        .oneshot(post("/api/nest?levels=currency", big))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["type"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn settings_endpoint_reports_effective_values() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["exportIndent"], 2);
    assert_eq!(body["maxBodyBytes"], TEST_BODY_LIMIT);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/nest?levels=currency")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn nonexistent_route_returns_not_found() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
