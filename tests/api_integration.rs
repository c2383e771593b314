//! HTTP API integration tests
//!
//! Requests go straight into the router with `tower::ServiceExt::oneshot`,
//! so no listener is bound.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use template_report_service::config::Settings;
use template_report_service::server::{create_app, AppState};

fn test_app(settings: Settings) -> Router {
    create_app(AppState::new(settings))
}

fn default_app() -> Router {
    test_app(Settings::default())
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    let payload = serde_json::to_vec(body).unwrap();
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn report_payload(csv: &str) -> Value {
    json!({
        "dataset": { "format": "delimited", "content": csv },
        "document": {
            "paragraphs": [
                { "text": "Hello {{ name }}" },
                { "text": "Age: {{age}}" }
            ],
            "tables": [
                { "rows": [ { "cells": [ { "paragraphs": [ { "text": "{{ name }}" } ] } ] } ] }
            ]
        }
    })
}

#[tokio::test]
async fn test_health() {
    let app = default_app();

    let (status, body) = send_json(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["templates"], 0);
}

#[tokio::test]
async fn test_generate_report() {
    let app = default_app();
    let request = json_request(
        Method::POST,
        "/api/v1/reports/generate",
        &report_payload("key,value\nname,Alice\nage,30\n"),
    );

    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["status"], "OK");
    assert_eq!(body["document"]["paragraphs"][0]["text"], "Hello Alice");
    assert_eq!(body["document"]["paragraphs"][1]["text"], "Age: 30");
    assert_eq!(
        body["document"]["tables"][0]["rows"][0]["cells"][0]["paragraphs"][0]["text"],
        "Alice"
    );
    assert_eq!(body["stats"]["placeholders_replaced"], 3);
}

#[tokio::test]
async fn test_generate_report_with_spreadsheet_and_partial_match() {
    let app = default_app();
    let mut payload = report_payload("");
    payload["dataset"] = json!({
        "format": "spreadsheet",
        "rows": [["key", "value"], ["name", "Bob"], ["extra", 1]]
    });

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/v1/reports/generate", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["status"], "WARNING");
    assert_eq!(body["report"]["doc_only"], json!(["age"]));
    assert_eq!(body["report"]["dataset_only"], json!(["extra"]));
    assert_eq!(body["document"]["paragraphs"][0]["text"], "Hello Bob");
    assert_eq!(body["document"]["paragraphs"][1]["text"], "Age: {{age}}");
}

#[tokio::test]
async fn test_preview_report() {
    let app = default_app();
    let request = json_request(
        Method::POST,
        "/api/v1/reports/preview",
        &report_payload("key,value\nname,Alice\n"),
    );

    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_keys"], json!(["age", "name"]));
    assert_eq!(body["dataset_keys"], json!(["name"]));
    assert_eq!(body["rows"], json!([{ "key": "name", "value": "Alice" }]));
    assert_eq!(body["report"]["status"], "WARNING");
    assert_eq!(body["document_text"], "Hello {{ name }}\nAge: {{age}}");
}

#[tokio::test]
async fn test_invalid_dataset_is_bad_request() {
    let app = default_app();
    let request = json_request(
        Method::POST,
        "/api/v1/reports/generate",
        &report_payload("name,amount\nx,1\n"),
    );

    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_DATASET");
}

#[tokio::test]
async fn test_blank_key_row_is_reported_not_rejected() {
    let app = default_app();
    let request = json_request(
        Method::POST,
        "/api/v1/reports/generate",
        &report_payload("key,value\nname,Alice\n,stray\nage,30\n"),
    );

    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document"]["paragraphs"][0]["text"], "Hello Alice");
    assert_eq!(body["skipped_rows"], json!([3]));
}

#[tokio::test]
async fn test_missing_document_is_validation_error() {
    let app = default_app();
    let payload = json!({ "dataset": { "format": "delimited", "content": "key,value\n" } });

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/v1/reports/generate", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("missing field `document`"));
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let app = default_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/templates")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send_json(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_template_lifecycle() {
    let app = default_app();
    let create = json!({
        "id": "audit",
        "name": "Audit report",
        "document": { "paragraphs": [ { "text": "Company: {{ company }}" } ] }
    });

    let (status, body) =
        send_json(&app, json_request(Method::POST, "/api/v1/templates", &create)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["placeholders"], json!(["company"]));

    let (status, body) =
        send_json(&app, json_request(Method::POST, "/api/v1/templates", &create)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "TEMPLATE_EXISTS");

    let (status, body) = send_json(&app, get("/api/v1/templates")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let render = json!({ "dataset": { "format": "delimited", "content": "key,value\ncompany,ACME\n" } });
    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/v1/templates/audit/generate", &render),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document"]["paragraphs"][0]["text"], "Company: ACME");

    // Rendering never touches the stored template
    let (_, body) = send_json(&app, get("/api/v1/templates/audit")).await;
    assert_eq!(body["document"]["paragraphs"][0]["text"], "Company: {{ company }}");

    let update = json!({ "document": { "paragraphs": [ { "text": "{{auditor}}" } ] } });
    let (status, body) = send_json(
        &app,
        json_request(Method::PUT, "/api/v1/templates/audit", &update),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["placeholders"], json!(["auditor"]));
    assert_eq!(body["name"], "Audit report");

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri("/api/v1/templates/audit")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&app, get("/api/v1/templates/audit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "TEMPLATE_NOT_FOUND");
}

#[tokio::test]
async fn test_empty_update_is_rejected() {
    let app = default_app();

    let (status, body) = send_json(
        &app,
        json_request(Method::PUT, "/api/v1/templates/anything", &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = default_app();

    let (status, body) = send_json(&app, get("/api/v2/nothing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_template_id_is_rejected() {
    let app = default_app();
    let create = json!({
        "id": "not valid!",
        "name": "Broken",
        "document": { "paragraphs": [ { "text": "x" } ] }
    });

    let (status, body) =
        send_json(&app, json_request(Method::POST, "/api/v1/templates", &create)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ID");
}

#[tokio::test]
async fn test_api_key_required_when_configured() {
    let mut settings = Settings::default();
    settings.api.key = Some("secret".to_string());
    let app = test_app(settings);

    let (status, body) = send_json(&app, get("/api/v1/templates")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let wrong = Request::builder()
        .uri("/api/v1/templates")
        .header("X-API-Key", "guess")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let authorized = Request::builder()
        .uri("/api/v1/templates")
        .header("X-API-Key", "secret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, authorized).await;
    assert_eq!(status, StatusCode::OK);

    // Health stays open
    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut settings = Settings::default();
    settings.server.max_body_bytes = 64;
    let app = test_app(settings);
    let request = json_request(
        Method::POST,
        "/api/v1/reports/generate",
        &report_payload("key,value\nname,Alice\nage,30\n"),
    );

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_sample_dataset_download() {
    let app = default_app();

    let response = app
        .clone()
        .oneshot(get("/api/v1/samples/dataset"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .starts_with("attachment"));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8(body.to_vec()).unwrap().starts_with("key,value"));
}

#[tokio::test]
async fn test_sample_files_generate_cleanly() {
    let app = default_app();
    let (_, document) = send_json(&app, get("/api/v1/samples/document")).await;
    let (_, csv) = send(&app, get("/api/v1/samples/dataset")).await;
    let payload = json!({
        "dataset": { "format": "delimited", "content": String::from_utf8(csv).unwrap() },
        "document": document
    });

    let (status, body) = send_json(
        &app,
        json_request(Method::POST, "/api/v1/reports/generate", &payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["status"], "OK");
    assert_eq!(body["stats"]["placeholders_unresolved"], 0);
}

#[tokio::test]
async fn test_metrics_and_stats() {
    let app = default_app();
    let request = json_request(
        Method::POST,
        "/api/v1/reports/generate",
        &report_payload("key,value\nname,Alice\nage,30\n"),
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(&app, get("/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generator"]["total_generated"], 1);
    assert_eq!(body["generator"]["full_matches"], 1);

    let (status, body) = send(&app, get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("report_generations_total"));
    assert!(text.contains("report_templates_stored"));
}
