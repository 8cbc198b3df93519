// /api/send-lead against a mocked email provider
#![cfg(feature = "server")]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use label_draft::server::{create_router, AppState, INVALID_INPUT, SEND_FAILED, SENT};
use label_draft::ServerConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lead() -> Value {
    json!({
        "email": "export@example.com",
        "productName": "Rice Cake",
        "targetMarket": "EU",
        "targetLanguage": "English",
        "ingredients": [
            {"name": "rice", "percent": 60},
            {"name": "water", "percent": 30},
            {"name": "wheat flour", "percent": 10}
        ],
        "nutrition": {"kcal": 200, "sodium": 300, "fat": 1.5, "saturates": 0.3,
                      "carbs": 44, "sugars": 2, "protein": 4, "fibre": 0.8},
        "labelOutput": "=== Rice Cake ===",
        "complianceScore": 100
    })
}

fn state_for(server: &MockServer) -> AppState {
    AppState::new(&ServerConfig {
        api_key: Some("re_test".to_string()),
        api_base: server.uri(),
        lead_inbox: "ops@example.com".to_string(),
        ..ServerConfig::default()
    })
}

async fn post(state: AppState, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/send-lead")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = create_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_lead_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "email_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post(state_for(&server), &lead().to_string()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!(SENT));
    assert!(body["data"].is_string());
}

#[tokio::test]
async fn test_provider_failure_is_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let (status, body) = post(state_for(&server), &lead().to_string()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(SEND_FAILED));
}

#[tokio::test]
async fn test_invalid_lead_never_reaches_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut bad = lead();
    bad["complianceScore"] = json!(140);
    let (status, body) = post(state_for(&server), &bad.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(INVALID_INPUT));
    assert!(body["details"]["fieldErrors"]["complianceScore"].is_array());

    let mut padded = lead();
    padded["email"] = json!(" export@example.com ");
    let (status, body) = post(state_for(&server), &padded.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["fieldErrors"]["email"].is_array());

    let (status, body) = post(state_for(&server), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["formErrors"].as_array().map(Vec::len), Some(1));
}
