use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use voiceup_core::analysis::Analyzer;
use voiceup_core::compliance::model::ComplianceRules;
use voiceup_web::{create_router, state::AppState};

fn app() -> (Router, AppState) {
    let pool = voiceup_db::init_memory_pool().unwrap();
    let state = AppState::new(Arc::new(pool), Analyzer::lexicon(ComplianceRules::default()));
    (create_router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_root_and_health() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("VoiceUp"));

    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["classifier"], "lexicon");
}

#[tokio::test]
async fn test_analyze_text() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/analyze",
        Some(json!({ "text": "Thank you, this is wonderful!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let scores = body.as_array().unwrap();
    assert_eq!(scores.len(), 7);
    assert_eq!(scores[0]["label"], "joy");
    assert!(scores[0]["score"].as_f64().unwrap() > scores[1]["score"].as_f64().unwrap());
}

#[tokio::test]
async fn test_analyze_rejects_empty_and_malformed() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::POST, "/api/analyze", Some(json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No text provided");

    let (status, body) = send(&app, Method::POST, "/api/predict", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No text provided");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/analyze")
        .body(Body::from("text=hello"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict() {
    let (app, _) = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/predict",
        Some(json!({ "text": "This is terrible, I am furious" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["emotion"], "anger");
}

#[tokio::test]
async fn test_conversation_lifecycle() {
    let (app, _) = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/conversations",
        Some(json!({
            "messages": [
                { "sender": "agent", "text": "Hello Mike, welcome to VoiceUp!" },
                { "sender": "customer", "text": "My line is dead." },
                { "sender": "agent", "text": "Sorry Mike, it is fixed now." }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert!(created["analysis"].is_null());

    let (status, detail) = send(&app, Method::GET, &format!("/api/conversations/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["messages"].as_array().unwrap().len(), 3);
    assert!(detail["analysis"].is_null());

    let (status, list) = send(&app, Method::GET, "/api/conversations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["message_count"], 3);
    assert!(list[0]["analysis"]["compliance_score"].is_null());

    let (status, analysis) =
        send(&app, Method::POST, &format!("/api/conversations/{}/analyze", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["overall_compliance_score"], 100);
    assert_eq!(analysis["compliance_summary"]["apology"], true);
    assert_eq!(analysis["emotion_summary"]["emotions"].as_array().unwrap().len(), 7);

    let (status, stored) =
        send(&app, Method::GET, &format!("/api/conversations/{}/analysis", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["conversation_id"], id);

    let analysis_id = stored["id"].as_i64().unwrap();
    let (status, by_id) = send(&app, Method::GET, &format!("/api/analysis/{}", analysis_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id["overall_compliance_score"], 100);

    let (status, messages) =
        send(&app, Method::GET, &format!("/api/conversations/{}/messages", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let first_id = messages[0]["id"].as_i64().unwrap();

    let (status, message) = send(&app, Method::GET, &format!("/api/messages/{}", first_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message["sender"], "agent");
    assert_eq!(message["conversation_id"], id);
}

#[tokio::test]
async fn test_not_found_is_json() {
    let (app, _) = app();

    for uri in [
        "/api/conversations/99",
        "/api/conversations/99/messages",
        "/api/conversations/99/analysis",
        "/api/messages/99",
        "/api/analysis/99",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }

    let (status, _) = send(&app, Method::POST, "/api/conversations/99/analyze", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_id_and_unknown_route_are_json() {
    let (app, _) = app();

    for uri in ["/api/conversations/abc", "/api/messages/1.5", "/api/analysis/x"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }

    let (status, body) = send(&app, Method::POST, "/api/conversations/abc/analyze", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));

    let (status, body) = send(&app, Method::GET, "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_create_rejects_empty_conversation() {
    let (app, _) = app();
    let (status, body) =
        send(&app, Method::POST, "/api/conversations", Some(json!({ "messages": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_analytics_empty_and_seeded() {
    let (app, state) = app();

    let (status, body) = send(&app, Method::GET, "/api/analytics/compliance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_conversations"], 0);
    assert_eq!(body["compliance_rate"], 0.0);

    voiceup_core::seed::seed_database(&state.db, &state.analyzer).unwrap();

    let (status, body) = send(&app, Method::GET, "/api/analytics/compliance", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_conversations"], 5);
    assert_eq!(body["compliant_conversations"], 1);
    assert_eq!(body["compliance_rate"], 20.0);
    assert_eq!(body["average_score"], 44.0);
    assert_eq!(body["rule_violations"]["resolution"], 5);
    assert_eq!(body["scores"], json!([80, 20, 60, 20, 40]));

    let (status, body) = send(&app, Method::GET, "/api/analytics/emotions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_conversations"], 5);
    let dominant_total: i64 = body["distribution"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_i64().unwrap())
        .sum();
    assert_eq!(dominant_total, 5);
    assert!(!body["trend"].as_array().unwrap().is_empty());
}
