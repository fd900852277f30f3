use std::sync::Arc;

use serde_json::json;
use text2sql::api::tasks::run_request;
use text2sql::api::{HttpService, ServiceError, Text2SqlService};
use text2sql::core::action::{Action, Effect, MSG_CONVERT_FAILED, MSG_KEY_FAILED, MSG_QUESTION_LOCKED, update};
use text2sql::core::schema::SelectVia;
use text2sql::core::state::App;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn service_for(server: &MockServer) -> Arc<dyn Text2SqlService> {
    Arc::new(HttpService::new(server.uri()))
}

/// Feeds an action through `update()`, running every spawned request to
/// completion before returning. Mirrors what the TUI event loop does.
async fn drive(app: &mut App, service: &Arc<dyn Text2SqlService>, action: Action) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut pending = vec![action];
    while let Some(action) = pending.pop() {
        let effect = update(app, action);
        if let Effect::Spawn(request) = &effect {
            pending.push(run_request(service.clone(), request.clone()).await);
        }
        effects.push(effect);
    }
    effects
}

fn entry(question: &str, sql: &str) -> serde_json::Value {
    json!({ "question": question, "sql_query": sql, "timestamp": "2025-01-01T10:00:00" })
}

async fn mount_session(server: &MockServer, session_id: &str) {
    Mock::given(method("POST"))
        .and(path("/api/set-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "session_id": session_id })))
        .mount(server)
        .await;
}

fn ready_app(session_id: &str) -> App {
    let mut app = App::new();
    app.session_id = Some(session_id.to_string());
    app.schema_loaded = true;
    app
}

// ============================================================================
// API key registration
// ============================================================================

#[tokio::test]
async fn test_registration_activates_session_and_loads_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/set-api-key"))
        .and(body_json(json!({ "api_key": "sk-test", "session_id": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s-abc",
            "message": "API key set successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/history/s-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [entry("older question", "SELECT 1;")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = App::new();
    drive(&mut app, &service, Action::SubmitApiKey("sk-test".into())).await;

    assert_eq!(app.session_id.as_deref(), Some("s-abc"));
    assert!(app.key.is_succeeded());
    assert_eq!(app.history.len(), 1);
    assert_eq!(app.history.items()[0].question, "older question");
}

#[tokio::test]
async fn test_blank_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/set-api-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = App::new();
    let effects = drive(&mut app, &service, Action::SubmitApiKey("   ".into())).await;

    assert_eq!(effects, vec![Effect::None]);
    assert_eq!(app.key.error(), Some("Please enter an API key"));
}

#[tokio::test]
async fn test_registration_failure_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/set-api-key"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "Failed to set API key: boom" })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = App::new();
    drive(&mut app, &service, Action::SubmitApiKey("sk-test".into())).await;

    assert_eq!(app.key.error(), Some(MSG_KEY_FAILED));
    assert!(app.session_id.is_none());
}

#[tokio::test]
async fn test_reregistering_same_session_skips_history() {
    let server = MockServer::start().await;
    mount_session(&server, "s-1").await;
    Mock::given(method("GET"))
        .and(path("/api/history/s-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "history": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = App::new();
    app.session_id = Some("s-1".into());
    drive(&mut app, &service, Action::SubmitApiKey("sk-new".into())).await;

    assert_eq!(app.session_id.as_deref(), Some("s-1"));
}

// ============================================================================
// Schema upload
// ============================================================================

#[tokio::test]
async fn test_schema_upload_marks_schema_loaded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-schema"))
        .and(query_param("session_id", "s-1"))
        .and(body_string_contains("\"tables\""))
        .and(body_string_contains("shop.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s-1",
            "message": "Schema uploaded successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("shop.json");
    std::fs::write(&file, r#"{"tables": [{"name": "orders"}]}"#).unwrap();

    let service = service_for(&server);
    let mut app = App::new();
    app.session_id = Some("s-1".into());
    drive(
        &mut app,
        &service,
        Action::SelectSchema { raw: file.to_string_lossy().into_owned(), via: SelectVia::Browse },
    )
    .await;
    drive(&mut app, &service, Action::UploadSchema).await;

    assert!(app.schema_loaded);
    assert!(app.schema.phase.is_succeeded());
}

#[tokio::test]
async fn test_non_json_file_never_uploads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-schema"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = App::new();
    app.session_id = Some("s-1".into());
    drive(&mut app, &service, Action::SelectSchema { raw: "/tmp/schema.csv".into(), via: SelectVia::Drop }).await;
    drive(&mut app, &service, Action::UploadSchema).await;

    assert!(!app.schema_loaded);
    assert_eq!(app.schema.phase.error(), Some("Please select a file first"));
}

#[tokio::test]
async fn test_upload_error_detail_shown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload-schema"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid JSON file" })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.json");
    std::fs::write(&file, "{ not json").unwrap();

    let service = service_for(&server);
    let mut app = App::new();
    app.session_id = Some("s-1".into());
    drive(
        &mut app,
        &service,
        Action::SelectSchema { raw: file.to_string_lossy().into_owned(), via: SelectVia::Drop },
    )
    .await;
    drive(&mut app, &service, Action::UploadSchema).await;

    assert!(!app.schema_loaded);
    assert_eq!(app.schema.phase.error(), Some("Invalid JSON file"));
}

// ============================================================================
// Question conversion
// ============================================================================

#[tokio::test]
async fn test_conversion_becomes_current_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/convert"))
        .and(body_json(json!({ "question": "How many orders?", "session_id": "s-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "question": "How many orders?",
            "sql_query": "SELECT COUNT(*) FROM orders;",
            "timestamp": "2025-01-01T10:00:00.123456",
            "model": "gpt-4o"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = ready_app("s-1");
    let effects = drive(&mut app, &service, Action::SubmitQuestion("How many orders?".into())).await;

    assert!(effects.contains(&Effect::ClearQuestionInput));
    let current = app.current_result.as_ref().unwrap();
    assert_eq!(current.sql_query, "SELECT COUNT(*) FROM orders;");
    assert_eq!(current.extra.get("model"), Some(&json!("gpt-4o")));
    assert_eq!(app.history.items()[0], *current);
}

#[tokio::test]
async fn test_conversion_error_detail_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/convert"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "schema too large" })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = ready_app("s-1");
    let effects = drive(&mut app, &service, Action::SubmitQuestion("anything".into())).await;

    assert!(!effects.contains(&Effect::ClearQuestionInput));
    assert_eq!(app.question.error(), Some("schema too large"));
    assert!(app.current_result.is_none());
}

#[tokio::test]
async fn test_conversion_error_without_body_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/convert"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = ready_app("s-1");
    drive(&mut app, &service, Action::SubmitQuestion("anything".into())).await;

    assert_eq!(app.question.error(), Some(MSG_CONVERT_FAILED));
}

#[tokio::test]
async fn test_question_without_schema_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/convert"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let mut app = App::new();
    app.session_id = Some("s-1".into());
    drive(&mut app, &service, Action::SubmitQuestion("How many orders?".into())).await;

    assert_eq!(app.question.error(), Some(MSG_QUESTION_LOCKED));
}

#[tokio::test]
async fn test_six_conversions_keep_five_newest() {
    let server = MockServer::start().await;
    for n in 1..=6 {
        let question = format!("question {n}");
        Mock::given(method("POST"))
            .and(path("/api/convert"))
            .and(body_string_contains(format!("\"{question}\"")))
            .respond_with(ResponseTemplate::new(200).set_body_json(entry(&question, &format!("SELECT {n};"))))
            .expect(1)
            .mount(&server)
            .await;
    }

    let service = service_for(&server);
    let mut app = ready_app("s-1");
    for n in 1..=6 {
        drive(&mut app, &service, Action::SubmitQuestion(format!("question {n}"))).await;
    }

    let questions: Vec<&str> = app.history.items().iter().map(|r| r.question.as_str()).collect();
    assert_eq!(
        questions,
        vec!["question 6", "question 5", "question 4", "question 3", "question 2"]
    );
    assert_eq!(app.current_result.as_ref().map(|r| r.question.as_str()), Some("question 6"));
}

// ============================================================================
// Raw service calls
// ============================================================================

#[tokio::test]
async fn test_history_endpoint_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/history/s-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [entry("a", "SELECT 1;"), entry("b", "SELECT 2;")]
        })))
        .mount(&server)
        .await;

    let service = HttpService::new(server.uri());
    let history = assert_ok!(service.history("s-9").await);
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].question, "b");
}

#[tokio::test]
async fn test_malformed_reply_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/set-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let service = HttpService::new(server.uri());
    let error = assert_err!(service.set_api_key("sk", None).await);
    assert!(matches!(error, ServiceError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let service = HttpService::new("http://127.0.0.1:9");
    let error = assert_err!(service.convert("q", "s").await);
    assert!(matches!(error, ServiceError::Network(_)));
}
