//! Chat endpoint tests against a mock OpenAI-compatible provider

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use webboost_api::api::create_router;
use webboost_api::assistant::fallback::Topic;
use webboost_api::config::Settings;
use webboost_api::llm::{ChatBackend, OpenAiBackend};
use webboost_api::store::MemoryStore;
use webboost_api::AppState;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(base_url: &str, api_key: Option<&str>) -> Settings {
    let mut settings = Settings::default();
    settings.rate_limit.enabled = false;
    settings.llm.base_url = base_url.to_string();
    settings.llm.api_key = api_key.map(str::to_string);
    settings.llm.api_key_env = "WEBBOOST_TEST_UNSET_OPENAI_KEY".to_string();
    settings
}

fn app(settings: Settings, store: Arc<MemoryStore>) -> Router {
    let llm: Arc<dyn ChatBackend> = Arc::new(OpenAiBackend::new(&settings.llm).unwrap());
    create_router(AppState::new(settings, store, llm))
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn user_messages(content: &str) -> Value {
    json!({"messages": [{"role": "user", "content": content}]})
}

#[tokio::test]
async fn test_chat_falls_back_without_key() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::new());
    let app = app(settings(&server.uri(), None), store.clone());

    let (status, body) = post(&app, "/api/chat", user_messages("Quel est le prix ?")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["used_llm"], false);
    assert_eq!(body["provider"], "fallback");
    assert_eq!(body["reply"], Topic::Pricing.reply());

    let logs = store.chat_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].provider, "local");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_uses_llm_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  Bonjour !  ")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app(settings(&server.uri(), Some("sk-test")), Arc::new(MemoryStore::new()));
    let (status, body) = post(&app, "/api/chat", user_messages("bonjour")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["used_llm"], true);
    assert_eq!(body["provider"], "openai");
    assert_eq!(body["reply"], "Bonjour !");
}

#[tokio::test]
async fn test_chat_falls_back_on_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app(settings(&server.uri(), Some("sk-test")), Arc::new(MemoryStore::new()));
    let (status, body) = post(&app, "/api/chat", user_messages("Salut")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["used_llm"], false);
    assert_eq!(body["reply"], Topic::Greeting.reply());
}

#[tokio::test]
async fn test_chat_without_user_message() {
    let server = MockServer::start().await;
    let app = app(settings(&server.uri(), None), Arc::new(MemoryStore::new()));

    let (status, _) = post(&app, "/api/chat", user_messages("   ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/chat/elise", json!({"message": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openai_chat_requires_a_key() {
    let server = MockServer::start().await;
    let app = app(settings(&server.uri(), None), Arc::new(MemoryStore::new()));

    let (status, body) = post(&app, "/api/chat/openai", json!({"message": "prix ?"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_api_key");
}

#[tokio::test]
async fn test_openai_chat_with_provided_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-caller"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("890€ HT")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let app = app(settings(&server.uri(), None), store.clone());
    let (status, body) = post(
        &app,
        "/api/chat/openai",
        json!({"message": "prix ?", "api_key": "sk-caller", "model": "gpt-4o"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "890€ HT");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["success"], true);

    let logs = store.chat_logs();
    assert_eq!(logs[0].api_key_source.as_deref(), Some("provided"));
}

#[tokio::test]
async fn test_openai_chat_maps_provider_failures() {
    for (upstream, expected) in [
        (401, StatusCode::UNAUTHORIZED),
        (429, StatusCode::TOO_MANY_REQUESTS),
        (500, StatusCode::INTERNAL_SERVER_ERROR),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(upstream))
            .mount(&server)
            .await;

        let app = app(settings(&server.uri(), Some("sk-env")), Arc::new(MemoryStore::new()));
        let (status, body) = post(&app, "/api/chat/openai", json!({"message": "bonjour"})).await;
        assert_eq!(status, expected, "upstream status {}", upstream);
        assert_eq!(body["success"], false);
    }
}

#[tokio::test]
async fn test_elise_local_reply_without_key() {
    let server = MockServer::start().await;
    let app = app(settings(&server.uri(), None), Arc::new(MemoryStore::new()));

    let (status, body) = post(
        &app,
        "/api/chat/elise",
        json!({"message": "Bonjour", "session_id": "abc"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "elise_local");
    assert_eq!(body["personality"], "elise");
    assert_eq!(body["session_id"], "abc");
    assert_eq!(body["reply"], Topic::Greeting.reply());
}

#[tokio::test]
async fn test_elise_sends_persona_to_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Avec plaisir !")))
        .mount(&server)
        .await;

    let app = app(settings(&server.uri(), Some("sk-test")), Arc::new(MemoryStore::new()));
    let (status, body) = post(&app, "/api/chat/elise", json!({"message": "Un site ?"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "openai");
    assert!(!body["session_id"].as_str().unwrap().is_empty());

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["messages"][0]["role"], "system");
    assert!(sent["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("Élise"));
    assert_eq!(sent["messages"][1]["content"], "Un site ?");
    assert_eq!(sent["max_tokens"], 800);
}

#[tokio::test]
async fn test_key_check_accepts_and_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer sk-good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("OK")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer sk-bad"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let app = app(settings(&server.uri(), None), Arc::new(MemoryStore::new()));

    let (status, body) = post(&app, "/api/config/openai-key", json!({"openai_api_key": "sk-good"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["test_response"], "OK");

    let (status, body) = post(&app, "/api/config/openai-key", json!({"openai_api_key": "sk-bad"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_api_key");
}

#[tokio::test]
async fn test_elise_falls_back_on_provider_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let app = app(settings(&server.uri(), Some("sk-test")), store.clone());
    let (status, body) = post(&app, "/api/chat/elise", json!({"message": "Combien pour un site ?"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "elise_local");
    assert_eq!(body["model"], "fallback");
    assert_eq!(body["success"], true);
    assert_eq!(body["reply"], Topic::Pricing.reply());

    let logs = store.chat_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].provider, "elise_local");
    assert_eq!(logs[0].message, "Combien pour un site ?");
}

#[tokio::test]
async fn test_configured_model_is_the_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("OK")))
        .mount(&server)
        .await;

    let mut config = settings(&server.uri(), Some("sk-env"));
    config.llm.model = "gpt-4o".to_string();
    let app = app(config, Arc::new(MemoryStore::new()));

    let request = Request::builder()
        .uri("/api/models/openai")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let catalogue: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(catalogue["default"], "gpt-4o");

    let (status, body) = post(&app, "/api/chat/openai", json!({"message": "bonjour"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "gpt-4o");

    let requests = server.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["model"], "gpt-4o");
}

#[tokio::test]
async fn test_chat_answers_the_final_message() {
    let server = MockServer::start().await;
    let app = app(settings(&server.uri(), None), Arc::new(MemoryStore::new()));

    let conversation = json!({"messages": [
        {"role": "user", "content": "Bonjour"},
        {"role": "assistant", "content": "Quel est votre budget ?"}
    ]});
    let (status, body) = post(&app, "/api/chat", conversation).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], Topic::Pricing.reply());

    let trailing_blank = json!({"messages": [
        {"role": "user", "content": "Bonjour"},
        {"role": "assistant", "content": "  "}
    ]});
    let (status, _) = post(&app, "/api/chat", trailing_blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
