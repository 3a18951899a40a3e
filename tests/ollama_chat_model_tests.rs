//! Tests for the Ollama adapter against a wiremock stand-in for the runtime.

use motormate::{ChatModel, Conversation, DomainError, OllamaChatModel, OllamaConfig, Turn};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn model_for(server: &MockServer) -> OllamaChatModel {
    OllamaChatModel::new(OllamaConfig {
        base_url: server.uri(),
        ..OllamaConfig::default()
    })
    .expect("Failed to build client")
}

fn sample_conversation() -> Conversation {
    Conversation::assemble(
        "You are MotorMate.",
        &[
            Turn::human("I need a truck"),
            Turn::ai("For towing or commuting?"),
        ],
        "Towing a boat",
    )
}

#[tokio::test]
async fn test_invoke_sends_the_whole_conversation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "mistral",
            "message": {"role": "assistant", "content": "Consider the Ford F-150."},
            "done": true
        })))
        .mount(&server)
        .await;

    let reply = model_for(&server)
        .invoke(&sample_conversation())
        .await
        .expect("Invoke failed");
    assert_eq!(reply, "Consider the Ford F-150.");

    let requests = server.received_requests().await.expect("Recording disabled");
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["model"], json!("mistral"));
    assert_eq!(body["stream"], json!(false));
    let temperature = body["options"]["temperature"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "You are MotorMate."},
            {"role": "user", "content": "I need a truck"},
            {"role": "assistant", "content": "For towing or commuting?"},
            {"role": "user", "content": "Towing a boat"}
        ])
    );
}

#[tokio::test]
async fn test_invoke_surfaces_runtime_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "model \"mistral\" not found, try pulling it first"
        })))
        .mount(&server)
        .await;

    let err = model_for(&server)
        .invoke(&sample_conversation())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Inference(_)));
    assert!(err.detail().contains("404"));
    assert!(err.detail().contains("try pulling it first"));
}

#[tokio::test]
async fn test_invoke_rejects_unexpected_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
        .mount(&server)
        .await;

    let err = model_for(&server)
        .invoke(&sample_conversation())
        .await
        .unwrap_err();

    assert!(err.is_inference());
}

#[tokio::test]
async fn test_invoke_fails_when_runtime_is_down() {
    let model = OllamaChatModel::new(OllamaConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..OllamaConfig::default()
    })
    .unwrap();

    let err = model.invoke(&sample_conversation()).await.unwrap_err();
    assert!(err.is_inference());
}

#[tokio::test]
async fn test_health_check_finds_tagged_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "llama3:latest"},
                {"name": "mistral:latest"}
            ]
        })))
        .mount(&server)
        .await;

    model_for(&server)
        .health_check()
        .await
        .expect("Health check should pass");
}

#[tokio::test]
async fn test_health_check_reports_missing_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"models": [{"name": "llama3:8b"}]})),
        )
        .mount(&server)
        .await;

    let err = model_for(&server).health_check().await.unwrap_err();

    assert!(matches!(err, DomainError::ModelUnavailable(_)));
    assert!(err.detail().contains("ollama pull mistral"));
}

#[tokio::test]
async fn test_health_check_fails_when_runtime_is_down() {
    let model = OllamaChatModel::new(OllamaConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..OllamaConfig::default()
    })
    .unwrap();

    let err = model.health_check().await.unwrap_err();
    assert!(matches!(err, DomainError::ModelUnavailable(_)));
}
