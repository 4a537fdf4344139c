//! Chat-completion backend against a mock HTTP server

use mockito::Matcher;
use nl2sparql::infrastructure::network::http::create_client;
use nl2sparql::infrastructure::network::OpenRouterBackend;
use nl2sparql::{
    translate, ChatMessage, CompletionBackend, SchemaDescription, TranslateError,
    TranslateOptions,
};
use serde_json::json;
use std::time::Duration;

fn backend_for(server: &mockito::Server) -> OpenRouterBackend {
    OpenRouterBackend::new(
        create_client(None).unwrap(),
        format!("{}/api/v1/chat/completions", server.url()),
        "test-key".to_string(),
    )
    .unwrap()
}

fn completion(content: &str) -> String {
    json!({
        "id": "gen-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_request_shape_and_content_path() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "openai/gpt-4o-mini",
            "temperature": 0.0,
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("  SELECT ?s WHERE { ?s ?p ?o }\n"))
        .expect(1)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let messages = vec![ChatMessage::system("be terse"), ChatMessage::user("hello")];
    let text = backend
        .complete(&messages, &TranslateOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "SELECT ?s WHERE { ?s ?p ?o }");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fenced_reply_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_body(completion("```sparql\nSELECT * WHERE {?s ?p ?o}\n```"))
        .create_async()
        .await;

    let backend = backend_for(&server);
    let query = translate(
        &backend,
        "List stations selling E85 fuel and their commune",
        &SchemaDescription::builtin(),
        &TranslateOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(query, "SELECT * WHERE {?s ?p ?o}");
}

#[tokio::test]
async fn test_non_success_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"No auth credentials found","code":401}}"#)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let err = backend
        .complete(&[ChatMessage::user("q")], &TranslateOptions::default())
        .await
        .unwrap_err();

    match err {
        TranslateError::BackendError { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("No auth credentials"));
        }
        other => panic!("expected BackendError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_choices_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let backend = backend_for(&server);
    let err = backend
        .complete(&[ChatMessage::user("q")], &TranslateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::MalformedResponse { .. }));
    assert_eq!(err.raw_text(), Some(r#"{"choices":[]}"#));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/chat/completions")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let backend = backend_for(&server);
    let err = backend
        .complete(&[ChatMessage::user("q")], &TranslateOptions::default())
        .await
        .unwrap_err();
    assert_eq!(err.raw_text(), Some("<html>gateway</html>"));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_unavailable() {
    // Nothing listens on port 9 of localhost in the test environment.
    let backend = OpenRouterBackend::new(
        create_client(None).unwrap(),
        "http://127.0.0.1:9/api/v1/chat/completions".to_string(),
        "test-key".to_string(),
    )
    .unwrap();
    let options = TranslateOptions {
        timeout: Duration::from_secs(5),
        ..TranslateOptions::default()
    };

    let err = backend
        .complete(&[ChatMessage::user("q")], &options)
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::BackendUnavailable(_)));
}

#[tokio::test]
async fn test_invalid_endpoint_is_configuration_error() {
    let backend = OpenRouterBackend::new(
        create_client(None).unwrap(),
        "openrouter.ai/api/v1/chat/completions".to_string(),
        "test-key".to_string(),
    )
    .unwrap();

    let err = backend
        .complete(&[ChatMessage::user("q")], &TranslateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Configuration(_)));
}

#[test]
fn test_empty_key_rejected() {
    let result = OpenRouterBackend::new(
        create_client(None).unwrap(),
        "http://127.0.0.1/".to_string(),
        "  ".to_string(),
    );
    assert!(matches!(result, Err(TranslateError::Configuration(_))));
}
