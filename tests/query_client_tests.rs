use std::time::Duration;

use querychat::query::{HttpQueryClient, QueryClient, QueryError};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Starts a mock server that answers POST /query/ with the given template
async fn serve(template: ResponseTemplate) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query/"))
        .respond_with(template)
        .mount(&mock_server)
        .await;
    mock_server
}

fn client_for(server: &MockServer) -> HttpQueryClient {
    HttpQueryClient::new(format!("{}/query/", server.uri()), None).unwrap()
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_posts_query_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query/"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": "hi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hello" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = client_for(&mock_server).query("hi").await.unwrap();
    assert_eq!(reply.display_text(), "hello");
}

#[tokio::test]
async fn test_query_text_is_sent_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query/"))
        .and(body_json(json!({ "query": "  spaced\nout  " })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = client_for(&mock_server).query("  spaced\nout  ").await.unwrap();
    assert_eq!(reply.display_text(), "ok");
}

// ============================================================================
// Reply Body Handling
// ============================================================================

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let server = serve(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "answer", "sources": ["a.pdf"], "took_ms": 12 })),
    )
    .await;

    let reply = client_for(&server).query("q").await.unwrap();
    assert_eq!(reply.display_text(), "answer");
}

#[tokio::test]
async fn test_missing_response_field_is_empty_reply() {
    let server = serve(ResponseTemplate::new(200).set_body_json(json!({ "answer": "elsewhere" }))).await;

    let reply = client_for(&server).query("q").await.unwrap();
    assert_eq!(reply.response, None);
    assert_eq!(reply.display_text(), "");
}

#[tokio::test]
async fn test_null_response_field_is_empty_reply() {
    let server = serve(ResponseTemplate::new(200).set_body_json(json!({ "response": null }))).await;

    let reply = client_for(&server).query("q").await.unwrap();
    assert_eq!(reply.display_text(), "");
}

#[tokio::test]
async fn test_non_string_response_is_shown_as_json() {
    let server = serve(ResponseTemplate::new(200).set_body_json(json!({ "response": 42 }))).await;

    let reply = client_for(&server).query("q").await.unwrap();
    assert_eq!(reply.display_text(), "42");
}

#[tokio::test]
async fn test_non_json_success_body_is_empty_reply() {
    let server = serve(ResponseTemplate::new(200).set_body_string("<html>ok</html>")).await;

    let reply = client_for(&server).query("q").await.unwrap();
    assert_eq!(reply.display_text(), "");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_server_error_status() {
    let server = serve(ResponseTemplate::new(500).set_body_string("Internal Server Error")).await;

    let result = client_for(&server).query("q").await;
    assert_eq!(
        result,
        Err(QueryError::Status {
            status: 500,
            body: "Internal Server Error".to_string()
        })
    );
}

#[tokio::test]
async fn test_error_status_with_response_field_still_fails() {
    let server = serve(ResponseTemplate::new(404).set_body_json(json!({ "response": "not here" }))).await;

    let result = client_for(&server).query("q").await;
    assert!(matches!(result, Err(QueryError::Status { status: 404, .. })));
}

#[tokio::test]
async fn test_timeout() {
    let server = serve(
        ResponseTemplate::new(200)
            .set_body_json(json!({ "response": "too late" }))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let client = HttpQueryClient::new(
        format!("{}/query/", server.uri()),
        Some(Duration::from_millis(100)),
    )
    .unwrap();

    let result = client.query("q").await;
    assert_eq!(result, Err(QueryError::Timeout));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Port 1 is reserved and never listening
    let client = HttpQueryClient::new("http://127.0.0.1:1/query/", None).unwrap();

    let result = client.query("q").await;
    assert!(matches!(result, Err(QueryError::Network(_))), "got {result:?}");
}
