//! Common test utilities for cardlink-engine workflow tests.

use cardlink_engine::{Engine, EngineOptions};
use serde::Serialize;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate, Times};

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Create an Engine connected to the mock server.
pub fn engine_for_mock(server: &MockServer) -> Engine {
    let client = cardlink_engine::ClientBuilder::new().url(server.uri()).build();
    Engine::from_client(client)
}

/// Create an Engine with custom options connected to the mock server.
#[allow(dead_code)]
pub fn engine_with_options(server: &MockServer, options: EngineOptions) -> Engine {
    engine_for_mock(server).with_options(options)
}

/// Create a successful AnkiConnect response.
pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": result,
        "error": null
    }))
}

/// Create an error AnkiConnect response.
#[allow(dead_code)]
pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "result": null,
        "error": error
    }))
}

/// Mount a mock for a specific action (expect exactly 1 call).
#[allow(dead_code)]
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    mock_action_times(server, action, response, 1).await;
}

/// Mount a mock for a specific action with expected call count.
#[allow(dead_code)]
pub async fn mock_action_times(
    server: &MockServer,
    action: &str,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": action,
            "version": 6
        })))
        .respond_with(response)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// Mount a mock for an action whose params must contain `params`.
///
/// Mounted with a higher priority than the plain action mocks, so it can
/// override one of them for a specific request.
#[allow(dead_code)]
pub async fn mock_action_with_params(
    server: &MockServer,
    action: &str,
    params: serde_json::Value,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "action": action,
            "version": 6,
            "params": params
        })))
        .respond_with(response)
        .with_priority(1)
        .expect(Times::from(times))
        .mount(server)
        .await;
}

/// A `cardsInfo` entry for a Basic card.
#[allow(dead_code)]
pub fn card_info(id: i64, front: &str, back: &str, deck: &str, queue: i32) -> serde_json::Value {
    serde_json::json!({
        "cardId": id,
        "note": id + 1000,
        "deckName": deck,
        "modelName": "Basic",
        "question": format!("<div>{}</div>", front),
        "answer": format!("<div>{}</div>", back),
        "fields": {
            "Front": {"value": front, "order": 0},
            "Back": {"value": back, "order": 1}
        },
        "queue": queue
    })
}

/// Write a file with `contents` into `dir` and return its path as a string.
#[allow(dead_code)]
pub fn write_media(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write media fixture");
    path.to_string_lossy().into_owned()
}
