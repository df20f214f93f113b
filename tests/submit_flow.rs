//! End-to-end submissions against a local mock server.
//!
//! Drives the app state the way the actors do: prepare a command, run it
//! through the reqwest adapter, feed the result back.

use std::time::{Duration, Instant};

use serde_json::json;
use tempfile::TempDir;
use typeshot::{
    AppState, FormStore, HistoryStore, HttpAdapter, HttpMethod, KvStore, NetworkCommand,
    NetworkResponse, ReqwestAdapter, RequestPatch,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn open_app(dir: &TempDir) -> AppState {
    let kv = KvStore::new(dir.path());
    AppState::with_stores(FormStore::load(kv.clone()), HistoryStore::load(kv))
}

async fn submit(state: &mut AppState) -> bool {
    let Some(NetworkCommand::Execute { id, request }) = state.prepare_request() else {
        return false;
    };
    let adapter = ReqwestAdapter::new(Duration::from_secs(5));
    let start = Instant::now();
    let response = match adapter.request(request).await {
        Ok(resp) => NetworkResponse::Success {
            id,
            status: resp.status,
            data: resp.data,
            time_ms: start.elapsed().as_millis() as u64,
        },
        Err(error) => NetworkResponse::Failure {
            id,
            error,
            time_ms: start.elapsed().as_millis() as u64,
        },
    };
    state.handle_response(response);
    true
}

#[tokio::test]
async fn get_user_produces_declaration_and_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Ann"})))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut state = open_app(&dir);
    let url = format!("{}/user", server.uri());
    state.update_form(RequestPatch {
        url: Some(url.clone()),
        authorization: Some("Bearer secret".into()),
        body: Some("ignored for GET".into()),
        method: Some(HttpMethod::GET),
        ..Default::default()
    });

    assert!(submit(&mut state).await);

    assert_eq!(
        state.request().response,
        "interface RootObject {\n  id: number;\n  name: string;\n}"
    );
    assert_eq!(state.history.len(), 1);
    let record = state.history.get(0).unwrap();
    assert_eq!(record.method, "get");
    assert_eq!(record.url, url);

    // Everything is back after a restart
    let reloaded = open_app(&dir);
    assert_eq!(reloaded.request(), state.request());
    assert_eq!(reloaded.history.get(0), state.history.get(0));
}

#[tokio::test]
async fn post_body_is_sent_and_declarations_accumulate() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "o-1",
            "lines": [{"sku": "a", "qty": 2}, {"sku": "b"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut state = open_app(&dir);
    state.update_form(RequestPatch {
        url: Some(format!("{}/orders", server.uri())),
        body: Some(r#"{"items": ["a", "b"]}"#.into()),
        method: Some(HttpMethod::POST),
        ..Default::default()
    });
    assert!(submit(&mut state).await);

    let first = state.request().response.clone();
    assert!(first.contains("lines: Line[];"));
    assert!(first.contains("interface Line {\n  sku: string;\n  qty?: number;\n}"));

    state.update_form(RequestPatch {
        url: Some(format!("{}/status", server.uri())),
        method: Some(HttpMethod::GET),
        ..Default::default()
    });
    assert!(submit(&mut state).await);

    let output = state.request().response.clone();
    assert_eq!(output, format!("{}\ninterface RootObject {{\n  ok: boolean;\n}}", first));
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.history.get(1).unwrap().response, output);

    let received = server.received_requests().await.unwrap();
    let post = received.iter().find(|r| r.url.path() == "/orders").unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(sent, json!({"items": ["a", "b"]}));
}

#[tokio::test]
async fn server_error_shows_body_and_skips_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"error": "bad input"})))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut state = open_app(&dir);
    state.update_form(RequestPatch {
        url: Some(server.uri()),
        ..Default::default()
    });

    assert!(submit(&mut state).await);
    assert_eq!(state.request().response, r#"{"error":"bad input"}"#);
    assert!(state.history.is_empty());
    assert!(!state.is_loading);
}

#[tokio::test]
async fn malformed_header_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut state = open_app(&dir);
    state.update_form(RequestPatch {
        url: Some(server.uri()),
        header: Some(r#"{"a":}"#.into()),
        ..Default::default()
    });

    assert!(!submit(&mut state).await);
    assert!(state.history.is_empty());
    assert!(state.notice.is_some());
}
