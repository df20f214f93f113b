//! HTTP client adapter - executes one request and hands back the JSON payload

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::error::AdapterError;
use crate::messages::network::OutgoingRequest;
use crate::models::HttpMethod;

/// Successful adapter result
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterResponse {
    pub status: u16,
    /// Parsed JSON body; a body that is not JSON arrives as a JSON string
    pub data: Value,
}

/// The boundary the network actor drives for each submission
pub trait HttpAdapter: Send + Sync + 'static {
    fn request(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<AdapterResponse, AdapterError>> + Send;
}

/// [`HttpAdapter`] backed by a shared reqwest client
#[derive(Clone)]
pub struct ReqwestAdapter {
    client: reqwest::Client,
}

impl ReqwestAdapter {
    pub fn new(timeout: Duration) -> Self {
        ReqwestAdapter {
            client: create_client(timeout),
        }
    }
}

impl HttpAdapter for ReqwestAdapter {
    fn request(
        &self,
        request: OutgoingRequest,
    ) -> impl Future<Output = Result<AdapterResponse, AdapterError>> + Send {
        let client = self.client.clone();
        async move { execute_request(&client, request).await }
    }
}

/// Build a request from the given parameters
fn build_request(client: &reqwest::Client, request: &OutgoingRequest) -> reqwest::RequestBuilder {
    let url = request.url.as_str();
    let mut req_builder = match request.method {
        HttpMethod::GET => client.get(url),
        HttpMethod::POST => client.post(url),
        HttpMethod::PUT => client.put(url),
        HttpMethod::PATCH => client.patch(url),
        HttpMethod::DELETE => client.delete(url),
    };

    for (key, value) in &request.headers {
        req_builder = req_builder.header(key, value);
    }

    // `.json` sets Content-Type unless the form already provided one
    if let Some(data) = &request.data {
        if request.header("content-type").is_some() {
            req_builder = req_builder.body(data.to_string());
        } else {
            req_builder = req_builder.json(data);
        }
    }

    req_builder
}

/// Execute an HTTP request and parse the response body
pub async fn execute_request(
    client: &reqwest::Client,
    request: OutgoingRequest,
) -> Result<AdapterResponse, AdapterError> {
    let resp = build_request(client, &request)
        .send()
        .await
        .map_err(|e| AdapterError::Transport(describe_send_error(&e)))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| AdapterError::Transport(format!("Error reading body: {}", e)))?;

    if !status.is_success() {
        return Err(AdapterError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let data = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
    Ok(AdapterResponse {
        status: status.as_u16(),
        data,
    })
}

fn describe_send_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else if e.is_builder() {
        format!("Invalid request: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// Create an HTTP client with the configured timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter() -> ReqwestAdapter {
        ReqwestAdapter::new(Duration::from_secs(5))
    }

    fn outgoing(method: HttpMethod, url: String) -> OutgoingRequest {
        OutgoingRequest {
            method,
            url,
            headers: Vec::new(),
            data: None,
        }
    }

    #[tokio::test]
    async fn test_get_returns_parsed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Ann"})))
            .mount(&server)
            .await;

        let resp = adapter()
            .request(outgoing(HttpMethod::GET, format!("{}/user", server.uri())))
            .await
            .unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.data, json!({"id": 1, "name": "Ann"}));
    }

    #[tokio::test]
    async fn test_headers_and_json_body_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(header("authorization", "Bearer t0k"))
            .and(header("x-trace", "42"))
            .and(body_json(json!({"name": "widget"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let mut req = outgoing(HttpMethod::POST, format!("{}/items", server.uri()));
        req.headers = vec![
            ("Authorization".into(), "Bearer t0k".into()),
            ("X-Trace".into(), "42".into()),
        ];
        req.data = Some(json!({"name": "widget"}));

        let resp = adapter().request(req).await.unwrap();
        assert_eq!(resp.status, 201);
        assert_eq!(resp.data, json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_non_json_body_passes_through_as_string() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
            .mount(&server)
            .await;

        let resp = adapter()
            .request(outgoing(HttpMethod::GET, server.uri()))
            .await
            .unwrap();
        assert_eq!(resp.data, Value::String("plain text".into()));
    }

    #[tokio::test]
    async fn test_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
            .mount(&server)
            .await;

        let err = adapter()
            .request(outgoing(HttpMethod::DELETE, server.uri()))
            .await
            .unwrap_err();
        match &err {
            AdapterError::Status { status, .. } => assert_eq!(*status, 403),
            other => panic!("expected status error, got {other:?}"),
        }
        assert_eq!(err.failure_text(), r#"{"error":"forbidden"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let err = adapter()
            .request(outgoing(HttpMethod::GET, "not a url".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::Transport(_)));
    }
}
