//! Failure taxonomy for a submission.
//!
//! Input errors are caught before anything goes on the wire; adapter errors
//! come back from the HTTP client. Both end up as text in the output panel.

use serde_json::Value;
use thiserror::Error;

/// The form could not be turned into a request
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("URL is required")]
    EmptyUrl,

    #[error("Header is not valid JSON: {0}")]
    HeaderJson(#[source] serde_json::Error),

    #[error("Header must be a JSON object")]
    HeaderNotObject,

    #[error("Body is not valid JSON: {0}")]
    BodyJson(#[source] serde_json::Error),
}

/// The HTTP client adapter failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    /// The server answered with a non-success status
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// No response at all (DNS, connect, timeout, bad URL...)
    #[error("{0}")]
    Transport(String),
}

impl AdapterError {
    /// Text shown in the output panel for this failure.
    ///
    /// Status failures show the response body as compact JSON, or as a JSON
    /// string literal when the body is not JSON.
    pub fn failure_text(&self) -> String {
        match self {
            AdapterError::Status { body, .. } => match serde_json::from_str::<Value>(body) {
                Ok(json) => json.to_string(),
                Err(_) => Value::String(body.clone()).to_string(),
            },
            AdapterError::Transport(message) => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_failure_shows_compact_json_body() {
        let err = AdapterError::Status {
            status: 404,
            body: "{\n  \"error\": \"not found\"\n}".into(),
        };
        assert_eq!(err.failure_text(), r#"{"error":"not found"}"#);
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_status_failure_quotes_plain_text_body() {
        let err = AdapterError::Status {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_eq!(err.failure_text(), "\"Bad Gateway\"");
    }

    #[test]
    fn test_transport_failure_shows_message() {
        let err = AdapterError::Transport("Connection failed: refused".into());
        assert_eq!(err.failure_text(), "Connection failed: refused");
    }
}
