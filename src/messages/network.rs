//! Network messages - communication between App and Network layers

use serde_json::Value;

use crate::error::AdapterError;
use crate::models::HttpMethod;

/// A fully parsed request, ready for the HTTP client adapter
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Header name/value pairs in send order
    pub headers: Vec<(String, String)>,
    pub data: Option<Value>,
}

impl OutgoingRequest {
    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute an HTTP request
    Execute { id: u64, request: OutgoingRequest },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The adapter returned a payload
    Success {
        id: u64,
        status: u16,
        data: Value,
        time_ms: u64,
    },
    /// The adapter failed
    Failure {
        id: u64,
        error: AdapterError,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Failure { id, .. } => *id,
        }
    }
}
