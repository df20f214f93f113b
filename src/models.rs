use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
        }
    }

    /// Lowercase name, as stored in history records
    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::GET => "get",
            HttpMethod::POST => "post",
            HttpMethod::PUT => "put",
            HttpMethod::PATCH => "patch",
            HttpMethod::DELETE => "delete",
        }
    }

    /// Case-insensitive parse of a method name
    pub fn parse(name: &str) -> Option<HttpMethod> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "PATCH" => Some(HttpMethod::PATCH),
            "DELETE" => Some(HttpMethod::DELETE),
            _ => None,
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::GET,
        }
    }

    /// The body editor is read-only for GET
    pub fn body_editable(&self) -> bool {
        !matches!(self, HttpMethod::GET)
    }
}

/// The request form, persisted as a whole on every change
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestState {
    pub url: String,
    /// Sent verbatim as the `Authorization` header
    pub authorization: String,
    /// Raw JSON body text
    pub body: String,
    /// Raw JSON object literal of extra headers
    pub header: String,
    pub method: HttpMethod,
    /// Accumulated declarations, or the text of the last failure
    pub response: String,
    /// `response` holds failure text rather than declarations
    pub response_is_error: bool,
}

impl RequestState {
    pub fn apply(&mut self, patch: RequestPatch) {
        let RequestPatch {
            url,
            authorization,
            body,
            header,
            method,
            response,
            response_is_error,
        } = patch;

        if let Some(url) = url {
            self.url = url;
        }
        if let Some(authorization) = authorization {
            self.authorization = authorization;
        }
        if let Some(body) = body {
            self.body = body;
        }
        if let Some(header) = header {
            self.header = header;
        }
        if let Some(method) = method {
            self.method = method;
        }
        if let Some(response) = response {
            self.response = response;
        }
        if let Some(response_is_error) = response_is_error {
            self.response_is_error = response_is_error;
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Url => &self.url,
            FormField::Authorization => &self.authorization,
            FormField::Header => &self.header,
            FormField::Body => &self.body,
        }
    }
}

/// Partial update of a [`RequestState`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestPatch {
    pub url: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<String>,
    pub header: Option<String>,
    pub method: Option<HttpMethod>,
    pub response: Option<String>,
    pub response_is_error: Option<bool>,
}

impl RequestPatch {
    /// Replace the output with declaration text
    pub fn response(text: impl Into<String>) -> Self {
        RequestPatch {
            response: Some(text.into()),
            response_is_error: Some(false),
            ..Default::default()
        }
    }

    /// Replace the output with the text of a failed submission
    pub fn failure(text: impl Into<String>) -> Self {
        RequestPatch {
            response: Some(text.into()),
            response_is_error: Some(true),
            ..Default::default()
        }
    }

    pub fn method(method: HttpMethod) -> Self {
        RequestPatch {
            method: Some(method),
            ..Default::default()
        }
    }

    /// Patch setting a single editable text field
    pub fn field(field: FormField, value: String) -> Self {
        let mut patch = RequestPatch::default();
        match field {
            FormField::Url => patch.url = Some(value),
            FormField::Authorization => patch.authorization = Some(value),
            FormField::Header => patch.header = Some(value),
            FormField::Body => patch.body = Some(value),
        }
        patch
    }
}

/// Editable text fields of the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Url,
    Authorization,
    Header,
    Body,
}

impl FormField {
    /// Whether Enter inserts a line break rather than finishing the edit
    pub fn is_multiline(&self) -> bool {
        matches!(self, FormField::Header | FormField::Body)
    }
}

/// One completed request and the declarations it produced
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub method: String,
    pub url: String,
    pub response: String,
    #[serde(default = "Utc::now")]
    pub recorded_at: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(method: HttpMethod, url: impl Into<String>, response: impl Into<String>) -> Self {
        HistoryRecord {
            method: method.as_lower().to_string(),
            url: url.into(),
            response: response.into(),
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_get_locks_the_body() {
        assert!(!HttpMethod::GET.body_editable());
        for method in [HttpMethod::POST, HttpMethod::PUT, HttpMethod::PATCH, HttpMethod::DELETE] {
            assert!(method.body_editable(), "{} should allow a body", method.as_str());
        }
    }

    #[test]
    fn test_method_cycle_returns_to_get() {
        let mut method = HttpMethod::GET;
        for _ in 0..5 {
            method = method.next();
        }
        assert_eq!(method, HttpMethod::GET);
    }

    #[test]
    fn test_method_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&HttpMethod::PATCH).unwrap(), "\"patch\"");
        assert_eq!(HttpMethod::parse("Delete"), Some(HttpMethod::DELETE));
        assert_eq!(HttpMethod::parse("HEAD"), None);
    }

    #[test]
    fn test_response_patches_track_failure_text() {
        let mut state = RequestState::default();
        state.apply(RequestPatch::failure("HTTP 500"));
        assert!(state.response_is_error);

        state.apply(RequestPatch::response("interface RootObject {}"));
        assert!(!state.response_is_error);
        assert_eq!(state.response, "interface RootObject {}");
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut state = RequestState {
            url: "https://a.test".into(),
            header: "{}".into(),
            ..Default::default()
        };
        state.apply(RequestPatch {
            url: Some("https://b.test".into()),
            method: Some(HttpMethod::POST),
            ..Default::default()
        });
        assert_eq!(state.url, "https://b.test");
        assert_eq!(state.header, "{}");
        assert_eq!(state.method, HttpMethod::POST);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let state: RequestState = serde_json::from_str(r#"{"url":"https://a.test"}"#).unwrap();
        assert_eq!(state.url, "https://a.test");
        assert_eq!(state.method, HttpMethod::GET);
        assert!(state.response.is_empty());
    }

    #[test]
    fn test_history_record_without_timestamp_loads() {
        let record: HistoryRecord =
            serde_json::from_str(r#"{"method":"get","url":"https://a.test","response":""}"#).unwrap();
        assert_eq!(record.method, "get");
    }
}
