//! Turning the form into a request, and folding the result back into text

use serde_json::{Map, Value};

use crate::error::SubmitError;
use crate::messages::network::OutgoingRequest;
use crate::models::RequestState;

/// Parse the form's header and body and assemble the request.
///
/// The authorization field goes first as `Authorization`; an explicit header
/// of the same name (any case) replaces it. The body is ignored for GET.
pub fn build_outgoing(state: &RequestState) -> Result<OutgoingRequest, SubmitError> {
    let url = state.url.trim();
    if url.is_empty() {
        return Err(SubmitError::EmptyUrl);
    }

    let mut headers: Vec<(String, String)> = Vec::new();
    if !state.authorization.is_empty() {
        headers.push(("Authorization".to_string(), state.authorization.clone()));
    }

    for (name, value) in parse_header_object(&state.header)? {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s,
            other => other.to_string(),
        };
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }

    let data = if state.method.body_editable() && !state.body.trim().is_empty() {
        Some(serde_json::from_str::<Value>(&state.body).map_err(SubmitError::BodyJson)?)
    } else {
        None
    };

    Ok(OutgoingRequest {
        method: state.method,
        url: url.to_string(),
        headers,
        data,
    })
}

fn parse_header_object(text: &str) -> Result<Map<String, Value>, SubmitError> {
    if text.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(text).map_err(SubmitError::HeaderJson)? {
        Value::Object(map) => Ok(map),
        _ => Err(SubmitError::HeaderNotObject),
    }
}

/// Append newly inferred declarations to what the output already held
pub fn accumulate(prior: &str, declarations: &[String]) -> String {
    let block = declarations.join("\n");
    if prior.is_empty() {
        block
    } else if block.is_empty() {
        prior.to_string()
    } else {
        format!("{}\n{}", prior, block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use serde_json::json;

    fn form(method: HttpMethod) -> RequestState {
        RequestState {
            url: "https://api.example.com/user".into(),
            method,
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_url_is_rejected() {
        let mut state = form(HttpMethod::GET);
        state.url = "  ".into();
        assert!(matches!(build_outgoing(&state), Err(SubmitError::EmptyUrl)));
    }

    #[test]
    fn test_empty_form_builds_bare_request() {
        let req = build_outgoing(&form(HttpMethod::GET)).unwrap();
        assert_eq!(req.url, "https://api.example.com/user");
        assert!(req.headers.is_empty());
        assert!(req.data.is_none());
    }

    #[test]
    fn test_explicit_header_overrides_authorization() {
        let mut state = form(HttpMethod::GET);
        state.authorization = "Bearer from-field".into();
        state.header = r#"{"authorization": "Bearer from-header", "X-Count": 3, "X-Skip": null}"#.into();

        let req = build_outgoing(&state).unwrap();
        assert_eq!(
            req.headers,
            vec![
                ("authorization".to_string(), "Bearer from-header".to_string()),
                ("X-Count".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_authorization_alone_is_injected() {
        let mut state = form(HttpMethod::GET);
        state.authorization = "Basic dXNlcjpwYXNz".into();
        let req = build_outgoing(&state).unwrap();
        assert_eq!(req.header("AUTHORIZATION"), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_malformed_header_is_rejected() {
        let mut state = form(HttpMethod::GET);
        state.header = r#"{"a":}"#.into();
        assert!(matches!(build_outgoing(&state), Err(SubmitError::HeaderJson(_))));

        state.header = "[1, 2]".into();
        assert!(matches!(build_outgoing(&state), Err(SubmitError::HeaderNotObject)));
    }

    #[test]
    fn test_body_parsed_for_post_and_ignored_for_get() {
        let mut state = form(HttpMethod::POST);
        state.body = r#"{"name": "widget"}"#.into();
        let req = build_outgoing(&state).unwrap();
        assert_eq!(req.data, Some(json!({"name": "widget"})));

        state.method = HttpMethod::GET;
        let req = build_outgoing(&state).unwrap();
        assert!(req.data.is_none());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let mut state = form(HttpMethod::PATCH);
        state.body = "{oops".into();
        let err = build_outgoing(&state).unwrap_err();
        assert!(matches!(err, SubmitError::BodyJson(_)));
        assert!(err.to_string().starts_with("Body is not valid JSON"));
    }

    #[test]
    fn test_accumulate_separates_with_line_break() {
        let first = accumulate("", &["interface A {\n}".to_string()]);
        assert_eq!(first, "interface A {\n}");
        let second = accumulate(&first, &["interface B {\n}".to_string(), "interface C {\n}".to_string()]);
        assert_eq!(second, "interface A {\n}\ninterface B {\n}\ninterface C {\n}");
    }
}
