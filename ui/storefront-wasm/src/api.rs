//! HTTP API client.
//!
//! Wraps `fetch` for same-origin JSON requests to the storefront backend.
//! State-changing requests carry the CSRF token from the `csrftoken` cookie
//! in the `X-CSRFToken` header.

use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use crate::dom;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON response: {0}")]
    Parse(String),
}

impl ApiError {
    /// The backend rejected the request for lack of a session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 403, .. })
    }
}

/// Perform a fetch request against a same-origin path, returning the parsed
/// JSON body as `serde_json::Value`.
pub async fn request(
    path: &str,
    method: &str,
    body: Option<String>,
    csrf: Option<&str>,
) -> Result<serde_json::Value, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);

    let headers = Headers::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    headers
        .set("X-Requested-With", "XMLHttpRequest")
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    if let Some(token) = csrf {
        headers
            .set("X-CSRFToken", token)
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    }
    if let Some(ref b) = body {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
        opts.set_body(&JsValue::from_str(b));
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(path, &opts)
        .map_err(|e| ApiError::Network(format!("{:?}", e)))?;

    let window = dom::window();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| ApiError::Network(format!("fetch error: {:?}", e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Network("response is not a Response".to_string()))?;

    let text = JsFuture::from(
        resp.text()
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?,
    )
    .await
    .map_err(|e| ApiError::Network(format!("text error: {:?}", e)))?;

    let text_str = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(ApiError::Status {
            status: resp.status(),
            body: text_str,
        });
    }

    serde_json::from_str(&text_str)
        .map_err(|e| ApiError::Parse(format!("{} — raw: {}", e, text_str)))
}

/// Read the CSRF token from the `csrftoken` cookie, if present.
pub fn csrf_token() -> Option<String> {
    let doc = dom::document().dyn_into::<web_sys::HtmlDocument>().ok()?;
    let cookies = doc.cookie().ok()?;
    let raw = cookie_value(&cookies, "csrftoken")?;
    match js_sys::decode_uri_component(&raw) {
        Ok(decoded) => Some(String::from(decoded)),
        Err(_) => Some(raw),
    }
}

/// Extract a cookie value from a `document.cookie` string.
fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    for pair in cookies.split(';') {
        let pair = pair.trim();
        if let Some(rest) = pair.strip_prefix(name) {
            if let Some(value) = rest.strip_prefix('=') {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_token_among_many() {
        let cookies = "sessionid=abc123; csrftoken=tok-42; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("tok-42"));
    }

    #[test]
    fn cookie_value_handles_leading_whitespace_and_first_position() {
        assert_eq!(
            cookie_value("csrftoken=first", "csrftoken").as_deref(),
            Some("first")
        );
        assert_eq!(
            cookie_value("a=1;   csrftoken=padded", "csrftoken").as_deref(),
            Some("padded")
        );
    }

    #[test]
    fn cookie_value_absent() {
        assert_eq!(cookie_value("sessionid=abc", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn cookie_value_does_not_match_prefix_names() {
        // "csrftoken_old" must not satisfy a lookup for "csrftoken"
        assert_eq!(cookie_value("csrftoken_old=stale", "csrftoken"), None);
    }

    #[test]
    fn unauthorized_statuses() {
        assert!(ApiError::Status { status: 401, body: String::new() }.is_unauthorized());
        assert!(ApiError::Status { status: 403, body: String::new() }.is_unauthorized());
        assert!(!ApiError::Status { status: 500, body: String::new() }.is_unauthorized());
        assert!(!ApiError::Network("down".into()).is_unauthorized());
    }
}
