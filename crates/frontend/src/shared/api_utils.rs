//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and reading API errors.

/// Port of the marketplace API when no explicit base is configured
pub const DEFAULT_API_PORT: u16 = 3000;

/// Get the base URL for API requests
///
/// If the crate was built with `MARKETPLACE_API_BASE` set, that value wins.
/// Otherwise the URL is constructed from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(base) = option_env!("MARKETPLACE_API_BASE") {
        return base.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Encode an identifier for use as a path segment
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Read a query string parameter of the current page (`?post=...`)
pub fn query_param(name: &str) -> Option<String> {
    let href = web_sys::window()?.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params()
        .get(name)
        .filter(|value| !value.trim().is_empty())
}

/// Pull a human readable message out of an API error body.
///
/// The API answers with `{"message": "..."}` or `{"error": "..."}`;
/// anything else is returned as trimmed text.
pub fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|m| m.as_str()))
            .map(str::to_string);
        if message.is_some() {
            return message;
        }
    }
    Some(body.to_string())
}

/// Turn a non-success response into the error string shown to the user
pub async fn response_error(response: gloo_net::http::Response, action: &str) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match extract_error_message(&body) {
        Some(message) => format!("{}: HTTP {} {}", action, status, message),
        None => format!("{}: HTTP {}", action, status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message_from_json() {
        assert_eq!(
            extract_error_message(r#"{"message":"Payout already pending"}"#).as_deref(),
            Some("Payout already pending")
        );
        assert_eq!(
            extract_error_message(r#"{"error":"Forbidden"}"#).as_deref(),
            Some("Forbidden")
        );
    }

    #[test]
    fn test_extract_error_message_plain_and_empty() {
        assert_eq!(
            extract_error_message(" Bad Gateway \n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(extract_error_message("   "), None);
        assert_eq!(
            extract_error_message(r#"{"code":42}"#).as_deref(),
            Some(r#"{"code":42}"#)
        );
    }

    #[test]
    fn test_path_segment_encodes_reserved_chars() {
        assert_eq!(path_segment("65f0c0ffee"), "65f0c0ffee");
        assert_eq!(path_segment("a/b c"), "a%2Fb%20c");
    }
}
