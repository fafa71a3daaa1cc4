//! Response envelope: transport metadata plus the parsed JSON body.
//!
//! Eloqua reports failures through status codes, so a [`Response`] is returned
//! for every completed exchange, including 4xx and 5xx ones. Check
//! [`Response::status`] or [`Response::is_error`] before trusting `data`.

use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Transport-level facts about one completed request.
#[derive(Debug, Clone)]
pub struct ResponseInfo {
    /// The HTTP method that was sent.
    pub method: Method,

    /// The effective URL, after any redirects the transport followed.
    pub url: Url,

    /// The HTTP status code reported by the server.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from sending the request until the full body was read.
    pub latency: Duration,
}

impl ResponseInfo {
    /// Returns `true` for status codes of 400 and above.
    pub fn is_error(&self) -> bool {
        self.status.as_u16() >= 400
    }
}

/// The result of a request that reached the server.
///
/// # Examples
///
/// ```no_run
/// use eloqua_rest::Client;
///
/// # async fn example() -> Result<(), eloqua_rest::Error> {
/// let client = Client::builder()
///     .account("AcmeCorp")
///     .username("api.user")
///     .password("secret")
///     .build()?;
///
/// let response = client.get("/assets/emails?count=10").await?;
/// if response.is_error() {
///     eprintln!("{} from {}: {}", response.status(), response.info.url, response.raw_body);
/// } else if let Some(body) = &response.data {
///     println!("Total: {}", body["total"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The parsed JSON body, or `None` if it was empty or not valid JSON.
    pub data: Option<Value>,

    /// The raw response body.
    pub raw_body: String,

    /// Status, headers, effective URL and timing.
    pub info: ResponseInfo,
}

impl Response {
    /// Builds a response, parsing `raw_body` as JSON.
    pub fn new(raw_body: String, info: ResponseInfo) -> Self {
        let data = parse_body(&raw_body);
        Self {
            data,
            raw_body,
            info,
        }
    }

    /// The HTTP status code reported by the server.
    pub fn status(&self) -> StatusCode {
        self.info.status
    }

    /// Returns `true` for status codes of 400 and above.
    pub fn is_error(&self) -> bool {
        self.info.is_error()
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.info.headers.get(name)?.to_str().ok()
    }
}

/// Parses a body as JSON; empty and malformed bodies yield `None`.
pub(crate) fn parse_body(raw_body: &str) -> Option<Value> {
    if raw_body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str(raw_body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(
                error = %e,
                raw_response = %raw_body,
                "Response body is not valid JSON"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use serde_json::json;

    fn info(status: u16) -> ResponseInfo {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        ResponseInfo {
            method: Method::GET,
            url: Url::parse("https://secure.eloqua.com/API/REST/2.0/data/contacts").unwrap(),
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            latency: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_parses_json_body() {
        let response = Response::new(r#"{"total": 3}"#.to_string(), info(200));
        assert_eq!(response.data, Some(json!({ "total": 3 })));
        assert!(!response.is_error());
        assert_eq!(response.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_invalid_or_empty_body_is_none() {
        assert!(Response::new("<html>oops</html>".to_string(), info(200)).data.is_none());
        assert!(Response::new(String::new(), info(204)).data.is_none());
        assert!(Response::new("  \n".to_string(), info(200)).data.is_none());
    }

    #[test]
    fn test_error_threshold() {
        assert!(!Response::new(String::new(), info(399)).is_error());
        assert!(Response::new(String::new(), info(400)).is_error());
        assert!(Response::new(String::new(), info(503)).is_error());
    }

    #[test]
    fn test_error_body_still_parsed() {
        let response = Response::new(
            r#"[{"type":"ObjectValidationError"}]"#.to_string(),
            info(400),
        );
        assert!(response.is_error());
        assert_eq!(response.data, Some(json!([{ "type": "ObjectValidationError" }])));
    }
}
