//! Resolution of the account-specific REST base URL.
//!
//! Eloqua pods live on different hosts, so the base URL is discovered from the
//! `/id` endpoint, which answers with a shape like:
//!
//! ```json
//! { "urls": { "apis": { "rest": { "standard": "https://secure.p03.eloqua.com/API/REST/{version}/" } } } }
//! ```

use serde_json::Value;

/// Placeholder in the discovered URL template that receives the API version.
const VERSION_PLACEHOLDER: &str = "{version}";

/// Renders an API version the way Eloqua URLs spell it (`2` becomes `2.0`).
fn version_segment(api_version: u32) -> String {
    format!("{}.0", api_version)
}

/// Extracts the standard REST URL from a discovery response body.
///
/// Returns `None` when `urls.apis.rest.standard` is absent, not a string, or empty.
///
/// # Examples
///
/// ```
/// use eloqua_rest::endpoint::standard_rest_url;
/// use serde_json::json;
///
/// let body = json!({
///     "urls": { "apis": { "rest": { "standard": "https://secure.p03.eloqua.com/API/REST/{version}/" } } }
/// });
/// assert_eq!(
///     standard_rest_url(&body, 2).as_deref(),
///     Some("https://secure.p03.eloqua.com/API/REST/2.0/")
/// );
/// assert_eq!(standard_rest_url(&json!({ "urls": {} }), 2), None);
/// ```
pub fn standard_rest_url(discovery_body: &Value, api_version: u32) -> Option<String> {
    let template = discovery_body
        .pointer("/urls/apis/rest/standard")?
        .as_str()
        .filter(|s| !s.is_empty())?;

    Some(template.replace(VERSION_PLACEHOLDER, &version_segment(api_version)))
}

/// The base URL used when discovery fails twice.
///
/// # Examples
///
/// ```
/// use eloqua_rest::endpoint::fallback_rest_url;
///
/// assert_eq!(fallback_rest_url(2), "https://secure.eloqua.com/API/REST/2.0/");
/// ```
pub fn fallback_rest_url(api_version: u32) -> String {
    format!(
        "https://secure.eloqua.com/API/REST/{}/",
        version_segment(api_version)
    )
}

/// Joins a base URL and a relative path with exactly one `/` between them.
///
/// Leading and trailing slashes are trimmed from `path`; trailing slashes
/// are trimmed from `base`. Discovered templates and the fallback URL both
/// end in `/`, so a plain `base + "/" + path` would put `//` into every
/// request URL.
///
/// # Examples
///
/// ```
/// use eloqua_rest::endpoint::join_url;
///
/// assert_eq!(
///     join_url("https://x.example.com/API/REST/2.0", "/accounts/1/"),
///     "https://x.example.com/API/REST/2.0/accounts/1"
/// );
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_substitution() {
        let body = json!({
            "urls": { "apis": { "rest": { "standard": "https://pod.example.com/API/REST/{version}/" } } }
        });
        assert_eq!(
            standard_rest_url(&body, 2).as_deref(),
            Some("https://pod.example.com/API/REST/2.0/")
        );
        assert_eq!(
            standard_rest_url(&body, 1).as_deref(),
            Some("https://pod.example.com/API/REST/1.0/")
        );
    }

    #[test]
    fn test_template_without_placeholder_is_kept() {
        let body = json!({
            "urls": { "apis": { "rest": { "standard": "https://pod.example.com/API/REST/" } } }
        });
        assert_eq!(
            standard_rest_url(&body, 2).as_deref(),
            Some("https://pod.example.com/API/REST/")
        );
    }

    #[test]
    fn test_missing_or_unusable_field() {
        assert_eq!(standard_rest_url(&json!({}), 2), None);
        assert_eq!(standard_rest_url(&json!("Not authenticated."), 2), None);
        assert_eq!(
            standard_rest_url(&json!({ "urls": { "apis": { "rest": { "standard": 7 } } } }), 2),
            None
        );
        assert_eq!(
            standard_rest_url(&json!({ "urls": { "apis": { "rest": { "standard": "" } } } }), 2),
            None
        );
    }

    #[test]
    fn test_fallback_url() {
        assert_eq!(fallback_rest_url(2), "https://secure.eloqua.com/API/REST/2.0/");
        assert_eq!(fallback_rest_url(1), "https://secure.eloqua.com/API/REST/1.0/");
    }

    #[test]
    fn test_join_url_trims_slashes() {
        let base = "https://x.example.com/API/REST/2.0";
        assert_eq!(join_url(base, "/accounts/1/"), format!("{}/accounts/1", base));
        assert_eq!(join_url(base, "accounts/1"), format!("{}/accounts/1", base));
        assert_eq!(join_url(base, "//accounts//"), format!("{}/accounts", base));
        assert_eq!(
            join_url("https://x.example.com/API/REST/2.0/", "/accounts"),
            format!("{}/accounts", base)
        );
    }
}
