//! Request descriptors.

use http::Method;
use serde::Serialize;
use serde_json::Value;

/// Everything needed to issue one request against the resolved base URL.
///
/// Only POST and PUT carry a body; the constructors for GET and DELETE
/// leave it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMetadata {
    /// The HTTP method.
    pub method: Method,

    /// The request path, relative to the base URL. Surrounding slashes are ignored.
    pub path: String,

    /// The JSON payload, if any.
    pub body: Option<Value>,
}

impl RequestMetadata {
    /// Creates a bodiless request with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// A POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationFailed` if `body` cannot be represented as JSON.
    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> crate::Result<Self> {
        Self::new(Method::POST, path).with_body(body)
    }

    /// A PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationFailed` if `body` cannot be represented as JSON.
    pub fn put<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> crate::Result<Self> {
        Self::new(Method::PUT, path).with_body(body)
    }

    /// Attaches a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `Error::SerializationFailed` if `body` cannot be represented as JSON.
    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> crate::Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| crate::Error::SerializationFailed(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Contact {
        #[serde(rename = "emailAddress")]
        email_address: String,
    }

    #[test]
    fn test_bodiless_methods() {
        let get = RequestMetadata::get("/data/contacts");
        assert_eq!(get.method, Method::GET);
        assert_eq!(get.path, "/data/contacts");
        assert!(get.body.is_none());

        let delete = RequestMetadata::delete("data/contact/5");
        assert_eq!(delete.method, Method::DELETE);
        assert!(delete.body.is_none());
    }

    #[test]
    fn test_post_and_put_carry_json() {
        let contact = Contact {
            email_address: "a@example.com".to_string(),
        };

        let post = RequestMetadata::post("/data/contact", &contact).unwrap();
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body, Some(json!({ "emailAddress": "a@example.com" })));

        let put = RequestMetadata::put("/data/contact/5", &json!({ "id": "5" })).unwrap();
        assert_eq!(put.method, Method::PUT);
        assert_eq!(put.body, Some(json!({ "id": "5" })));
    }

    #[test]
    fn test_unserializable_body() {
        // JSON object keys must be strings.
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], 1);

        let result = RequestMetadata::post("/x", &bad);
        assert!(matches!(result, Err(crate::Error::SerializationFailed(_))));
    }
}
