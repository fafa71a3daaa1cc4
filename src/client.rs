//! Authenticated Eloqua REST client.
//!
//! The [`Client`] type is the main entry point for making requests.
//! Use [`ClientBuilder`] to configure and create clients.

use crate::{
    config::ClientConfig,
    endpoint::{fallback_rest_url, join_url, standard_rest_url},
    metadata::RequestMetadata,
    response::{parse_body, ResponseInfo},
    Error, Response, Result,
};
use http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;
use url::Url;

/// A client for one Eloqua account.
///
/// The base URL of the account's REST API is discovered on first use and
/// cached for the lifetime of the client. Cloning is cheap: clones share the
/// connection pool, the resolved base URL and the last-response record.
///
/// Requests that reach the server always return `Ok`, even for 4xx and 5xx
/// statuses; those are logged as warnings and left for the caller to inspect.
///
/// # Examples
///
/// ```no_run
/// use eloqua_rest::Client;
/// use serde_json::json;
///
/// # async fn example() -> Result<(), eloqua_rest::Error> {
/// let client = Client::builder()
///     .account("AcmeCorp")
///     .username("api.user")
///     .password("secret")
///     .build()?;
///
/// // GET request
/// let emails = client.get("/assets/emails").await?;
/// println!("Status {}: {:?}", emails.status(), emails.data);
///
/// // POST request
/// let contact = json!({ "emailAddress": "alice@example.com" });
/// let created = client.post("/data/contact", &contact).await?;
/// if created.is_error() {
///     eprintln!("Create failed: {}", created.raw_body);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    config: ClientConfig,
    base_url: OnceCell<String>,
    last_response: Mutex<Option<ResponseInfo>>,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use eloqua_rest::Client;
    ///
    /// # fn example() -> Result<(), eloqua_rest::Error> {
    /// let client = Client::builder()
    ///     .account("AcmeCorp")
    ///     .username("api.user")
    ///     .password("secret")
    ///     .api_version(2)
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from a ready-made config.
    ///
    /// # Errors
    ///
    /// Same as [`ClientBuilder::build`].
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::from_config(config).build()
    }

    /// The settings this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Returns the account's REST base URL, discovering it on first call.
    ///
    /// Discovery asks the discovery endpoint for the account's standard REST
    /// URL, sending the same basic-auth credentials as regular requests. If
    /// that fails, it waits for the configured retry delay and tries once
    /// more; if the retry fails too, the generic
    /// `https://secure.eloqua.com/API/REST/<version>.0/` is used. Whatever the
    /// outcome, it is cached and never recomputed.
    pub async fn base_url(&self) -> &str {
        self.inner
            .base_url
            .get_or_init(|| async {
                let base_url = self.discover_base_url().await;
                tracing::info!(base_url = %base_url, "Resolved Eloqua REST endpoint");
                base_url
            })
            .await
            .as_str()
    }

    /// Transport metadata of the most recent request, if any has completed.
    ///
    /// Discovery requests are not recorded.
    pub fn last_response(&self) -> Option<ResponseInfo> {
        self.inner
            .last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn discover_base_url(&self) -> String {
        if let Some(base_url) = self.fetch_standard_url(1).await {
            return base_url;
        }

        let delay = self.inner.config.discovery_retry_delay;
        tracing::info!(
            delay_ms = delay.as_millis(),
            "Retrying endpoint discovery after delay"
        );
        tokio::time::sleep(delay).await;

        if let Some(base_url) = self.fetch_standard_url(2).await {
            return base_url;
        }

        let fallback = fallback_rest_url(self.inner.config.api_version);
        tracing::warn!(
            base_url = %fallback,
            "Endpoint discovery failed, falling back to default URL"
        );
        fallback
    }

    /// One discovery attempt. Any failure, including a body without the
    /// expected field, yields `None`.
    async fn fetch_standard_url(&self, attempt: usize) -> Option<String> {
        let discovery_url = &self.inner.config.discovery_url;

        tracing::debug!(
            url = %discovery_url,
            attempt = attempt,
            "Requesting endpoint discovery"
        );

        let (user, password) = self.inner.config.credentials();
        let mut request = self
            .inner
            .http_client
            .get(discovery_url)
            .basic_auth(user, Some(password));
        if let Some(timeout) = self.inner.config.timeout {
            request = request.timeout(timeout);
        }

        let raw_body = match request.send().await {
            Ok(response) => match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(error = %e, attempt = attempt, "Failed to read discovery response");
                    return None;
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, attempt = attempt, "Endpoint discovery request failed");
                return None;
            }
        };

        let base_url = parse_body(&raw_body)
            .and_then(|body| standard_rest_url(&body, self.inner.config.api_version));

        if base_url.is_none() {
            tracing::warn!(
                attempt = attempt,
                response = %raw_body,
                "Discovery response has no standard REST URL"
            );
        }

        base_url
    }

    /// Executes a request against the account's base URL.
    ///
    /// This is the single executor behind [`get`](Self::get),
    /// [`post`](Self::post), [`put`](Self::put) and [`delete`](Self::delete).
    ///
    /// # Errors
    ///
    /// Returns `Error::Network` or `Error::Timeout` when the transport fails
    /// before a status line arrives, and `Error::InvalidUrl` if the base URL and
    /// path do not form a valid URL. HTTP error statuses are not errors.
    ///
    /// A failed transport is reported as an `Err` rather than an empty
    /// response, so `data: None` always means the server answered with an
    /// empty or non-JSON body.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use eloqua_rest::{Client, metadata::RequestMetadata};
    /// use serde_json::json;
    ///
    /// # async fn example() -> Result<(), eloqua_rest::Error> {
    /// # let client = Client::builder().account("a").username("u").password("p").build()?;
    /// let request = RequestMetadata::put("/data/contact/42", &json!({ "id": "42", "title": "CTO" }))?;
    /// let response = client.call(request).await?;
    /// println!("{}", response.status());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn call(&self, metadata: RequestMetadata) -> Result<Response> {
        let url = Url::parse(&join_url(self.base_url().await, &metadata.path))?;

        tracing::debug!(
            method = %metadata.method,
            url = %url,
            "Executing HTTP request"
        );

        let (user, password) = self.inner.config.credentials();
        let mut request = self
            .inner
            .http_client
            .request(metadata.method.clone(), url)
            .basic_auth(user, Some(password));

        if let Some(timeout) = self.inner.config.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = &metadata.body {
            request = request.json(body);
        }

        let start_time = Instant::now();
        let response = request.send().await.map_err(Error::from_transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let effective_url = response.url().clone();

        // A body that breaks off mid-read still leaves the status to report.
        let raw_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, url = %effective_url, "Failed to read response body");
                String::new()
            }
        };
        let latency = start_time.elapsed();

        tracing::info!(
            status = status.as_u16(),
            latency_ms = latency.as_millis(),
            "Received HTTP response"
        );

        let info = ResponseInfo {
            method: metadata.method,
            url: effective_url,
            status,
            headers,
            latency,
        };

        if info.is_error() {
            tracing::warn!(
                method = %info.method,
                url = %info.url,
                status = info.status.as_u16(),
                latency_ms = info.latency.as_millis(),
                headers = ?info.headers,
                response = %raw_body,
                "Eloqua API request failed"
            );
        }

        *self
            .inner
            .last_response
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(info.clone());

        Ok(Response::new(raw_body, info))
    }

    /// Makes a GET request to the specified path.
    pub async fn get(&self, path: impl Into<String>) -> Result<Response> {
        self.call(RequestMetadata::get(path)).await
    }

    /// Makes a POST request to the specified path with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails with `Error::SerializationFailed` before anything is sent if
    /// `body` cannot be serialized; otherwise as [`call`](Self::call).
    pub async fn post<B>(&self, path: impl Into<String>, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.call(RequestMetadata::post(path, body)?).await
    }

    /// Makes a PUT request to the specified path with a JSON body.
    ///
    /// # Errors
    ///
    /// Fails with `Error::SerializationFailed` before anything is sent if
    /// `body` cannot be serialized; otherwise as [`call`](Self::call).
    pub async fn put<B>(&self, path: impl Into<String>, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        self.call(RequestMetadata::put(path, body)?).await
    }

    /// Makes a DELETE request to the specified path.
    pub async fn delete(&self, path: impl Into<String>) -> Result<Response> {
        self.call(RequestMetadata::delete(path)).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.inner.config)
            .field("base_url", &self.inner.base_url.get())
            .finish()
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use eloqua_rest::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), eloqua_rest::Error> {
/// let client = ClientBuilder::new()
///     .account("AcmeCorp")
///     .username("api.user")
///     .password("secret")
///     .timeout(Duration::from_secs(30))
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: ClientConfig,
    base_url: Option<String>,
    default_headers: HeaderMap,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings and empty credentials.
    pub fn new() -> Self {
        Self::from_config(ClientConfig::new("", "", ""))
    }

    /// Starts from an existing config.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            base_url: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the Eloqua company (site) name.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.config.account = account.into();
        self
    }

    /// Sets the API user's login name.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = username.into();
        self
    }

    /// Sets the API user's password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    /// Sets the REST API version. Defaults to `2`.
    pub fn api_version(mut self, api_version: u32) -> Self {
        self.config.api_version = api_version;
        self
    }

    /// Overrides the endpoint discovery URL.
    pub fn discovery_url(mut self, url: impl Into<String>) -> Self {
        self.config.discovery_url = url.into();
        self
    }

    /// Sets the wait between the two discovery attempts. Defaults to 2 seconds.
    pub fn discovery_retry_delay(mut self, delay: Duration) -> Self {
        self.config.discovery_retry_delay = delay;
        self
    }

    /// Uses a known base URL and skips discovery entirely.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the configured `Client`.
    ///
    /// No network traffic happens here; discovery waits for the first request.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigurationError` if the account, username or password
    /// is empty or the HTTP client cannot be initialized, and
    /// `Error::InvalidUrl` if the discovery URL or preset base URL is invalid.
    pub fn build(self) -> Result<Client> {
        for (field, value) in [
            ("account", &self.config.account),
            ("username", &self.config.username),
            ("password", &self.config.password),
        ] {
            if value.is_empty() {
                return Err(Error::ConfigurationError(format!("{} is required", field)));
            }
        }

        Url::parse(&self.config.discovery_url)?;
        if let Some(base_url) = &self.base_url {
            Url::parse(base_url)?;
        }

        let mut default_headers = self.default_headers;
        default_headers
            .entry(CONTENT_TYPE)
            .or_insert_with(|| HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                config: self.config,
                base_url: OnceCell::new_with(self.base_url),
                last_response: Mutex::new(None),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
