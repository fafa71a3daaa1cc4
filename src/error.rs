//! Error types for the Eloqua REST client.
//!
//! HTTP-level failures (status >= 400) and unparseable bodies are *not* errors
//! here: they come back as a [`Response`](crate::Response) whose status the
//! caller inspects. This type only covers the transport and configuration
//! failures that leave no response to inspect.

/// The main error type for the Eloqua REST client.
///
/// # Examples
///
/// ```no_run
/// use eloqua_rest::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .account("AcmeCorp")
///     .username("api.user")
///     .password("secret")
///     .build()?;
///
/// match client.get("/assets/emails").await {
///     Ok(response) if response.is_error() => {
///         eprintln!("Eloqua rejected the request: {}", response.status());
///     }
///     Ok(response) => println!("Body: {:?}", response.data),
///     Err(Error::Timeout) => eprintln!("Eloqua did not answer in time"),
///     Err(e) => eprintln!("Transport failure: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection refused, DNS lookup failed, etc.).
    ///
    /// This wraps the underlying `reqwest::Error` and indicates problems at the network layer
    /// rather than the HTTP protocol layer.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request timed out.
    ///
    /// Only reachable when a timeout was configured on the builder, or when the
    /// transport's own default timeout fires.
    #[error("Request timed out")]
    Timeout,

    /// Failed to serialize the request body to JSON.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// Invalid configuration was provided, such as missing credentials or an
    /// invalid header value.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// An invalid URL was provided or produced by joining the base URL and a path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Maps a transport error, splitting timeouts out of the generic network case.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(err)
        }
    }

    /// Returns `true` if the error happened on the wire rather than in local setup.
    ///
    /// # Examples
    ///
    /// ```
    /// use eloqua_rest::Error;
    ///
    /// assert!(Error::Timeout.is_transport());
    /// assert!(!Error::ConfigurationError("missing account".to_string()).is_transport());
    /// ```
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout)
    }
}

/// A specialized `Result` type for the Eloqua REST client.
///
/// This is a convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
