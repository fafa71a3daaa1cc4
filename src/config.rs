//! Connection and credential settings for a [`Client`](crate::Client).

use std::fmt;
use std::time::Duration;

/// Where the account's REST endpoint is looked up.
pub const DEFAULT_DISCOVERY_URL: &str = "https://login.eloqua.com/id";

/// The Eloqua REST API version used when none is configured.
pub const DEFAULT_API_VERSION: u32 = 2;

/// Pause between the first failed discovery attempt and the retry.
pub const DEFAULT_DISCOVERY_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Immutable settings a client is built from.
///
/// Created through [`ClientBuilder`](crate::ClientBuilder); the client never
/// mutates it afterwards.
#[derive(Clone)]
pub struct ClientConfig {
    /// The Eloqua company (site) name the user belongs to.
    pub account: String,

    /// The API user's login name.
    pub username: String,

    /// The API user's password.
    pub password: String,

    /// The REST API major version, rendered as `<version>.0` in URLs.
    pub api_version: u32,

    /// The endpoint discovery URL.
    pub discovery_url: String,

    /// How long to wait before retrying a failed discovery.
    pub discovery_retry_delay: Duration,

    /// Per-request timeout. `None` leaves the transport's default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a config with the given credentials and default settings.
    pub fn new(
        account: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            username: username.into(),
            password: password.into(),
            api_version: DEFAULT_API_VERSION,
            discovery_url: DEFAULT_DISCOVERY_URL.to_string(),
            discovery_retry_delay: DEFAULT_DISCOVERY_RETRY_DELAY,
            timeout: None,
        }
    }

    /// Returns the basic-auth user and password.
    ///
    /// Eloqua expects the user part as `account\username`, so the full
    /// credential string is `account\username:password`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eloqua_rest::ClientConfig;
    ///
    /// let config = ClientConfig::new("AcmeCorp", "api.user", "secret");
    /// let (user, password) = config.credentials();
    /// assert_eq!(user, "AcmeCorp\\api.user");
    /// assert_eq!(password, "secret");
    /// ```
    pub fn credentials(&self) -> (String, &str) {
        (
            format!("{}\\{}", self.account, self.username),
            &self.password,
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("discovery_url", &self.discovery_url)
            .field("discovery_retry_delay", &self.discovery_retry_delay)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("Acme", "user", "pw");
        assert_eq!(config.api_version, 2);
        assert_eq!(config.discovery_url, "https://login.eloqua.com/id");
        assert_eq!(config.discovery_retry_delay, Duration::from_secs(2));
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("Acme", "user", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("Acme"));
    }
}
