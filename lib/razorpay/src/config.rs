//! Client configuration types.
//!
//! - [`Config`] - credentials, hosts, and headers shared by every dispatcher
//! - [`ClientConfig`] - transport tuning for [`crate::HyperClient`]

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use url::Url;

use crate::{Error, Result};

/// Base URL of the data API.
pub const API_URL: &str = "https://api.razorpay.com";

/// Base URL of the OAuth authorization server.
pub const AUTH_URL: &str = "https://auth.razorpay.com";

/// API version used when none is given.
pub const DEFAULT_VERSION: &str = "v1";

/// Fixed per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// SDK Configuration
// ============================================================================

/// Target host of a dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Host {
    /// The data API (`api.razorpay.com`).
    #[default]
    Api,
    /// The OAuth server (`auth.razorpay.com`), used for token exchange.
    Auth,
}

/// API credentials. The two schemes are mutually exclusive.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// HTTP Basic with a key id and key secret.
    Basic {
        /// Key id (`rzp_live_...` / `rzp_test_...`).
        key_id: String,
        /// Key secret.
        key_secret: String,
    },
    /// OAuth access token sent as a bearer token.
    Bearer(String),
}

impl Credentials {
    /// The `Authorization` header value for these credentials.
    #[must_use]
    pub fn authorization(&self) -> String {
        match self {
            Self::Basic { key_id, key_secret } => {
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{key_id}:{key_secret}"));
                format!("Basic {encoded}")
            }
            Self::Bearer(token) => format!("Bearer {token}"),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { key_id, .. } => f
                .debug_struct("Basic")
                .field("key_id", key_id)
                .field("key_secret", &"<redacted>")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

/// Immutable SDK configuration, captured by every dispatcher at construction.
///
/// # Example
///
/// ```
/// use razorpay::{Config, Host};
///
/// let config = Config::builder()
///     .basic_auth("rzp_test_key", "secret")
///     .custom_header("X-Razorpay-Account", "acc_123")
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.base_url(Host::Api).as_str(), "https://api.razorpay.com/");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    credentials: Credentials,
    custom_headers: Vec<(String, String)>,
    api_url: Url,
    auth_url: Url,
    timeout: Duration,
    ca_bundle: Option<PathBuf>,
    logging: bool,
}

impl Config {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default configuration with HTTP Basic credentials.
    #[must_use]
    pub fn basic(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::Basic {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        })
    }

    /// Default configuration with an OAuth access token.
    #[must_use]
    pub fn oauth(access_token: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::Bearer(access_token.into()))
    }

    fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            custom_headers: Vec::new(),
            api_url: default_url(API_URL),
            auth_url: default_url(AUTH_URL),
            timeout: DEFAULT_TIMEOUT,
            ca_bundle: None,
            logging: false,
        }
    }

    /// A copy of this configuration authenticating with an OAuth access token.
    #[must_use]
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::Bearer(access_token.into()),
            ..self.clone()
        }
    }

    /// Credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Caller-supplied headers, in insertion order.
    #[must_use]
    pub fn custom_headers(&self) -> &[(String, String)] {
        &self.custom_headers
    }

    /// Base URL for a host.
    #[must_use]
    pub const fn base_url(&self, host: Host) -> &Url {
        match host {
            Host::Api => &self.api_url,
            Host::Auth => &self.auth_url,
        }
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Extra PEM trust roots.
    #[must_use]
    pub fn ca_bundle(&self) -> Option<&Path> {
        self.ca_bundle.as_deref()
    }

    /// Whether transport requests are logged.
    #[must_use]
    pub const fn logging(&self) -> bool {
        self.logging
    }

    /// Transport configuration derived from this configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut builder = ClientConfig::builder().timeout(self.timeout);
        if let Some(path) = &self.ca_bundle {
            builder = builder.ca_bundle(path.clone());
        }
        builder.build()
    }
}

#[allow(clippy::expect_used)]
fn default_url(url: &str) -> Url {
    Url::parse(url).expect("built-in URL is valid")
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    credentials: Option<Credentials>,
    custom_headers: Vec<(String, String)>,
    api_url: Option<String>,
    auth_url: Option<String>,
    timeout: Option<Duration>,
    ca_bundle: Option<PathBuf>,
    logging: bool,
}

impl ConfigBuilder {
    /// Use HTTP Basic credentials.
    #[must_use]
    pub fn basic_auth(mut self, key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Basic {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        });
        self
    }

    /// Use an OAuth access token.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    /// Add a header sent with every request. SDK headers take precedence.
    #[must_use]
    pub fn custom_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Override the data API base URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Override the OAuth server base URL.
    #[must_use]
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Trust the PEM certificates in `path` in addition to the bundled roots.
    #[must_use]
    pub fn ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(path.into());
        self
    }

    /// Log every transport request through `tracing`.
    #[must_use]
    pub const fn logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no credentials were set or a base URL is invalid.
    pub fn build(self) -> Result<Config> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::invalid_request("no API credentials configured"))?;

        let api_url = match self.api_url {
            Some(url) => Url::parse(&url)?,
            None => default_url(API_URL),
        };
        let auth_url = match self.auth_url {
            Some(url) => Url::parse(&url)?,
            None => default_url(AUTH_URL),
        };

        Ok(Config {
            credentials,
            custom_headers: self.custom_headers,
            api_url,
            auth_url,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            ca_bundle: self.ca_bundle,
            logging: self.logging,
        })
    }
}

// ============================================================================
// Transport Configuration
// ============================================================================

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
    /// Extra PEM trust roots.
    pub ca_bundle: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            ca_bundle: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    ca_bundle: Option<PathBuf>,
}

impl ClientConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Trust the PEM certificates in `path` in addition to the bundled roots.
    #[must_use]
    pub fn ca_bundle(mut self, path: PathBuf) -> Self {
        self.ca_bundle = Some(path);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        let defaults = ClientConfig::default();
        ClientConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
            ca_bundle: self.ca_bundle,
        }
    }
}
