//! # Core Configuration Module
//!
//! Provides configuration management for the metadata service.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `CompanionConfig` instance that holds the service settings and the
//! transport bridge. It enforces fail-fast validation so a misconfigured
//! server refuses to start instead of failing on the first request.
//!
//! ## Optional Dependencies (with platform defaults)
//!
//! - `HttpClient` - HTTP transport (desktop default: reqwest)
//!
//! When the `desktop-shims` feature is enabled, a `ReqwestHttpClient` honoring
//! the configured request timeout is injected automatically if none is
//! provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CompanionConfig;
//!
//! let config = CompanionConfig::builder()
//!     .listen_addr("127.0.0.1:3020".parse()?)
//!     .drive_api_base("https://www.googleapis.com/drive/v3")
//!     .build()?;
//! ```
//!
//! ## Environment
//!
//! [`CompanionConfig::from_env`] reads a `.env` file (if present) and the
//! following variables, all optional:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `COMPANION_LISTEN_ADDR` | `0.0.0.0:3020` |
//! | `COMPANION_DRIVE_API_BASE` | `https://www.googleapis.com/drive/v3` |
//! | `COMPANION_ONEDRIVE_API_BASE` | `https://graph.microsoft.com/v1.0` |
//! | `COMPANION_REQUEST_TIMEOUT_SECS` | `30` |
//! | `COMPANION_LOG_LEVEL` | `info` |
//! | `COMPANION_LOG_FORMAT` | `pretty` (debug) / `json` (release) |
//! | `COMPANION_LOG_FILTER` | derived from the level |

use crate::error::{Error, Result};
use crate::logging::{LogFormat, LogLevel, LoggingConfig};
use bridge_traits::HttpClient;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Default Google Drive API v3 endpoint
pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";

/// Default Microsoft Graph endpoint
pub const DEFAULT_ONEDRIVE_API_BASE: &str = "https://graph.microsoft.com/v1.0";

/// Default listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3020";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Service configuration.
///
/// Use [`CompanionConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CompanionConfig {
    /// Socket address the HTTP server binds to
    pub listen_addr: SocketAddr,

    /// Google Drive API base URL (no trailing slash)
    pub drive_api_base: String,

    /// Microsoft Graph API base URL (no trailing slash)
    pub onedrive_api_base: String,

    /// Timeout applied to each upstream request
    pub request_timeout: Duration,

    /// HTTP transport used by provider connectors
    pub http_client: Arc<dyn HttpClient>,

    /// Logging setup
    pub logging: LoggingConfig,
}

impl std::fmt::Debug for CompanionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanionConfig")
            .field("listen_addr", &self.listen_addr)
            .field("drive_api_base", &self.drive_api_base)
            .field("onedrive_api_base", &self.onedrive_api_base)
            .field("request_timeout", &self.request_timeout)
            .field("http_client", &"HttpClient { ... }")
            .field("logging", &self.logging)
            .finish()
    }
}

impl CompanionConfig {
    /// Creates a new builder for constructing a `CompanionConfig`.
    pub fn builder() -> CompanionConfigBuilder {
        CompanionConfigBuilder::default()
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::builder()
            .apply_env(|key| std::env::var(key).ok())?
            .build()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Base URLs are absolute http(s) URLs
    /// - The request timeout is between 1 second and 5 minutes
    pub fn validate(&self) -> Result<()> {
        validate_base_url("drive_api_base", &self.drive_api_base)?;
        validate_base_url("onedrive_api_base", &self.onedrive_api_base)?;

        if self.request_timeout.is_zero() {
            return Err(Error::Config(
                "Request timeout must be greater than 0 seconds".to_string(),
            ));
        }

        if self.request_timeout > Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS) {
            return Err(Error::Config(format!(
                "Request timeout exceeds maximum of {} seconds",
                MAX_REQUEST_TIMEOUT_SECS
            )));
        }

        Ok(())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value)
        .map_err(|e| Error::Config(format!("{} is not a valid URL ({}): {}", field, value, e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(()),
        _ => Err(Error::Config(format!(
            "{} must be an absolute http(s) URL, got {}",
            field, value
        ))),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client(timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::with_timeout(timeout)
        .map_err(|e| Error::Internal(format!("Failed to initialize default HttpClient: {}", e)))?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(client)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client(_timeout: Duration) -> Result<Arc<dyn HttpClient>> {
    Err(Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "No HTTP client implementation provided. \
                 Enable the 'desktop-shims' feature to use the default ReqwestHttpClient \
                 or inject one with .http_client()."
            .to_string(),
    })
}

/// Builder for constructing [`CompanionConfig`] instances.
///
/// Unset values fall back to their defaults when
/// [`build()`](CompanionConfigBuilder::build) is called.
#[derive(Default)]
pub struct CompanionConfigBuilder {
    listen_addr: Option<SocketAddr>,
    drive_api_base: Option<String>,
    onedrive_api_base: Option<String>,
    request_timeout: Option<Duration>,
    http_client: Option<Arc<dyn HttpClient>>,
    logging: Option<LoggingConfig>,
}

impl CompanionConfigBuilder {
    /// Sets the address the HTTP server binds to.
    pub fn listen_addr(mut self, addr: SocketAddr) -> Self {
        self.listen_addr = Some(addr);
        self
    }

    /// Sets the Google Drive API base URL.
    pub fn drive_api_base(mut self, url: impl Into<String>) -> Self {
        self.drive_api_base = Some(url.into());
        self
    }

    /// Sets the Microsoft Graph API base URL.
    pub fn onedrive_api_base(mut self, url: impl Into<String>) -> Self {
        self.onedrive_api_base = Some(url.into());
        self
    }

    /// Sets the timeout applied to each upstream request.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the logging configuration.
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Applies `COMPANION_*` variables resolved through `lookup`.
    ///
    /// Variables that are unset leave the builder untouched; variables that
    /// are set but unparseable are configuration errors.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("COMPANION_LISTEN_ADDR") {
            let addr = addr.trim().parse::<SocketAddr>().map_err(|e| {
                Error::Config(format!("COMPANION_LISTEN_ADDR is invalid ({}): {}", addr, e))
            })?;
            self.listen_addr = Some(addr);
        }

        if let Some(url) = lookup("COMPANION_DRIVE_API_BASE") {
            self.drive_api_base = Some(url);
        }

        if let Some(url) = lookup("COMPANION_ONEDRIVE_API_BASE") {
            self.onedrive_api_base = Some(url);
        }

        if let Some(secs) = lookup("COMPANION_REQUEST_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!(
                    "COMPANION_REQUEST_TIMEOUT_SECS must be a whole number of seconds ({}): {}",
                    secs, e
                ))
            })?;
            self.request_timeout = Some(Duration::from_secs(secs));
        }

        let mut logging = self.logging.take().unwrap_or_default();
        if let Some(level) = lookup("COMPANION_LOG_LEVEL") {
            logging = logging.with_level(level.parse::<LogLevel>()?);
        }
        if let Some(format) = lookup("COMPANION_LOG_FORMAT") {
            logging = logging.with_format(format.parse::<LogFormat>()?);
        }
        if let Some(filter) = lookup("COMPANION_LOG_FILTER") {
            logging = logging.with_filter(filter);
        }
        self.logging = Some(logging);

        Ok(self)
    }

    /// Builds the final `CompanionConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CompanionConfig)` on success, or an error if:
    /// - No HTTP client is available (see the `desktop-shims` feature)
    /// - Configuration values are invalid
    pub fn build(self) -> Result<CompanionConfig> {
        let listen_addr = match self.listen_addr {
            Some(addr) => addr,
            None => DEFAULT_LISTEN_ADDR
                .parse()
                .map_err(|e| Error::Internal(format!("Invalid default listen address: {}", e)))?,
        };

        let request_timeout = self
            .request_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        let drive_api_base = self
            .drive_api_base
            .unwrap_or_else(|| DEFAULT_DRIVE_API_BASE.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let onedrive_api_base = self
            .onedrive_api_base
            .unwrap_or_else(|| DEFAULT_ONEDRIVE_API_BASE.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client(request_timeout)?,
        };

        let config = CompanionConfig {
            listen_addr,
            drive_api_base,
            onedrive_api_base,
            request_timeout,
            http_client,
            logging: self.logging.unwrap_or_default(),
        };

        config.validate()?;

        Ok(config)
    }
}
