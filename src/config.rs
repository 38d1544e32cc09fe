//! Client configuration.
//!
//! A [`Configuration`] is built once and never mutated afterwards. It is shared
//! read-only by the client and every API section, so two clients with different
//! credentials can live side by side in one process.

use crate::{Backoff, Error, Result};
use http::HeaderValue;
use std::time::Duration;
use url::Url;

/// The public speedrun.com API root.
pub const DEFAULT_BASE_URL: &str = "https://www.speedrun.com/api/v1";

/// Static settings for a [`Client`](crate::Client).
///
/// # Examples
///
/// ```
/// use srcom::Configuration;
/// use std::time::Duration;
///
/// let config = Configuration::builder()
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(10))
///     .max_retries(5)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.max_retries(), 5);
/// assert_eq!(config.base_url().as_str(), "https://www.speedrun.com/api/v1");
/// ```
#[derive(Debug, Clone)]
pub struct Configuration {
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
    max_retries: usize,
    debug_logging: bool,
    backoff: Backoff,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            debug_logging: false,
            backoff: Backoff::default(),
        }
    }
}

impl Configuration {
    /// Creates a new builder seeded with the defaults.
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    /// The API root every endpoint path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The API key sent as `X-API-Key`, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Total number of attempts a single call may make (first attempt included).
    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Whether full request/response dumps are logged.
    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    /// Delay schedule between attempts.
    pub fn backoff(&self) -> Backoff {
        self.backoff
    }
}

/// Builder for [`Configuration`].
#[derive(Default)]
pub struct ConfigurationBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    debug_logging: Option<bool>,
    backoff: Option<Backoff>,
}

impl ConfigurationBuilder {
    /// Sets the API root. Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API key used for authenticated endpoints.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the API key only when one is given.
    pub fn maybe_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Sets the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the total attempts per call. Defaults to 3; zero is treated as 1.
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Enables full request/response dumps through `tracing`.
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = Some(enabled);
        self
    }

    /// Overrides the backoff schedule. Defaults to 1s, 2s, 4s, ...
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Builds the [`Configuration`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL does not parse or cannot
    /// carry a path, and [`Error::InvalidApiKey`] if the key cannot be sent as
    /// an HTTP header value.
    pub fn build(self) -> Result<Configuration> {
        let default = Configuration::default();

        let base_url = match self.base_url {
            Some(raw) => parse_base_url(&raw)?,
            None => default.base_url,
        };

        let api_key = self.api_key.filter(|key| !key.is_empty());
        if let Some(key) = &api_key {
            HeaderValue::from_str(key).map_err(|_| Error::InvalidApiKey)?;
        }

        Ok(Configuration {
            base_url,
            api_key,
            timeout: self.timeout.unwrap_or(default.timeout),
            max_retries: self.max_retries.unwrap_or(default.max_retries).max(1),
            debug_logging: self.debug_logging.unwrap_or(default.debug_logging),
            backoff: self.backoff.unwrap_or(default.backoff),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim_end_matches('/'))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{raw} cannot be used as a base URL")));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();

        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries(), 3);
        assert!(!config.debug_logging());
        assert_eq!(config.backoff(), Backoff::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = Configuration::builder()
            .base_url("http://localhost:8080/api/v1/")
            .api_key("abc123")
            .timeout(Duration::from_secs(5))
            .max_retries(7)
            .debug_logging(true)
            .build()
            .unwrap();

        assert_eq!(config.base_url().as_str(), "http://localhost:8080/api/v1");
        assert_eq!(config.api_key(), Some("abc123"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_retries(), 7);
        assert!(config.debug_logging());
    }

    #[test]
    fn test_zero_retries_still_allows_one_attempt() {
        let config = Configuration::builder().max_retries(0).build().unwrap();
        assert_eq!(config.max_retries(), 1);
    }

    #[test]
    fn test_empty_api_key_is_treated_as_absent() {
        let config = Configuration::builder().api_key("").build().unwrap();
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Configuration::builder().base_url("not a url").build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));

        let result = Configuration::builder()
            .base_url("mailto:runner@example.com")
            .build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_unsendable_api_key() {
        let result = Configuration::builder().api_key("line\nbreak").build();
        assert!(matches!(result, Err(Error::InvalidApiKey)));
    }
}
