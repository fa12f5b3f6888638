//! Configuration types for the PagerDuty client.

use crate::auth::ApiToken;
use crate::errors::{PagerDutyError, PagerDutyErrorKind, PagerDutyResult};
use std::time::Duration;
use url::Url;

/// Default PagerDuty API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";

/// Versioned media type sent in the `Accept` header.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.pagerduty+json;version=2";

/// Environment variable holding the API token.
pub const ENV_TOKEN: &str = "PAGERDUTY_TOKEN";

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "PAGERDUTY_BASE_URL";

/// Environment variable setting the User-Agent.
pub const ENV_USER_AGENT: &str = "PAGERDUTY_USER_AGENT";

/// Environment variable setting the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "PAGERDUTY_TIMEOUT";

/// PagerDuty client configuration.
///
/// Neither timeout has a default: unless one is set here (or on a supplied
/// `http_client`), requests wait as long as the HTTP client lets them.
#[derive(Debug, Clone)]
pub struct PagerDutyConfig {
    /// API base URL. Empty means [`DEFAULT_BASE_URL`].
    pub base_url: String,
    /// API token.
    pub token: ApiToken,
    /// User-Agent header, omitted when `None`.
    pub user_agent: Option<String>,
    /// Request timeout for the default HTTP client.
    pub timeout: Option<Duration>,
    /// Connect timeout for the default HTTP client.
    pub connect_timeout: Option<Duration>,
    /// Preconfigured HTTP client. Timeouts above are ignored when set.
    pub http_client: Option<reqwest::Client>,
}

impl Default for PagerDutyConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: ApiToken::new(""),
            user_agent: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl PagerDutyConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> PagerDutyConfigBuilder {
        PagerDutyConfigBuilder::new()
    }

    /// Loads configuration from `PAGERDUTY_*` environment variables.
    pub fn from_env() -> PagerDutyResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> PagerDutyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ENV_TOKEN).filter(|t| !t.is_empty()).ok_or_else(|| {
            PagerDutyError::new(
                PagerDutyErrorKind::MissingToken,
                format!("{} environment variable not set", ENV_TOKEN),
            )
        })?;

        let timeout = match lookup(ENV_TIMEOUT) {
            Some(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                PagerDutyError::configuration(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT, raw
                ))
            })?)),
            None => None,
        };

        let config = Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: ApiToken::new(token),
            user_agent: lookup(ENV_USER_AGENT),
            timeout,
            ..Default::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Resolves and parses the base URL, applying the default when empty.
    pub fn parsed_base_url(&self) -> PagerDutyResult<Url> {
        let raw = if self.base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            self.base_url.as_str()
        };

        let url = Url::parse(raw).map_err(|e| {
            PagerDutyError::invalid_base_url(format!("Failed to parse base URL {:?}: {}", raw, e))
                .with_cause(e)
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(PagerDutyError::invalid_base_url(format!(
                "Base URL must use http or https, got {:?}",
                url.scheme()
            )));
        }

        Ok(url)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> PagerDutyResult<()> {
        self.parsed_base_url()?;

        if let Some(ua) = &self.user_agent {
            if reqwest::header::HeaderValue::from_str(ua).is_err() {
                return Err(PagerDutyError::configuration(
                    "User-Agent contains characters not allowed in a header",
                ));
            }
        }

        Ok(())
    }
}

/// Builder for PagerDutyConfig.
#[derive(Debug, Default)]
pub struct PagerDutyConfigBuilder {
    base_url: Option<String>,
    token: Option<ApiToken>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<reqwest::Client>,
}

impl PagerDutyConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(ApiToken::new(token));
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> PagerDutyResult<PagerDutyConfig> {
        let config = PagerDutyConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: self.token.unwrap_or_else(|| ApiToken::new("")),
            user_agent: self.user_agent,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = PagerDutyConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_empty());
        assert!(config.user_agent.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_empty_base_url_defaults() {
        let config = PagerDutyConfig {
            base_url: String::new(),
            ..Default::default()
        };
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.host_str(), Some("api.pagerduty.com"));
    }

    #[test]
    fn test_config_builder() {
        let config = PagerDutyConfig::builder()
            .base_url("https://api.eu.pagerduty.com")
            .token("abc")
            .user_agent("terraform-provider/1.0")
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap();

        assert_eq!(config.base_url, "https://api.eu.pagerduty.com");
        assert_eq!(config.token.authorization_header(), "Token token=abc");
        assert_eq!(config.user_agent.as_deref(), Some("terraform-provider/1.0"));
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_invalid_base_url() {
        let err = PagerDutyConfig::builder()
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), PagerDutyErrorKind::InvalidBaseUrl);

        let err = PagerDutyConfig::builder()
            .base_url("ftp://api.pagerduty.com")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), PagerDutyErrorKind::InvalidBaseUrl);
    }

    #[test]
    fn test_from_lookup() {
        let config = PagerDutyConfig::from_lookup(lookup_from(&[
            (ENV_TOKEN, "abc"),
            (ENV_BASE_URL, "http://localhost:8080"),
            (ENV_TIMEOUT, "15"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_from_lookup_requires_token() {
        let err = PagerDutyConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.kind(), PagerDutyErrorKind::MissingToken);
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = PagerDutyConfig::from_lookup(lookup_from(&[
            (ENV_TOKEN, "abc"),
            (ENV_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err.kind(), PagerDutyErrorKind::InvalidConfiguration);
    }
}
