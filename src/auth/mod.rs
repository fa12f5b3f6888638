//! Token authentication for the PagerDuty REST API.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Scheme prefix PagerDuty expects in the `Authorization` header.
pub const TOKEN_SCHEME: &str = "Token token=";

/// REST API token (account or user level).
#[derive(Clone)]
pub struct ApiToken(SecretString);

impl ApiToken {
    /// Wraps a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Returns true if no token was configured.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }

    /// Generates the `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        format!("{}{}", TOKEN_SCHEME, self.0.expose_secret())
    }

    /// Gets a masked form of the token for logging.
    pub fn masked(&self) -> String {
        let exposed = self.0.expose_secret();
        if exposed.chars().count() > 4 {
            let prefix: String = exposed.chars().take(4).collect();
            format!("{}***", prefix)
        } else {
            "***".to_string()
        }
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"[REDACTED]").finish()
    }
}

impl From<&str> for ApiToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ApiToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
