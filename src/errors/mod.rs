//! Error types for the PagerDuty client.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for PagerDuty operations.
pub type PagerDutyResult<T> = Result<T, PagerDutyError>;

/// Error kinds for categorizing PagerDuty errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerDutyErrorKind {
    // Configuration errors
    /// Base URL is empty, malformed or not http(s).
    InvalidBaseUrl,
    /// Invalid configuration.
    InvalidConfiguration,
    /// No API token available.
    MissingToken,

    // Request construction errors
    /// Request URL could not be built from the base URL and path.
    InvalidUrl,
    /// Request body could not be serialized to JSON.
    Encoding,
    /// Query options or a request option could not be applied.
    InvalidParameter,

    // Network errors
    /// Connection failed.
    ConnectionFailed,
    /// Request timeout.
    Timeout,
    /// Any other transport failure.
    Transport,

    // API errors
    /// Bad request (400).
    BadRequest,
    /// Token rejected (401).
    Unauthorized,
    /// Access forbidden (403).
    Forbidden,
    /// Resource not found (404).
    NotFound,
    /// Resource conflict (409).
    Conflict,
    /// Unprocessable entity (422).
    UnprocessableEntity,
    /// Too many requests (429).
    TooManyRequests,
    /// Server side failure (5xx).
    ServerError,
    /// Any other non-2xx status.
    ApiError,

    // Response errors
    /// Failed to deserialize a successful response.
    Deserialization,
}

impl fmt::Display for PagerDutyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidBaseUrl => "invalid_base_url",
            Self::InvalidConfiguration => "invalid_configuration",
            Self::MissingToken => "missing_token",
            Self::InvalidUrl => "invalid_url",
            Self::Encoding => "encoding_error",
            Self::InvalidParameter => "invalid_parameter",
            Self::ConnectionFailed => "connection_failed",
            Self::Timeout => "timeout",
            Self::Transport => "transport_error",
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::UnprocessableEntity => "unprocessable_entity",
            Self::TooManyRequests => "too_many_requests",
            Self::ServerError => "server_error",
            Self::ApiError => "api_error",
            Self::Deserialization => "deserialization_error",
        };
        f.write_str(name)
    }
}

/// Error envelope returned by the PagerDuty API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ApiErrorDetail,
}

/// Structured error detail from the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorDetail {
    /// PagerDuty error code.
    #[serde(default)]
    pub code: Option<i64>,
    /// Human readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Additional error strings, usually validation failures.
    #[serde(default, deserialize_with = "deserialize_errors")]
    pub errors: Vec<String>,
}

/// Accepts `null` and non-string entries in the `errors` array.
fn deserialize_errors<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.code) {
            (Some(message), Some(code)) => write!(f, "{} (code {})", message, code)?,
            (Some(message), None) => write!(f, "{}", message)?,
            (None, Some(code)) => write!(f, "code {}", code)?,
            (None, None) => write!(f, "no error message")?,
        }
        if !self.errors.is_empty() {
            write!(f, ": {}", self.errors.join(", "))?;
        }
        Ok(())
    }
}

/// PagerDuty API error with detailed information.
///
/// Displays as its message.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct PagerDutyError {
    kind: PagerDutyErrorKind,
    message: String,
    status_code: Option<u16>,
    api_error: Option<ApiErrorDetail>,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl PagerDutyError {
    /// Creates a new PagerDuty error.
    pub fn new(kind: PagerDutyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            api_error: None,
            cause: None,
        }
    }

    /// Sets the HTTP status code.
    pub fn with_status(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Attaches the decoded API error body.
    pub fn with_api_error(mut self, detail: ApiErrorDetail) -> Self {
        self.api_error = Some(detail);
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> PagerDutyErrorKind {
        self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status code.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Gets the decoded API error body, if the server sent one.
    pub fn api_error(&self) -> Option<&ApiErrorDetail> {
        self.api_error.as_ref()
    }

    /// Returns true if the error came back from the API with a non-2xx status.
    pub fn is_api_error(&self) -> bool {
        matches!(self.status_code, Some(code) if !(200..300).contains(&code))
    }

    /// Builds the error for a non-2xx response.
    ///
    /// `detail` is the decoded error envelope; when it is absent the message
    /// only carries the method, URL and status line.
    pub fn from_response(
        method: &str,
        url: &str,
        status: reqwest::StatusCode,
        detail: Option<ApiErrorDetail>,
    ) -> Self {
        let kind = Self::kind_from_status(status.as_u16());
        let message = match &detail {
            Some(detail) => format!(
                "{} API call to {} failed: {} : {}",
                method, url, status, detail
            ),
            None => format!("{} API call to {} failed: {}", method, url, status),
        };

        let mut error = Self::new(kind, message).with_status(status.as_u16());
        if let Some(detail) = detail {
            error = error.with_api_error(detail);
        }
        error
    }

    /// Maps an HTTP status code to an error kind.
    fn kind_from_status(status: u16) -> PagerDutyErrorKind {
        match status {
            400 => PagerDutyErrorKind::BadRequest,
            401 => PagerDutyErrorKind::Unauthorized,
            403 => PagerDutyErrorKind::Forbidden,
            404 => PagerDutyErrorKind::NotFound,
            409 => PagerDutyErrorKind::Conflict,
            422 => PagerDutyErrorKind::UnprocessableEntity,
            429 => PagerDutyErrorKind::TooManyRequests,
            500..=599 => PagerDutyErrorKind::ServerError,
            _ => PagerDutyErrorKind::ApiError,
        }
    }

    /// Classifies a reqwest failure raised while sending a request.
    pub fn from_transport(method: &str, url: &str, error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            PagerDutyErrorKind::Timeout
        } else if error.is_connect() {
            PagerDutyErrorKind::ConnectionFailed
        } else {
            PagerDutyErrorKind::Transport
        };
        Self::new(kind, format!("{} API call to {} failed: {}", method, url, error))
            .with_cause(error)
    }

    // Convenience constructors

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(PagerDutyErrorKind::InvalidConfiguration, message)
    }

    /// Creates a base URL error.
    pub fn invalid_base_url(message: impl Into<String>) -> Self {
        Self::new(PagerDutyErrorKind::InvalidBaseUrl, message)
    }

    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(PagerDutyErrorKind::Encoding, message)
    }

    /// Creates an invalid parameter error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(PagerDutyErrorKind::InvalidParameter, message)
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::new(PagerDutyErrorKind::Deserialization, message)
    }
}
