//! Structured logging for PagerDuty API calls.

use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tracing hooks for PagerDuty API operations.
pub struct TracingHooks;

impl TracingHooks {
    /// Logs the start of an API request.
    pub fn on_request_start(method: &str, url: &str) {
        debug!(
            method = %method,
            url = %url,
            "PagerDuty API request started"
        );
    }

    /// Logs the completion of an API request.
    pub fn on_request_complete(method: &str, url: &str, status: u16, duration: Duration) {
        info!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "PagerDuty API request completed"
        );
    }

    /// Logs a non-2xx response.
    pub fn on_api_error(method: &str, url: &str, status: u16, duration: Duration) {
        warn!(
            method = %method,
            url = %url,
            status = status,
            duration_ms = duration.as_millis() as u64,
            "PagerDuty API returned an error status"
        );
    }

    /// Logs a transport failure.
    pub fn on_request_error(method: &str, url: &str, error: &str) {
        error!(
            method = %method,
            url = %url,
            error = %error,
            "PagerDuty API request failed"
        );
    }
}

/// Headers that should never appear in logs.
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// Redacts sensitive values in headers.
pub fn redact_header(name: &str, value: &str) -> String {
    if SENSITIVE_HEADERS.contains(&name.to_lowercase().as_str()) {
        "[REDACTED]".to_string()
    } else {
        value.to_string()
    }
}
