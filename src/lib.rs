//! # PagerDuty Integration Library
//!
//! A typed client for the PagerDuty REST API v2 with:
//! - Token authentication and the versioned `Accept` media type on every call
//! - Resource services for abilities, add-ons, escalation policies, schedules,
//!   services, teams, users, vendors and automation actions runners
//! - Typed API errors carrying status, request line and decoded error body
//! - Offset pagination helpers
//! - Tracing hooks with header redaction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_pagerduty::{PagerDutyClient, PagerDutyConfig};
//! use integrations_pagerduty::services::ListUsersOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PagerDutyConfig::builder()
//!         .token("u+xxxxxxxxxxxxxxxx")
//!         .build()?;
//!
//!     let client = PagerDutyClient::new(config)?;
//!     client.validate_auth().await?;
//!
//!     let page = client.users().list(&ListUsersOptions::default()).await?;
//!     for user in page.users {
//!         println!("{} <{}>", user.name, user.email);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod errors;
pub mod types;

// Authentication
pub mod auth;

// HTTP client and transport
pub mod client;

// Pagination handling
pub mod pagination;

// API Services
pub mod services;

// Observability
pub mod observability;

// Re-exports for convenience
pub use auth::ApiToken;
pub use client::{ApiResponse, PagerDutyClient, PagerDutyClientBuilder, RequestOption};
pub use config::{PagerDutyConfig, PagerDutyConfigBuilder};
pub use errors::{PagerDutyError, PagerDutyErrorKind, PagerDutyResult};
pub use pagination::Pagination;
pub use types::*;
