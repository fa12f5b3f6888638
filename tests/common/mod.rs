//! Shared helpers for the wiremock-backed tests.

#![allow(dead_code)]

use integrations_pagerduty::PagerDutyClient;
use wiremock::MockServer;

/// Token every test client authenticates with.
pub const TEST_TOKEN: &str = "abc";

/// Creates a client pointing at the mock server.
pub fn client_for(server: &MockServer) -> PagerDutyClient {
    PagerDutyClient::builder()
        .base_url(server.uri())
        .token(TEST_TOKEN)
        .build()
        .expect("client creation should succeed")
}
