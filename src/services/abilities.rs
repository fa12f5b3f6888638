//! Account ability operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use serde::{Deserialize, Serialize};

/// Service for account abilities.
pub struct AbilitiesService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> AbilitiesService<'a> {
    /// Creates a new abilities service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists the abilities enabled on the account.
    pub async fn list(&self) -> PagerDutyResult<ListAbilitiesResponse> {
        self.client.get("/abilities").await
    }

    /// Tests whether the account has an ability.
    ///
    /// The API answers 204 when it does and an error status otherwise.
    pub async fn test(&self, ability: &str) -> PagerDutyResult<ApiResponse> {
        self.client
            .new_request_do(
                reqwest::Method::GET,
                &format!("/abilities/{}", ability),
                None::<&()>,
                None::<&()>,
            )
            .await
    }
}

/// Response for listing abilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAbilitiesResponse {
    /// Ability names, e.g. `teams` or `read_only_users`.
    pub abilities: Vec<String>,
}
