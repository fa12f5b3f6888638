//! Automation Actions runner operations.
//!
//! These endpoints are gated behind the `X-EARLY-ACCESS` header.

use crate::client::{ApiResponse, PagerDutyClient, RequestOption};
use crate::errors::PagerDutyResult;
use crate::types::TeamReference;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Early-access feature flag required by the runner endpoints.
pub const AUTOMATION_ACTIONS_EARLY_ACCESS: &str = "automation-actions-early-access";

const RUNNERS_PATH: &str = "/automation_actions/runners";

/// Automation Actions runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationActionsRunner {
    /// Runner ID, assigned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Runner name.
    #[serde(default)]
    pub name: String,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Object type, usually `runner`.
    #[serde(rename = "type", default)]
    pub object_type: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<String>,
    /// `sidecar` or `runbook`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_type: Option<String>,
    /// Runner status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Teams allowed to use the runner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<TeamReference>>,
    /// Caller privileges on the runner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileges: Option<AutomationActionsPrivileges>,
}

impl AutomationActionsRunner {
    /// Creates a runner with a name and object type.
    pub fn new(name: impl Into<String>, object_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_type: object_type.into(),
            ..Default::default()
        }
    }
}

/// Permissions the caller holds on a runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationActionsPrivileges {
    /// Permission names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// `{"runner": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationActionsRunnerPayload {
    /// Wrapped runner.
    pub runner: AutomationActionsRunner,
}

/// Service for Automation Actions runners.
pub struct AutomationActionsRunnersService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> AutomationActionsRunnersService<'a> {
    /// Creates a new runners service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    fn options() -> [RequestOption; 1] {
        [RequestOption::early_access(AUTOMATION_ACTIONS_EARLY_ACCESS)]
    }

    /// Creates a runner.
    pub async fn create(
        &self,
        runner: &AutomationActionsRunner,
    ) -> PagerDutyResult<AutomationActionsRunner> {
        let body = AutomationActionsRunnerPayload {
            runner: runner.clone(),
        };
        let response = self
            .client
            .new_request_do_options(
                Method::POST,
                RUNNERS_PATH,
                None::<&()>,
                Some(&body),
                &Self::options(),
            )
            .await?;
        let payload: AutomationActionsRunnerPayload = response.json()?;
        Ok(payload.runner)
    }

    /// Gets a runner.
    pub async fn get(&self, id: &str) -> PagerDutyResult<AutomationActionsRunner> {
        let response = self
            .client
            .new_request_do_options(
                Method::GET,
                &format!("{}/{}", RUNNERS_PATH, id),
                None::<&()>,
                None::<&()>,
                &Self::options(),
            )
            .await?;
        let payload: AutomationActionsRunnerPayload = response.json()?;
        Ok(payload.runner)
    }

    /// Deletes a runner.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client
            .new_request_do_options(
                Method::DELETE,
                &format!("{}/{}", RUNNERS_PATH, id),
                None::<&()>,
                None::<&()>,
                &Self::options(),
            )
            .await
    }
}
