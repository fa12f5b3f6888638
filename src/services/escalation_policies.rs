//! Escalation policy operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use crate::types::{EscalationTargetReference, ServiceReference, TeamReference};
use serde::{Deserialize, Serialize};

/// Service for escalation policy operations.
pub struct EscalationPoliciesService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> EscalationPoliciesService<'a> {
    /// Creates a new escalation policies service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists escalation policies.
    pub async fn list(
        &self,
        options: &ListEscalationPoliciesOptions,
    ) -> PagerDutyResult<ListEscalationPoliciesResponse> {
        self.client
            .get_with_params("/escalation_policies", &options.to_query())
            .await
    }

    /// Creates an escalation policy.
    pub async fn create(&self, policy: &EscalationPolicy) -> PagerDutyResult<EscalationPolicy> {
        let body = EscalationPolicyPayload {
            escalation_policy: policy.clone(),
        };
        let payload: EscalationPolicyPayload =
            self.client.post("/escalation_policies", &body).await?;
        Ok(payload.escalation_policy)
    }

    /// Gets an escalation policy.
    pub async fn get(&self, id: &str) -> PagerDutyResult<EscalationPolicy> {
        let payload: EscalationPolicyPayload = self
            .client
            .get(&format!("/escalation_policies/{}", id))
            .await?;
        Ok(payload.escalation_policy)
    }

    /// Updates an escalation policy.
    pub async fn update(
        &self,
        id: &str,
        policy: &EscalationPolicy,
    ) -> PagerDutyResult<EscalationPolicy> {
        let body = EscalationPolicyPayload {
            escalation_policy: policy.clone(),
        };
        let payload: EscalationPolicyPayload = self
            .client
            .put(&format!("/escalation_policies/{}", id), &body)
            .await?;
        Ok(payload.escalation_policy)
    }

    /// Deletes an escalation policy.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client
            .delete(&format!("/escalation_policies/{}", id))
            .await
    }
}

/// Escalation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationPolicy {
    /// Policy ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    /// Policy name.
    #[serde(default)]
    pub name: String,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// API URL.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Web UI URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Times to loop through the rules before giving up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_loops: Option<u32>,
    /// `if_has_services` or `always`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_call_handoff_notifications: Option<String>,
    /// Ordered escalation rules.
    #[serde(default)]
    pub escalation_rules: Vec<EscalationRule>,
    /// Services using the policy.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceReference>,
    /// Owning teams.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamReference>,
}

/// One step of an escalation policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationRule {
    /// Rule ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Minutes before escalating to the next rule.
    pub escalation_delay_in_minutes: u32,
    /// Users or schedules notified by this rule.
    pub targets: Vec<EscalationTargetReference>,
}

/// `{"escalation_policy": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationPolicyPayload {
    /// Wrapped escalation policy.
    pub escalation_policy: EscalationPolicy,
}

/// Filters for listing escalation policies.
#[derive(Debug, Clone, Default)]
pub struct ListEscalationPoliciesOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Name filter.
    pub query: Option<String>,
    /// Policies targeting these users.
    pub user_ids: Vec<String>,
    /// Policies owned by these teams.
    pub team_ids: Vec<String>,
    /// Related resources to include.
    pub include: Vec<String>,
    /// Sort field, e.g. `name:desc`.
    pub sort_by: Option<String>,
}

impl ListEscalationPoliciesOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .opt("query", self.query.as_deref())
            .list("user_ids", &self.user_ids)
            .list("team_ids", &self.team_ids)
            .list("include", &self.include)
            .opt("sort_by", self.sort_by.as_deref())
            .build()
    }
}

/// Response for listing escalation policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEscalationPoliciesResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Policies in this page.
    #[serde(default)]
    pub escalation_policies: Vec<EscalationPolicy>,
}
