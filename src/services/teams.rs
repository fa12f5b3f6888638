//! Team operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use crate::types::{TeamReference, UserReference};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Service for team operations.
pub struct TeamsService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> TeamsService<'a> {
    /// Creates a new teams service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists teams.
    pub async fn list(&self, options: &ListTeamsOptions) -> PagerDutyResult<ListTeamsResponse> {
        self.client
            .get_with_params("/teams", &options.to_query())
            .await
    }

    /// Creates a team.
    pub async fn create(&self, team: &Team) -> PagerDutyResult<Team> {
        let payload: TeamPayload = self
            .client
            .post("/teams", &TeamPayload { team: team.clone() })
            .await?;
        Ok(payload.team)
    }

    /// Gets a team.
    pub async fn get(&self, id: &str) -> PagerDutyResult<Team> {
        let payload: TeamPayload = self.client.get(&format!("/teams/{}", id)).await?;
        Ok(payload.team)
    }

    /// Updates a team.
    pub async fn update(&self, id: &str, team: &Team) -> PagerDutyResult<Team> {
        let payload: TeamPayload = self
            .client
            .put(&format!("/teams/{}", id), &TeamPayload { team: team.clone() })
            .await?;
        Ok(payload.team)
    }

    /// Deletes a team.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client.delete(&format!("/teams/{}", id)).await
    }

    // Membership

    /// Adds a user to a team with the default role.
    pub async fn add_user(&self, team_id: &str, user_id: &str) -> PagerDutyResult<ApiResponse> {
        self.client
            .put_empty(&format!("/teams/{}/users/{}", team_id, user_id))
            .await
    }

    /// Adds a user to a team with an explicit role.
    pub async fn add_user_with_role(
        &self,
        team_id: &str,
        user_id: &str,
        role: TeamRole,
    ) -> PagerDutyResult<ApiResponse> {
        self.client
            .new_request_do(
                Method::PUT,
                &format!("/teams/{}/users/{}", team_id, user_id),
                None::<&()>,
                Some(&TeamRoleRequest { role }),
            )
            .await
    }

    /// Removes a user from a team.
    pub async fn remove_user(&self, team_id: &str, user_id: &str) -> PagerDutyResult<ApiResponse> {
        self.client
            .delete(&format!("/teams/{}/users/{}", team_id, user_id))
            .await
    }

    /// Adds an escalation policy to a team.
    pub async fn add_escalation_policy(
        &self,
        team_id: &str,
        policy_id: &str,
    ) -> PagerDutyResult<ApiResponse> {
        self.client
            .put_empty(&format!(
                "/teams/{}/escalation_policies/{}",
                team_id, policy_id
            ))
            .await
    }

    /// Removes an escalation policy from a team.
    pub async fn remove_escalation_policy(
        &self,
        team_id: &str,
        policy_id: &str,
    ) -> PagerDutyResult<ApiResponse> {
        self.client
            .delete(&format!(
                "/teams/{}/escalation_policies/{}",
                team_id, policy_id
            ))
            .await
    }

    /// Lists the members of a team.
    pub async fn get_members(
        &self,
        team_id: &str,
        pagination: &Pagination,
    ) -> PagerDutyResult<ListMembersResponse> {
        self.client
            .get_with_params(&format!("/teams/{}/members", team_id), &pagination.to_query())
            .await
    }
}

/// Team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub team_type: Option<String>,
    /// Team name.
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
    /// Parent team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TeamReference>,
}

/// `{"team": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPayload {
    /// Wrapped team.
    pub team: Team,
}

/// Role of a user within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    /// Read-only member.
    Observer,
    /// Regular member.
    Responder,
    /// Team manager.
    Manager,
}

#[derive(Debug, Serialize)]
struct TeamRoleRequest {
    role: TeamRole,
}

/// Team member entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member user.
    pub user: UserReference,
    /// Role within the team.
    pub role: TeamRole,
}

/// Filters for listing teams.
#[derive(Debug, Clone, Default)]
pub struct ListTeamsOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Name filter.
    pub query: Option<String>,
}

impl ListTeamsOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .opt("query", self.query.as_deref())
            .build()
    }
}

/// Response for listing teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTeamsResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Teams in this page.
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Response for listing team members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMembersResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Members in this page.
    #[serde(default)]
    pub members: Vec<Member>,
}
