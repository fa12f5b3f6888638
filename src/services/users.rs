//! User and contact method operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use crate::types::{ContactMethodReference, ResourceReference, TeamReference};
use serde::{Deserialize, Serialize};

/// Service for user operations.
pub struct UsersService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> UsersService<'a> {
    /// Creates a new users service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists users.
    pub async fn list(&self, options: &ListUsersOptions) -> PagerDutyResult<ListUsersResponse> {
        self.client
            .get_with_params("/users", &options.to_query())
            .await
    }

    /// Creates a user.
    pub async fn create(&self, user: &User) -> PagerDutyResult<User> {
        let payload: UserPayload = self
            .client
            .post("/users", &UserPayload { user: user.clone() })
            .await?;
        Ok(payload.user)
    }

    /// Gets a user.
    pub async fn get(&self, id: &str) -> PagerDutyResult<User> {
        let payload: UserPayload = self.client.get(&format!("/users/{}", id)).await?;
        Ok(payload.user)
    }

    /// Updates a user.
    pub async fn update(&self, id: &str, user: &User) -> PagerDutyResult<User> {
        let payload: UserPayload = self
            .client
            .put(&format!("/users/{}", id), &UserPayload { user: user.clone() })
            .await?;
        Ok(payload.user)
    }

    /// Deletes a user.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client.delete(&format!("/users/{}", id)).await
    }

    // Contact methods

    /// Lists a user's contact methods.
    pub async fn list_contact_methods(
        &self,
        user_id: &str,
    ) -> PagerDutyResult<ListContactMethodsResponse> {
        self.client
            .get(&format!("/users/{}/contact_methods", user_id))
            .await
    }

    /// Creates a contact method.
    pub async fn create_contact_method(
        &self,
        user_id: &str,
        contact_method: &ContactMethod,
    ) -> PagerDutyResult<ContactMethod> {
        let body = ContactMethodPayload {
            contact_method: contact_method.clone(),
        };
        let payload: ContactMethodPayload = self
            .client
            .post(&format!("/users/{}/contact_methods", user_id), &body)
            .await?;
        Ok(payload.contact_method)
    }

    /// Gets a contact method.
    pub async fn get_contact_method(
        &self,
        user_id: &str,
        contact_method_id: &str,
    ) -> PagerDutyResult<ContactMethod> {
        let payload: ContactMethodPayload = self
            .client
            .get(&format!(
                "/users/{}/contact_methods/{}",
                user_id, contact_method_id
            ))
            .await?;
        Ok(payload.contact_method)
    }

    /// Updates a contact method.
    pub async fn update_contact_method(
        &self,
        user_id: &str,
        contact_method_id: &str,
        contact_method: &ContactMethod,
    ) -> PagerDutyResult<ContactMethod> {
        let body = ContactMethodPayload {
            contact_method: contact_method.clone(),
        };
        let payload: ContactMethodPayload = self
            .client
            .put(
                &format!("/users/{}/contact_methods/{}", user_id, contact_method_id),
                &body,
            )
            .await?;
        Ok(payload.contact_method)
    }

    /// Deletes a contact method.
    pub async fn delete_contact_method(
        &self,
        user_id: &str,
        contact_method_id: &str,
    ) -> PagerDutyResult<ApiResponse> {
        self.client
            .delete(&format!(
                "/users/{}/contact_methods/{}",
                user_id, contact_method_id
            ))
            .await
    }
}

/// PagerDuty user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Full name.
    #[serde(default)]
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// API URL.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Web UI URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Preferred time zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Schedule color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Account role, e.g. `user` or `admin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Bio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the invitation email went out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invitation_sent: Option<bool>,
    /// Job title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    /// Teams the user belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamReference>,
    /// Contact methods.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact_methods: Vec<ContactMethodReference>,
    /// Notification rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notification_rules: Vec<ResourceReference>,
}

/// `{"user": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    /// Wrapped user.
    pub user: User,
}

/// Contact method of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethod {
    /// Contact method ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `email_contact_method`, `phone_contact_method`, `sms_contact_method`
    /// or `push_notification_contact_method`.
    #[serde(rename = "type", default)]
    pub contact_type: String,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// API URL.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Web UI URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Label, e.g. `Work`.
    #[serde(default)]
    pub label: String,
    /// Address: email, phone number or device token.
    #[serde(default)]
    pub address: String,
    /// Send an abbreviated email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_short_email: Option<bool>,
    /// Phone country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<u32>,
    /// Whether the address has been blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklisted: Option<bool>,
    /// Whether SMS/phone is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// `{"contact_method": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMethodPayload {
    /// Wrapped contact method.
    pub contact_method: ContactMethod,
}

/// Filters for listing users.
#[derive(Debug, Clone, Default)]
pub struct ListUsersOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Name or email filter.
    pub query: Option<String>,
    /// Users in these teams.
    pub team_ids: Vec<String>,
    /// Related resources to include.
    pub include: Vec<String>,
}

impl ListUsersOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .opt("query", self.query.as_deref())
            .list("team_ids", &self.team_ids)
            .list("include", &self.include)
            .build()
    }
}

/// Response for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Users in this page.
    #[serde(default)]
    pub users: Vec<User>,
}

/// Response for listing contact methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListContactMethodsResponse {
    /// Contact methods of the user.
    #[serde(default)]
    pub contact_methods: Vec<ContactMethod>,
}
