//! On-call schedule operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use crate::types::{EscalationPolicyReference, TeamReference, UserReference, UserReferenceWrapper};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Service for schedule operations.
pub struct SchedulesService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> SchedulesService<'a> {
    /// Creates a new schedules service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists schedules.
    pub async fn list(
        &self,
        options: &ListSchedulesOptions,
    ) -> PagerDutyResult<ListSchedulesResponse> {
        self.client
            .get_with_params("/schedules", &options.to_query())
            .await
    }

    /// Creates a schedule.
    pub async fn create(&self, schedule: &Schedule) -> PagerDutyResult<Schedule> {
        let body = SchedulePayload {
            schedule: schedule.clone(),
        };
        let payload: SchedulePayload = self.client.post("/schedules", &body).await?;
        Ok(payload.schedule)
    }

    /// Gets a schedule.
    pub async fn get(&self, id: &str) -> PagerDutyResult<Schedule> {
        let payload: SchedulePayload = self.client.get(&format!("/schedules/{}", id)).await?;
        Ok(payload.schedule)
    }

    /// Updates a schedule.
    pub async fn update(&self, id: &str, schedule: &Schedule) -> PagerDutyResult<Schedule> {
        let body = SchedulePayload {
            schedule: schedule.clone(),
        };
        let payload: SchedulePayload = self
            .client
            .put(&format!("/schedules/{}", id), &body)
            .await?;
        Ok(payload.schedule)
    }

    /// Deletes a schedule.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client.delete(&format!("/schedules/{}", id)).await
    }

    // Overrides

    /// Lists overrides in a time window.
    pub async fn list_overrides(
        &self,
        schedule_id: &str,
        options: &ListOverridesOptions,
    ) -> PagerDutyResult<ListOverridesResponse> {
        self.client
            .get_with_params(
                &format!("/schedules/{}/overrides", schedule_id),
                &options.to_query(),
            )
            .await
    }

    /// Creates an override.
    pub async fn create_override(
        &self,
        schedule_id: &str,
        schedule_override: &Override,
    ) -> PagerDutyResult<Override> {
        let body = OverridePayload {
            r#override: schedule_override.clone(),
        };
        let payload: OverridePayload = self
            .client
            .post(&format!("/schedules/{}/overrides", schedule_id), &body)
            .await?;
        Ok(payload.r#override)
    }

    /// Deletes an override.
    pub async fn delete_override(
        &self,
        schedule_id: &str,
        override_id: &str,
    ) -> PagerDutyResult<ApiResponse> {
        self.client
            .delete(&format!(
                "/schedules/{}/overrides/{}",
                schedule_id, override_id
            ))
            .await
    }
}

/// On-call schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Schedule ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<String>,
    /// Schedule name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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
    /// IANA time zone the layers are rendered in.
    #[serde(default)]
    pub time_zone: String,
    /// Rotation layers, later layers take precedence.
    #[serde(default)]
    pub schedule_layers: Vec<ScheduleLayer>,
    /// Policies using this schedule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub escalation_policies: Vec<EscalationPolicyReference>,
    /// Users on the schedule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserReference>,
    /// Owning teams.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamReference>,
}

/// One rotation layer of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLayer {
    /// Layer ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Start of the layer.
    pub start: String,
    /// End of the layer, open-ended when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Effective start of the rotation.
    pub rotation_virtual_start: String,
    /// Length of one on-call turn.
    pub rotation_turn_length_seconds: u32,
    /// Users in rotation order.
    #[serde(default)]
    pub users: Vec<UserReferenceWrapper>,
    /// Windows the layer is restricted to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<Restriction>,
}

/// Time restriction on a schedule layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restriction {
    /// `daily_restriction` or `weekly_restriction`.
    #[serde(rename = "type")]
    pub restriction_type: String,
    /// Start time, `HH:MM:SS`.
    pub start_time_of_day: String,
    /// Length of the window.
    pub duration_seconds: u32,
    /// ISO weekday (1 = Monday) for weekly restrictions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_day_of_week: Option<u32>,
}

/// `{"schedule": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePayload {
    /// Wrapped schedule.
    pub schedule: Schedule,
}

/// Temporary replacement of the on-call user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    /// Override ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Start of the override.
    pub start: String,
    /// End of the override.
    pub end: String,
    /// User on call during the override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserReference>,
}

/// `{"override": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverridePayload {
    /// Wrapped override.
    pub r#override: Override,
}

/// Filters for listing schedules.
#[derive(Debug, Clone, Default)]
pub struct ListSchedulesOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Name filter.
    pub query: Option<String>,
    /// Related resources to include.
    pub include: Vec<String>,
}

impl ListSchedulesOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .opt("query", self.query.as_deref())
            .list("include", &self.include)
            .build()
    }
}

/// Response for listing schedules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSchedulesResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Schedules in this page.
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// Time window for listing overrides.
#[derive(Debug, Clone)]
pub struct ListOverridesOptions {
    /// Window start.
    pub since: DateTime<Utc>,
    /// Window end.
    pub until: DateTime<Utc>,
    /// Only overrides that can still be edited.
    pub editable: Option<bool>,
    /// Return overrides that extend past the window without truncation.
    pub overflow: Option<bool>,
}

impl ListOverridesOptions {
    /// Creates options for a time window.
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self {
            since,
            until,
            editable: None,
            overflow: None,
        }
    }

    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (
                "since".to_string(),
                self.since.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            (
                "until".to_string(),
                self.until.to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        ];
        if let Some(editable) = self.editable {
            params.push(("editable".to_string(), editable.to_string()));
        }
        if let Some(overflow) = self.overflow {
            params.push(("overflow".to_string(), overflow.to_string()));
        }
        params
    }
}

/// Response for listing overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOverridesResponse {
    /// Overrides in the window.
    #[serde(default)]
    pub overrides: Vec<Override>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_override_envelope_key() {
        let payload = OverridePayload {
            r#override: Override {
                id: None,
                start: "2024-01-01T09:00:00Z".to_string(),
                end: "2024-01-01T17:00:00Z".to_string(),
                user: Some(UserReference::new("PEYSGVF", "user_reference")),
            },
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "override": {
                    "start": "2024-01-01T09:00:00Z",
                    "end": "2024-01-01T17:00:00Z",
                    "user": {"id": "PEYSGVF", "type": "user_reference"}
                }
            })
        );
    }

    #[test]
    fn test_list_overrides_query() {
        let options = ListOverridesOptions {
            editable: Some(true),
            ..ListOverridesOptions::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap(),
            )
        };

        assert_eq!(
            options.to_query(),
            vec![
                ("since".to_string(), "2024-01-01T00:00:00Z".to_string()),
                ("until".to_string(), "2024-01-08T00:00:00Z".to_string()),
                ("editable".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_decode_schedule_layers() {
        let value = json!({
            "schedule": {
                "id": "PI7DH85",
                "type": "schedule",
                "name": "Daily Engineering Rotation",
                "time_zone": "America/New_York",
                "schedule_layers": [{
                    "name": "Night Shift",
                    "start": "2015-11-06T20:00:00-05:00",
                    "rotation_virtual_start": "2015-11-06T20:00:00-05:00",
                    "rotation_turn_length_seconds": 86400,
                    "users": [{"user": {"id": "PXPGF42", "type": "user_reference"}}],
                    "restrictions": [{
                        "type": "daily_restriction",
                        "start_time_of_day": "08:00:00",
                        "duration_seconds": 32400
                    }]
                }]
            }
        });

        let payload: SchedulePayload = serde_json::from_value(value.clone()).unwrap();
        let layer = &payload.schedule.schedule_layers[0];
        assert_eq!(layer.rotation_turn_length_seconds, 86400);
        assert_eq!(layer.restrictions[0].duration_seconds, 32400);
        assert_eq!(serde_json::to_value(&payload).unwrap(), value);
    }
}
