//! Technical service and integration operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use crate::types::{
    AddonReference, EscalationPolicyReference, IntegrationReference, ServiceReference,
    TeamReference, VendorReference,
};
use serde::{Deserialize, Serialize};

/// Service for technical service operations.
pub struct ServicesService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> ServicesService<'a> {
    /// Creates a new services service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists services.
    pub async fn list(
        &self,
        options: &ListServicesOptions,
    ) -> PagerDutyResult<ListServicesResponse> {
        self.client
            .get_with_params("/services", &options.to_query())
            .await
    }

    /// Creates a service.
    pub async fn create(&self, service: &Service) -> PagerDutyResult<Service> {
        let body = ServicePayload {
            service: service.clone(),
        };
        let payload: ServicePayload = self.client.post("/services", &body).await?;
        Ok(payload.service)
    }

    /// Gets a service.
    pub async fn get(&self, id: &str) -> PagerDutyResult<Service> {
        let payload: ServicePayload = self.client.get(&format!("/services/{}", id)).await?;
        Ok(payload.service)
    }

    /// Updates a service.
    pub async fn update(&self, id: &str, service: &Service) -> PagerDutyResult<Service> {
        let body = ServicePayload {
            service: service.clone(),
        };
        let payload: ServicePayload = self
            .client
            .put(&format!("/services/{}", id), &body)
            .await?;
        Ok(payload.service)
    }

    /// Deletes a service.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client.delete(&format!("/services/{}", id)).await
    }

    // Integrations

    /// Creates an integration on a service.
    pub async fn create_integration(
        &self,
        service_id: &str,
        integration: &Integration,
    ) -> PagerDutyResult<Integration> {
        let body = IntegrationPayload {
            integration: integration.clone(),
        };
        let payload: IntegrationPayload = self
            .client
            .post(&format!("/services/{}/integrations", service_id), &body)
            .await?;
        Ok(payload.integration)
    }

    /// Gets an integration.
    pub async fn get_integration(
        &self,
        service_id: &str,
        integration_id: &str,
    ) -> PagerDutyResult<Integration> {
        let payload: IntegrationPayload = self
            .client
            .get(&format!(
                "/services/{}/integrations/{}",
                service_id, integration_id
            ))
            .await?;
        Ok(payload.integration)
    }

    /// Updates an integration.
    pub async fn update_integration(
        &self,
        service_id: &str,
        integration_id: &str,
        integration: &Integration,
    ) -> PagerDutyResult<Integration> {
        let body = IntegrationPayload {
            integration: integration.clone(),
        };
        let payload: IntegrationPayload = self
            .client
            .put(
                &format!("/services/{}/integrations/{}", service_id, integration_id),
                &body,
            )
            .await?;
        Ok(payload.integration)
    }

    /// Deletes an integration.
    pub async fn delete_integration(
        &self,
        service_id: &str,
        integration_id: &str,
    ) -> PagerDutyResult<ApiResponse> {
        self.client
            .delete(&format!(
                "/services/{}/integrations/{}",
                service_id, integration_id
            ))
            .await
    }
}

/// Technical service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Service ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
    /// Service name.
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
    /// Seconds before an open incident auto-resolves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_resolve_timeout: Option<u32>,
    /// Seconds before an acknowledged incident re-triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement_timeout: Option<u32>,
    /// `active`, `warning`, `critical`, `maintenance` or `disabled`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Time of the most recent incident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_incident_timestamp: Option<String>,
    /// `create_incidents` or `create_alerts_and_incidents`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_creation: Option<String>,
    /// Escalation policy handling incidents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_policy: Option<EscalationPolicyReference>,
    /// Owning teams.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<TeamReference>,
    /// Integrations on the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integrations: Vec<IntegrationReference>,
    /// Add-ons attached to the service.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<AddonReference>,
}

/// `{"service": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePayload {
    /// Wrapped service.
    pub service: Service,
}

/// Inbound integration of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// Integration ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Integration type, e.g. `events_api_v2_inbound_integration`.
    #[serde(rename = "type", default)]
    pub integration_type: String,
    /// Integration name.
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
    /// Routing key for event integrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_key: Option<String>,
    /// Address for email integrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_email: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Owning service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceReference>,
    /// Vendor the integration is built on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<VendorReference>,
}

/// `{"integration": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationPayload {
    /// Wrapped integration.
    pub integration: Integration,
}

/// Filters for listing services.
#[derive(Debug, Clone, Default)]
pub struct ListServicesOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Name filter.
    pub query: Option<String>,
    /// Services owned by these teams.
    pub team_ids: Vec<String>,
    /// Time zone for rendered dates.
    pub time_zone: Option<String>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// Related resources to include.
    pub include: Vec<String>,
}

impl ListServicesOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .opt("query", self.query.as_deref())
            .list("team_ids", &self.team_ids)
            .opt("time_zone", self.time_zone.as_deref())
            .opt("sort_by", self.sort_by.as_deref())
            .list("include", &self.include)
            .build()
    }
}

/// Response for listing services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServicesResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Services in this page.
    #[serde(default)]
    pub services: Vec<Service>,
}
