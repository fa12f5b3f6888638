//! Add-on operations.

use crate::client::{ApiResponse, PagerDutyClient};
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use crate::types::ServiceReference;
use serde::{Deserialize, Serialize};

/// Service for add-on operations.
pub struct AddonsService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> AddonsService<'a> {
    /// Creates a new add-ons service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists installed add-ons.
    pub async fn list(&self, options: &ListAddonsOptions) -> PagerDutyResult<ListAddonsResponse> {
        self.client
            .get_with_params("/addons", &options.to_query())
            .await
    }

    /// Installs an add-on.
    pub async fn create(&self, addon: &Addon) -> PagerDutyResult<Addon> {
        let payload: AddonPayload = self
            .client
            .post("/addons", &AddonPayload { addon: addon.clone() })
            .await?;
        Ok(payload.addon)
    }

    /// Gets an add-on.
    pub async fn get(&self, id: &str) -> PagerDutyResult<Addon> {
        let payload: AddonPayload = self.client.get(&format!("/addons/{}", id)).await?;
        Ok(payload.addon)
    }

    /// Updates an add-on.
    pub async fn update(&self, id: &str, addon: &Addon) -> PagerDutyResult<Addon> {
        let payload: AddonPayload = self
            .client
            .put(&format!("/addons/{}", id), &AddonPayload { addon: addon.clone() })
            .await?;
        Ok(payload.addon)
    }

    /// Removes an add-on.
    pub async fn delete(&self, id: &str) -> PagerDutyResult<ApiResponse> {
        self.client.delete(&format!("/addons/{}", id)).await
    }
}

/// Installed add-on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Add-on ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Source URL loaded in an iframe.
    #[serde(default)]
    pub src: String,
    /// `full_page_addon` or `incident_show_addon`.
    #[serde(rename = "type", default)]
    pub addon_type: String,
    /// Summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// API URL.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Web UI URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Services the add-on is attached to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceReference>,
}

/// `{"addon": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonPayload {
    /// Wrapped add-on.
    pub addon: Addon,
}

/// Filters for listing add-ons.
#[derive(Debug, Clone, Default)]
pub struct ListAddonsOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Related resources to include.
    pub include: Vec<String>,
    /// Only add-ons attached to these services.
    pub service_ids: Vec<String>,
    /// Add-on type filter.
    pub filter: Option<String>,
}

impl ListAddonsOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .list("include", &self.include)
            .list("service_ids", &self.service_ids)
            .opt("filter", self.filter.as_deref())
            .build()
    }
}

/// Response for listing add-ons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAddonsResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Add-ons in this page.
    #[serde(default)]
    pub addons: Vec<Addon>,
}
