//! Vendor operations.

use crate::client::PagerDutyClient;
use crate::errors::PagerDutyResult;
use crate::pagination::{Pagination, QueryBuilder};
use serde::{Deserialize, Serialize};

/// Service for vendor lookups.
pub struct VendorsService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> VendorsService<'a> {
    /// Creates a new vendors service.
    pub fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// Lists vendors.
    pub async fn list(&self, options: &ListVendorsOptions) -> PagerDutyResult<ListVendorsResponse> {
        self.client
            .get_with_params("/vendors", &options.to_query())
            .await
    }

    /// Gets a vendor.
    pub async fn get(&self, id: &str) -> PagerDutyResult<Vendor> {
        let payload: VendorPayload = self.client.get(&format!("/vendors/{}", id)).await?;
        Ok(payload.vendor)
    }
}

/// Integration vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Vendor ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Object type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vendor_type: Option<String>,
    /// Vendor name.
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
    /// Vendor website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Integration guide URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_guide_url: Option<String>,
    /// Whether the vendor supports connected integrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectable: Option<bool>,
    /// Service type the vendor maps to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_service_type: Option<String>,
}

/// `{"vendor": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPayload {
    /// Wrapped vendor.
    pub vendor: Vendor,
}

/// Filters for listing vendors.
#[derive(Debug, Clone, Default)]
pub struct ListVendorsOptions {
    /// Pagination.
    pub pagination: Pagination,
    /// Name filter.
    pub query: Option<String>,
}

impl ListVendorsOptions {
    /// Converts to query parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        QueryBuilder::new(&self.pagination)
            .opt("query", self.query.as_deref())
            .build()
    }
}

/// Response for listing vendors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListVendorsResponse {
    /// Pagination metadata.
    #[serde(flatten)]
    pub pagination: Pagination,
    /// Vendors in this page.
    #[serde(default)]
    pub vendors: Vec<Vendor>,
}
