//! Offset pagination for PagerDuty list endpoints.
//!
//! List responses carry `limit`, `offset`, `more` and `total` next to the
//! resource array; requests send the same names as query parameters.

use serde::{Deserialize, Serialize};

/// Maximum page size accepted by the API.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters and response metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Whether more results follow this page.
    #[serde(default)]
    pub more: bool,
    /// Offset of the first item.
    #[serde(default)]
    pub offset: u32,
    /// Total item count. The API only fills this when `total=true` was sent.
    #[serde(default, deserialize_with = "deserialize_total")]
    pub total: u32,
}

fn deserialize_total<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

impl Pagination {
    /// Creates empty pagination parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    /// Sets the offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Asks the API to compute `total`.
    pub fn with_total(mut self) -> Self {
        self.total = 1;
        self
    }

    /// Returns the parameters for the page after this one, if any.
    ///
    /// A zero `limit` cannot advance the offset, so it ends paging.
    pub fn next_page(&self) -> Option<Pagination> {
        if !self.more || self.limit == 0 {
            return None;
        }
        Some(Pagination {
            limit: self.limit,
            offset: self.offset.checked_add(self.limit)?,
            ..Default::default()
        })
    }

    /// Converts to query parameters, skipping zero values.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if self.limit > 0 {
            params.push(("limit".to_string(), self.limit.to_string()));
        }
        if self.more {
            params.push(("more".to_string(), "true".to_string()));
        }
        if self.offset > 0 {
            params.push(("offset".to_string(), self.offset.to_string()));
        }
        if self.total > 0 {
            params.push(("total".to_string(), "true".to_string()));
        }
        params
    }
}

/// Builder-style collector for list query parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Starts from pagination parameters.
    pub fn new(pagination: &Pagination) -> Self {
        Self {
            params: pagination.to_query(),
        }
    }

    /// Adds a scalar parameter when present.
    pub fn opt(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.params.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Adds an array parameter as repeated `name[]` pairs.
    pub fn list(mut self, name: &str, values: &[String]) -> Self {
        let key = format!("{}[]", name);
        for value in values {
            self.params.push((key.clone(), value.clone()));
        }
        self
    }

    /// Finishes the query.
    pub fn build(self) -> Vec<(String, String)> {
        self.params
    }
}
