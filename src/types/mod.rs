//! Reference types shared across PagerDuty resources.
//!
//! A reference points at another resource by ID and URL without owning it.
//! Every kind shares the same JSON shape, so the named kinds are aliases of
//! [`ResourceReference`].

use serde::{Deserialize, Serialize};

/// Lightweight pointer to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// Web UI URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    /// Resource ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// API URL of the resource.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Reference type, e.g. `user_reference`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,
}

impl ResourceReference {
    /// Creates a reference from an ID and a reference type.
    pub fn new(id: impl Into<String>, ref_type: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ref_type: Some(ref_type.into()),
            ..Default::default()
        }
    }

    /// Gets the referenced ID.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Reference to a user.
pub type UserReference = ResourceReference;
/// Reference to an escalation policy.
pub type EscalationPolicyReference = ResourceReference;
/// Reference to a schedule.
pub type ScheduleReference = ResourceReference;
/// Reference to a team.
pub type TeamReference = ResourceReference;
/// Reference to a contact method.
pub type ContactMethodReference = ResourceReference;
/// Reference to an add-on.
pub type AddonReference = ResourceReference;
/// Reference to a service.
pub type ServiceReference = ResourceReference;
/// Reference to an integration.
pub type IntegrationReference = ResourceReference;
/// Reference to an escalation target (user or schedule).
pub type EscalationTargetReference = ResourceReference;
/// Reference to a vendor.
pub type VendorReference = ResourceReference;

/// `{"user": {...}}` wrapper used by schedule layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReferenceWrapper {
    /// Wrapped user reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserReference>,
}

impl From<UserReference> for UserReferenceWrapper {
    fn from(user: UserReference) -> Self {
        Self { user: Some(user) }
    }
}
