//! Settings, collection status and reconcile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Collection settings as returned by `GET`/`PUT /settings`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_collection_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_profile_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    #[serde(default)]
    pub regions: Vec<String>,

    #[serde(default)]
    pub additional_scope: Vec<AdditionalScope>,
}

/// An extra scope (for example an enterprise) to collect from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionalScope {
    /// Scope type, e.g. `Enterprise`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scope_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enterprise_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_template: Option<ProfileTemplate>,
}

impl AdditionalScope {
    /// Enterprise scope for the given enterprise id
    pub fn enterprise(enterprise_id: impl Into<String>) -> Self {
        Self {
            scope_type: Some("Enterprise".to_string()),
            enterprise_id: Some(enterprise_id.into()),
            profile_template: None,
        }
    }

    /// Attach a trusted profile template
    #[must_use]
    pub fn with_profile_template(mut self, template: ProfileTemplate) -> Self {
        self.profile_template = Some(template);
        self
    }
}

/// Trusted profile template used for an additional scope
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_profile_id: Option<String>,
}

impl ProfileTemplate {
    pub fn new(id: impl Into<String>, trusted_profile_id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            trusted_profile_id: Some(trusted_profile_id.into()),
        }
    }
}

/// Response of `GET /resource_collection_status`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_config_refresh_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CollectionStatus>,
}

/// State of resource collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Initiated,
    #[serde(rename = "inprogress")]
    InProgress,
    Complete,
    /// A status this client version does not know
    #[serde(other)]
    Unknown,
}

/// Response of `POST /reconcile`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManualReconcileResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
