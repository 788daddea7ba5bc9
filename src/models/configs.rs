//! Resource configuration listing models

use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page returned by `GET /configs`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListConfigsResponse {
    /// Link to the previous page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PaginatedPrevious>,

    /// Link to the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PaginatedNext>,

    /// Link to the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<PaginatedFirst>,

    /// Page size the server applied
    #[serde(default)]
    pub limit: i64,

    /// Total number of items across all pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,

    /// Items on this page
    #[serde(default)]
    pub configs: Vec<Config>,
}

impl ListConfigsResponse {
    /// The `start` cursor of the next page, exactly as the server sent it
    pub fn next_start(&self) -> Option<&str> {
        self.next.as_ref().and_then(|n| n.start.as_deref())
    }
}

/// Link to the first page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginatedFirst {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Link to the next page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginatedNext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Opaque cursor to pass as `start`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

/// Link to the previous page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginatedPrevious {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
}

/// A collected resource configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Resource metadata
    #[serde(default)]
    pub about: About,

    /// Configuration payload, opaque to the client
    #[serde(default)]
    pub config: JsonValue,

    /// Newer configuration payload format, when the service provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_v2: Option<JsonValue>,
}

/// Metadata describing the resource a [`Config`] was collected from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct About {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_crn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,

    /// When the service last refreshed this configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_config_refresh_time: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Sent as a string or a list depending on the resource type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_tags: Option<JsonValue>,
}
