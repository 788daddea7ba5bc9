//! Per-operation request options
//!
//! Each operation takes one options struct. All of them carry extra
//! `headers` (applied after the client's own) and an optional per-call
//! `timeout`.

use crate::error::{Error, Result};
use crate::models::AdditionalScope;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Implements the `header`/`timeout` builder methods shared by every options
/// struct
macro_rules! common_options {
    ($name:ident) => {
        impl $name {
            /// Add a header sent with this call only
            #[must_use]
            pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.headers.insert(key.into(), value.into());
                self
            }

            /// Replace the per-call headers
            #[must_use]
            pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
                self.headers = headers;
                self
            }

            /// Abort the call after `timeout`
            #[must_use]
            pub fn timeout(mut self, timeout: Duration) -> Self {
                self.timeout = Some(timeout);
                self
            }
        }
    };
}

// ============================================================================
// List configs
// ============================================================================

/// Filters and cursor for `GET /configs`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConfigsOptions {
    /// Resource type, e.g. `is.vpc`
    pub config_type: Option<String>,
    pub service_name: Option<String>,
    pub resource_group_id: Option<String>,
    pub location: Option<String>,
    pub resource_crn: Option<String>,
    /// Page size; server default when unset
    pub limit: Option<i64>,
    /// Opaque cursor of the page to fetch
    pub start: Option<String>,
    /// Enterprise child account to list from
    pub sub_account: Option<String>,
    pub access_tags: Option<String>,
    pub user_tags: Option<String>,
    pub service_tags: Option<String>,

    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl ListConfigsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config_type(mut self, value: impl Into<String>) -> Self {
        self.config_type = Some(value.into());
        self
    }

    #[must_use]
    pub fn service_name(mut self, value: impl Into<String>) -> Self {
        self.service_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn resource_group_id(mut self, value: impl Into<String>) -> Self {
        self.resource_group_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = Some(value.into());
        self
    }

    #[must_use]
    pub fn resource_crn(mut self, value: impl Into<String>) -> Self {
        self.resource_crn = Some(value.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn start(mut self, cursor: impl Into<String>) -> Self {
        self.start = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn sub_account(mut self, value: impl Into<String>) -> Self {
        self.sub_account = Some(value.into());
        self
    }

    #[must_use]
    pub fn access_tags(mut self, value: impl Into<String>) -> Self {
        self.access_tags = Some(value.into());
        self
    }

    #[must_use]
    pub fn user_tags(mut self, value: impl Into<String>) -> Self {
        self.user_tags = Some(value.into());
        self
    }

    #[must_use]
    pub fn service_tags(mut self, value: impl Into<String>) -> Self {
        self.service_tags = Some(value.into());
        self
    }

    /// Check the options before anything is sent
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.limit {
            if limit <= 0 {
                return Err(Error::invalid_value(
                    "limit",
                    format!("must be a positive integer, got {limit}"),
                ));
            }
        }
        Ok(())
    }

    /// Query parameters in wire order; unset filters are omitted
    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let string_params = [
            ("config_type", &self.config_type),
            ("service_name", &self.service_name),
            ("resource_group_id", &self.resource_group_id),
            ("location", &self.location),
            ("resource_crn", &self.resource_crn),
        ];
        let tail_params = [
            ("start", &self.start),
            ("sub_account", &self.sub_account),
            ("access_tags", &self.access_tags),
            ("user_tags", &self.user_tags),
            ("service_tags", &self.service_tags),
        ];

        let mut params: Vec<(&'static str, String)> = string_params
            .into_iter()
            .filter_map(|(k, v)| v.clone().map(|v| (k, v)))
            .collect();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params.extend(
            tail_params
                .into_iter()
                .filter_map(|(k, v)| v.clone().map(|v| (k, v))),
        );
        params
    }
}

common_options!(ListConfigsOptions);

// ============================================================================
// Settings
// ============================================================================

/// Body and call options for `PUT /settings`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceSettingsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_collection_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_profile_id: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_scope: Vec<AdditionalScope>,

    #[serde(skip)]
    pub headers: HashMap<String, String>,

    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl ReplaceSettingsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn resource_collection_enabled(mut self, enabled: bool) -> Self {
        self.resource_collection_enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trusted_profile_id(mut self, id: impl Into<String>) -> Self {
        self.trusted_profile_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn additional_scope(mut self, scope: AdditionalScope) -> Self {
        self.additional_scope.push(scope);
        self
    }
}

common_options!(ReplaceSettingsOptions);

/// Call options for `GET /settings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSettingsOptions {
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl GetSettingsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

common_options!(GetSettingsOptions);

/// Call options for `GET /resource_collection_status`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetResourceCollectionStatusOptions {
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl GetResourceCollectionStatusOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

common_options!(GetResourceCollectionStatusOptions);

/// Call options for `POST /reconcile`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualReconcileOptions {
    pub headers: HashMap<String, String>,
    pub timeout: Option<Duration>,
}

impl ManualReconcileOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

common_options!(ManualReconcileOptions);
