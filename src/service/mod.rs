//! Service module
//!
//! `ConfigurationAggregatorClient` exposes one method per REST operation:
//!
//! | Method | Endpoint |
//! |---|---|
//! | `list_configs` | `GET /configs` |
//! | `replace_settings` | `PUT /settings` |
//! | `get_settings` | `GET /settings` |
//! | `get_resource_collection_status` | `GET /resource_collection_status` |
//! | `manual_reconcile` | `POST /reconcile` |

mod client;
mod endpoint;
mod options;

pub use client::{ClientOptions, ConfigurationAggregatorClient, ANALYTICS_HEADER};
pub use endpoint::{
    construct_service_url, service_url_for_region, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL,
};
pub use options::{
    GetResourceCollectionStatusOptions, GetSettingsOptions, ListConfigsOptions,
    ManualReconcileOptions, ReplaceSettingsOptions,
};

#[cfg(test)]
mod tests;
