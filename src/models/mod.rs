//! Request and response models
//!
//! Serde types mirroring the Configuration Aggregator JSON contract.
//! Optional response fields are `Option` so that partial payloads from the
//! service still decode.

mod configs;
mod settings;

pub use configs::{
    About, Config, ListConfigsResponse, PaginatedFirst, PaginatedNext, PaginatedPrevious,
};
pub use settings::{
    AdditionalScope, CollectionStatus, ManualReconcileResponse, ProfileTemplate,
    SettingsResponse, StatusResponse,
};
