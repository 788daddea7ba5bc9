// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Configuration Aggregator client
//!
//! A Rust client for the IBM Cloud Configuration Aggregator REST API:
//! list collected resource configurations, read and replace collection
//! settings, check collection status and trigger a manual reconcile.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Walk every page of `list configs` one page at a
//!   time, as a stream, or all at once
//! - **Multiple Auth Types**: IAM API key, bearer token, basic, none
//! - **External Configuration**: Credentials file or environment variables
//! - **Retries**: Opt-in retry with backoff on 429/5xx
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use configuration_aggregator::{
//!     AuthConfig, ClientOptions, ConfigurationAggregatorClient, ListConfigsOptions, Result,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ConfigurationAggregatorClient::new(
//!         ClientOptions::new()
//!             .url("https://us-south.apprapp.cloud.ibm.com/apprapp/config_aggregator/v1/instances/<id>")
//!             .auth(AuthConfig::iam("<apikey>")),
//!     )?;
//!
//!     let mut pager = client.configs_pager(&ListConfigsOptions::new().limit(100))?;
//!     while pager.has_next() {
//!         for config in pager.next_page().await? {
//!             println!("{:?}", config.about.resource_crn);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                ConfigurationAggregatorClient                    │
//! │  list_configs  replace_settings  get_settings  status  reconcile│
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┼───────────────┬─────────────────┐
//! │  Paginate    │     HTTP      │     Auth      │     Config      │
//! ├──────────────┼───────────────┼───────────────┼─────────────────┤
//! │ ConfigsPager │ Headers       │ IAM API key   │ Credentials file│
//! │ Stream       │ Retry/Backoff │ Bearer        │ Environment     │
//! │ get_all      │ Status errors │ Basic         │                 │
//! └──────────────┴───────────────┴───────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry
pub mod http;

/// Request and response models
pub mod models;

/// Service properties from credentials file or environment
pub mod config;

/// Service client and per-operation options
pub mod service;

/// Cursor pagination over `list configs`
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use models::{Config, ListConfigsResponse, SettingsResponse, StatusResponse};
pub use pagination::{ConfigsPager, ListConfigs};
pub use service::{
    construct_service_url, ClientOptions, ConfigurationAggregatorClient, ListConfigsOptions,
    ReplaceSettingsOptions, DEFAULT_SERVICE_URL,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
