//! HTTP client module
//!
//! Provides the HTTP transport shared by every service operation.
//!
//! # Features
//!
//! - **Automatic Retries**: Opt-in retry on 429/5xx and connection failures
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Integration with auth module
//! - **Error Extraction**: IBM Cloud error bodies become readable messages

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
