//! Configuration Aggregator service client

use super::endpoint::{DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL};
use super::options::{
    GetResourceCollectionStatusOptions, GetSettingsOptions, ListConfigsOptions,
    ManualReconcileOptions, ReplaceSettingsOptions,
};
use crate::auth::AuthConfig;
use crate::config::ServiceProperties;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::models::{ListConfigsResponse, ManualReconcileResponse, SettingsResponse, StatusResponse};
use crate::pagination::{ConfigsPager, ListConfigs};
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Header identifying the SDK operation for service-side analytics
pub const ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

const SERVICE_VERSION: &str = "V1";

/// Settings used to build a [`ConfigurationAggregatorClient`]
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Service endpoint; [`DEFAULT_SERVICE_URL`] when unset
    pub url: Option<String>,
    /// Credentials
    pub auth: AuthConfig,
    /// Transport settings (timeouts, retries, default headers)
    pub http: HttpClientConfig,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    #[must_use]
    pub fn http(mut self, http: HttpClientConfig) -> Self {
        self.http = http;
        self
    }
}

/// Client for the Configuration Aggregator REST API
///
/// Cloning is cheap; clones share the connection pool and the IAM token
/// cache.
#[derive(Debug, Clone)]
pub struct ConfigurationAggregatorClient {
    http: HttpClient,
}

impl ConfigurationAggregatorClient {
    /// Build a client from explicit options
    pub fn new(options: ClientOptions) -> Result<Self> {
        let url = validate_service_url(options.url.as_deref().unwrap_or(DEFAULT_SERVICE_URL))?;

        let mut http_config = options.http;
        http_config.base_url = Some(url);

        let http = HttpClient::with_auth(http_config, options.auth)?;
        http.authenticator().validate()?;

        Ok(Self { http })
    }

    /// Build a client from the credentials file or environment
    ///
    /// Explicit `url` and non-`None` `auth` in `options` take precedence over
    /// the loaded properties.
    pub fn from_external_config(options: ClientOptions) -> Result<Self> {
        let properties = ServiceProperties::load(DEFAULT_SERVICE_NAME)?;
        Self::from_properties(&properties, options)
    }

    /// Build a client from already loaded service properties
    pub fn from_properties(properties: &ServiceProperties, options: ClientOptions) -> Result<Self> {
        let auth = if options.auth.is_none() {
            properties.auth_config()?
        } else {
            options.auth
        };
        let url = options
            .url
            .or_else(|| properties.url().map(str::to_string));

        let mut http = options.http;
        if let Some(retry) = properties.retry_settings()? {
            http.max_retries = retry.max_retries;
            http.max_backoff = retry.max_interval;
        }

        Self::new(ClientOptions { url, auth, http })
    }

    /// The endpoint requests are sent to
    pub fn service_url(&self) -> &str {
        self.http
            .config()
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVICE_URL)
    }

    /// Point the client at another endpoint
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        let url = validate_service_url(url)?;
        self.http.set_base_url(url);
        Ok(())
    }

    /// The underlying transport
    pub fn http_client(&self) -> &HttpClient {
        &self.http
    }

    /// List one page of collected resource configurations
    pub async fn list_configs(&self, options: &ListConfigsOptions) -> Result<ListConfigsResponse> {
        options.validate()?;

        let mut config = operation_config("ListConfigs", &options.headers, options.timeout);
        for (key, value) in options.query_params() {
            config = config.query(key, value);
        }

        debug!(
            "Listing configs (start: {:?}, limit: {:?})",
            options.start, options.limit
        );
        self.http.request_json(Method::GET, "configs", config).await
    }

    /// A pager over every page matching `options`
    pub fn configs_pager(&self, options: &ListConfigsOptions) -> Result<ConfigsPager<'_, Self>> {
        ConfigsPager::new(self, options)
    }

    /// Replace the collection settings
    pub async fn replace_settings(&self, options: &ReplaceSettingsOptions) -> Result<SettingsResponse> {
        let body = serde_json::to_value(options)?;
        let config = operation_config("ReplaceSettings", &options.headers, options.timeout).json(body);

        debug!("Replacing settings");
        self.http.request_json(Method::PUT, "settings", config).await
    }

    /// Read the collection settings
    pub async fn get_settings(&self, options: &GetSettingsOptions) -> Result<SettingsResponse> {
        let config = operation_config("GetSettings", &options.headers, options.timeout);
        self.http.request_json(Method::GET, "settings", config).await
    }

    /// Read the status of resource collection
    pub async fn get_resource_collection_status(
        &self,
        options: &GetResourceCollectionStatusOptions,
    ) -> Result<StatusResponse> {
        let config = operation_config(
            "GetResourceCollectionStatus",
            &options.headers,
            options.timeout,
        );
        self.http
            .request_json(Method::GET, "resource_collection_status", config)
            .await
    }

    /// Ask the service to reconcile collected configurations now
    pub async fn manual_reconcile(
        &self,
        options: &ManualReconcileOptions,
    ) -> Result<ManualReconcileResponse> {
        let config = operation_config("ManualReconcile", &options.headers, options.timeout);

        debug!("Triggering manual reconcile");
        self.http.request_json(Method::POST, "reconcile", config).await
    }
}

#[async_trait]
impl ListConfigs for ConfigurationAggregatorClient {
    async fn list_configs(&self, options: &ListConfigsOptions) -> Result<ListConfigsResponse> {
        ConfigurationAggregatorClient::list_configs(self, options).await
    }
}

/// Headers every operation sends, followed by the caller's own
fn operation_config(
    operation_id: &str,
    headers: &HashMap<String, String>,
    timeout: Option<Duration>,
) -> RequestConfig {
    RequestConfig::new()
        .header("Accept", "application/json")
        .header(ANALYTICS_HEADER, analytics_header_value(operation_id))
        .headers(headers)
        .timeout(timeout)
}

pub(crate) fn analytics_header_value(operation_id: &str) -> String {
    format!(
        "service_name={DEFAULT_SERVICE_NAME};service_version={SERVICE_VERSION};operation_id={operation_id}"
    )
}

/// Parse `url` as an absolute http(s) URL, trimming a trailing slash
fn validate_service_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::invalid_value(
            "url",
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
