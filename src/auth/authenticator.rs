//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing IAM token
//! refresh.

use super::types::{AuthConfig, CachedToken, DEFAULT_IAM_URL};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const IAM_TOKEN_PATH: &str = "/identity/token";

/// Authenticator handles applying authentication to HTTP requests
///
/// Clones share the token cache.
#[derive(Clone)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached IAM access token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Check that the configuration carries usable credentials
    pub fn validate(&self) -> Result<()> {
        match &self.config {
            AuthConfig::None => Ok(()),
            AuthConfig::Basic { username, password } => {
                check_credential("username", username)?;
                check_credential("password", password)
            }
            AuthConfig::BearerToken { token } => {
                if token.is_empty() {
                    return Err(Error::missing_field("BEARER_TOKEN"));
                }
                Ok(())
            }
            AuthConfig::Iam {
                apikey,
                client_id,
                client_secret,
                ..
            } => {
                if apikey.is_empty() {
                    return Err(Error::missing_field("APIKEY"));
                }
                check_credential("apikey", apikey)?;
                if client_id.is_some() != client_secret.is_some() {
                    return Err(Error::auth(
                        "client_id and client_secret must be provided together",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::BearerToken { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            } => {
                let base = url.as_deref().unwrap_or(DEFAULT_IAM_URL);
                self.fetch_iam_token(
                    base,
                    apikey,
                    client_id.as_deref().zip(client_secret.as_deref()),
                    scope.as_deref(),
                )
                .await
            }
            _ => Err(Error::auth("Token refresh not supported for this auth type")),
        }
    }

    /// Exchange an API key for an IAM access token
    async fn fetch_iam_token(
        &self,
        base_url: &str,
        apikey: &str,
        client: Option<(&str, &str)>,
        scope: Option<&str>,
    ) -> Result<CachedToken> {
        let token_url = iam_token_url(base_url);
        debug!("Requesting IAM access token from {}", token_url);

        let mut form = vec![
            ("grant_type", IAM_GRANT_TYPE),
            ("apikey", apikey),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form);
        if let Some((id, secret)) = client {
            req = req.basic_auth(id, Some(secret));
        }

        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "IAM token request failed with status {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(Error::Http)?;
        let token_response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::auth(format!("invalid IAM token response: {e}")))?;
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token, forcing a refresh on the next request
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.config {
            AuthConfig::None => "none",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::BearerToken { .. } => "bearer_token",
            AuthConfig::Iam { .. } => "iam",
        };
        f.debug_struct("Authenticator")
            .field("type", &kind)
            .finish_non_exhaustive()
    }
}

/// Basic-auth style credentials may not be empty or contain braces/quotes,
/// which almost always mean an unrendered placeholder
fn check_credential(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::missing_field(field));
    }
    if value.starts_with(['{', '"']) || value.ends_with(['}', '"']) {
        return Err(Error::invalid_value(
            field,
            "must not be wrapped in braces or quotes",
        ));
    }
    Ok(())
}

fn iam_token_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with(IAM_TOKEN_PATH) {
        base.to_string()
    } else {
        format!("{base}{IAM_TOKEN_PATH}")
    }
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry as a unix timestamp
    #[serde(default)]
    expiration: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match (self.expiration, self.expires_in) {
            (Some(ts), _) => CachedToken::expires_at_unix(self.access_token, ts),
            (None, Some(secs)) => CachedToken::expires_in(self.access_token, secs),
            (None, None) => CachedToken::new(self.access_token, None),
        }
    }
}
