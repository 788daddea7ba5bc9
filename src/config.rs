//! External configuration
//!
//! Service properties are read from a credentials file or from environment
//! variables. Keys are prefixed with the upper-cased service name, e.g.
//! `CONFIGURATION_AGGREGATOR_APIKEY`; the prefix is stripped on load.
//!
//! Lookup order (first source with any matching key wins):
//! 1. the file named by `IBM_CREDENTIALS_FILE`, else `./ibm-credentials.env`,
//!    else `$HOME/ibm-credentials.env`
//! 2. process environment variables

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::types::{AuthType, OptionStringExt, StringMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit credentials file
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Default credentials file name
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

// ============================================================================
// Property names
// ============================================================================

pub const PROP_URL: &str = "URL";
pub const PROP_AUTH_TYPE: &str = "AUTH_TYPE";
pub const PROP_APIKEY: &str = "APIKEY";
pub const PROP_AUTH_URL: &str = "AUTH_URL";
pub const PROP_CLIENT_ID: &str = "CLIENT_ID";
pub const PROP_CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const PROP_SCOPE: &str = "SCOPE";
pub const PROP_BEARER_TOKEN: &str = "BEARER_TOKEN";
pub const PROP_USERNAME: &str = "USERNAME";
pub const PROP_PASSWORD: &str = "PASSWORD";
pub const PROP_ENABLE_RETRIES: &str = "ENABLE_RETRIES";
pub const PROP_MAX_RETRIES: &str = "MAX_RETRIES";
pub const PROP_RETRY_INTERVAL: &str = "RETRY_INTERVAL";

const DEFAULT_MAX_RETRIES: u32 = 4;
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 30;

/// Retry settings found in service properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub max_interval: Duration,
}

/// Prefix-stripped properties for one service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProperties {
    properties: StringMap,
}

impl ServiceProperties {
    /// Load properties for `service_name` from the credentials file or the
    /// environment
    pub fn load(service_name: &str) -> Result<Self> {
        for path in credential_file_candidates() {
            if path.is_file() {
                let props = Self::from_credentials_file(&path, service_name)?;
                if !props.is_empty() {
                    debug!(
                        "Loaded {} properties for {} from {}",
                        props.len(),
                        service_name,
                        path.display()
                    );
                    return Ok(props);
                }
            }
        }

        let props = Self::from_env_vars(std::env::vars(), service_name);
        debug!(
            "Loaded {} properties for {} from environment",
            props.len(),
            service_name
        );
        Ok(props)
    }

    /// Parse a dotenv-style credentials file
    pub fn from_credentials_file(path: &Path, service_name: &str) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            Error::config(format!(
                "failed to read credentials file {}: {e}",
                path.display()
            ))
        })?;

        let mut pairs = Vec::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                Error::config(format!(
                    "malformed credentials file {}: {e}",
                    path.display()
                ))
            })?;
            pairs.push((key, value));
        }

        Ok(Self::from_env_vars(pairs, service_name))
    }

    /// Filter `KEY=VALUE` pairs down to the ones prefixed for `service_name`
    pub fn from_env_vars<I>(vars: I, service_name: &str) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{}_", env_prefix(service_name));
        let properties = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix)
                    .filter(|k| !k.is_empty())
                    .map(|k| (k.to_string(), value))
            })
            .collect();
        Self { properties }
    }

    /// Build directly from prefix-less properties
    pub fn from_map(properties: StringMap) -> Self {
        Self { properties }
    }

    /// Get a property; empty values count as absent
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn get_owned(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned().none_if_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// The configured service URL
    pub fn url(&self) -> Option<&str> {
        self.get(PROP_URL)
    }

    /// Build the authenticator configuration these properties describe
    ///
    /// With no `AUTH_TYPE`, IAM is assumed when an `APIKEY` is present.
    /// Neither being set is an error.
    pub fn auth_config(&self) -> Result<AuthConfig> {
        let auth_type = match self.get(PROP_AUTH_TYPE) {
            Some(name) => name.parse::<AuthType>()?,
            None if self.get(PROP_APIKEY).is_some() => AuthType::Iam,
            None => {
                return Err(Error::missing_field(PROP_AUTH_TYPE));
            }
        };

        let required = |key: &str| {
            self.get_owned(key)
                .ok_or_else(|| Error::missing_field(key))
        };

        match auth_type {
            AuthType::NoAuth => Ok(AuthConfig::None),
            AuthType::Basic => Ok(AuthConfig::Basic {
                username: required(PROP_USERNAME)?,
                password: required(PROP_PASSWORD)?,
            }),
            AuthType::BearerToken => Ok(AuthConfig::BearerToken {
                token: required(PROP_BEARER_TOKEN)?,
            }),
            AuthType::Iam => Ok(AuthConfig::Iam {
                apikey: required(PROP_APIKEY)?,
                url: self.get_owned(PROP_AUTH_URL),
                client_id: self.get_owned(PROP_CLIENT_ID),
                client_secret: self.get_owned(PROP_CLIENT_SECRET),
                scope: self.get_owned(PROP_SCOPE),
            }),
        }
    }

    /// Retry settings, when `ENABLE_RETRIES` is true
    pub fn retry_settings(&self) -> Result<Option<RetrySettings>> {
        let enabled = match self.get(PROP_ENABLE_RETRIES) {
            Some(v) => parse_bool(PROP_ENABLE_RETRIES, v)?,
            None => false,
        };
        if !enabled {
            return Ok(None);
        }

        let max_retries = match self.get(PROP_MAX_RETRIES) {
            Some(v) => v
                .parse::<u32>()
                .map_err(|e| Error::invalid_value(PROP_MAX_RETRIES, e.to_string()))?,
            None => DEFAULT_MAX_RETRIES,
        };
        let interval_secs = match self.get(PROP_RETRY_INTERVAL) {
            Some(v) => v
                .parse::<u64>()
                .map_err(|e| Error::invalid_value(PROP_RETRY_INTERVAL, e.to_string()))?,
            None => DEFAULT_RETRY_INTERVAL_SECS,
        };

        Ok(Some(RetrySettings {
            max_retries,
            max_interval: Duration::from_secs(interval_secs),
        }))
    }
}

/// `configuration_aggregator` -> `CONFIGURATION_AGGREGATOR`
pub fn env_prefix(service_name: &str) -> String {
    service_name.to_ascii_uppercase().replace('-', "_")
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::invalid_value(
            field,
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

fn credential_file_candidates() -> Vec<PathBuf> {
    if let Ok(explicit) = std::env::var(CREDENTIALS_FILE_ENV) {
        if !explicit.is_empty() {
            return vec![PathBuf::from(explicit)];
        }
    }

    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(DEFAULT_CREDENTIALS_FILE_NAME));
    }
    if let Some(home) = std::env::var_os("HOME") {
        candidates.push(PathBuf::from(home).join(DEFAULT_CREDENTIALS_FILE_NAME));
    }
    candidates
}
