//! Common types used throughout the client
//!
//! Shared type aliases, small enums and string helpers used by more than
//! one module.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Auth Type
// ============================================================================

/// Authentication scheme named in external configuration (`AUTH_TYPE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// IAM API key exchanged for bearer tokens
    Iam,
    /// Static bearer token
    BearerToken,
    /// HTTP basic authentication
    Basic,
    /// No authentication
    NoAuth,
}

impl AuthType {
    /// Canonical configuration name
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Iam => "iam",
            AuthType::BearerToken => "bearerToken",
            AuthType::Basic => "basic",
            AuthType::NoAuth => "noAuth",
        }
    }
}

impl FromStr for AuthType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iam" => Ok(AuthType::Iam),
            "bearertoken" => Ok(AuthType::BearerToken),
            "basic" => Ok(AuthType::Basic),
            "noauth" => Ok(AuthType::NoAuth),
            other => Err(Error::invalid_value(
                "AUTH_TYPE",
                format!("unrecognized authentication type '{other}'"),
            )),
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("iam", AuthType::Iam)]
    #[test_case("IAM", AuthType::Iam)]
    #[test_case("bearerToken", AuthType::BearerToken)]
    #[test_case("BEARERTOKEN", AuthType::BearerToken)]
    #[test_case("basic", AuthType::Basic)]
    #[test_case("noauth", AuthType::NoAuth)]
    #[test_case("NOAuth", AuthType::NoAuth)]
    fn test_auth_type_parse(input: &str, expected: AuthType) {
        assert_eq!(input.parse::<AuthType>().unwrap(), expected);
    }

    #[test]
    fn test_auth_type_rejects_unknown() {
        let err = "someOtherAuth".parse::<AuthType>().unwrap_err();
        assert!(err.to_string().contains("someotherauth"));
    }

    #[test]
    fn test_backoff_default() {
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
