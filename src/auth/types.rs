//! Auth configuration types

use chrono::{DateTime, TimeZone, Utc};

/// Production IAM token service
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Static bearer token, never refreshed
    BearerToken {
        /// The bearer token
        token: String,
    },

    /// IAM API key exchanged for short-lived access tokens
    Iam {
        /// The API key
        apikey: String,
        /// IAM token service base URL (defaults to [`DEFAULT_IAM_URL`])
        url: Option<String>,
        /// Client id for authenticating to the token service
        client_id: Option<String>,
        /// Client secret for authenticating to the token service
        client_secret: Option<String>,
        /// Space-separated scopes to request
        scope: Option<String>,
    },
}

impl AuthConfig {
    /// IAM authentication against the production token service
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// Bearer token authentication
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: token.into(),
        }
    }

    /// Basic authentication
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether this is [`AuthConfig::None`]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    ///
    /// A lifetime too large to represent is treated as no expiry, one too
    /// far in the past as already expired.
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = chrono::Duration::try_seconds(seconds)
            .and_then(|d| Utc::now().checked_add_signed(d))
            .or_else(|| (seconds < 0).then_some(DateTime::<Utc>::MIN_UTC));
        Self { token, expires_at }
    }

    /// Create a token that expires at a unix timestamp
    pub fn expires_at_unix(token: String, timestamp: i64) -> Self {
        Self {
            token,
            expires_at: Utc.timestamp_opt(timestamp, 0).single(),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}
