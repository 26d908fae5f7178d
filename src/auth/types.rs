//! Auth configuration types

use crate::types::StringMap;
use serde::{Deserialize, Serialize};

/// Prefix placed before a token when the model does not name one
pub const DEFAULT_TOKEN_PREFIX: &str = "Token";

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Token in the Authorization header, e.g. `Authorization: Token abc123`
    Token {
        /// Scheme written before the token (e.g. "Token", "JWT")
        #[serde(default = "default_prefix")]
        prefix: String,
        /// The token value
        token: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add to each request
        headers: StringMap,
    },
}

fn default_prefix() -> String {
    DEFAULT_TOKEN_PREFIX.to_string()
}

impl AuthConfig {
    /// Token auth with an optional prefix, defaulting to `Token`
    pub fn token(token: impl Into<String>, prefix: Option<&str>) -> Self {
        Self::Token {
            prefix: prefix.unwrap_or(DEFAULT_TOKEN_PREFIX).to_string(),
            token: token.into(),
        }
    }

    /// Check if any credentials are configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
