//! Auth configuration types

use std::collections::HashMap;
use std::fmt;

/// Header used by the Dashboard API before bearer tokens were accepted
pub const LEGACY_API_KEY_HEADER: &str = "X-Cisco-Meraki-API-Key";

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication (mock servers, proxies that inject credentials)
    #[default]
    None,

    /// `Authorization: Bearer <token>`
    Bearer {
        /// The API key
        token: String,
    },

    /// API key in a named header
    ApiKeyHeader {
        /// Header name
        header_name: String,
        /// The API key
        value: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// Bearer authentication with the given API key
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// API key sent in `X-Cisco-Meraki-API-Key`
    pub fn legacy_api_key(value: impl Into<String>) -> Self {
        Self::ApiKeyHeader {
            header_name: LEGACY_API_KEY_HEADER.to_string(),
            value: value.into(),
        }
    }

    /// Whether any credential is configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bearer { token } => f
                .debug_struct("Bearer")
                .field("token", &redact(token))
                .finish(),
            Self::ApiKeyHeader { header_name, value } => f
                .debug_struct("ApiKeyHeader")
                .field("header_name", header_name)
                .field("value", &redact(value))
                .finish(),
            Self::CustomHeaders { headers } => {
                let names: Vec<&String> = headers.keys().collect();
                f.debug_struct("CustomHeaders")
                    .field("headers", &names)
                    .finish_non_exhaustive()
            }
        }
    }
}

/// Keep the last four characters so keys stay recognizable in logs
fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_auth_config_default() {
        let config = AuthConfig::default();
        assert!(config.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig::bearer("0123456789abcdef0123456789abcdef01234567");
        let debug = format!("{config:?}");
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("****4567"));

        let config = AuthConfig::legacy_api_key("short");
        let debug = format!("{config:?}");
        assert!(!debug.contains("short"));
        assert!(debug.contains(LEGACY_API_KEY_HEADER));
    }
}
