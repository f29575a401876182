//! Authenticator implementation

use super::types::AuthConfig;
use crate::error::{Error, Result};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

/// Authenticator applies the configured credential to HTTP requests
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// The configured credential
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => {
                let value = sensitive_value(&format!("Bearer {token}"))?;
                Ok(req.header(AUTHORIZATION, value))
            }

            AuthConfig::ApiKeyHeader { header_name, value } => {
                let name = header_name_of(header_name)?;
                Ok(req.header(name, sensitive_value(value)?))
            }

            AuthConfig::CustomHeaders { headers } => {
                let mut req = req;
                for (key, value) in headers {
                    req = req.header(header_name_of(key)?, sensitive_value(value)?);
                }
                Ok(req)
            }
        }
    }
}

fn header_name_of(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::invalid_value("auth.header_name", format!("{name}: {e}")))
}

fn sensitive_value(value: &str) -> Result<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|_| Error::invalid_value("api_key", "contains characters not allowed in a header"))?;
    header.set_sensitive(true);
    Ok(header)
}
