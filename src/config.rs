//! Settings file support
//!
//! A settings file (YAML, or JSON since it parses as YAML) describes one
//! session. Every field is optional:
//!
//! ```yaml
//! api_key: "..."              # or MERAKI_DASHBOARD_API_KEY
//! base_url: https://api.meraki.com/api/v1
//! auth_header: bearer         # or legacy (X-Cisco-Meraki-API-Key)
//! caller: "InventorySync/1.0 Acme"
//! simulate: false
//! http:
//!   timeout_seconds: 60
//!   max_retries: 3
//!   retry_backoff:
//!     type: linear
//!     initial_ms: 1000
//!     max_ms: 10000
//! rate_limit:
//!   wait_on_rate_limit: true
//!   max_retries: 10
//!   initial_ms: 1000
//!   max_ms: 60000
//!   jitter_ms: 1000
//!   requests_per_second: 10
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{RateLimitPolicy, Session, SessionConfig, ThrottleConfig, DEFAULT_BASE_URL};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "MERAKI_DASHBOARD_API_KEY";

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Session settings loaded from a file
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Dashboard API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How the API key is sent
    #[serde(default)]
    pub auth_header: AuthHeader,

    /// Application identifier appended to the user agent
    #[serde(default)]
    pub caller: Option<String>,

    /// Log writes instead of sending them
    #[serde(default)]
    pub simulate: bool,

    /// Transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// 429 handling and client-side throttle
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            auth_header: AuthHeader::default(),
            caller: None,
            simulate: false,
            http: HttpSettings::default(),
            rate_limit: RateLimitSettings::default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("base_url", &self.base_url)
            .field("auth_header", &self.auth_header)
            .field("caller", &self.caller)
            .field("simulate", &self.simulate)
            .field("http", &self.http)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Header carrying the API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthHeader {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `X-Cisco-Meraki-API-Key: <key>`
    Legacy,
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// Transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Timeout for a single HTTP exchange
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retry budget for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Transient backoff
    #[serde(default)]
    pub retry_backoff: BackoffSettings,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffSettings::default(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffSettings {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_backoff_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Linear,
            initial_ms: default_initial_ms(),
            max_ms: default_backoff_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    1000
}

fn default_backoff_max_ms() -> u64 {
    10_000
}

// ============================================================================
// Rate Limit Settings
// ============================================================================

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Retry 429 responses instead of failing on the first one
    #[serde(default = "default_true")]
    pub wait_on_rate_limit: bool,

    /// Maximum number of 429 retries for one request
    #[serde(default = "default_rate_limit_retries")]
    pub max_retries: u32,

    /// Delay after the first 429 in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Ceiling for a single rate-limit wait in milliseconds
    #[serde(default = "default_rate_limit_max_ms")]
    pub max_ms: u64,

    /// Upper bound of random jitter in milliseconds
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Client-side throttle; `0` disables it
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            wait_on_rate_limit: default_true(),
            max_retries: default_rate_limit_retries(),
            initial_ms: default_initial_ms(),
            max_ms: default_rate_limit_max_ms(),
            jitter_ms: default_jitter_ms(),
            requests_per_second: default_rps(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_rate_limit_retries() -> u32 {
    10
}

fn default_rate_limit_max_ms() -> u64 {
    60_000
}

fn default_jitter_ms() -> u64 {
    1000
}

fn default_rps() -> u32 {
    10
}

// ============================================================================
// Loading and conversion
// ============================================================================

/// Load settings from a YAML or JSON file
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;

    load_settings_from_str(&content)
}

/// Parse settings from a YAML or JSON string
pub fn load_settings_from_str(content: &str) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_yaml::from_str(content)?;
    settings.validate()?;
    Ok(settings)
}

impl Settings {
    /// Check values that parse but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "must not be empty"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value("http.timeout_seconds", "must be positive"));
        }
        Ok(())
    }

    /// API key from the settings, falling back to `MERAKI_DASHBOARD_API_KEY`
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    /// API key from the settings, falling back to `fallback`
    pub fn resolve_api_key_with(&self, fallback: Option<String>) -> Result<String> {
        self.api_key
            .clone()
            .or(fallback)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::missing_field("api_key"))
    }

    /// Credential for the given key
    pub fn auth_config(&self, api_key: String) -> AuthConfig {
        match self.auth_header {
            AuthHeader::Bearer => AuthConfig::bearer(api_key),
            AuthHeader::Legacy => AuthConfig::legacy_api_key(api_key),
        }
    }

    /// Runtime session configuration
    pub fn into_session_config(self) -> SessionConfig {
        let backoff = &self.http.retry_backoff;
        let rate_limit = &self.rate_limit;

        let mut builder = SessionConfig::builder()
            .base_url(self.base_url.clone())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            )
            .rate_limit(RateLimitPolicy {
                wait_on_rate_limit: rate_limit.wait_on_rate_limit,
                max_retries: rate_limit.max_retries,
                initial_delay: Duration::from_millis(rate_limit.initial_ms),
                max_delay: Duration::from_millis(rate_limit.max_ms),
                jitter: Duration::from_millis(rate_limit.jitter_ms),
            })
            .simulate(self.simulate);

        builder = match rate_limit.requests_per_second {
            0 => builder.no_throttle(),
            rps => builder.throttle(ThrottleConfig::new(rps, rps)),
        };

        if let Some(caller) = &self.caller {
            builder = builder.caller(caller);
        }

        builder.build()
    }

    /// Build an authenticated session
    pub fn into_session(self) -> Result<Session> {
        let api_key = self.resolve_api_key()?;
        let auth = self.auth_config(api_key);
        Session::new(self.into_session_config(), auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_match_session_defaults() {
        let settings = load_settings_from_str("").unwrap();
        let config = settings.into_session_config();
        let defaults = SessionConfig::default();

        assert_eq!(config.base_url, defaults.base_url);
        assert_eq!(config.timeout, defaults.timeout);
        assert_eq!(config.max_retries, defaults.max_retries);
        assert_eq!(config.backoff_type, defaults.backoff_type);
        assert_eq!(config.rate_limit, defaults.rate_limit);
        assert_eq!(config.throttle, defaults.throttle);
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
api_key: abc123
base_url: https://n149.meraki.com/api/v1
auth_header: legacy
caller: "InventorySync/1.0 Acme"
simulate: true
http:
  timeout_seconds: 5
  max_retries: 1
  retry_backoff:
    type: exponential
    initial_ms: 50
    max_ms: 400
rate_limit:
  wait_on_rate_limit: false
  max_retries: 4
  jitter_ms: 0
  requests_per_second: 0
"#;
        let settings = load_settings_from_str(yaml).unwrap();
        assert_eq!(settings.auth_header, AuthHeader::Legacy);

        let config = settings.into_session_config();
        assert_eq!(config.base_url, "https://n149.meraki.com/api/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.backoff_type, BackoffType::Exponential);
        assert_eq!(config.max_backoff, Duration::from_millis(400));
        assert!(!config.rate_limit.wait_on_rate_limit);
        assert_eq!(config.rate_limit.max_retries, 4);
        assert_eq!(config.rate_limit.jitter, Duration::ZERO);
        assert!(config.throttle.is_none());
        assert!(config.simulate);
        assert!(config.user_agent.ends_with("InventorySync/1.0 Acme"));
    }

    #[test]
    fn test_parse_json_settings() {
        let settings =
            load_settings_from_str(r#"{"api_key": "k", "http": {"max_retries": 0}}"#).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("k"));
        assert_eq!(settings.http.max_retries, 0);
        assert_eq!(settings.http.timeout_seconds, 60);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = load_settings_from_str("base_url: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn test_unknown_backoff_type_rejected() {
        let err = load_settings_from_str("http:\n  retry_backoff:\n    type: fibonacci\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_resolve_api_key_prefers_settings() {
        let settings = Settings {
            api_key: Some("from-file".to_string()),
            ..Settings::default()
        };
        assert_eq!(
            settings
                .resolve_api_key_with(Some("from-env".to_string()))
                .unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_resolve_api_key_falls_back() {
        let settings = Settings::default();
        assert_eq!(
            settings
                .resolve_api_key_with(Some(" from-env \n".to_string()))
                .unwrap(),
            "from-env"
        );
    }

    #[test]
    fn test_resolve_api_key_missing() {
        let settings = Settings::default();
        let err = settings.resolve_api_key_with(None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "api_key"));

        let err = settings
            .resolve_api_key_with(Some("   ".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_auth_config_header_choice() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.auth_config("k".to_string()),
            AuthConfig::Bearer { .. }
        ));

        settings.auth_header = AuthHeader::Legacy;
        assert!(matches!(
            settings.auth_config("k".to_string()),
            AuthConfig::ApiKeyHeader { ref header_name, .. } if header_name == "X-Cisco-Meraki-API-Key"
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let settings = Settings {
            api_key: Some("super-secret-key".to_string()),
            ..Settings::default()
        };
        assert!(!format!("{settings:?}").contains("super-secret-key"));
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: file-key\nsimulate: true").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.api_key.as_deref(), Some("file-key"));
        assert!(settings.simulate);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
