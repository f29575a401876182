//! Error types for the Dashboard session
//!
//! Every public API returns `Result<T, Error>`. The HTTP variants follow the
//! retry taxonomy used by the session: client errors are final, rate limits
//! and transient failures are retried internally and only surface once their
//! budgets are spent, and cancellation always surfaces immediately.

use thiserror::Error;

/// The main error type for the Dashboard session
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Undefined path argument: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    ClientError { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts, last retry-after {retry_after_seconds:?}s")]
    RateLimited {
        attempts: u32,
        retry_after_seconds: Option<u64>,
    },

    #[error("Transient failure after {attempts} attempts: {message}")]
    Transient {
        attempts: u32,
        status: Option<u16>,
        message: String,
    },

    #[error("Request cancelled: {reason}")]
    Cancelled { reason: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 4xx other than 429
    Client,
    /// 429 ceiling exceeded
    RateLimited,
    /// 5xx, connection failure or timeout with the retry budget spent
    Transient,
    /// Deadline elapsed or caller abort
    Cancelled,
    /// Bad settings, path templates or arguments
    Config,
    /// Anything else (decode, I/O)
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a client (4xx) error
    pub fn client_error(status: u16, message: impl Into<String>) -> Self {
        Self::ClientError {
            status,
            message: message.into(),
        }
    }

    /// Create a transient failure error
    pub fn transient(attempts: u32, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transient {
            attempts,
            status,
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(reason: impl Into<String>) -> Self {
        Self::Cancelled {
            reason: reason.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ClientError { .. } => ErrorKind::Client,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::Transient { .. } => ErrorKind::Transient,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::UndefinedVariable { .. }
            | Error::YamlParse(_)
            | Error::InvalidUrl(_) => ErrorKind::Config,
            _ => ErrorKind::Other,
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ClientError { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Transient { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if retrying the same request later could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::RateLimited | ErrorKind::Transient)
    }
}

/// Result type alias for the Dashboard session
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
