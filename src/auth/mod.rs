//! Authentication module
//!
//! Supports: Bearer token (default), legacy API key header, custom headers
//!
//! The `Authenticator` attaches the credential to every outgoing request.
//! Credentials are marked sensitive so they never show up in `Debug` output.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, LEGACY_API_KEY_HEADER};
