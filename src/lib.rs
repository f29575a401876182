//! # Meraki Dashboard
//!
//! Session and transport core for the Cisco Meraki Dashboard REST API.
//!
//! ## Features
//!
//! - **Path templates**: `{name}` placeholders filled with percent-escaped segments
//! - **Parameter filtering**: only the names an endpoint declares reach the wire
//! - **Rate-limit aware session**: 429 backoff with `Retry-After`, jitter and a
//!   hard cap, separate from the transient-failure retry budget
//! - **Cursor pagination**: follows `Link: rel=next|prev` headers up to a page budget
//! - **Cancellation**: deadlines and abort handles covering retries and every page
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meraki_dashboard::api::{DashboardApi, UplinkStatusesOptions};
//! use meraki_dashboard::{Direction, Result, TotalPages};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let api = DashboardApi::with_api_key("6bec40cf957de430a6f1f2baa056b99a4fac9ea0")?;
//!
//!     let statuses = api
//!         .cellular_gateway()
//!         .get_organization_cellular_gateway_uplink_statuses(
//!             "549236",
//!             &UplinkStatusesOptions {
//!                 per_page: Some(1000),
//!                 ..Default::default()
//!             },
//!             TotalPages::All,
//!             Direction::Next,
//!         )
//!         .await?;
//!
//!     println!("{} gateways", statuses.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  api (Insight, CellularGateway)        cli (meraki-dashboard)  │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ Endpoint::request(path_args, options)
//! ┌──────────┬───────────┬───────┴───────┬────────────────────────┐
//! │   Path   │  Params   │   Request     │        Pager           │
//! ├──────────┼───────────┼───────────────┼────────────────────────┤
//! │ {name}   │ whitelist │ Descriptor    │ Link rel=next/prev     │
//! │ escape   │ name[]    │ Metadata      │ startingAfter cursor   │
//! └──────────┴───────────┴───────┬───────┴────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │ Session: auth, throttle, 429 backoff, retry budget, redirects  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Path templates and segment escaping
pub mod path;

/// Parameter whitelisting and query encoding
pub mod params;

/// Request descriptors and endpoint metadata
pub mod request;

/// API key authentication
pub mod auth;

/// Transport session with retry and rate limiting
pub mod http;

/// Cursor pagination
pub mod pagination;

/// Settings files
pub mod config;

/// Typed endpoint groups
pub mod api;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use config::{load_settings, Settings};
pub use http::{cancellable, CallOptions, Session, SessionConfig};
pub use params::QueryParams;
pub use request::{Endpoint, RequestDescriptor};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
