//! HTTP transport module
//!
//! Provides the authenticated session every endpoint call goes through.
//!
//! # Features
//!
//! - **Transient Retries**: 5xx and connection failures retried within a budget
//! - **Rate Limit Backoff**: 429 responses back off exponentially with jitter,
//!   honouring `Retry-After`, tracked per session
//! - **Throttling**: Token bucket throttle using governor
//! - **Cancellation**: Per-call deadlines and abort handles
//! - **Authentication**: Integration with auth module

mod backoff;
mod cancel;
mod response;
mod session;
mod throttle;

pub use backoff::{RateLimitPolicy, RateLimitState};
pub use cancel::{cancellable, CallOptions};
pub use response::ApiResponse;
pub use session::{Session, SessionConfig, SessionConfigBuilder, DEFAULT_BASE_URL};
pub use throttle::{Throttle, ThrottleConfig};

pub(crate) use cancel::with_deadline;
