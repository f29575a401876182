//! Deadlines and caller-initiated cancellation

use crate::error::{Error, Result};
use futures::future::{abortable, AbortHandle};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Per-call options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Abort the whole call (retries, backoff and every page) at this instant
    pub deadline: Option<Instant>,
}

impl CallOptions {
    /// Options with no deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Deadline `timeout` from now
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Absolute deadline
    pub fn deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }
}

/// Run `fut` until `deadline`, failing with [`Error::Cancelled`] when it elapses
pub(crate) async fn with_deadline<F, T>(deadline: Option<Instant>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match deadline {
        Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(Error::cancelled("deadline elapsed")),
        },
        None => fut.await,
    }
}

/// Make a call abortable from elsewhere
///
/// Aborting through the returned handle drops the in-flight request (and any
/// pages already collected) and resolves the future to [`Error::Cancelled`].
///
/// ```no_run
/// # async fn demo(session: meraki_dashboard::http::Session) {
/// use meraki_dashboard::http::cancellable;
///
/// let (call, handle) = cancellable(session.get("/organizations", Default::default()));
/// handle.abort();
/// assert!(call.await.is_err());
/// # }
/// ```
pub fn cancellable<F, T>(fut: F) -> (impl Future<Output = Result<T>>, AbortHandle)
where
    F: Future<Output = Result<T>>,
{
    let (fut, handle) = abortable(fut);
    let fut = async move {
        match fut.await {
            Ok(result) => result,
            Err(_) => Err(Error::cancelled("aborted by caller")),
        }
    };
    (fut, handle)
}
