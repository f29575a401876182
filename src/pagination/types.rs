//! Pager state machine

use crate::error::Error;
use crate::request::RequestDescriptor;

/// Where a pagination run stands
///
/// `Start -> Fetching -> {HasMore, Exhausted, Failed}` and
/// `HasMore -> Fetching`.
#[derive(Debug)]
pub enum PagerState {
    /// Nothing requested yet
    Start,
    /// Request in flight for this descriptor
    Fetching(RequestDescriptor),
    /// Another page is available behind this cursor
    HasMore {
        /// Cursor token taken from the `Link` header
        cursor: String,
    },
    /// Budget spent or no further link; result is complete
    Exhausted,
    /// A page failed; partial results are discarded
    Failed(Error),
}

impl PagerState {
    /// Whether the run has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed(_))
    }
}
