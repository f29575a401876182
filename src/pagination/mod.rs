//! Cursor pagination over the `Link` response header
//!
//! List endpoints return one page per call plus an RFC 5988 `Link` header:
//!
//! ```text
//! Link: <https://api.meraki.com/api/v1/organizations/1/devices?perPage=3&startingAfter=Q2XX>; rel=next
//! ```
//!
//! The [`Pager`] follows `next` (or `prev`) links by copying the cursor token
//! into a fresh request until the page budget is spent or the server stops
//! offering a link in that direction.

mod link;
mod pager;
mod types;

pub use link::{cursor_from_url, find_link, parse_link_header, Link};
pub use pager::{append_items, Pager};
pub use types::PagerState;
