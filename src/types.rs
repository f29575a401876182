//! Common types used throughout the crate
//!
//! Shared enums and aliases for HTTP methods, backoff strategies and the
//! paging controls accepted by list endpoints.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method supported by the Dashboard API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Whether the method changes server state
    pub fn is_write(self) -> bool {
        !matches!(self, Method::GET)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transient-failure retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    #[default]
    Linear,
    /// Exponential increase in delay
    Exponential,
}

// ============================================================================
// Paging Controls
// ============================================================================

/// Which continuation link the pager follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Follow `rel="next"`, cursor goes in `startingAfter`
    #[default]
    Next,
    /// Follow `rel="prev"`, cursor goes in `endingBefore`
    Prev,
}

impl Direction {
    /// The `rel` value of the link to follow
    pub fn rel(self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Prev => "prev",
        }
    }

    /// Query parameter carrying the cursor for this direction
    pub fn cursor_param(self) -> &'static str {
        match self {
            Direction::Next => "startingAfter",
            Direction::Prev => "endingBefore",
        }
    }

    /// Cursor parameter of the opposite direction
    pub fn opposite_cursor_param(self) -> &'static str {
        match self {
            Direction::Next => Direction::Prev.cursor_param(),
            Direction::Prev => Direction::Next.cursor_param(),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            other => Err(Error::invalid_value(
                "direction",
                format!("expected \"next\" or \"prev\", got \"{other}\""),
            )),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rel())
    }
}

/// Page budget for a paginated call
///
/// `Limit(n)` caps the number of requests at `n`; `All` follows cursors until
/// the upstream stops returning a continuation link. Pair `All` with a
/// sensible `perPage` to bound memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TotalPagesRepr", into = "TotalPagesRepr")]
pub enum TotalPages {
    /// At most this many pages; `Limit(0)` still fetches the first page
    Limit(u32),
    /// Every page
    All,
}

impl Default for TotalPages {
    fn default() -> Self {
        TotalPages::Limit(1)
    }
}

impl TotalPages {
    /// Build a page limit, rejecting zero
    pub fn limit(pages: u32) -> Result<Self> {
        if pages == 0 {
            return Err(Error::invalid_value(
                "total_pages",
                "must be a positive integer, -1 or \"all\"",
            ));
        }
        Ok(TotalPages::Limit(pages))
    }

    /// Whether `fetched` pages exhaust this budget
    ///
    /// The first page is always fetched, so `Limit(0)` counts as `Limit(1)`.
    pub fn reached(self, fetched: u32) -> bool {
        match self {
            TotalPages::Limit(max) => fetched >= max.max(1),
            TotalPages::All => false,
        }
    }
}

impl FromStr for TotalPages {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "-1" {
            return Ok(TotalPages::All);
        }
        let pages: u32 = s.parse().map_err(|_| {
            Error::invalid_value(
                "total_pages",
                format!("expected a positive integer, -1 or \"all\", got \"{s}\""),
            )
        })?;
        TotalPages::limit(pages)
    }
}

impl fmt::Display for TotalPages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalPages::Limit(n) => write!(f, "{n}"),
            TotalPages::All => f.write_str("all"),
        }
    }
}

/// Wire form accepted in settings files: `all`, `-1` or a positive integer
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum TotalPagesRepr {
    Number(i64),
    Text(String),
}

impl TryFrom<TotalPagesRepr> for TotalPages {
    type Error = Error;

    fn try_from(repr: TotalPagesRepr) -> Result<Self> {
        match repr {
            TotalPagesRepr::Number(-1) => Ok(TotalPages::All),
            TotalPagesRepr::Number(n) => {
                let n = u32::try_from(n).map_err(|_| {
                    Error::invalid_value("total_pages", format!("out of range: {n}"))
                })?;
                TotalPages::limit(n)
            }
            TotalPagesRepr::Text(s) => s.parse(),
        }
    }
}

impl From<TotalPages> for TotalPagesRepr {
    fn from(pages: TotalPages) -> Self {
        match pages {
            TotalPages::Limit(n) => TotalPagesRepr::Number(i64::from(n)),
            TotalPages::All => TotalPagesRepr::Text("all".to_string()),
        }
    }
}
