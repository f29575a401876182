//! Parameter filtering module
//!
//! Splits a flat set of named arguments into query and body parameters
//! according to an endpoint's declared whitelists.
//!
//! # Overview
//!
//! - Keys are trimmed before they are compared against a whitelist.
//! - Keys outside the whitelist are dropped without error.
//! - Array-typed query keys are rewritten to `name[]` and later serialized
//!   as one `name[]=value` pair per element.

mod filter;
mod query;

pub use filter::{body_params, filter, query_params, to_candidates};
pub use query::{QueryParams, QueryValue};
