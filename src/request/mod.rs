//! Request module
//!
//! Immutable request descriptors and the static endpoint metadata they are
//! built from.
//!
//! # Overview
//!
//! - `Endpoint` - method, path template and parameter whitelists of one operation
//! - `RequestDescriptor` - a fully resolved call, built fresh for every request
//! - `Metadata` - tags and operation name carried for logging

mod descriptor;
mod endpoint;

pub use descriptor::{Metadata, RequestDescriptor};
pub use endpoint::Endpoint;
