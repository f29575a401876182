//! CLI module
//!
//! Command-line access to the Dashboard API through a configured session.
//!
//! # Commands
//!
//! - `get` - GET a resource, optionally across pages
//! - `post` - POST a JSON body
//! - `put` - PUT a JSON body
//! - `delete` - DELETE a resource

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::{parse_body, parse_params, Runner};
