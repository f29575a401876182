//! CLI commands and argument parsing

use crate::types::{Direction, TotalPages};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Meraki Dashboard API command-line client
#[derive(Parser, Debug)]
#[command(name = "meraki-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (defaults to MERAKI_DASHBOARD_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log writes instead of sending them
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Timeout for each HTTP exchange
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// GET a resource path
    Get {
        /// Resource path, e.g. /organizations/123/insight/applications
        path: String,

        /// Query parameter `key=value`; `key[]=a,b` sends a list
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,

        /// Pages to fetch: a positive number, -1 or "all"
        #[arg(long, allow_hyphen_values = true)]
        total_pages: Option<TotalPages>,

        /// Pagination direction
        #[arg(long, default_value = "next")]
        direction: Direction,
    },

    /// POST a JSON body
    Post {
        /// Resource path
        path: String,

        /// JSON body (defaults to `{}`)
        #[arg(long)]
        body: Option<String>,
    },

    /// PUT a JSON body
    Put {
        /// Resource path
        path: String,

        /// JSON body (defaults to `{}`)
        #[arg(long)]
        body: Option<String>,
    },

    /// DELETE a resource path
    Delete {
        /// Resource path
        path: String,
    },
}
