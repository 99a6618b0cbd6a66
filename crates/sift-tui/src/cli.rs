//! CLI argument parsing for sift-tui.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sift-tui")]
#[command(about = "Search palette over tools, docs, links and commands", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging (logs to /tmp/sift-tui.log)
    #[arg(short, long)]
    pub debug: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the remote search base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive TUI mode (default)
    Tui,

    /// One-shot search query
    Query {
        /// Search query
        query: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the search history
    History {
        /// Forget every entry instead of listing
        #[arg(long)]
        clear: bool,
    },
}
