//! CLI definitions for SideScroll.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SideScroll CLI.
#[derive(Parser)]
#[command(name = "sidescroll")]
#[command(about = "Repeatedly scroll the active browser tab to the bottom")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Chrome remote debugging endpoint (overrides the config file)
    #[arg(short, long, global = true, env = "SIDESCROLL_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run a scroll session with the overlay shown (default)
    Run {
        /// Number of scrolls (defaults to scroll.default_count)
        #[arg(short = 'n', long)]
        count: Option<u32>,

        /// Only use a tab whose URL contains this text
        #[arg(long)]
        url_filter: Option<String>,
    },

    /// Scroll the active tab to the bottom once
    Scroll {
        /// Only use a tab whose URL contains this text
        #[arg(long)]
        url_filter: Option<String>,
    },

    /// List the tabs open at the endpoint
    Tabs,
}
