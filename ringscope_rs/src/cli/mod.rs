//! Command-line interface for `ringscope`.
//!
//! # Architecture
//!
//! ```text
//! argv ──► Cli (clap derive) ──► Command ──► commands::run_*
//!                                               │
//!                    ┌──────────────────────────┼──────────────────────┐
//!                    ▼                          ▼                      ▼
//!            UploadOrchestrator          Dashboard::load         integrity::check
//!            (HttpTransport)             + export/render
//! ```
//!
//! Every command that shows a dashboard goes through the same
//! [`crate::dashboard::Dashboard`] the browser binding uses, with a
//! [`crate::layout::HeadlessSurface`] standing in for vis-network.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ringscope_report::types::Theme;

use crate::colors::ColorMode;

/// Default file name of `ringscope download`.
pub const DEFAULT_DOWNLOAD_FILE: &str = "fraud_detection_output.json";

#[derive(Debug, Parser)]
#[command(name = "ringscope")]
#[command(about = "Fraud-ring dashboards: upload transactions, explore flagged accounts and rings")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// When to color terminal output
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Preference file (theme); overrides the config and the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub prefs: Option<PathBuf>,

    /// Config file; defaults to .ringscope/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a transactions CSV and show the analysis
    Upload {
        /// CSV file to analyze
        csv: PathBuf,
        /// Analysis service base URL
        #[arg(long)]
        server: Option<String>,
        /// Write the dashboard as HTML here
        #[arg(long, short)]
        out: Option<PathBuf>,
        /// Keep the raw analysis payload here
        #[arg(long, value_name = "PATH")]
        save_payload: Option<PathBuf>,
    },
    /// Render a saved analysis payload
    Render {
        /// Analysis JSON (upload response or flat aggregate)
        payload: PathBuf,
        /// Output file; stdout when omitted
        #[arg(long, short)]
        out: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = RenderFormat::Html)]
        format: RenderFormat,
        /// Theme to render with; the saved preference when omitted
        #[arg(long)]
        theme: Option<Theme>,
        /// vis-network script location for HTML output
        #[arg(long, value_name = "URL")]
        vis_network: Option<String>,
    },
    /// Show the detail panel of one account
    Inspect {
        payload: PathBuf,
        account: String,
        /// Print the panel as JSON
        #[arg(long)]
        json: bool,
    },
    /// List fraud rings
    Rings {
        payload: PathBuf,
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        json: bool,
    },
    /// Report broken cross-references in a payload (exit 1 when any)
    Check {
        payload: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Fetch the last analysis from the service
    Download {
        #[arg(long)]
        server: Option<String>,
        #[arg(long, short, default_value = DEFAULT_DOWNLOAD_FILE)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme (default)
    Show,
    /// Flip dark/light
    Toggle,
    /// Set a theme explicitly
    Set { theme: Theme },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// Self-contained dashboard page
    Html,
    /// Graphviz DOT of the styled graph
    Dot,
    /// Styled graph and ring cards as JSON
    Json,
}
