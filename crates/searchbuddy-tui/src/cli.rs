//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

/// Discovery server used when none is configured.
pub const DEFAULT_SERVER: &str = "http://searchbuddy.gerber.website:8080";

/// Searchbuddy terminal client
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "searchbuddy")]
#[command(about = "Find and chat with people searching for the same thing")]
#[command(version)]
pub struct Args {
    /// Discovery server base URL
    #[arg(short, long, env = "SEARCHBUDDY_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Search to run on start
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Write logs to this file
    ///
    /// Logging is off without it. The terminal belongs to the UI.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
