//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;
use crate::tui::Route;

/// eldtrip - plan an hours-of-service compliant truck trip from the terminal
#[derive(Debug, Parser)]
#[command(name = "eldtrip", version, about, long_about = None)]
pub struct Cli {
    /// Screen to open, e.g. `/` or `/results/<trip id>`
    #[arg(value_name = "PATH", default_value = "/")]
    pub path: String,

    /// Path to a custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Trip planner base URL (overrides configuration)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }

    /// The route to open first.
    pub fn initial_route(&self) -> Route {
        Route::parse(&self.path)
    }
}
