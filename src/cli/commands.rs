//! CLI commands and argument parsing

use crate::output::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scrape tweets from the search timeline
#[derive(Parser, Debug)]
#[command(name = "twitscrape")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML, or JSON with a .json extension)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Write progress and extraction warnings to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every tweet matching a search over a date range
    Search {
        /// Search term, may use search operators such as `from:user`
        term: String,

        /// First day to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        since: NaiveDate,

        /// Day to search up to (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        until: NaiveDate,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sort tweets oldest first
        #[arg(long)]
        sort: bool,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Print the effective configuration as YAML
    Config,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{value}': {e}"))
}
