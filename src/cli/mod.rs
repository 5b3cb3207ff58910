//! CLI module
//!
//! Command-line interface for running searches.
//!
//! # Commands
//!
//! - `search` - Fetch all tweets for a term and date range
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
