//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, ScraperConfig};
use crate::diagnostics::Diagnostics;
use crate::engine::ScrapeEngine;
use crate::error::Result;
use crate::output::{sort_by_timestamp, OutputFormat, TweetWriter};
use crate::query::SearchQuery;
use chrono::NaiveDate;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

/// Arguments of the `search` command
struct SearchArgs<'a> {
    term: &'a str,
    since: NaiveDate,
    until: NaiveDate,
    format: OutputFormat,
    output: Option<&'a Path>,
    sort: bool,
    max_pages: Option<u32>,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Search {
                term,
                since,
                until,
                format,
                output,
                sort,
                max_pages,
            } => {
                self.search(SearchArgs {
                    term: term.as_str(),
                    since: *since,
                    until: *until,
                    format: *format,
                    output: output.as_deref(),
                    sort: *sort,
                    max_pages: *max_pages,
                })
                .await
            }
            Commands::Config => self.print_config(),
        }
    }

    /// Load configuration from the `--config` file, or use defaults
    fn load_config(&self) -> Result<ScraperConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => Ok(ScraperConfig::default()),
        }
    }

    /// Diagnostics for this invocation
    fn diagnostics(&self) -> Diagnostics {
        if self.cli.verbose {
            Diagnostics::stderr()
        } else {
            Diagnostics::none()
        }
    }

    /// Fetch and write tweets
    async fn search(&self, args: SearchArgs<'_>) -> Result<()> {
        let mut config = self.load_config()?;
        if args.max_pages.is_some() {
            config.max_pages = args.max_pages;
        }

        let engine = ScrapeEngine::with_diagnostics(&config, self.diagnostics())?;
        let query = SearchQuery::new(args.term, args.since, args.until);
        let outcome = engine.run(&query).await?;

        let mut tweets = outcome.tweets;
        if args.sort {
            sort_by_timestamp(&mut tweets);
        }

        let writer = TweetWriter::new(args.format).with_permalink_base(&config.permalink_base);
        match args.output {
            Some(path) => writer.write_to_path(path, &tweets)?,
            None => writer.write(&mut std::io::stdout().lock(), &tweets)?,
        }

        info!(
            tweets = tweets.len(),
            pages = outcome.stats.pages_fetched,
            duration_ms = outcome.stats.duration_ms,
            "search finished"
        );
        Ok(())
    }

    /// Print the effective configuration
    fn print_config(&self) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        let mut stdout = std::io::stdout().lock();
        stdout.write_all(config.to_yaml()?.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
