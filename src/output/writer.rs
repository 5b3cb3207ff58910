//! Tweet writer
//!
//! Serializes a list of tweets to any `io::Write` in one of the supported
//! formats.

use crate::error::{Error, Result, ResultExt};
use crate::types::Tweet;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Time format of the table's first column
pub const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Spaces between table columns
const TABLE_PADDING: usize = 2;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
    /// Human-readable aligned table
    Table,
}

/// Sort tweets oldest first.
///
/// The sort is stable; tweets without a timestamp come first.
pub fn sort_by_timestamp(tweets: &mut [Tweet]) {
    tweets.sort_by_key(|tweet| tweet.timestamp);
}

/// Writes tweets in a chosen format
#[derive(Debug, Clone)]
pub struct TweetWriter {
    format: OutputFormat,
    permalink_base: Option<String>,
}

impl TweetWriter {
    /// Create a writer for `format`
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            permalink_base: None,
        }
    }

    /// Strip `base` from permalinks in the table format
    #[must_use]
    pub fn with_permalink_base(mut self, base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.permalink_base = Some(base);
        self
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write `tweets` to `out`
    pub fn write<W: Write>(&self, out: &mut W, tweets: &[Tweet]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, tweets)?;
                writeln!(out)?;
            }
            OutputFormat::Jsonl => {
                for tweet in tweets {
                    serde_json::to_writer(&mut *out, tweet)?;
                    writeln!(out)?;
                }
            }
            OutputFormat::Table => self.write_table(out, tweets)?,
        }
        out.flush()?;
        Ok(())
    }

    /// Write `tweets` to a new file at `path`
    pub fn write_to_path(&self, path: impl AsRef<Path>, tweets: &[Tweet]) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file =
            File::create(path).with_context(|| format!("Failed to create '{}'", path.display()))?;
        let mut out = BufWriter::new(file);
        self.write(&mut out, tweets)?;

        debug!(path = %path.display(), tweets = tweets.len(), "wrote output file");
        Ok(())
    }

    /// Render `tweets` into a string
    pub fn render(&self, tweets: &[Tweet]) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf, tweets)?;
        String::from_utf8(buf).map_err(|e| Error::Other(e.to_string()))
    }

    fn write_table<W: Write>(&self, out: &mut W, tweets: &[Tweet]) -> Result<()> {
        let mut rows: Vec<[String; 3]> = Vec::with_capacity(tweets.len() + 2);
        rows.push(["Timestamp".into(), "Permalink".into(), "Contents".into()]);
        rows.push(["-".repeat(16), "-".repeat(30), "-".repeat(30)]);

        for tweet in tweets {
            let timestamp = tweet
                .timestamp
                .map(|ts| ts.format(TABLE_TIME_FORMAT).to_string())
                .unwrap_or_default();
            rows.push([timestamp, self.short_permalink(&tweet.permalink), tweet.contents.clone()]);
        }

        let width = |column: usize| {
            rows.iter()
                .map(|row| row[column].chars().count())
                .max()
                .unwrap_or(0)
                + TABLE_PADDING
        };
        let (first, second) = (width(0), width(1));

        for [timestamp, permalink, contents] in &rows {
            let line = format!("{timestamp:<first$}{permalink:<second$}{contents}");
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn short_permalink(&self, permalink: &str) -> String {
        self.permalink_base
            .as_deref()
            .and_then(|base| permalink.strip_prefix(base))
            .unwrap_or(permalink)
            .to_string()
    }
}
