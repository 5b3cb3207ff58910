//! Optional diagnostics channel
//!
//! The scraper reports progress ("fetching <url>", "<n> tweets processed")
//! and soft extraction problems as plain text lines. Callers opt in by
//! attaching a [`DiagnosticSink`]; without one, nothing is written. Every line
//! is additionally traced at debug level, which a subscriber may or may not
//! record.

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// Write-only destination for diagnostic lines.
///
/// Sinks cannot report failure; a line that cannot be written is dropped.
pub trait DiagnosticSink: Send + Sync {
    /// Receive one line, without trailing newline
    fn line(&self, message: &str);
}

/// Sink writing newline-terminated lines to any `io::Write`
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> DiagnosticSink for WriterSink<W> {
    fn line(&self, message: &str) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(writer, "{message}");
    }
}

/// Sink collecting lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines received so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DiagnosticSink for MemorySink {
    fn line(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

/// Handle to an optional sink, cheap to clone
#[derive(Clone, Default)]
pub struct Diagnostics {
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl Diagnostics {
    /// Silent diagnostics
    pub fn none() -> Self {
        Self::default()
    }

    /// Diagnostics delivered to `sink`
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Diagnostics written to standard error
    pub fn stderr() -> Self {
        Self::new(Arc::new(WriterSink::new(std::io::stderr())))
    }

    /// True if a sink is attached
    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Emit one formatted line
    pub fn emit(&self, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        debug!(target: "twitscrape::diagnostics", "{message}");
        if let Some(sink) = &self.sink {
            sink.line(&message);
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
