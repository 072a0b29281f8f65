//! Log sink abstraction for collector output.

use std::fmt;
use std::sync::{Arc, Mutex};

/// A destination for formatted timing lines.
///
/// The collector depends only on this single formatted-write capability,
/// not on any particular logging framework. The sink is touched only by
/// the receive loop, so implementations need no internal ordering beyond
/// `Send`.
pub trait LogSink: Send {
    /// Write one formatted line.
    fn write(&self, args: fmt::Arguments<'_>);
}

/// Default sink that forwards lines to `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "timing", "{args}");
    }
}

/// Sink that records lines in memory, for deterministic test assertion.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Number of lines written so far.
    pub fn len(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().unwrap().is_empty()
    }
}

impl LogSink for MemorySink {
    fn write(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(args.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_lines() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.write(format_args!("first {}", 1));
        sink.write(format_args!("second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.lines(), vec!["first 1".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_memory_sink_clones_share_storage() {
        let sink = MemorySink::new();
        let clone = sink.clone();
        clone.write(format_args!("shared"));
        assert_eq!(sink.lines(), vec!["shared".to_string()]);
    }
}
