//! In-memory fakes for the injected capabilities (testing only)
//!
//! Provides `MemoryLineSource` and `MemoryReportSink` that satisfy the
//! trait contracts without touching the filesystem.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{SinkError, SourceError, SourceResult};
use crate::report::Report;
use crate::sink::ReportSink;
use crate::source::LineSource;

// ---------------------------------------------------------------------------
// MemoryLineSource
// ---------------------------------------------------------------------------

/// In-memory line source backed by a `HashMap<id, lines>`.
#[derive(Debug, Default)]
pub struct MemoryLineSource {
    resources: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
}

impl MemoryLineSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` with the given lines.
    pub fn with_lines(mut self, id: &str, lines: &[&str]) -> Self {
        self.insert(id, lines.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Register `id` from a blob of text, split the way a file would be.
    pub fn with_text(mut self, id: &str, text: &str) -> Self {
        self.insert(id, text.lines().map(str::to_string).collect());
        self
    }

    /// Make every read of `id` fail with an I/O error.
    pub fn with_failure(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn insert(&mut self, id: &str, lines: Vec<String>) {
        self.resources.insert(id.to_string(), lines);
    }

    pub fn remove(&mut self, id: &str) {
        self.resources.remove(id);
    }
}

impl LineSource for MemoryLineSource {
    fn read_lines(&self, id: &str) -> SourceResult<Vec<String>> {
        if self.failing.contains(id) {
            return Err(SourceError::Io {
                id: id.to_string(),
                source: std::io::Error::other("injected failure"),
            });
        }
        self.resources
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// MemoryReportSink
// ---------------------------------------------------------------------------

/// Report sink that keeps every emitted rendering.
#[derive(Debug, Default)]
pub struct MemoryReportSink {
    emitted: Mutex<Vec<Vec<String>>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered line sets, one per `emit` call.
    pub fn emitted(&self) -> Vec<Vec<String>> {
        self.emitted.lock().unwrap().clone()
    }

    /// Lines of the most recent emission.
    pub fn last(&self) -> Option<Vec<String>> {
        self.emitted.lock().unwrap().last().cloned()
    }
}

impl ReportSink for MemoryReportSink {
    fn name(&self) -> &str {
        "memory"
    }

    fn emit(&self, report: &Report) -> Result<(), SinkError> {
        self.emitted.lock().unwrap().push(report.render_lines());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_roundtrip() {
        let source = MemoryLineSource::new().with_text("a.txt", "x\r\ny\n");
        assert_eq!(source.read_lines("a.txt").unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_memory_source_missing_and_failing() {
        let source = MemoryLineSource::new().with_failure("bad.txt");
        assert!(source.read_lines("nope.txt").unwrap_err().is_not_found());
        assert!(matches!(
            source.read_lines("bad.txt").unwrap_err(),
            SourceError::Io { .. }
        ));
    }

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemoryReportSink::new();
        assert!(sink.last().is_none());
        sink.emit(&Report::new()).unwrap();
        assert_eq!(sink.emitted().len(), 1);
        assert_eq!(sink.last().unwrap()[0], "TEST RESULTS: PASS");
    }
}
