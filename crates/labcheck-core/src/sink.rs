//! Report sink capability.
//!
//! The orchestrator never writes to a fixed path itself; it hands the
//! finished [`Report`] to every configured sink.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::SinkError;
use crate::report::Report;

/// Destination for a finalized report.
pub trait ReportSink {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn emit(&self, report: &Report) -> Result<(), SinkError>;
}

/// Prints the rendered report to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReportSink;

impl ReportSink for ConsoleReportSink {
    fn name(&self) -> &str {
        "console"
    }

    fn emit(&self, report: &Report) -> Result<(), SinkError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for line in report.render_lines() {
            writeln!(out, "{line}").map_err(|e| SinkError::Io {
                path: "<stdout>".to_string(),
                source: e,
            })?;
        }
        Ok(())
    }
}

/// Writes the rendered report to a log file, replacing any previous content.
#[derive(Debug, Clone)]
pub struct FileReportSink {
    path: PathBuf,
}

impl FileReportSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReportSink {
    fn name(&self) -> &str {
        "log_file"
    }

    fn emit(&self, report: &Report) -> Result<(), SinkError> {
        let mut body = String::new();
        for line in report.render_lines() {
            body.push_str(&line);
            body.push('\n');
        }
        write_file(&self.path, body.as_bytes())
    }
}

/// Writes the report as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    path: PathBuf,
}

impl JsonReportSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for JsonReportSink {
    fn name(&self) -> &str {
        "json_report"
    }

    fn emit(&self, report: &Report) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(&report.to_json()?)?;
        write_file(&self.path, json.as_bytes())
    }
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), SinkError> {
    fs::write(path, data).map_err(|e| SinkError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
