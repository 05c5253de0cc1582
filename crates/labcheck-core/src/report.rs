//! Run report.
//!
//! One [`ReportEntry`] per check, in execution order. The plain-text
//! rendering is the log artifact format:
//!
//! ```text
//! TEST RESULTS: FAIL
//! ------------------
//! Matrix Tests errors: 2
//! String Tests errors: none
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::checks::CheckKind;
use crate::outcome::VerificationOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub check: CheckKind,
    pub outcome: VerificationOutcome,
}

impl ReportEntry {
    /// `"{Label} Tests errors: {summary}"`.
    pub fn render(&self) -> String {
        format!("{} Tests errors: {}", self.check.label(), self.outcome)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub entries: Vec<ReportEntry>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, check: CheckKind, outcome: VerificationOutcome) {
        self.entries.push(ReportEntry { check, outcome });
    }

    /// Whether every recorded outcome is a pass.
    pub fn passed(&self) -> bool {
        self.entries.iter().all(|e| e.outcome.is_pass())
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.outcome.is_pass()).count()
    }

    pub fn outcome(&self, check: CheckKind) -> Option<&VerificationOutcome> {
        self.entries
            .iter()
            .find(|e| e.check == check)
            .map(|e| &e.outcome)
    }

    pub fn header(&self) -> &'static str {
        if self.passed() {
            "TEST RESULTS: PASS"
        } else {
            "TEST RESULTS: FAIL"
        }
    }

    /// Header, underline, then one line per entry.
    pub fn render_lines(&self) -> Vec<String> {
        let header = self.header();
        let mut lines = Vec::with_capacity(self.entries.len() + 2);
        lines.push(header.to_string());
        lines.push("-".repeat(header.len()));
        lines.extend(self.entries.iter().map(ReportEntry::render));
        lines
    }

    /// JSON document with the verdict alongside the entries.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("passed".to_string(), serde_json::Value::Bool(self.passed()));
        }
        Ok(value)
    }
}
