//! Verification outcomes and mismatch markers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FixtureError;

/// One reported divergence between computed and expected data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    /// 1-based record position.
    Position { index: usize },
    Total { expected: i64, actual: i64 },
    MissingEntry { key: String },
    EntryMismatch { key: String, expected: i64, actual: i64 },
    Label { text: String },
}

impl Marker {
    pub fn position(index: usize) -> Self {
        Marker::Position { index }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Marker::Label { text: text.into() }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Position { index } => write!(f, "{index}"),
            Marker::Total { expected, actual } => {
                write!(f, "total: expected {expected} got {actual}")
            }
            Marker::MissingEntry { key } => write!(f, "missing entry for {key}"),
            Marker::EntryMismatch {
                key,
                expected,
                actual,
            } => write!(f, "mismatch at {key}: expected {expected} got {actual}"),
            Marker::Label { text } => f.write_str(text),
        }
    }
}

/// Terminal result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Pass,
    Mismatch { markers: Vec<Marker> },
    MissingFixture { path: String },
    MissingInput { path: String },
    MalformedFixture { reason: String },
    LengthMismatch { expected: usize, actual: usize },
    /// Unexpected failure caught around the check.
    Failed { reason: String },
}

impl VerificationOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, VerificationOutcome::Pass)
    }

    /// `Pass` when `markers` is empty, `Mismatch` otherwise.
    pub fn from_markers(markers: Vec<Marker>) -> Self {
        if markers.is_empty() {
            VerificationOutcome::Pass
        } else {
            VerificationOutcome::Mismatch { markers }
        }
    }

    /// Short tag used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerificationOutcome::Pass => "pass",
            VerificationOutcome::Mismatch { .. } => "mismatch",
            VerificationOutcome::MissingFixture { .. } => "missing_fixture",
            VerificationOutcome::MissingInput { .. } => "missing_input",
            VerificationOutcome::MalformedFixture { .. } => "malformed_fixture",
            VerificationOutcome::LengthMismatch { .. } => "length_mismatch",
            VerificationOutcome::Failed { .. } => "failed",
        }
    }
}

/// Human-readable summary; `none` for a pass.
impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Pass => f.write_str("none"),
            VerificationOutcome::Mismatch { markers } => {
                let joined: Vec<String> = markers.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join(","))
            }
            VerificationOutcome::MissingFixture { path } => {
                write!(f, "missing solution file: {path}")
            }
            VerificationOutcome::MissingInput { path } => write!(f, "missing test file: {path}"),
            VerificationOutcome::MalformedFixture { reason } => {
                write!(f, "malformed solution: {reason}")
            }
            VerificationOutcome::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: expected {expected}, got {actual}")
            }
            VerificationOutcome::Failed { reason } => write!(f, "unexpected failure: {reason}"),
        }
    }
}

impl From<FixtureError> for VerificationOutcome {
    fn from(err: FixtureError) -> Self {
        match err {
            FixtureError::Missing(path) => VerificationOutcome::MissingFixture { path },
            FixtureError::Malformed(reason) => VerificationOutcome::MalformedFixture { reason },
            FixtureError::Source(e) => VerificationOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}
