//! labcheck core library
//!
//! Computes three small metrics (matrix completeness, `+`/`*` tally and a
//! substring line filter), checks them against solution fixtures and builds a
//! pass/fail report:
//! - `evaluator` / `aggregator` compute results
//! - `fixture` decodes loosely formatted solution files
//! - `verifier` compares the two and pinpoints mismatches
//! - `orchestrator` runs every check and emits the report to sinks

pub mod aggregator;
pub mod checks;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod fakes;
pub mod fixture;
pub mod obs;
pub mod orchestrator;
pub mod outcome;
pub mod report;
pub mod sink;
pub mod source;
pub mod telemetry;
pub mod verifier;

pub use aggregator::{
    scan_many, scan_one, AggregateEntry, AggregateResult, InputScan, ScanErrorKind,
};
pub use checks::CheckKind;
pub use config::EvaluatorConfig;
pub use error::{CheckError, FixtureError, SinkError, SourceError};
pub use evaluator::{char_tally, line_filter, matrix_completeness, Cell, Matrix, Tally};
pub use fixture::{ExpectedTable, Expectation, FixtureKind};
pub use obs::CheckSpan;
pub use orchestrator::{Orchestrator, RunResult};
pub use outcome::{Marker, VerificationOutcome};
pub use report::{Report, ReportEntry};
pub use sink::{ConsoleReportSink, FileReportSink, JsonReportSink, ReportSink};
pub use source::{FsLineSource, LineSource};
pub use telemetry::init_tracing;
pub use verifier::{compare_list, compare_table, lines_match};
