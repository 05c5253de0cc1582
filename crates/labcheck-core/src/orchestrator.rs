//! Check orchestration and report emission.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::info;

use crate::checks::CheckKind;
use crate::config::EvaluatorConfig;
use crate::error::CheckError;
use crate::obs::{
    emit_check_failed, emit_check_finished, emit_check_started, emit_report_finalized,
    emit_sink_error, CheckSpan,
};
use crate::outcome::VerificationOutcome;
use crate::report::Report;
use crate::sink::ReportSink;
use crate::source::{FsLineSource, LineSource};

/// Result of a complete evaluation run.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub report: Report,

    /// Whether every check passed.
    pub passed: bool,

    /// Sinks that failed to emit, by name.
    pub failed_sinks: Vec<String>,

    /// Total duration in milliseconds.
    pub duration_ms: u64,
}

impl RunResult {
    /// Process exit code: 0 on pass, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

/// Runs the built-in checks in order and owns the report while it is built.
pub struct Orchestrator<S> {
    source: S,
    config: EvaluatorConfig,
}

impl<S: LineSource> Orchestrator<S> {
    pub fn new(source: S, config: EvaluatorConfig) -> Self {
        Self { source, config }
    }

    /// Run every check and return the finalized report.
    ///
    /// A check that errors or panics is recorded as `Failed` and the
    /// remaining checks still run.
    pub fn run(&self) -> Report {
        let mut report = Report::new();
        let run_id = report.run_id.to_string();
        info!(run_id = %run_id, root = %self.config.fixture_root.display(), "Starting evaluation");

        for kind in CheckKind::ALL {
            let _span = CheckSpan::enter(&run_id, kind.name());
            emit_check_started(&run_id, kind.name());
            let start = Instant::now();

            let outcome = match self.run_guarded(kind) {
                Ok(outcome) => outcome,
                Err(e) => {
                    emit_check_failed(&run_id, kind.name(), &e);
                    VerificationOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            emit_check_finished(
                &run_id,
                kind.name(),
                outcome.kind(),
                outcome.is_pass(),
                start.elapsed().as_millis() as u64,
            );
            report.record(kind, outcome);
        }

        emit_report_finalized(&run_id, report.passed(), report.failed_count());
        report
    }

    /// Run every check, then hand the report to each sink once.
    ///
    /// Sink failures are logged and listed in the result; they do not
    /// change the verdict.
    pub fn run_and_emit(&self, sinks: &[&dyn ReportSink]) -> RunResult {
        let start = Instant::now();
        let report = self.run();
        let run_id = report.run_id.to_string();

        let mut failed_sinks = Vec::new();
        for sink in sinks {
            if let Err(e) = sink.emit(&report) {
                emit_sink_error(&run_id, sink.name(), &e);
                failed_sinks.push(sink.name().to_string());
            }
        }

        RunResult {
            passed: report.passed(),
            report,
            failed_sinks,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn run_guarded(&self, kind: CheckKind) -> Result<VerificationOutcome, CheckError> {
        panic::catch_unwind(AssertUnwindSafe(|| kind.run(&self.source, &self.config)))
            .unwrap_or_else(|payload| Err(CheckError::Panicked(panic_message(payload.as_ref()))))
    }
}

impl Orchestrator<FsLineSource> {
    /// Orchestrator reading fixtures from `config.fixture_root` on disk.
    ///
    /// A root that does not exist is not an error: every fixture then reads
    /// as missing and the report says so.
    pub fn from_config(config: EvaluatorConfig) -> Self {
        let source = FsLineSource::new(&config.fixture_root);
        Self::new(source, config)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
