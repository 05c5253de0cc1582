//! Structured observability hooks for the check lifecycle.
//!
//! Events are emitted at `info!` level; filter with `RUST_LOG`.

use tracing::info;

/// RAII guard that enters a check-scoped span for the duration of a check.
///
/// # Example
///
/// ```ignore
/// let _span = CheckSpan::enter(&run_id, "matrix");
/// // tracing calls inside are tagged with run_id and check
/// ```
pub struct CheckSpan {
    _span: tracing::span::EnteredSpan,
}

impl CheckSpan {
    pub fn enter(run_id: &str, check: &str) -> Self {
        let span = tracing::info_span!("labcheck.check", run_id = %run_id, check = %check);
        Self {
            _span: span.entered(),
        }
    }
}

pub fn emit_check_started(run_id: &str, check: &str) {
    info!(event = "check.started", run_id = %run_id, check = %check);
}

/// Emit event: check finished with its outcome kind.
pub fn emit_check_finished(
    run_id: &str,
    check: &str,
    outcome: &str,
    passed: bool,
    duration_ms: u64,
) {
    info!(
        event = "check.finished",
        run_id = %run_id,
        check = %check,
        outcome = %outcome,
        passed = passed,
        duration_ms = duration_ms,
    );
}

/// Emit event: a check failed unexpectedly (warning level).
pub fn emit_check_failed(run_id: &str, check: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "check.failed", run_id = %run_id, check = %check, error = %error);
}

pub fn emit_report_finalized(run_id: &str, passed: bool, failed_checks: usize) {
    info!(
        event = "report.finalized",
        run_id = %run_id,
        passed = passed,
        failed_checks = failed_checks,
    );
}

/// Emit event: a report sink could not be written (warning level).
pub fn emit_sink_error(run_id: &str, sink: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "sink.error", run_id = %run_id, sink = %sink, error = %error);
}
