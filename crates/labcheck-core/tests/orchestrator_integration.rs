//! Integration tests for the orchestrator with real files and in-memory fakes.

use std::path::Path;

use labcheck_core::fakes::{MemoryLineSource, MemoryReportSink};
use labcheck_core::{
    CheckKind, EvaluatorConfig, FileReportSink, FsLineSource, JsonReportSink, LineSource, Marker,
    Orchestrator, ReportSink, SourceError, VerificationOutcome,
};

const MATRIX_TESTS: &str = "1 2\n0 3\n-\n4 5\n";
const MATRIX_SOLUTION: &str = "1\n1\n";
const STRING_TESTS: &str = "a+b*c+\n***\n";
const STRING_SOLUTION: &str = "2 1\n0 3\n";
const INTERACTION_SOLUTION: &str =
    "total matches 3\nFile test 1.txt 2\nFile test 2.txt 0\nFile test 3.txt 1\n";

fn passing_fixtures() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Matrix tests.txt", MATRIX_TESTS),
        ("Matrix solution.txt", MATRIX_SOLUTION),
        ("String tests.txt", STRING_TESTS),
        ("String solution.txt", STRING_SOLUTION),
        ("File test 1.txt", "break +\nnothing\nbreak *\n"),
        ("File solution 1.txt", "break +\nbreak *\n"),
        ("File test 2.txt", "no match\n"),
        ("File solution 2.txt", ""),
        ("File test 3.txt", "x break y\r\n"),
        ("File solution 3.txt", "x break y\n"),
        ("Interaction solution.txt", INTERACTION_SOLUTION),
    ]
}

fn memory_source() -> MemoryLineSource {
    passing_fixtures()
        .into_iter()
        .fold(MemoryLineSource::new(), |source, (id, text)| {
            source.with_text(id, text)
        })
}

fn write_fixtures(root: &Path) {
    for (name, text) in passing_fixtures() {
        std::fs::write(root.join(name), text).expect("write fixture");
    }
}

/// Test: every check passes against real files, and the log artifact is written
#[test]
fn test_all_checks_pass_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixtures(dir.path());
    let log_path = dir.path().join("log.txt");
    let json_path = dir.path().join("report.json");

    let config = EvaluatorConfig {
        fixture_root: dir.path().to_path_buf(),
        log_path: log_path.clone(),
        report_json: Some(json_path.clone()),
        ..Default::default()
    };
    let orchestrator = Orchestrator::new(FsLineSource::new(dir.path()), config);

    let log_sink = FileReportSink::new(&log_path);
    let json_sink = JsonReportSink::new(&json_path);
    let sinks: [&dyn ReportSink; 2] = [&log_sink, &json_sink];
    let result = orchestrator.run_and_emit(&sinks);

    assert!(result.passed, "report: {:?}", result.report);
    assert_eq!(result.exit_code(), 0);
    assert!(result.failed_sinks.is_empty());

    let log = std::fs::read_to_string(&log_path).expect("read log");
    assert_eq!(
        log,
        "TEST RESULTS: PASS\n\
         ------------------\n\
         Matrix Tests errors: none\n\
         String Tests errors: none\n\
         File Tests errors: none\n\
         Interaction Tests errors: none\n"
    );

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).expect("read json"))
            .expect("parse json");
    assert_eq!(json["passed"], true);
    assert_eq!(json["entries"].as_array().map(Vec::len), Some(4));
}

/// Test: checks run in fixed order and each one is recorded
#[test]
fn test_report_order_is_fixed() {
    let report = Orchestrator::new(memory_source(), EvaluatorConfig::default()).run();
    let order: Vec<CheckKind> = report.entries.iter().map(|e| e.check).collect();
    assert_eq!(order, CheckKind::ALL.to_vec());
    assert!(report.passed());
}

/// Test: a missing matrix solution only affects the matrix check
#[test]
fn test_missing_matrix_solution_is_isolated() {
    let mut source = memory_source();
    source.remove("Matrix solution.txt");

    let sink = MemoryReportSink::new();
    let sinks: [&dyn ReportSink; 1] = [&sink];
    let result = Orchestrator::new(source, EvaluatorConfig::default()).run_and_emit(&sinks);

    assert!(!result.passed);
    assert_eq!(result.exit_code(), 1);
    assert_eq!(
        result.report.outcome(CheckKind::Matrix),
        Some(&VerificationOutcome::MissingFixture {
            path: "Matrix solution.txt".to_string()
        })
    );
    for kind in [CheckKind::String, CheckKind::File, CheckKind::Interaction] {
        assert!(
            result.report.outcome(kind).map(VerificationOutcome::is_pass) == Some(true),
            "{} should still pass",
            kind.name()
        );
    }

    let emitted = sink.emitted();
    assert_eq!(emitted.len(), 1, "report is emitted exactly once");
    assert_eq!(emitted[0][0], "TEST RESULTS: FAIL");
    assert_eq!(
        emitted[0][2],
        "Matrix Tests errors: missing solution file: Matrix solution.txt"
    );
}

/// Test: a wrong declared total is reported alone, not as per-entry mismatches
#[test]
fn test_interaction_total_mismatch() {
    let source = memory_source().with_text(
        "Interaction solution.txt",
        "label 4\nFile test 1.txt 9\nFile test 2.txt 9\n",
    );
    let report = Orchestrator::new(source, EvaluatorConfig::default()).run();

    assert_eq!(
        report.outcome(CheckKind::Interaction),
        Some(&VerificationOutcome::Mismatch {
            markers: vec![Marker::Total {
                expected: 4,
                actual: 3
            }]
        })
    );
}

/// Test: reordered expected rows still pass; a wrong count is pinpointed
#[test]
fn test_interaction_tolerates_drift_but_catches_bad_count() {
    let source = memory_source().with_text(
        "Interaction solution.txt",
        "label 3\nFile test 3.txt 1\nFile test 1.txt 2\n",
    );
    let report = Orchestrator::new(source, EvaluatorConfig::default()).run();
    assert!(report.outcome(CheckKind::Interaction).unwrap().is_pass());

    let source = memory_source().with_text(
        "Interaction solution.txt",
        "label 3\nFile test 1.txt 2\nFile test 3.txt 0\nFile test 9.txt 1\n",
    );
    let report = Orchestrator::new(source, EvaluatorConfig::default()).run();
    assert_eq!(
        report.outcome(CheckKind::Interaction).unwrap().to_string(),
        "mismatch at File test 3.txt: expected 0 got 1,missing entry for File test 9.txt"
    );
}

/// Test: missing test inputs surface in the file and interaction checks
#[test]
fn test_missing_file_input() {
    let mut source = memory_source();
    source.remove("File test 2.txt");
    source.remove("File solution 3.txt");

    let report = Orchestrator::new(source, EvaluatorConfig::default()).run();
    assert_eq!(
        report.outcome(CheckKind::File).unwrap().to_string(),
        "missing_test_2,missing_solution_3"
    );
    // File test 2 had zero hits, so the aggregate still satisfies the table.
    assert!(report.outcome(CheckKind::Interaction).unwrap().is_pass());
}

/// Source that panics when asked for one particular resource.
struct HostileSource {
    inner: MemoryLineSource,
    panic_on: &'static str,
}

impl LineSource for HostileSource {
    fn read_lines(&self, id: &str) -> Result<Vec<String>, SourceError> {
        if id == self.panic_on {
            panic!("simulated parser crash on {id}");
        }
        self.inner.read_lines(id)
    }
}

/// Test: a panicking check becomes a Failed outcome and later checks still run
#[test]
fn test_panic_is_contained() {
    let source = HostileSource {
        inner: memory_source(),
        panic_on: "String tests.txt",
    };
    let report = Orchestrator::new(source, EvaluatorConfig::default()).run();

    match report.outcome(CheckKind::String) {
        Some(VerificationOutcome::Failed { reason }) => {
            assert!(reason.contains("simulated parser crash"), "{reason}");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(report.outcome(CheckKind::Matrix).unwrap().is_pass());
    assert!(report.outcome(CheckKind::File).unwrap().is_pass());
    assert!(report.outcome(CheckKind::Interaction).unwrap().is_pass());
    assert_eq!(report.failed_count(), 1);
}

/// Test: an I/O failure on a fixture is caught as an unexpected failure
#[test]
fn test_io_failure_is_contained() {
    let source = memory_source().with_failure("Matrix solution.txt");
    let report = Orchestrator::new(source, EvaluatorConfig::default()).run();

    let outcome = report.outcome(CheckKind::Matrix).unwrap();
    assert_eq!(outcome.kind(), "failed");
    assert!(outcome.to_string().starts_with("unexpected failure:"));
    assert!(report.outcome(CheckKind::String).unwrap().is_pass());
}

/// Test: a failing sink is reported without changing the verdict
#[test]
fn test_sink_failure_does_not_change_verdict() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bad_sink = FileReportSink::new(dir.path().join("missing-dir").join("log.txt"));
    let good_sink = MemoryReportSink::new();
    let sinks: [&dyn ReportSink; 2] = [&bad_sink, &good_sink];

    let result =
        Orchestrator::new(memory_source(), EvaluatorConfig::default()).run_and_emit(&sinks);

    assert!(result.passed);
    assert_eq!(result.failed_sinks, vec!["log_file".to_string()]);
    assert_eq!(good_sink.emitted().len(), 1);
}

/// Test: a custom needle changes what the file checks look for
#[test]
fn test_custom_needle() {
    let config = EvaluatorConfig {
        needle: "nothing".to_string(),
        ..Default::default()
    };
    let report = Orchestrator::new(memory_source(), config).run();
    assert_eq!(
        report.outcome(CheckKind::File).unwrap().to_string(),
        "1,3"
    );
    assert_eq!(
        report.outcome(CheckKind::Interaction),
        Some(&VerificationOutcome::Mismatch {
            markers: vec![Marker::Total {
                expected: 3,
                actual: 1
            }]
        })
    );
}

/// Test: a fixture root that does not exist still yields a full FAIL report
#[test]
fn test_missing_root_reports_every_fixture_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("log.txt");
    let config = EvaluatorConfig {
        fixture_root: dir.path().join("no_such_dir"),
        log_path: log_path.clone(),
        ..Default::default()
    };

    let log_sink = FileReportSink::new(&log_path);
    let sinks: [&dyn ReportSink; 1] = [&log_sink];
    let result = Orchestrator::from_config(config).run_and_emit(&sinks);

    assert!(!result.passed);
    assert_eq!(result.exit_code(), 1);
    assert_eq!(
        result.report.outcome(CheckKind::Matrix),
        Some(&VerificationOutcome::MissingInput {
            path: "Matrix tests.txt".to_string()
        })
    );
    assert_eq!(
        result.report.outcome(CheckKind::File).unwrap().to_string(),
        "missing_test_1,missing_test_2,missing_test_3"
    );
    assert_eq!(
        result.report.outcome(CheckKind::Interaction),
        Some(&VerificationOutcome::MissingFixture {
            path: "Interaction solution.txt".to_string()
        })
    );

    let log = std::fs::read_to_string(&log_path).expect("read log");
    assert!(log.starts_with("TEST RESULTS: FAIL\n"), "log: {log}");
    assert_eq!(log.lines().count(), 6);
}
