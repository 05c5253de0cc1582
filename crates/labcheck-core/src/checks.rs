//! The four built-in checks.
//!
//! Each check reads its inputs through a [`LineSource`], computes its metric,
//! decodes the matching fixture and verifies. Expected failures (missing or
//! malformed files, mismatches) come back as a [`VerificationOutcome`];
//! anything else is a [`CheckError`] for the orchestrator to catch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::scan_many;
use crate::config::{
    file_solution_name, file_test_name, EvaluatorConfig, INTERACTION_SOLUTION, MATRIX_SOLUTION,
    MATRIX_TESTS, STRING_SOLUTION, STRING_TESTS,
};
use crate::error::{CheckError, FixtureError, SourceError};
use crate::evaluator::{char_tally, line_filter, matrix_completeness, parse_matrix_blocks};
use crate::fixture::{self, Expectation, FixtureKind};
use crate::outcome::{Marker, VerificationOutcome};
use crate::source::LineSource;
use crate::verifier::{compare_list, compare_table, lines_match};

/// Built-in checks, in execution order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Matrix,
    String,
    File,
    Interaction,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::Matrix,
        CheckKind::String,
        CheckKind::File,
        CheckKind::Interaction,
    ];

    /// Machine name.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Matrix => "matrix",
            CheckKind::String => "string",
            CheckKind::File => "file",
            CheckKind::Interaction => "interaction",
        }
    }

    /// Label used in the rendered report.
    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Matrix => "Matrix",
            CheckKind::String => "String",
            CheckKind::File => "File",
            CheckKind::Interaction => "Interaction",
        }
    }

    /// Run this check against `source`.
    pub fn run<S: LineSource + ?Sized>(
        &self,
        source: &S,
        config: &EvaluatorConfig,
    ) -> Result<VerificationOutcome, CheckError> {
        match self {
            CheckKind::Matrix => matrix_check(source),
            CheckKind::String => string_check(source),
            CheckKind::File => file_check(source, config),
            CheckKind::Interaction => interaction_check(source, config),
        }
    }
}

/// Completeness of every block in `Matrix tests.txt` against an integer list.
pub fn matrix_check<S: LineSource + ?Sized>(source: &S) -> Result<VerificationOutcome, CheckError> {
    let lines = match read_input(source, MATRIX_TESTS)? {
        Ok(lines) => lines,
        Err(outcome) => return Ok(outcome),
    };

    let computed: Vec<i64> = parse_matrix_blocks(&lines)
        .iter()
        .map(|block| matrix_completeness(block) as i64)
        .collect();
    debug!(blocks = computed.len(), "Evaluated matrix blocks");

    match load_expectation(source, MATRIX_SOLUTION, FixtureKind::IntegerList)? {
        Ok(Expectation::Integers(expected)) => Ok(compare_list(&computed, &expected)),
        Ok(other) => Ok(unexpected_shape(MATRIX_SOLUTION, &other)),
        Err(outcome) => Ok(outcome),
    }
}

/// Tally of every line in `String tests.txt` against a pair list.
pub fn string_check<S: LineSource + ?Sized>(source: &S) -> Result<VerificationOutcome, CheckError> {
    let lines = match read_input(source, STRING_TESTS)? {
        Ok(lines) => lines,
        Err(outcome) => return Ok(outcome),
    };

    let computed: Vec<(i64, i64)> = lines
        .iter()
        .map(|line| {
            let tally = char_tally(line);
            (tally.pluses as i64, tally.stars as i64)
        })
        .collect();

    match load_expectation(source, STRING_SOLUTION, FixtureKind::PairList)? {
        Ok(Expectation::Pairs(expected)) => Ok(compare_list(&computed, &expected)),
        Ok(other) => Ok(unexpected_shape(STRING_SOLUTION, &other)),
        Err(outcome) => Ok(outcome),
    }
}

/// Line filter over each `File test {i}.txt` against `File solution {i}.txt`.
///
/// Per-case problems become markers: `missing_test_{i}`,
/// `missing_solution_{i}` or `{i}` for a content mismatch.
pub fn file_check<S: LineSource + ?Sized>(
    source: &S,
    config: &EvaluatorConfig,
) -> Result<VerificationOutcome, CheckError> {
    let mut markers = Vec::new();

    for i in 1..=config.file_cases {
        let computed = match line_filter(source, &file_test_name(i), &config.needle) {
            Ok(lines) => lines,
            Err(SourceError::NotFound(_)) => {
                markers.push(Marker::label(format!("missing_test_{i}")));
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let solution = file_solution_name(i);
        match load_expectation(source, &solution, FixtureKind::LineList)? {
            Ok(Expectation::Lines(expected)) => {
                if !lines_match(&computed, &expected) {
                    markers.push(Marker::label(i.to_string()));
                }
            }
            Ok(other) => return Ok(unexpected_shape(&solution, &other)),
            Err(VerificationOutcome::MissingFixture { .. }) => {
                markers.push(Marker::label(format!("missing_solution_{i}")));
            }
            Err(outcome) => return Ok(outcome),
        }
    }

    Ok(VerificationOutcome::from_markers(markers))
}

/// Aggregate over the file inputs against `Interaction solution.txt`.
pub fn interaction_check<S: LineSource + ?Sized>(
    source: &S,
    config: &EvaluatorConfig,
) -> Result<VerificationOutcome, CheckError> {
    let expected = match load_expectation(source, INTERACTION_SOLUTION, FixtureKind::Table)? {
        Ok(Expectation::Table(table)) => table,
        Ok(other) => return Ok(unexpected_shape(INTERACTION_SOLUTION, &other)),
        Err(outcome) => return Ok(outcome),
    };

    let aggregate = scan_many(source, config.file_inputs(), &config.needle);
    debug!(
        total_inputs = aggregate.total_inputs(),
        inputs_with_hits = aggregate.inputs_with_hits(),
        total_matches = aggregate.total_matches(),
        "Aggregated file inputs"
    );

    Ok(compare_table(&expected, &aggregate))
}

fn unexpected_shape(path: &str, expectation: &Expectation) -> VerificationOutcome {
    VerificationOutcome::Failed {
        reason: format!("{path} decoded to an unexpected shape: {expectation:?}"),
    }
}

/// Read a test input; a missing one is an outcome rather than an error.
fn read_input<S: LineSource + ?Sized>(
    source: &S,
    path: &str,
) -> Result<Result<Vec<String>, VerificationOutcome>, CheckError> {
    match source.read_lines(path) {
        Ok(lines) => Ok(Ok(lines)),
        Err(SourceError::NotFound(path)) => Ok(Err(VerificationOutcome::MissingInput { path })),
        Err(e) => Err(e.into()),
    }
}

/// Decode a fixture; missing or malformed ones become outcomes.
fn load_expectation<S: LineSource + ?Sized>(
    source: &S,
    path: &str,
    kind: FixtureKind,
) -> Result<Result<Expectation, VerificationOutcome>, CheckError> {
    match fixture::load(source, path, kind) {
        Ok(expectation) => Ok(Ok(expectation)),
        Err(FixtureError::Source(e)) => Err(e.into()),
        Err(e) => Ok(Err(e.into())),
    }
}
