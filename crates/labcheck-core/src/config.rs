//! Evaluator configuration and fixture naming.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const MATRIX_TESTS: &str = "Matrix tests.txt";
pub const MATRIX_SOLUTION: &str = "Matrix solution.txt";
pub const STRING_TESTS: &str = "String tests.txt";
pub const STRING_SOLUTION: &str = "String solution.txt";
pub const INTERACTION_SOLUTION: &str = "Interaction solution.txt";

pub const DEFAULT_NEEDLE: &str = "break";
pub const DEFAULT_FILE_CASES: usize = 3;
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Name of the `i`-th (1-based) file-check input.
pub fn file_test_name(i: usize) -> String {
    format!("File test {i}.txt")
}

/// Name of the `i`-th (1-based) file-check solution.
pub fn file_solution_name(i: usize) -> String {
    format!("File solution {i}.txt")
}

/// Runtime configuration for one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Directory the fixture names are resolved against.
    pub fixture_root: PathBuf,

    /// Substring the file and interaction checks filter on.
    pub needle: String,

    /// Number of `File test {i}.txt` inputs, starting at 1.
    pub file_cases: usize,

    /// Plain-text log artifact, overwritten each run.
    pub log_path: PathBuf,

    /// Optional machine-readable report.
    pub report_json: Option<PathBuf>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            fixture_root: PathBuf::from("."),
            needle: DEFAULT_NEEDLE.to_string(),
            file_cases: DEFAULT_FILE_CASES,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            report_json: None,
        }
    }
}

impl EvaluatorConfig {
    /// Input identifiers scanned by the file and interaction checks.
    pub fn file_inputs(&self) -> Vec<String> {
        (1..=self.file_cases).map(file_test_name).collect()
    }
}
