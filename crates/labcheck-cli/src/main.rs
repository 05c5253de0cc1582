//! labcheck - self-verifying exercise evaluator
//!
//! Runs the matrix, string, file and interaction checks against the fixtures
//! in a directory, prints the report, writes it to the log artifact and
//! exits 0 on pass, 1 on fail.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use labcheck_core::config::{DEFAULT_FILE_CASES, DEFAULT_LOG_PATH, DEFAULT_NEEDLE};
use labcheck_core::{
    ConsoleReportSink, EvaluatorConfig, FileReportSink, JsonReportSink, Orchestrator, ReportSink,
    RunResult,
};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "labcheck")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check exercise metrics against solution fixtures", long_about = None)]
struct Cli {
    /// Directory holding the test and solution fixtures
    #[arg(short, long, env = "LABCHECK_ROOT", default_value = ".")]
    root: PathBuf,

    /// Substring the file checks filter lines on
    #[arg(short, long, env = "LABCHECK_NEEDLE", default_value = DEFAULT_NEEDLE)]
    needle: String,

    /// Number of `File test {i}.txt` inputs
    #[arg(long, default_value_t = DEFAULT_FILE_CASES)]
    file_cases: usize,

    /// Log artifact path, overwritten each run
    #[arg(long, env = "LABCHECK_LOG_PATH", default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Also write the report as JSON to this path
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> EvaluatorConfig {
        EvaluatorConfig {
            fixture_root: self.root,
            needle: self.needle,
            file_cases: self.file_cases,
            log_path: self.log,
            report_json: self.report_json,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("labcheck: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    labcheck_core::init_tracing(cli.json, level);

    let print_config = cli.print_config;
    let config = cli.into_config();
    if print_config {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{json}");
        return Ok(true);
    }

    if !config.fixture_root.is_dir() {
        warn!(
            root = %config.fixture_root.display(),
            "Fixture root is not a directory; every fixture will read as missing"
        );
    }

    let result = evaluate(config);
    println!("Exit status: {}", result.exit_code());

    Ok(result.passed)
}

/// Run every check and emit the report to the console, the log artifact and
/// the optional JSON report.
fn evaluate(config: EvaluatorConfig) -> RunResult {
    let console = ConsoleReportSink;
    let log_file = FileReportSink::new(&config.log_path);
    let json_report = config.report_json.as_ref().map(JsonReportSink::new);

    let mut sinks: Vec<&dyn ReportSink> = vec![&console, &log_file];
    if let Some(sink) = &json_report {
        sinks.push(sink);
    }

    let result = Orchestrator::from_config(config.clone()).run_and_emit(&sinks);

    info!(
        run_id = %result.report.run_id,
        passed = result.passed,
        duration_ms = result.duration_ms,
        "Evaluation finished"
    );
    result
}
