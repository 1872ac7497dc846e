//! CLI entry point for the student grader.
//!
//! Reads a grades CSV, grades every student, and reports the top scorer
//! overall and per university.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use student_grader::analyzers::analyzer::analyze;
use student_grader::output::{print_json, print_report};
use student_grader::parser::ParseConfig;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "student_grader")]
#[command(about = "Grades student test scores and finds the top performers", long_about = None)]
struct Cli {
    /// Grades CSV file: a header line, then firstName,lastName,university,test1..test4
    #[arg(value_name = "FILE", env = "GRADES_FILE", default_value = "grades.csv")]
    input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/student_grader.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("student_grader.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let delimiter = u8::try_from(cli.delimiter)
        .with_context(|| format!("delimiter {:?} must be a single-byte character", cli.delimiter))?;
    let config = ParseConfig {
        delimiter,
        ..ParseConfig::default()
    };

    info!(input = %cli.input.display(), "Grading students");
    let report = analyze(&cli.input, &config)
        .with_context(|| format!("failed to grade {}", cli.input.display()))?;

    if cli.json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    Ok(())
}
