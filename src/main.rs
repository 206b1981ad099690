//! CLI entry point for the taxi feature pipeline.
//!
//! Reads a raw TLC trip CSV, cleans it, derives engineered features, and
//! writes the enriched CSV for downstream model fitting.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use taxi_feature_pipeline::features::engineer_with_stats;
use taxi_feature_pipeline::output::{RunSummary, print_json, write_features};
use taxi_feature_pipeline::stats::CorpusStats;
use taxi_feature_pipeline::{clean::clean, reader::read_trips};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "taxi_feature_pipeline")]
#[command(about = "Cleans NYC taxi trip CSVs and derives model-ready features", long_about = None)]
struct Cli {
    /// Path to the raw trip CSV
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// CSV file to write engineered features to
    #[arg(short, long, default_value = "features.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/taxi_feature_pipeline.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("taxi_feature_pipeline.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    run(&cli.input, &cli.output)
}

/// Runs the full pipeline: read, clean, engineer, write, summarize.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
fn run(input: &Path, output: &Path) -> Result<()> {
    let outcome = read_trips(input)?;
    let rows_read = outcome.total_rows();
    info!(rows_read, "Input read");

    let (records, report) = clean(outcome.records)?;

    let stats = CorpusStats::from_records(&records);
    let features = engineer_with_stats(&records, &stats)?;

    write_features(output, &features)?;
    info!(rows_written = features.len(), output = %output.display(), "Feature CSV written");

    let summary = RunSummary {
        rows_read,
        unparsed_rows: outcome.unparsed_rows,
        clean: report,
        rows_written: features.len(),
        stats,
    };
    print_json(&summary)?;

    Ok(())
}
