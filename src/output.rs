//! Output formatting and persistence for engineered features.
//!
//! Supports pretty-printing, JSON run summaries, and CSV emission.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::clean::CleanReport;
use crate::record::FeatureRecord;
use crate::stats::CorpusStats;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// Accounting for one complete pipeline run, logged as JSON at the end.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub rows_read: usize,
    pub unparsed_rows: usize,
    pub clean: CleanReport,
    pub rows_written: usize,
    pub stats: CorpusStats,
}

/// Logs a run summary using Rust's debug pretty-print format.
pub fn print_pretty(summary: &RunSummary) {
    debug!("{:#?}", summary);
}

/// Logs a run summary as pretty-printed JSON.
pub fn print_json(summary: &RunSummary) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

/// Writes the engineered records to a headered CSV file, overwriting any
/// existing file at `path`.
///
/// All-or-nothing: rows go to a staging file in the destination directory
/// which is renamed into place only after a successful flush, so a failed
/// run leaves no partial output behind.
pub fn write_features(path: &Path, features: &[FeatureRecord]) -> Result<()> {
    debug!(path = %path.display(), rows = features.len(), "Writing feature CSV");

    let staging = staging_path(path);

    if let Err(e) = write_rows(&staging, features) {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }

    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(e.into());
    }

    Ok(())
}

fn write_rows(path: &Path, features: &[FeatureRecord]) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    for record in features {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "features.csv".into());
    name.push(".tmp");
    path.with_file_name(name)
}
