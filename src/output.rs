//! Output formatting and persistence for misery reports.
//!
//! Supports pretty-printing, JSON report files for the dashboard, and CSV
//! history append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

use crate::analyzers::types::{LineSummary, MiseryReport};

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &MiseryReport) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &MiseryReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a report as pretty-printed JSON to `path`, replacing any previous
/// report. This file is what the dashboard UI reads.
pub fn write_report(path: &str, report: &MiseryReport) -> Result<()> {
    debug!(path, "Writing report JSON");
    std::fs::write(path, serde_json::to_string_pretty(report)?)?;
    Ok(())
}

/// One appended CSV history row: a line's summary at a point in time.
#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    timestamp: DateTime<Utc>,
    agency: &'a str,
    line: &'a str,
    avg_delay: f64,
    delayed_trains: usize,
    cancelled_trains: usize,
    worst_delay: u32,
    misery_score: u8,
}

/// Appends one timestamped CSV row per line summary to `path`.
///
/// Creates the file with headers if it does not already exist. Rows are
/// written in line-name order so repeated snapshots diff cleanly.
pub fn append_history(
    path: &str,
    agency: &str,
    lines: &HashMap<String, LineSummary>,
) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending history rows");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    let timestamp = Utc::now();
    let mut names: Vec<&String> = lines.keys().collect();
    names.sort();

    for name in names {
        let summary = &lines[name];
        writer.serialize(HistoryRow {
            timestamp,
            agency,
            line: name,
            avg_delay: summary.avg_delay,
            delayed_trains: summary.delayed_trains,
            cancelled_trains: summary.cancelled_trains,
            worst_delay: summary.worst_delay,
            misery_score: summary.misery_score,
        })?;
    }
    writer.flush()?;

    Ok(())
}
