//! Data types produced by the aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Working accumulator for one line while records are being grouped.
#[derive(Debug, Default)]
pub struct LineStats {
    /// Positive delay magnitudes observed, in minutes.
    pub delays: Vec<f64>,
    pub cancelled_count: usize,
    pub total_trains: usize,
}

/// Final per-line statistics exposed to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSummary {
    /// Mean positive delay in minutes, rounded to one decimal.
    pub avg_delay: f64,
    /// Number of trains with a positive delay.
    pub delayed_trains: usize,
    pub cancelled_trains: usize,
    /// Largest single delay in minutes, rounded to the nearest integer.
    pub worst_delay: u32,
    /// Composite score, always in 0..=100.
    pub misery_score: u8,
}

/// One ranked delay cause with its share of all attributed delays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseSummary {
    pub cause: String,
    pub percent: u8,
}

/// Complete aggregation result for one agency, written as JSON for the
/// dashboard to render.
#[derive(Debug, Serialize)]
pub struct MiseryReport {
    pub generated_at: DateTime<Utc>,
    pub agency: String,
    /// Whether live open-data rows backed this report, as opposed to the
    /// embedded fallback dataset.
    pub live: bool,
    pub lines: HashMap<String, LineSummary>,
    pub causes: Vec<CauseSummary>,
}
