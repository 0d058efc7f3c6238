//! Built-in agency deployments.
//!
//! Each deployment carries its open-data endpoint, its score calibration,
//! and the embedded fallback dataset that stands in whenever the endpoint
//! is unreachable or returns nothing.

use clap::ValueEnum;
use std::collections::HashMap;

use crate::analyzers::score::ScoreWeights;
use crate::analyzers::types::{CauseSummary, LineSummary};

/// A commuter-rail agency this tool knows how to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Agency {
    /// Long Island Rail Road
    Lirr,
    /// Metro-North Railroad
    MetroNorth,
    /// NJ Transit rail
    NjTransit,
}

/// Fallback row: line name, avg delay, delayed, cancelled, worst, score.
type FallbackRow = (&'static str, f64, usize, usize, u32, u8);

const LIRR_LINES: &[FallbackRow] = &[
    ("Port Washington", 4.2, 45, 2, 18, 38),
    ("Oyster Bay", 3.8, 32, 1, 15, 34),
    ("Ronkonkoma", 5.5, 78, 4, 28, 47),
    ("Montauk", 6.2, 42, 3, 35, 44),
    ("Long Beach", 3.5, 38, 1, 14, 32),
    ("Hempstead", 4.8, 52, 2, 22, 41),
    ("Babylon", 5.8, 95, 5, 32, 52),
    ("Far Rockaway", 4.0, 35, 1, 16, 35),
    ("West Hempstead", 3.6, 28, 1, 12, 31),
    ("City Terminal Zone", 6.5, 110, 6, 42, 58),
];

const METRO_NORTH_LINES: &[FallbackRow] = &[
    ("Hudson Line", 3.8, 42, 2, 18, 34),
    ("Harlem Line", 3.5, 38, 1, 16, 32),
    ("New Haven Line", 4.2, 55, 3, 22, 38),
    ("New Canaan Branch", 3.0, 15, 1, 12, 28),
    ("Danbury Branch", 3.2, 18, 1, 14, 29),
    ("Waterbury Branch", 3.5, 12, 1, 15, 30),
    ("Wassaic Branch", 3.8, 20, 1, 18, 32),
];

const NJ_TRANSIT_LINES: &[FallbackRow] = &[
    ("Northeast Corridor", 5.8, 85, 4, 32, 48),
    ("North Jersey Coast", 4.5, 52, 3, 25, 41),
    ("Raritan Valley", 5.2, 48, 2, 28, 43),
    ("Morris & Essex", 4.8, 62, 3, 24, 42),
    ("Main/Bergen", 4.2, 38, 2, 20, 37),
    ("Montclair-Boonton", 4.5, 35, 2, 22, 38),
    ("Pascack Valley", 3.8, 28, 1, 18, 33),
    ("Port Jervis", 5.5, 32, 2, 35, 44),
    ("Atlantic City", 4.0, 25, 1, 20, 35),
    ("Gladstone Branch", 3.5, 18, 1, 15, 30),
    ("Morristown Line", 4.6, 55, 3, 26, 42),
    ("Princeton Branch", 3.2, 12, 0, 12, 28),
];

const LIRR_CAUSES: &[(&str, u8)] = &[
    ("LIRR Mechanical", 28),
    ("LIRR Electrical", 19),
    ("Customer", 16),
    ("LIRR Crew", 12),
    ("Weather", 10),
    ("Amtrak", 8),
    ("LIRR Other", 7),
];

const METRO_NORTH_CAUSES: &[(&str, u8)] = &[
    ("MNR Mechanical", 22),
    ("Signal Problems", 18),
    ("Weather", 16),
    ("MNR Crew", 14),
    ("Customer", 12),
    ("Switch Failure", 10),
    ("MNR Other", 8),
];

const NJ_TRANSIT_CAUSES: &[(&str, u8)] = &[
    ("Amtrak", 24),
    ("Equipment", 20),
    ("Signal Problems", 18),
    ("Crew Availability", 14),
    ("Track Work", 10),
    ("Weather", 8),
    ("Switch Problems", 6),
];

impl Agency {
    /// Human-readable agency name used in reports and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Agency::Lirr => "LIRR",
            Agency::MetroNorth => "Metro-North",
            Agency::NjTransit => "NJ Transit",
        }
    }

    /// Open-data endpoint serving this agency's delay rows.
    ///
    /// NJ Transit publishes no compatible feed, so its deployment always
    /// renders the fallback dataset.
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Agency::Lirr => Some("https://data.ny.gov/resource/e32g-kbe9.json"),
            Agency::MetroNorth => Some("https://data.ny.gov/resource/f462-ka72.json"),
            Agency::NjTransit => None,
        }
    }

    /// Score calibration for this deployment. Metro-North runs a lower base
    /// offset than the other two.
    pub fn score_weights(&self) -> ScoreWeights {
        match self {
            Agency::Lirr => ScoreWeights::with_base(15.0),
            Agency::MetroNorth => ScoreWeights::with_base(12.0),
            Agency::NjTransit => ScoreWeights::with_base(15.0),
        }
    }

    /// Embedded per-line fallback summaries.
    pub fn fallback_lines(&self) -> HashMap<String, LineSummary> {
        let rows = match self {
            Agency::Lirr => LIRR_LINES,
            Agency::MetroNorth => METRO_NORTH_LINES,
            Agency::NjTransit => NJ_TRANSIT_LINES,
        };

        rows.iter()
            .map(|&(name, avg_delay, delayed, cancelled, worst, score)| {
                (
                    name.to_string(),
                    LineSummary {
                        avg_delay,
                        delayed_trains: delayed,
                        cancelled_trains: cancelled,
                        worst_delay: worst,
                        misery_score: score,
                    },
                )
            })
            .collect()
    }

    /// Embedded fallback cause breakdown.
    pub fn fallback_causes(&self) -> Vec<CauseSummary> {
        let rows = match self {
            Agency::Lirr => LIRR_CAUSES,
            Agency::MetroNorth => METRO_NORTH_CAUSES,
            Agency::NjTransit => NJ_TRANSIT_CAUSES,
        };

        rows.iter()
            .map(|&(cause, percent)| CauseSummary {
                cause: cause.to_string(),
                percent,
            })
            .collect()
    }
}
