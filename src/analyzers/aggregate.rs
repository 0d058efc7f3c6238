use std::collections::HashMap;

use tracing::debug;

use crate::analyzers::score::{ScoreWeights, misery_score};
use crate::analyzers::types::{CauseSummary, LineStats, LineSummary};
use crate::analyzers::utility::{mean, round1};
use crate::record::{RawRecord, UNKNOWN};

/// Maximum number of causes kept in the ranked breakdown.
pub const MAX_CAUSES: usize = 7;

/// Occurrence count for one cause, with the record index it first appeared
/// at so ties sort deterministically.
struct CauseCount {
    count: usize,
    first_seen: usize,
}

/// Aggregates raw delay rows into per-line summaries and a ranked cause list.
///
/// The caller passes in the fallback dataset; lines that never accumulate a
/// positive delay keep their fallback entry untouched, and the fallback cause
/// list stands when no record carries an attributable cause. The returned
/// maps are owned by the caller; nothing is kept between invocations.
pub fn aggregate_records(
    records: &[RawRecord],
    fallback_lines: HashMap<String, LineSummary>,
    fallback_causes: Vec<CauseSummary>,
    weights: &ScoreWeights,
) -> (HashMap<String, LineSummary>, Vec<CauseSummary>) {
    let mut line_stats: HashMap<String, LineStats> = HashMap::new();
    let mut cause_counts: HashMap<String, CauseCount> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let delay = record.resolved_delay();

        let stats = line_stats.entry(record.resolved_line()).or_default();
        stats.total_trains += 1;
        if delay > 0.0 {
            stats.delays.push(delay);
        }
        if record.is_cancelled() {
            stats.cancelled_count += 1;
        }

        let cause = record.resolved_cause();
        if cause != UNKNOWN {
            cause_counts
                .entry(cause)
                .or_insert(CauseCount {
                    count: 0,
                    first_seen: index,
                })
                .count += 1;
        }
    }

    debug!(
        lines = line_stats.len(),
        causes = cause_counts.len(),
        records = records.len(),
        "Grouped delay records"
    );

    let mut lines = fallback_lines;
    for (line, stats) in line_stats {
        // A line with no positive delays keeps its fallback summary.
        if stats.delays.is_empty() {
            continue;
        }

        let avg = mean(&stats.delays);
        let worst = stats.delays.iter().copied().fold(0.0_f64, f64::max);
        let ratio = stats.delays.len() as f64 / stats.total_trains as f64;

        lines.insert(
            line,
            LineSummary {
                avg_delay: round1(avg),
                delayed_trains: stats.delays.len(),
                cancelled_trains: stats.cancelled_count,
                worst_delay: worst.round() as u32,
                misery_score: misery_score(avg, ratio, stats.cancelled_count, worst, weights),
            },
        );
    }

    let causes = rank_causes(cause_counts, fallback_causes);

    (lines, causes)
}

/// Ranks causes by descending occurrence count, ties broken by first
/// appearance, truncated to [`MAX_CAUSES`]. Percentages are shares of all
/// attributed (non-Unknown) occurrences, so a truncated list need not sum
/// to 100.
fn rank_causes(
    counts: HashMap<String, CauseCount>,
    fallback: Vec<CauseSummary>,
) -> Vec<CauseSummary> {
    if counts.is_empty() {
        return fallback;
    }

    let total: usize = counts.values().map(|c| c.count).sum();

    let mut ranked: Vec<(String, CauseCount)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| {
        b.1.count
            .cmp(&a.1.count)
            .then(a.1.first_seen.cmp(&b.1.first_seen))
    });
    ranked.truncate(MAX_CAUSES);

    ranked
        .into_iter()
        .map(|(cause, c)| CauseSummary {
            cause,
            percent: ((c.count as f64 / total as f64) * 100.0).round() as u8,
        })
        .collect()
}
