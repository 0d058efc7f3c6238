//! Field resolution for loosely-typed open-data delay rows.
//!
//! Socrata datasets do not guarantee stable column names across agencies or
//! dataset revisions, so every logical field is probed under a fixed priority
//! list of spellings. The first spelling present wins; values may arrive as
//! JSON strings or numbers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Sentinel line/cause label used when no recognized field is present.
pub const UNKNOWN: &str = "Unknown";

/// How many days back a record may date from and still count as recent.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// A single delay row as returned by the open-data endpoint.
///
/// Each alternative spelling observed across datasets gets its own optional
/// slot; the accessor methods resolve them in priority order. Unrecognized
/// columns are ignored during deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawRecord {
    // line / branch
    pub branch: Option<Value>,
    #[serde(rename = "Branch")]
    pub branch_cap: Option<Value>,
    pub line: Option<Value>,
    #[serde(rename = "Line")]
    pub line_cap: Option<Value>,

    // delay magnitude, in minutes
    pub delay_minutes: Option<Value>,
    pub delay: Option<Value>,
    pub minutes_late: Option<Value>,
    #[serde(rename = "Delay")]
    pub delay_cap: Option<Value>,

    // cancellation status
    pub cancelled: Option<Value>,
    #[serde(rename = "Cancelled")]
    pub cancelled_cap: Option<Value>,
    pub status: Option<Value>,

    // delay cause
    pub delay_category: Option<Value>,
    pub cause: Option<Value>,
    pub reason: Option<Value>,
    #[serde(rename = "Cause")]
    pub cause_cap: Option<Value>,

    // record date, consumed only by the recency filter
    pub date: Option<Value>,
    pub delay_date: Option<Value>,
    pub service_date: Option<Value>,
    pub period: Option<Value>,
}

impl RawRecord {
    /// Resolved line name: `branch`, `Branch`, `line`, `Line`, else [`UNKNOWN`].
    pub fn resolved_line(&self) -> String {
        first_text(&[&self.branch, &self.branch_cap, &self.line, &self.line_cap])
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Resolved delay magnitude in minutes.
    ///
    /// The first present spelling wins; an unparsable or missing value
    /// resolves to 0.0, which excludes the record from the delay sample while
    /// still counting it toward the line total.
    pub fn resolved_delay(&self) -> f64 {
        [&self.delay_minutes, &self.delay, &self.minutes_late, &self.delay_cap]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
            .find(|v| !matches!(v, Value::String(s) if s.trim().is_empty()))
            .and_then(as_number)
            .unwrap_or(0.0)
    }

    /// Whether the record represents a cancelled train.
    ///
    /// The resolved status is case-normalized; `Y`, `TRUE`, and anything
    /// containing `CANCEL` all register as a cancellation.
    pub fn is_cancelled(&self) -> bool {
        let Some(status) = first_text(&[&self.cancelled, &self.cancelled_cap, &self.status]) else {
            return false;
        };
        let status = status.to_uppercase();
        status == "Y" || status == "TRUE" || status.contains("CANCEL")
    }

    /// Resolved cause label: `delay_category`, `cause`, `reason`, `Cause`,
    /// else [`UNKNOWN`].
    pub fn resolved_cause(&self) -> String {
        first_text(&[&self.delay_category, &self.cause, &self.reason, &self.cause_cap])
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Resolved record date, if any date field is present and parses.
    ///
    /// The outer `Option` is `None` when no date spelling is present at all;
    /// `Some(None)` means a date field exists but could not be parsed.
    pub fn resolved_date(&self) -> Option<Option<NaiveDate>> {
        let text = first_text(&[&self.date, &self.delay_date, &self.service_date, &self.period])?;
        Some(parse_date(&text))
    }
}

/// Keeps only records dated within the last [`RECENT_WINDOW_DAYS`] days.
///
/// Records without any date field are kept; records whose date field fails to
/// parse are dropped. If the filter would remove every record, the original
/// set is returned unchanged so a dataset with an unrecognized date format
/// still renders.
pub fn filter_recent(records: Vec<RawRecord>, now: DateTime<Utc>) -> Vec<RawRecord> {
    let cutoff = now.date_naive() - chrono::Duration::days(RECENT_WINDOW_DAYS);

    let recent: Vec<RawRecord> = records
        .iter()
        .filter(|r| match r.resolved_date() {
            None => true,
            Some(Some(date)) => date >= cutoff,
            Some(None) => false,
        })
        .cloned()
        .collect();

    if recent.is_empty() { records } else { recent }
}

/// Returns the first slot that renders as non-empty text, skipping empty
/// strings so a blank column falls through to the next spelling.
fn first_text(slots: &[&Option<Value>]) -> Option<String> {
    slots
        .iter()
        .filter_map(|slot| slot.as_ref())
        .filter_map(as_text)
        .find(|s| !s.is_empty())
}

/// Renders a JSON scalar as trimmed text. Objects and arrays yield `None`.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses a JSON scalar as a float. Socrata serves numeric columns as strings.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses the date formats seen in Socrata exports: RFC 3339, floating
/// timestamps without an offset, and plain dates.
fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(json: &str) -> RawRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_line_resolution_priority() {
        let r = record(r#"{"branch": "Babylon", "line": "Hudson Line"}"#);
        assert_eq!(r.resolved_line(), "Babylon");

        let r = record(r#"{"Line": "Hudson Line"}"#);
        assert_eq!(r.resolved_line(), "Hudson Line");
    }

    #[test]
    fn test_line_defaults_to_unknown() {
        let r = record(r#"{"delay_minutes": "5"}"#);
        assert_eq!(r.resolved_line(), UNKNOWN);
    }

    #[test]
    fn test_empty_line_falls_through() {
        let r = record(r#"{"branch": "", "line": "Montauk"}"#);
        assert_eq!(r.resolved_line(), "Montauk");
    }

    #[test]
    fn test_delay_accepts_number_or_string() {
        assert_eq!(record(r#"{"delay_minutes": 12.5}"#).resolved_delay(), 12.5);
        assert_eq!(record(r#"{"delay_minutes": "12.5"}"#).resolved_delay(), 12.5);
    }

    #[test]
    fn test_delay_priority_order() {
        let r = record(r#"{"delay": "3", "delay_minutes": "7"}"#);
        assert_eq!(r.resolved_delay(), 7.0);
    }

    #[test]
    fn test_missing_or_unparsable_delay_is_zero() {
        assert_eq!(record(r#"{"branch": "Babylon"}"#).resolved_delay(), 0.0);
        assert_eq!(record(r#"{"delay_minutes": "n/a"}"#).resolved_delay(), 0.0);
    }

    #[test]
    fn test_cancellation_spellings() {
        assert!(record(r#"{"cancelled": "Y"}"#).is_cancelled());
        assert!(record(r#"{"cancelled": "true"}"#).is_cancelled());
        assert!(record(r#"{"status": "CANCELLED"}"#).is_cancelled());
        assert!(record(r#"{"status": "Train Cancelled"}"#).is_cancelled());
        assert!(!record(r#"{"cancelled": "N"}"#).is_cancelled());
        assert!(!record(r#"{"branch": "Babylon"}"#).is_cancelled());
    }

    #[test]
    fn test_cause_resolution() {
        let r = record(r#"{"reason": "Weather", "delay_category": "LIRR Mechanical"}"#);
        assert_eq!(r.resolved_cause(), "LIRR Mechanical");

        let r = record(r#"{"branch": "Babylon"}"#);
        assert_eq!(r.resolved_cause(), UNKNOWN);
    }

    #[test]
    fn test_date_parsing_variants() {
        let r = record(r#"{"date": "2025-06-10"}"#);
        assert_eq!(
            r.resolved_date(),
            Some(Some(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()))
        );

        let r = record(r#"{"service_date": "2025-06-10T00:00:00.000"}"#);
        assert_eq!(
            r.resolved_date(),
            Some(Some(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()))
        );

        let r = record(r#"{"period": "June 2025"}"#);
        assert_eq!(r.resolved_date(), Some(None));

        let r = record(r#"{"branch": "Babylon"}"#);
        assert_eq!(r.resolved_date(), None);
    }

    #[test]
    fn test_filter_recent_keeps_undated_and_recent() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let records = vec![
            record(r#"{"branch": "A", "date": "2025-06-10"}"#),
            record(r#"{"branch": "B", "date": "2025-01-01"}"#),
            record(r#"{"branch": "C"}"#),
        ];

        let recent = filter_recent(records, now);
        let lines: Vec<String> = recent.iter().map(|r| r.resolved_line()).collect();
        assert_eq!(lines, vec!["A", "C"]);
    }

    #[test]
    fn test_filter_recent_falls_back_to_all_when_everything_is_stale() {
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        let records = vec![
            record(r#"{"branch": "A", "date": "2024-01-01"}"#),
            record(r#"{"branch": "B", "date": "2024-02-01"}"#),
        ];

        let all = filter_recent(records, now);
        assert_eq!(all.len(), 2);
    }
}
