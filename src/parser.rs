//! JSON parser for open-data delay feeds.

use anyhow::Result;

use crate::record::RawRecord;

/// Decodes a JSON array of delay rows from raw response bytes.
///
/// Individual rows may carry any subset of the recognized columns; field
/// resolution happens later, per record. A body that is not a JSON array of
/// objects is an error, which callers treat as "no data".
pub fn parse_rows(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_array() {
        let rows = parse_rows(b"[]").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rows_with_mixed_spellings() {
        let body = br#"[
            {"branch": "Babylon", "delay_minutes": "6.5", "delay_category": "LIRR Mechanical"},
            {"Line": "Hudson Line", "minutes_late": 12, "status": "CANCELLED"}
        ]"#;

        let rows = parse_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].resolved_line(), "Babylon");
        assert_eq!(rows[0].resolved_delay(), 6.5);
        assert_eq!(rows[1].resolved_line(), "Hudson Line");
        assert!(rows[1].is_cancelled());
    }

    #[test]
    fn test_parse_ignores_unrecognized_columns() {
        let body = br#"[{"branch": "Montauk", "delay_minutes": "4", "train_id": "8012", "direction": "East"}]"#;

        let rows = parse_rows(body).unwrap();
        assert_eq!(rows[0].resolved_line(), "Montauk");
    }

    #[test]
    fn test_parse_non_array_body_is_an_error() {
        assert!(parse_rows(br#"{"error": "rate limited"}"#).is_err());
        assert!(parse_rows(b"<html>gateway timeout</html>").is_err());
    }
}
