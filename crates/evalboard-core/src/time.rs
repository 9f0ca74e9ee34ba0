use crate::model::RunTime;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Converts a run's timestamp to epoch milliseconds.
///
/// Accepted forms:
/// - RFC 3339 / ISO 8601 with an offset (`2024-01-01T00:00:00Z`)
/// - naive date-times and bare dates, read as UTC
/// - JSON numbers, read as epoch milliseconds
///
/// Returns `None` for anything else; the caller still emits a point for it.
pub fn parse_time_to_millis(time: &RunTime) -> Option<i64> {
    match time {
        RunTime::Epoch(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        RunTime::Text(s) => parse_text(s.trim()),
        RunTime::Other(_) => None,
    }
}

fn parse_text(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    // RFC 2822 shows up when a producer stringifies a JS Date.
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<i64> {
        parse_time_to_millis(&RunTime::Text(s.into()))
    }

    #[test]
    fn rfc3339_utc_and_offsets() {
        assert_eq!(text("2024-01-01T00:00:00Z"), Some(1704067200000));
        assert_eq!(text("2024-01-01T01:00:00+01:00"), Some(1704067200000));
        assert_eq!(text("2024-01-01T00:00:00.250Z"), Some(1704067200250));
    }

    #[test]
    fn naive_forms_are_utc() {
        assert_eq!(text("2024-01-01T00:00:00"), Some(1704067200000));
        assert_eq!(text("2024-01-01 00:00:00.5"), Some(1704067200500));
        assert_eq!(text("2024-01-01 00:00"), Some(1704067200000));
        assert_eq!(text("2024-01-01"), Some(1704067200000));
    }

    #[test]
    fn numbers_are_epoch_millis() {
        let t: RunTime = serde_json::from_str("1704067200000").unwrap();
        assert_eq!(parse_time_to_millis(&t), Some(1704067200000));

        let t: RunTime = serde_json::from_str("1704067200000.75").unwrap();
        assert_eq!(parse_time_to_millis(&t), Some(1704067200000));
    }

    #[test]
    fn garbage_is_absent() {
        assert_eq!(text("yesterday"), None);
        assert_eq!(text(""), None);
        assert_eq!(parse_time_to_millis(&RunTime::default()), None);
    }
}
