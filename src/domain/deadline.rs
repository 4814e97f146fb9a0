use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// A deadline has expired once it lies strictly before `now`
pub fn is_expired(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    deadline.is_some_and(|deadline| deadline < now)
}

/// Reads a stored deadline, accepting the shapes a date picker leaves behind.
///
/// Supported: RFC 3339 timestamps, `YYYY-MM-DDTHH:MM` local datetimes and bare
/// `YYYY-MM-DD` dates (both read as UTC), and epoch milliseconds. Anything
/// else, including empty strings, means "no deadline".
pub fn parse_deadline(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => parse_deadline_str(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

fn parse_deadline_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
