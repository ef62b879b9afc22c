use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-only header values, e.g. `2024-03-01`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time header values, tried in order after the date-only form.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%dT%H:%M:%S"];

/// Parse a header date value; values without an offset are taken as UTC.
///
/// Returns `None` for missing, empty or unrecognized input so the caller can
/// fall back to the file's modification time.
pub fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.filter(|v| !v.is_empty())?;
    if !has_four_digit_year(value) {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// chrono's `%Y` also takes signs and longer years; header dates must start
/// with exactly four digits and a `-`.
fn has_four_digit_year(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

/// Convert a filesystem timestamp into UTC.
pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
