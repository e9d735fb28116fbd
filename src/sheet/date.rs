use calamine::Data;
use chrono::{DateTime, Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DateParseError {
    #[error("not a recognizable calendar day: {0:?}")]
    Unrecognized(String),

    #[error("spreadsheet serial {0} is out of range")]
    SerialOutOfRange(f64),
}

// Days-since epoch used by the xlsx format. 1899-12-30 rather than -31
// absorbs the historical 1900 leap-year bug, so real-world serials map to
// the dates a spreadsheet displays for them.
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap()
}

// Serial for 9999-12-31, the last day the format can represent.
const MAX_SERIAL: f64 = 2_958_465.0;

/// Convert a heterogeneous date representation into a calendar day.
///
/// `YYYY-MM-DD` strings are parsed as literal year/month/day components,
/// never through a timezone-aware parser, so the day cannot shift across a
/// timezone boundary. Bare numbers are treated as Excel serial days. Other
/// calendar-like strings are accepted on a best-effort basis.
pub fn normalize(input: &str) -> Result<NaiveDate, DateParseError> {
    let s = input.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }

    if let Ok(n) = s.parse::<f64>() {
        return from_serial(n);
    }

    // Best-effort: common locale renderings of a plain date.
    const FORMATS: [&str; 8] = [
        "%m/%d/%Y",
        "%m/%d/%y",
        "%d/%m/%Y",
        "%Y/%m/%d",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d-%b-%Y",
    ];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    // Full timestamps keep their literal date component.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(DateParseError::Unrecognized(s.to_string()))
}

/// Excel serial day to calendar day. Fractional time-of-day is truncated.
pub fn from_serial(serial: f64) -> Result<NaiveDate, DateParseError> {
    if !serial.is_finite() || serial <= 0.0 || serial > MAX_SERIAL {
        return Err(DateParseError::SerialOutOfRange(serial));
    }
    Ok(excel_epoch() + Duration::days(serial.trunc() as i64))
}

/// Interpret a spreadsheet header cell as a calendar day, if it is one.
/// Native date cells go through the serial path; everything else through
/// string normalization. `None` means "not a date column".
pub fn header_day(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => from_serial(dt.as_f64()).ok(),
        Data::Float(f) => from_serial(*f).ok(),
        Data::Int(i) => from_serial(*i as f64).ok(),
        Data::String(s) => normalize(s).ok(),
        Data::DateTimeIso(s) => normalize(s).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_string_parses_as_literal_components() {
        // Must hold regardless of the host timezone.
        assert_eq!(normalize("2024-03-01").unwrap(), day(2024, 3, 1));
        assert_eq!(normalize(" 2024-01-10 ").unwrap(), day(2024, 1, 10));
    }

    #[test]
    fn excel_serial_uses_lotus_epoch() {
        assert_eq!(normalize("45292").unwrap(), day(2024, 1, 1));
        assert_eq!(from_serial(45292.0).unwrap(), day(2024, 1, 1));
        // Time-of-day fraction is dropped, not rounded.
        assert_eq!(from_serial(45292.99).unwrap(), day(2024, 1, 1));
    }

    #[test]
    fn serial_bounds_are_enforced() {
        assert!(from_serial(0.0).is_err());
        assert!(from_serial(-3.0).is_err());
        assert!(from_serial(f64::NAN).is_err());
        assert!(from_serial(3_000_000.0).is_err());
    }

    #[test]
    fn best_effort_formats() {
        assert_eq!(normalize("3/1/2024").unwrap(), day(2024, 3, 1));
        assert_eq!(normalize("March 1, 2024").unwrap(), day(2024, 3, 1));
        assert_eq!(normalize("2024/03/01").unwrap(), day(2024, 3, 1));
        assert_eq!(normalize("2024-03-01T10:30:00Z").unwrap(), day(2024, 3, 1));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(normalize("Notes").is_err());
        assert!(normalize("").is_err());
        assert!(normalize("first-second").is_err());
    }

    #[test]
    fn header_day_handles_native_cells() {
        assert_eq!(header_day(&Data::Float(45292.0)), Some(day(2024, 1, 1)));
        assert_eq!(
            header_day(&Data::String("2024-01-10".into())),
            Some(day(2024, 1, 10))
        );
        assert_eq!(header_day(&Data::String("Email".into())), None);
        assert_eq!(header_day(&Data::Empty), None);
    }
}
