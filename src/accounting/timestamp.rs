use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::TransactionError;

/// Format used when writing timestamps into the ledger.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a calendar date or an ISO-8601 date-time.
///
/// This is the only place where timestamps are interpreted, both for user
/// input when recording and for stored values when reporting. A bare date
/// resolves to midnight; a UTC offset, if any, is dropped and the wall-clock
/// time kept.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TransactionError> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(timestamp);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|timestamp| timestamp.naive_local())
        .map_err(|_| TransactionError::InvalidDate)
}

/// Resolves optional user input into a timestamp, defaulting to now when the
/// input is absent or blank.
pub fn timestamp_or_now(input: Option<&str>) -> Result<NaiveDateTime, TransactionError> {
    match input.map(str::trim).filter(|input| !input.is_empty()) {
        Some(input) => parse_timestamp(input),
        None => Ok(Local::now().naive_local()),
    }
}

pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_date_only() {
        let timestamp = parse_timestamp("2024-03-15").unwrap();
        assert_eq!((timestamp.year(), timestamp.month(), timestamp.day()), (2024, 3, 15));
        assert_eq!(timestamp.hour(), 0);
    }

    #[test]
    fn test_parse_date_time_variants() {
        for input in [
            "2024-03-15T10:30:00",
            "2024-03-15T10:30:00.123456",
            "2024-03-15 10:30:00",
            "2024-03-15T10:30",
            "2024-03-15 10:30",
            "2024-03-15T10:30:00+07:00",
        ] {
            let timestamp = parse_timestamp(input).unwrap();
            assert_eq!((timestamp.month(), timestamp.hour(), timestamp.minute()), (3, 10, 30), "{input}");
        }
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "yesterday", "2024-13-01", "2024-02-30", "15/03/2024"] {
            assert_eq!(parse_timestamp(input), Err(TransactionError::InvalidDate), "{input}");
        }
    }

    #[test]
    fn test_format_is_parseable() {
        let timestamp = parse_timestamp("2024-01-05T08:15:42.5").unwrap();
        let formatted = format_timestamp(&timestamp);

        assert_eq!(formatted, "2024-01-05T08:15:42.500");
        assert_eq!(parse_timestamp(&formatted).unwrap(), timestamp);
    }

    #[test]
    fn test_blank_input_defaults_to_now() {
        let before = Local::now().naive_local();
        let timestamp = timestamp_or_now(Some("  ")).unwrap();
        assert!(timestamp >= before);
        assert!(timestamp_or_now(None).is_ok());
        assert_eq!(timestamp_or_now(Some("nope")), Err(TransactionError::InvalidDate));
    }
}
