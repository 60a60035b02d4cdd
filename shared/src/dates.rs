//! Calendar helpers shared by status derivation, filtering and display.

use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};

/// Format a date for display, e.g. "January 15, 2025"
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// The instant a calendar date starts, in UTC.
///
/// Dates are compared against the current time as the start of their day, so a
/// certificate expiring "today" is already past once the day has begun.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// `now` shifted forward by whole calendar months, clamped to the end of the
/// target month when the day does not exist there.
pub fn add_months(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_add_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// `now` shifted back by whole calendar months
pub fn sub_months(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parse a `YYYY-MM-DD` value as produced by a date input
pub fn parse_input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, date};

    #[test]
    fn test_format_display_date() {
        assert_eq!(format_display_date(date(2025, 1, 15)), "January 15, 2025");
        assert_eq!(format_display_date(date(2024, 12, 3)), "December 3, 2024");
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(at(2024, 11, 30), 3).date_naive(), date(2025, 2, 28));
        assert_eq!(sub_months(at(2024, 3, 31), 1).date_naive(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(parse_input_date("2024-01-01"), Some(date(2024, 1, 1)));
        assert_eq!(parse_input_date(" 2024-02-29 "), Some(date(2024, 2, 29)));
        assert_eq!(parse_input_date("2023-02-29"), None);
        assert_eq!(parse_input_date(""), None);
    }
}
