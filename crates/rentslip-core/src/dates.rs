//! # Date Display
//!
//! Form dates are kept as ISO strings (`2025-01-31`); this module reads them
//! and produces the short forms printed on a receipt.
//!
//! ```text
//!   format_date          2024-01-05             → 05-Jan-2024
//!   format_date_range    same month             → 01-31 Jan 2024
//!                        same year              → 15 Jan - 15 Feb 2024
//!                        across years           → 01-Dec-2024 to 31-Jan-2025
//! ```

use chrono::{DateTime, Datelike, NaiveDate};

/// Reads `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// `DD-Mon-YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Formats an ISO string; empty when it cannot be read.
pub fn format_date_str(value: &str) -> String {
    parse_date(value).map(format_date).unwrap_or_default()
}

/// Compact rental period, collapsing the parts the two ends share.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rentslip_core::dates::format_date_range;
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(format_date_range(d(2024, 1, 1), d(2024, 1, 31)), "01-31 Jan 2024");
/// assert_eq!(format_date_range(d(2024, 1, 15), d(2024, 2, 15)), "15 Jan - 15 Feb 2024");
/// ```
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        format!(
            "{}-{} {}",
            start.format("%d"),
            end.format("%d"),
            start.format("%b %Y")
        )
    } else if start.year() == end.year() {
        format!(
            "{} - {} {}",
            start.format("%d %b"),
            end.format("%d %b"),
            start.year()
        )
    } else {
        format!("{} to {}", format_date(start), format_date(end))
    }
}

/// [`format_date_range`] over ISO strings.
///
/// If either end is unreadable the other is shown alone; both unreadable
/// gives an empty string.
pub fn format_date_range_str(start: &str, end: &str) -> String {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => format_date_range(s, e),
        (Some(d), None) | (None, Some(d)) => format_date(d),
        (None, None) => String::new(),
    }
}

/// First and last day of a `YYYY-MM` month.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rentslip_core::dates::month_to_date_range;
///
/// let (first, last) = month_to_date_range("2024-02").unwrap();
/// assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn month_to_date_range(month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = month.trim().split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}
