//! # Receipt Numbers
//!
//! Human-facing receipt identifiers: `RR-<year>-<sequence>`.
//!
//! ```text
//!   RR-2025-001     sequence padded to at least three digits
//!   RR-2025-042
//!   RR-2025-1000    never truncated past 999
//! ```
//!
//! Allocation (reading and advancing the per-year counter) lives in
//! `rentslip-db`; this module only knows the format.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::RECEIPT_PREFIX;

/// Formats a receipt number for a year and sequence value.
///
/// ## Example
/// ```rust
/// use rentslip_core::receipt_number::format_receipt_number;
///
/// assert_eq!(format_receipt_number(2025, 7), "RR-2025-007");
/// assert_eq!(format_receipt_number(2025, 1000), "RR-2025-1000");
/// ```
pub fn format_receipt_number(year: i32, sequence: u64) -> String {
    format!("{}-{}-{:03}", RECEIPT_PREFIX, year, sequence)
}

/// Splits a receipt number into `(year, sequence)`.
///
/// ## Example
/// ```rust
/// use rentslip_core::receipt_number::parse_receipt_number;
///
/// assert_eq!(parse_receipt_number("RR-2025-042").unwrap(), (2025, 42));
/// assert!(parse_receipt_number("INV-2025-042").is_err());
/// ```
pub fn parse_receipt_number(number: &str) -> CoreResult<(i32, u64)> {
    let invalid = || CoreError::InvalidReceiptNumber(number.to_string());

    let mut parts = number.splitn(3, '-');
    let (prefix, year, sequence) = match (parts.next(), parts.next(), parts.next()) {
        (Some(p), Some(y), Some(s)) => (p, y, s),
        _ => return Err(invalid()),
    };

    if prefix != RECEIPT_PREFIX
        || year.len() != 4
        || sequence.len() < 3
        || !year.bytes().all(|b| b.is_ascii_digit())
        || !sequence.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let sequence = sequence.parse::<u64>().map_err(|_| invalid())?;
    Ok((year, sequence))
}

/// Replaces every character outside `[A-Za-z0-9-]` with `_`.
pub fn sanitize_for_filename(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name for an exported receipt image.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rentslip_core::receipt_number::export_filename;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
/// assert_eq!(
///     export_filename("RR-2025-001", date, "png"),
///     "Receipt-RR-2025-001-2025-03-09.png"
/// );
/// ```
pub fn export_filename(receipt_number: &str, date: NaiveDate, extension: &str) -> String {
    format!(
        "Receipt-{}-{}.{}",
        sanitize_for_filename(receipt_number),
        date.format("%Y-%m-%d"),
        extension
    )
}
