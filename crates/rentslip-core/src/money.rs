//! # Money Module
//!
//! Provides the `Money` type for rent amounts and the Indian digit grouping
//! used to display them.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  FORM INPUT IS A FLOAT, DISPLAY IS NOT                                  │
//! │                                                                         │
//! │  The rent field arrives as f64 (15000.5, 1234.567, NaN...)              │
//! │                                                                         │
//! │  Money::from_rupees() rounds ONCE, half-up, to whole paise:             │
//! │    1234.567 → 123457 paise                                              │
//! │                                                                         │
//! │  Everything after that is integer math:                                 │
//! │    123457 paise → "₹1,234.57"                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Indian Digit Grouping
//! ```text
//!   1234567  →  12,34,567     last three digits, then pairs
//!    150000  →   1,50,000
//!       999  →        999     no grouping below one thousand
//! ```
//!
//! ## Usage
//! ```rust
//! use rentslip_core::money::Money;
//!
//! let rent = Money::from_rupees(150000.0).unwrap();
//! assert_eq!(rent.to_string(), "₹1,50,000");
//!
//! let odd = Money::from_rupees(1234.5).unwrap();
//! assert_eq!(odd.to_string(), "₹1,234.50");
//! ```

use std::fmt;

use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i128 (signed)**: every finite amount up to ~1.7e36 rupees keeps its
///   exact rounded digits
/// - **Single field tuple struct**: Zero-cost abstraction over i128
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i128);

/// Paise magnitudes at or beyond this do not fit in i128.
const PAISE_LIMIT: f64 = 1.7e38;

impl Money {
    /// Creates a Money value from a rupee amount, rounding half-up at the
    /// second decimal.
    ///
    /// Returns `None` for NaN, infinities and amounts whose paise do not
    /// fit in an i128.
    ///
    /// ## Example
    /// ```rust
    /// use rentslip_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(10.125).unwrap().paise(), 1013);
    /// assert_eq!(Money::from_rupees(-2.5).unwrap().paise(), -250);
    /// assert!(Money::from_rupees(f64::NAN).is_none());
    /// ```
    pub fn from_rupees(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        // Half-up: .5 always rounds toward positive infinity.
        let paise = (amount * 100.0 + 0.5).floor();
        if paise.abs() >= PAISE_LIMIT {
            return None;
        }
        Some(Money(paise as i128))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i128 {
        self.0
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> u128 {
        self.0.unsigned_abs() % 100
    }
}

// =============================================================================
// Indian Digit Grouping
// =============================================================================

/// Groups a run of ASCII digits by the Indian convention.
///
/// The last three digits form one group; everything to their left is split
/// into pairs. Inputs of three digits or fewer come back unchanged.
///
/// ## Example
/// ```rust
/// use rentslip_core::money::group_indian;
///
/// assert_eq!(group_indian("1234567"), "12,34,567");
/// assert_eq!(group_indian("100000"), "1,00,000");
/// assert_eq!(group_indian("999"), "999");
/// ```
pub fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the receipt form of the amount: `₹`, then the sign,
/// then Indian-grouped rupees, with `.NN` only when there are paise.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0.unsigned_abs() / 100).to_string();

        write!(f, "{}{}{}", CURRENCY_SYMBOL, sign, group_indian(&whole))?;

        let paise = self.paise_part();
        if paise > 0 {
            write!(f, ".{:02}", paise)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
