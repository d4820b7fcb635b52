//! # Currency Formatting
//!
//! Turns a rent amount into the two strings printed on a receipt:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rent_amount: 150000.0                                                  │
//! │       │                                                                 │
//! │       ├──► format_currency()        → "₹1,50,000"                      │
//! │       │                                                                 │
//! │       └──► number_to_words_clean()  → "One Lakh Fifty Thousand Only"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are total: NaN and infinities degrade to `"₹0"` and
//! `"Zero Only"`, nothing here panics.

use crate::money::{group_indian, Money};
use crate::CURRENCY_SYMBOL;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Indian scale words, largest first.
const SCALES: [(u128, &str); 4] = [
    (10_000_000, "Crore"),
    (100_000, "Lakh"),
    (1_000, "Thousand"),
    (100, "Hundred"),
];

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount with the rupee symbol and Indian digit grouping.
///
/// ## Rules
/// - Non-finite input → `"₹0"`
/// - Rounded half-up to paise
/// - `.NN` appended only when the paise are non-zero
/// - A negative sign follows the symbol: `"₹-1,500"`
///
/// ## Example
/// ```rust
/// use rentslip_core::currency::format_currency;
///
/// assert_eq!(format_currency(1234567.0), "₹12,34,567");
/// assert_eq!(format_currency(1234.5), "₹1,234.50");
/// assert_eq!(format_currency(-1500.0), "₹-1,500");
/// assert_eq!(format_currency(f64::NAN), "₹0");
/// ```
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}0", CURRENCY_SYMBOL);
    }

    match Money::from_rupees(amount) {
        Some(money) => money.to_string(),
        // Past i128 paise; f64 has no fractional digits at this size anyway
        None => {
            let sign = if amount < 0.0 { "-" } else { "" };
            let digits = format!("{:.0}", amount.abs().round());
            format!("{}{}{}", CURRENCY_SYMBOL, sign, group_indian(&digits))
        }
    }
}

// =============================================================================
// Amount In Words
// =============================================================================

/// Converts an amount to words using Indian scale names.
///
/// This is the raw converter: an amount below one rupee yields a leading
/// space (`" and Fifty Paise Only"`). Receipts use
/// [`number_to_words_clean`].
///
/// ## Example
/// ```rust
/// use rentslip_core::currency::number_to_words;
///
/// assert_eq!(number_to_words(150000.0), "One Lakh Fifty Thousand Only");
/// assert_eq!(number_to_words(-5.0), "Negative Five Only");
/// assert_eq!(number_to_words(0.0), "Zero Only");
/// ```
pub fn number_to_words(amount: f64) -> String {
    if !amount.is_finite() || amount == 0.0 {
        return "Zero Only".to_string();
    }

    let negative = amount < 0.0;
    let abs = amount.abs();

    let integer = abs.floor();
    let paise = ((abs - integer) * 100.0).round();

    // `as` saturates: amounts past u128::MAX read as u128::MAX.
    let mut words = integer_to_words(integer as u128);

    if paise > 0.0 {
        words.push_str(" and ");
        words.push_str(&integer_to_words(paise as u128));
        words.push_str(" Paise");
    }

    words.push_str(" Only");

    if negative {
        format!("Negative {}", words)
    } else {
        words
    }
}

/// [`number_to_words`] with whitespace runs collapsed and ends trimmed.
///
/// ## Example
/// ```rust
/// use rentslip_core::currency::number_to_words_clean;
///
/// assert_eq!(number_to_words_clean(0.5), "and Fifty Paise Only");
/// assert_eq!(number_to_words_clean(15000.0), "Fifteen Thousand Only");
/// ```
pub fn number_to_words_clean(amount: f64) -> String {
    clean_words(&number_to_words(amount))
}

fn clean_words(words: &str) -> String {
    words.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn integer_to_words(num: u128) -> String {
    if num == 0 {
        return String::new();
    }

    for &(scale, name) in SCALES.iter() {
        if num >= scale {
            let head = integer_to_words(num / scale);
            let rest = integer_to_words(num % scale);
            return if rest.is_empty() {
                format!("{} {}", head, name)
            } else {
                format!("{} {} {}", head, name, rest)
            };
        }
    }

    // num < 100 from here on
    let n = num as usize;
    if n >= 20 {
        let ones = ONES[n % 10];
        if ones.is_empty() {
            TENS[n / 10].to_string()
        } else {
            format!("{} {}", TENS[n / 10], ones)
        }
    } else if n >= 10 {
        TEENS[n - 10].to_string()
    } else {
        ONES[n].to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
