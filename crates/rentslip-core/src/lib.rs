//! # rentslip-core: Pure Logic for Rentslip
//!
//! This crate holds everything about a rent receipt that can be computed
//! without touching storage: amount formatting, amount in words, the record
//! types, the receipt-number format, date display and form validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rentslip Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rentslip CLI (apps/cli)                      │   │
//! │  │    draft set ──► generate ──► render ──► export                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rentslip-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ currency  │  │  receipt  │  │ validation│  │   │
//! │  │   │  Draft    │  │  ₹1,50,000│  │  _number  │  │  PAN, rent│  │   │
//! │  │   │  Receipt  │  │  words    │  │ RR-Y-NNN  │  │  dates    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rentslip-db (Persistence Layer)                 │   │
//! │  │          key-value store, drafts, receipts, counters            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Stored documents (DraftRecord, ReceiptRecord) and form state
//! - [`money`] - Paise-based Money type and Indian digit grouping
//! - [`currency`] - `format_currency` and amount-in-words
//! - [`receipt_number`] - `RR-YYYY-NNN` numbers and export file names
//! - [`dates`] - Receipt date display
//! - [`validation`] - Form checks before a receipt is generated
//! - [`view`] - The formatted strings a renderer draws
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rentslip_core::currency::{format_currency, number_to_words_clean};
//!
//! assert_eq!(format_currency(150000.0), "₹1,50,000");
//! assert_eq!(number_to_words_clean(150000.0), "One Lakh Fifty Thousand Only");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod dates;
pub mod error;
pub mod money;
pub mod receipt_number;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use currency::{format_currency, number_to_words, number_to_words_clean};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol printed in front of every amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Prefix of every receipt number (`RR-2025-001`).
pub const RECEIPT_PREFIX: &str = "RR";

/// Required length of a landlord PAN (`ABCDE1234F`).
pub const PAN_LENGTH: usize = 10;

/// Smallest rent the detailed validator accepts, in rupees.
pub const MIN_RENT_AMOUNT: f64 = 1.0;

/// Largest rent the detailed validator accepts, in rupees (10 crore).
pub const MAX_RENT_AMOUNT: f64 = 100_000_000.0;

/// Monthly rent above which a cash receipt needs a revenue stamp.
pub const REVENUE_STAMP_THRESHOLD: f64 = 5_000.0;
