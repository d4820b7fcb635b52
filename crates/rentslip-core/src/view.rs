//! # Receipt View
//!
//! The fully formatted strings a renderer draws. Building the view is pure;
//! the caller supplies the receipt number and the issue date.
//!
//! ```text
//!   FormData ──┐
//!              ├──► ReceiptView::from_form(form, "RR-2025-001", today)
//!   number ────┘         │
//!                        ▼
//!   ┌──────────────────────────────────────────────┐
//!   │ RENT RECEIPT              Receipt No: RR-... │
//!   │ Received From:  Asha Verma                   │
//!   │ Amount:         ₹15,000                      │
//!   │ Amount in Words: Rupees Fifteen Thousand Only│
//!   │ ...                                          │
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! Missing values are shown as [`PLACEHOLDER`] so a half-filled preview still
//! lines up.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::{format_currency, number_to_words_clean};
use crate::dates::{format_date, format_date_range_str, format_date_str};
use crate::types::{FormData, ReceiptRecord};
use crate::REVENUE_STAMP_THRESHOLD;

/// Drawn in place of an empty field.
pub const PLACEHOLDER: &str = "___________";

/// Display-ready receipt content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptView {
    pub receipt_number: String,
    pub received_from: String,
    /// `₹15,000`
    pub amount: String,
    /// `Rupees Fifteen Thousand Only`
    pub amount_in_words: String,
    pub property_address: String,
    pub rental_period: String,
    pub payment_mode: String,
    pub payment_date: String,
    pub landlord_name: String,
    pub landlord_address: String,
    pub landlord_pan: String,
    /// Date printed under the signature line.
    pub issued_on: String,
    pub revenue_stamp_required: bool,
}

impl ReceiptView {
    /// Builds the view for a form that has not been saved yet.
    pub fn from_form(form: &FormData, receipt_number: &str, issued_on: NaiveDate) -> Self {
        let amount = form.rent_amount.unwrap_or(0.0);

        ReceiptView {
            receipt_number: receipt_number.to_string(),
            received_from: or_placeholder(&form.tenant_name),
            amount: format_currency(amount),
            amount_in_words: format!("Rupees {}", number_to_words_clean(amount)),
            property_address: or_placeholder(&form.property_address),
            rental_period: rental_period(&form.rental_period_start, &form.rental_period_end),
            payment_mode: form.payment_mode.to_string(),
            payment_date: or_placeholder(&format_date_str(&form.payment_date)),
            landlord_name: or_placeholder(&form.landlord_name),
            landlord_address: or_placeholder(&form.landlord_address),
            landlord_pan: or_placeholder(&form.landlord_pan),
            issued_on: format_date(issued_on),
            revenue_stamp_required: amount > REVENUE_STAMP_THRESHOLD,
        }
    }

    /// Rebuilds the view of a stored receipt, dated by its creation day.
    pub fn from_record(record: &ReceiptRecord) -> Self {
        let form = FormData {
            tenant_name: record.tenant_name.clone(),
            landlord_name: record.landlord_name.clone(),
            landlord_address: record.landlord_address.clone(),
            landlord_pan: record.landlord_pan.clone(),
            rent_amount: Some(record.rent_amount),
            rental_period_start: record.rental_period_start.clone(),
            rental_period_end: record.rental_period_end.clone(),
            payment_date: record.payment_date.clone(),
            property_address: record.property_address.clone(),
            payment_mode: record.payment_mode,
        };
        Self::from_form(&form, &record.receipt_number, record.created_at.date_naive())
    }
}

fn or_placeholder(value: &str) -> String {
    if value.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

fn rental_period(start: &str, end: &str) -> String {
    if start.is_empty() || end.is_empty() {
        return PLACEHOLDER.to_string();
    }
    or_placeholder(&format_date_range_str(start, end))
}
