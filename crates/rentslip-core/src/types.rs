//! # Domain Types
//!
//! The documents Rentslip stores and the form state they come from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │   FormData (editable, in memory)                                       │
//! │       │                                                                 │
//! │       ├── to_draft_fields() ──► DraftFields ──► DraftRecord  (key: draft)│
//! │       │                                                                 │
//! │       └── to_new_receipt()  ──► NewReceipt  ──► ReceiptRecord           │
//! │                                                  (key: receipts[])      │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐      │
//! │  │  DraftRecord    │   │  ReceiptRecord   │   │  PaymentMode    │      │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────  │      │
//! │  │  one at a time  │   │  id (UUID)       │   │  Cash           │      │
//! │  │  overwritten    │   │  receipt_number  │   │  Cheque         │      │
//! │  │  updated_at     │   │  created_at      │   │  Online Transfer│      │
//! │  └─────────────────┘   │  immutable       │   │  UPI            │      │
//! │                        └──────────────────┘   └─────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every receipt has:
//! - `id`: UUID v4 - internal, never reused
//! - `receipt_number`: `RR-YYYY-NNN` - printed, human-facing
//!
//! ## Wire Shape
//! Documents are stored as camelCase JSON (`tenantName`, `landlordPAN`,
//! `rentAmount`, ...). Dates inside the business fields stay ISO strings;
//! only `updatedAt` / `createdAt` are parsed timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Payment Mode
// =============================================================================

/// How the tenant paid the rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum PaymentMode {
    /// Physical cash.
    #[default]
    Cash,
    /// Paper cheque.
    Cheque,
    /// NEFT/IMPS/RTGS bank transfer.
    #[serde(rename = "Online Transfer")]
    OnlineTransfer,
    /// Unified Payments Interface.
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMode {
    /// The label printed on the receipt (same as the stored value).
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Cheque => "Cheque",
            PaymentMode::OnlineTransfer => "Online Transfer",
            PaymentMode::Upi => "UPI",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMode {
    type Err = CoreError;

    /// Accepts the stored labels case-insensitively, plus the usual
    /// command-line spellings (`online`, `online-transfer`, `bank`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "cash" => Ok(PaymentMode::Cash),
            "cheque" | "check" => Ok(PaymentMode::Cheque),
            "online transfer" | "online" | "bank" | "bank transfer" => {
                Ok(PaymentMode::OnlineTransfer)
            }
            "upi" => Ok(PaymentMode::Upi),
            _ => Err(CoreError::UnknownPaymentMode(s.to_string())),
        }
    }
}

/// The amount written to storage. JSON has no NaN or infinity, so those
/// become zero along with a missing amount.
fn stored_amount(amount: Option<f64>) -> f64 {
    amount.filter(|a| a.is_finite()).unwrap_or(0.0)
}

// =============================================================================
// Draft Record
// =============================================================================

/// The single in-progress receipt, stored under the `draft` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub tenant_name: String,
    pub landlord_name: String,
    pub landlord_address: String,
    #[serde(rename = "landlordPAN")]
    pub landlord_pan: String,
    /// Rent in rupees.
    pub rent_amount: f64,
    /// ISO date (`YYYY-MM-DD`).
    pub rental_period_start: String,
    pub rental_period_end: String,
    pub payment_date: String,
    pub property_address: String,
    pub payment_mode: PaymentMode,
    /// Set on every save.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A partial draft: whatever the caller has filled in so far.
///
/// Missing fields fall back to empty strings, a zero amount and
/// [`PaymentMode::Cash`] when the overlay becomes a [`DraftRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftFields {
    pub tenant_name: Option<String>,
    pub landlord_name: Option<String>,
    pub landlord_address: Option<String>,
    #[serde(rename = "landlordPAN")]
    pub landlord_pan: Option<String>,
    pub rent_amount: Option<f64>,
    pub rental_period_start: Option<String>,
    pub rental_period_end: Option<String>,
    pub payment_date: Option<String>,
    pub property_address: Option<String>,
    pub payment_mode: Option<PaymentMode>,
}

impl DraftFields {
    /// Applies the defaults and stamps `updated_at`.
    pub fn into_record(self, updated_at: DateTime<Utc>) -> DraftRecord {
        DraftRecord {
            tenant_name: self.tenant_name.unwrap_or_default(),
            landlord_name: self.landlord_name.unwrap_or_default(),
            landlord_address: self.landlord_address.unwrap_or_default(),
            landlord_pan: self.landlord_pan.unwrap_or_default(),
            rent_amount: stored_amount(self.rent_amount),
            rental_period_start: self.rental_period_start.unwrap_or_default(),
            rental_period_end: self.rental_period_end.unwrap_or_default(),
            payment_date: self.payment_date.unwrap_or_default(),
            property_address: self.property_address.unwrap_or_default(),
            payment_mode: self.payment_mode.unwrap_or_default(),
            updated_at,
        }
    }
}

impl From<&DraftRecord> for DraftFields {
    fn from(draft: &DraftRecord) -> Self {
        DraftFields {
            tenant_name: Some(draft.tenant_name.clone()),
            landlord_name: Some(draft.landlord_name.clone()),
            landlord_address: Some(draft.landlord_address.clone()),
            landlord_pan: Some(draft.landlord_pan.clone()),
            rent_amount: Some(draft.rent_amount),
            rental_period_start: Some(draft.rental_period_start.clone()),
            rental_period_end: Some(draft.rental_period_end.clone()),
            payment_date: Some(draft.payment_date.clone()),
            property_address: Some(draft.property_address.clone()),
            payment_mode: Some(draft.payment_mode),
        }
    }
}

// =============================================================================
// Receipt Record
// =============================================================================

/// A finalized receipt. Never modified after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Printed number, `RR-YYYY-NNN`.
    pub receipt_number: String,
    pub tenant_name: String,
    pub landlord_name: String,
    pub landlord_address: String,
    #[serde(rename = "landlordPAN")]
    pub landlord_pan: String,
    pub rent_amount: f64,
    pub rental_period_start: String,
    pub rental_period_end: String,
    pub payment_date: String,
    pub property_address: String,
    pub payment_mode: PaymentMode,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Rendered snapshot as a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub image_data_url: Option<String>,
}

impl ReceiptRecord {
    /// Assembles a record from the caller's fields and the store-assigned
    /// identity.
    pub fn from_new(
        id: String,
        receipt_number: String,
        fields: NewReceipt,
        created_at: DateTime<Utc>,
    ) -> Self {
        ReceiptRecord {
            id,
            receipt_number,
            tenant_name: fields.tenant_name,
            landlord_name: fields.landlord_name,
            landlord_address: fields.landlord_address,
            landlord_pan: fields.landlord_pan,
            rent_amount: fields.rent_amount,
            rental_period_start: fields.rental_period_start,
            rental_period_end: fields.rental_period_end,
            payment_date: fields.payment_date,
            property_address: fields.property_address,
            payment_mode: fields.payment_mode,
            created_at,
            image_data_url: fields.image_data_url,
        }
    }
}

/// Everything a receipt needs except what the store assigns
/// (`id`, `receipt_number`, `created_at`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReceipt {
    pub tenant_name: String,
    pub landlord_name: String,
    pub landlord_address: String,
    #[serde(rename = "landlordPAN")]
    pub landlord_pan: String,
    pub rent_amount: f64,
    pub rental_period_start: String,
    pub rental_period_end: String,
    pub payment_date: String,
    pub property_address: String,
    pub payment_mode: PaymentMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data_url: Option<String>,
}

// =============================================================================
// Form Data
// =============================================================================

/// Editable form state. `rent_amount` is `None` until the user types one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub tenant_name: String,
    pub landlord_name: String,
    pub landlord_address: String,
    #[serde(rename = "landlordPAN")]
    pub landlord_pan: String,
    pub rent_amount: Option<f64>,
    pub rental_period_start: String,
    pub rental_period_end: String,
    pub payment_date: String,
    pub property_address: String,
    pub payment_mode: PaymentMode,
}

impl FormData {
    /// True when the user has entered anything worth autosaving.
    pub fn has_data(&self) -> bool {
        !self.tenant_name.trim().is_empty()
            || !self.landlord_name.trim().is_empty()
            || !self.landlord_address.trim().is_empty()
            || !self.landlord_pan.trim().is_empty()
            || self.rent_amount.is_some_and(|amount| amount > 0.0)
            || !self.rental_period_start.is_empty()
            || !self.rental_period_end.is_empty()
            || !self.payment_date.is_empty()
            || !self.property_address.trim().is_empty()
    }

    /// Overlays the fields that are set in `fields`.
    pub fn apply(&mut self, fields: DraftFields) {
        if let Some(v) = fields.tenant_name {
            self.tenant_name = v;
        }
        if let Some(v) = fields.landlord_name {
            self.landlord_name = v;
        }
        if let Some(v) = fields.landlord_address {
            self.landlord_address = v;
        }
        if let Some(v) = fields.landlord_pan {
            self.landlord_pan = v;
        }
        if let Some(v) = fields.rent_amount {
            self.rent_amount = Some(v);
        }
        if let Some(v) = fields.rental_period_start {
            self.rental_period_start = v;
        }
        if let Some(v) = fields.rental_period_end {
            self.rental_period_end = v;
        }
        if let Some(v) = fields.payment_date {
            self.payment_date = v;
        }
        if let Some(v) = fields.property_address {
            self.property_address = v;
        }
        if let Some(v) = fields.payment_mode {
            self.payment_mode = v;
        }
    }

    /// The overlay persisted by an autosave.
    pub fn to_draft_fields(&self) -> DraftFields {
        DraftFields {
            tenant_name: Some(self.tenant_name.clone()),
            landlord_name: Some(self.landlord_name.clone()),
            landlord_address: Some(self.landlord_address.clone()),
            landlord_pan: Some(self.landlord_pan.clone()),
            rent_amount: Some(stored_amount(self.rent_amount)),
            rental_period_start: Some(self.rental_period_start.clone()),
            rental_period_end: Some(self.rental_period_end.clone()),
            payment_date: Some(self.payment_date.clone()),
            property_address: Some(self.property_address.clone()),
            payment_mode: Some(self.payment_mode),
        }
    }

    /// The fields handed to the store when the receipt is finalized.
    pub fn to_new_receipt(&self, image_data_url: Option<String>) -> NewReceipt {
        NewReceipt {
            tenant_name: self.tenant_name.clone(),
            landlord_name: self.landlord_name.clone(),
            landlord_address: self.landlord_address.clone(),
            landlord_pan: self.landlord_pan.clone(),
            rent_amount: stored_amount(self.rent_amount),
            rental_period_start: self.rental_period_start.clone(),
            rental_period_end: self.rental_period_end.clone(),
            payment_date: self.payment_date.clone(),
            property_address: self.property_address.clone(),
            payment_mode: self.payment_mode,
            image_data_url,
        }
    }
}

/// Loading a draft back into the form.
impl From<&DraftRecord> for FormData {
    fn from(draft: &DraftRecord) -> Self {
        FormData {
            tenant_name: draft.tenant_name.clone(),
            landlord_name: draft.landlord_name.clone(),
            landlord_address: draft.landlord_address.clone(),
            landlord_pan: draft.landlord_pan.clone(),
            rent_amount: Some(draft.rent_amount),
            rental_period_start: draft.rental_period_start.clone(),
            rental_period_end: draft.rental_period_end.clone(),
            payment_date: draft.payment_date.clone(),
            property_address: draft.property_address.clone(),
            payment_mode: draft.payment_mode,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_payment_mode_default() {
        assert_eq!(PaymentMode::default(), PaymentMode::Cash);
    }

    #[test]
    fn test_payment_mode_serde_labels() {
        assert_eq!(
            serde_json::to_string(&PaymentMode::OnlineTransfer).unwrap(),
            "\"Online Transfer\""
        );
        assert_eq!(serde_json::to_string(&PaymentMode::Upi).unwrap(), "\"UPI\"");
        let parsed: PaymentMode = serde_json::from_str("\"Cheque\"").unwrap();
        assert_eq!(parsed, PaymentMode::Cheque);
    }

    #[test]
    fn test_payment_mode_parsing() {
        assert_eq!("cash".parse::<PaymentMode>().unwrap(), PaymentMode::Cash);
        assert_eq!("UPI".parse::<PaymentMode>().unwrap(), PaymentMode::Upi);
        assert_eq!(
            "online-transfer".parse::<PaymentMode>().unwrap(),
            PaymentMode::OnlineTransfer
        );
        assert_eq!(
            "Online Transfer".parse::<PaymentMode>().unwrap(),
            PaymentMode::OnlineTransfer
        );
        assert!("barter".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_draft_fields_defaults() {
        let record = DraftFields {
            tenant_name: Some("Asha".to_string()),
            ..Default::default()
        }
        .into_record(at_noon());

        assert_eq!(record.tenant_name, "Asha");
        assert_eq!(record.landlord_name, "");
        assert_eq!(record.rent_amount, 0.0);
        assert_eq!(record.payment_mode, PaymentMode::Cash);
        assert_eq!(record.updated_at, at_noon());
    }

    #[test]
    fn test_non_finite_rent_is_stored_as_zero() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let record = DraftFields {
                tenant_name: Some("Asha".to_string()),
                rent_amount: Some(bad),
                ..Default::default()
            }
            .into_record(at_noon());
            assert_eq!(record.rent_amount, 0.0);

            let json = serde_json::to_string(&record).unwrap();
            let back: DraftRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(back, record);

            let form = FormData {
                rent_amount: Some(bad),
                ..Default::default()
            };
            assert_eq!(form.to_draft_fields().rent_amount, Some(0.0));
            assert_eq!(form.to_new_receipt(None).rent_amount, 0.0);
        }
    }

    #[test]
    fn test_draft_json_shape() {
        let record = DraftFields {
            landlord_pan: Some("ABCDE1234F".to_string()),
            ..Default::default()
        }
        .into_record(at_noon());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["landlordPAN"], "ABCDE1234F");
        assert_eq!(json["paymentMode"], "Cash");
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_receipt_omits_missing_image() {
        let form = FormData {
            tenant_name: "Asha".to_string(),
            rent_amount: Some(15000.0),
            ..Default::default()
        };
        let record = ReceiptRecord::from_new(
            "id-1".to_string(),
            "RR-2025-001".to_string(),
            form.to_new_receipt(None),
            at_noon(),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("imageDataUrl").is_none());
        assert_eq!(json["receiptNumber"], "RR-2025-001");
        assert_eq!(record.rent_amount, 15000.0);
    }

    #[test]
    fn test_form_has_data() {
        let mut form = FormData::default();
        assert!(!form.has_data());

        form.tenant_name = "   ".to_string();
        assert!(!form.has_data());

        form.rent_amount = Some(0.0);
        assert!(!form.has_data());

        form.rent_amount = Some(1.0);
        assert!(form.has_data());
    }

    #[test]
    fn test_form_apply_and_round_trip_through_draft() {
        let mut form = FormData::default();
        form.apply(DraftFields {
            tenant_name: Some("Asha".to_string()),
            payment_date: Some("2025-06-05".to_string()),
            ..Default::default()
        });
        assert_eq!(form.tenant_name, "Asha");

        let draft = form.to_draft_fields().into_record(at_noon());
        let back = FormData::from(&draft);
        assert_eq!(back.tenant_name, "Asha");
        assert_eq!(back.payment_date, "2025-06-05");
        assert_eq!(back.rent_amount, Some(0.0));
    }
}
