//! # Validation Module
//!
//! Form checks run before a receipt is generated.
//!
//! ## Two Validators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  validate_form_data(&form) -> bool                                     │
//! │  ├── The gate for generating a receipt                                 │
//! │  ├── Required text fields non-blank                                    │
//! │  ├── PAN exactly 10 characters (any characters)                        │
//! │  └── Rent present and > 0, all three dates filled                      │
//! │           │                                                             │
//! │           ▼  same gate, plus:                                          │
//! │  validate_form(&form) -> Result<(), Vec<ValidationError>>              │
//! │  ├── Names every failing field, for user-facing messages               │
//! │  ├── PAN pattern AAAAA9999A                                            │
//! │  ├── Rent within MIN_RENT_AMOUNT..=MAX_RENT_AMOUNT                     │
//! │  ├── Dates parse                                                       │
//! │  └── Period end not before period start                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A form that passes `validate_form` always passes `validate_form_data`.
//!
//! ## Usage
//! ```rust
//! use rentslip_core::validation::is_valid_pan;
//!
//! assert!(is_valid_pan("ABCDE1234F"));
//! assert!(!is_valid_pan("abcde1234f"));
//! ```

use crate::dates::parse_date;
use crate::error::ValidationError;
use crate::types::FormData;
use crate::{MAX_RENT_AMOUNT, MIN_RENT_AMOUNT, PAN_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Checks
// =============================================================================

/// Checks the PAN pattern: five uppercase letters, four digits, one
/// uppercase letter.
pub fn is_valid_pan(pan: &str) -> bool {
    let bytes = pan.as_bytes();
    bytes.len() == PAN_LENGTH
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Checks that a text field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Checks a rent amount against the accepted range.
///
/// ## Example
/// ```rust
/// use rentslip_core::validation::validate_rent_amount;
///
/// assert!(validate_rent_amount(Some(15000.0)).is_ok());
/// assert!(validate_rent_amount(Some(0.0)).is_err());
/// assert!(validate_rent_amount(None).is_err());
/// ```
pub fn validate_rent_amount(amount: Option<f64>) -> ValidationResult<()> {
    let field = || "rentAmount".to_string();

    let amount = amount.ok_or_else(|| ValidationError::Required { field: field() })?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::MustBePositive { field: field() });
    }

    if !(MIN_RENT_AMOUNT..=MAX_RENT_AMOUNT).contains(&amount) {
        return Err(ValidationError::OutOfRange {
            field: field(),
            min: MIN_RENT_AMOUNT,
            max: MAX_RENT_AMOUNT,
        });
    }

    Ok(())
}

fn validate_date(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;
    if parse_date(value).is_none() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// The generation gate.
///
/// True iff the four text fields are non-blank, the PAN is exactly ten
/// characters, the rent is present and positive, and the three dates are
/// non-empty.
pub fn validate_form_data(form: &FormData) -> bool {
    !form.tenant_name.trim().is_empty()
        && !form.landlord_name.trim().is_empty()
        && !form.landlord_address.trim().is_empty()
        && form.landlord_pan.chars().count() == PAN_LENGTH
        && !form.property_address.trim().is_empty()
        && form.rent_amount.is_some_and(|amount| amount > 0.0)
        && !form.rental_period_start.is_empty()
        && !form.rental_period_end.is_empty()
        && !form.payment_date.is_empty()
}

/// Detailed validation: every failing field, in form order.
pub fn validate_form(form: &FormData) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let required = [
        ("tenantName", &form.tenant_name),
        ("landlordName", &form.landlord_name),
        ("landlordAddress", &form.landlord_address),
    ];
    for (field, value) in required {
        if let Err(e) = validate_required(field, value) {
            errors.push(e);
        }
    }

    let pan = form.landlord_pan.as_str();
    if pan.trim().is_empty() {
        errors.push(ValidationError::Required {
            field: "landlordPAN".to_string(),
        });
    } else if pan.chars().count() != PAN_LENGTH {
        errors.push(ValidationError::WrongLength {
            field: "landlordPAN".to_string(),
            expected: PAN_LENGTH,
        });
    } else if !is_valid_pan(pan) {
        errors.push(ValidationError::InvalidFormat {
            field: "landlordPAN".to_string(),
            reason: "expected AAAAA9999A".to_string(),
        });
    }

    if let Err(e) = validate_rent_amount(form.rent_amount) {
        errors.push(e);
    }

    let start_ok = record(&mut errors, validate_date("rentalPeriodStart", &form.rental_period_start));
    let end_ok = record(&mut errors, validate_date("rentalPeriodEnd", &form.rental_period_end));
    record(&mut errors, validate_date("paymentDate", &form.payment_date));

    if start_ok && end_ok {
        if let (Some(start), Some(end)) = (
            parse_date(&form.rental_period_start),
            parse_date(&form.rental_period_end),
        ) {
            if end < start {
                errors.push(ValidationError::OutOfOrder {
                    field: "rentalPeriodEnd".to_string(),
                    other: "rentalPeriodStart".to_string(),
                });
            }
        }
    }

    if let Err(e) = validate_required("propertyAddress", &form.property_address) {
        errors.push(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn record(errors: &mut Vec<ValidationError>, result: ValidationResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            errors.push(e);
            false
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMode;

    fn complete_form() -> FormData {
        FormData {
            tenant_name: "Asha Verma".to_string(),
            landlord_name: "Ravi Kumar".to_string(),
            landlord_address: "12 MG Road, Pune".to_string(),
            landlord_pan: "ABCDE1234F".to_string(),
            rent_amount: Some(15000.0),
            rental_period_start: "2025-01-01".to_string(),
            rental_period_end: "2025-01-31".to_string(),
            payment_date: "2025-01-05".to_string(),
            property_address: "Flat 4B, Baner, Pune".to_string(),
            payment_mode: PaymentMode::Upi,
        }
    }

    #[test]
    fn test_pan_pattern() {
        assert!(is_valid_pan("ABCDE1234F"));
        assert!(!is_valid_pan("ABCDE1234"));
        assert!(!is_valid_pan("ABCD12345F"));
        assert!(!is_valid_pan("abcde1234f"));
        assert!(!is_valid_pan("ABCDE12345"));
        assert!(!is_valid_pan("ÄBCDE1234F"));
    }

    #[test]
    fn test_complete_form_passes_both() {
        let form = complete_form();
        assert!(validate_form_data(&form));
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn test_blank_text_field_fails() {
        let mut form = complete_form();
        form.tenant_name = "   ".to_string();
        assert!(!validate_form_data(&form));

        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field(), "tenantName");
    }

    #[test]
    fn test_gate_checks_pan_length_only() {
        let mut form = complete_form();
        form.landlord_pan = "1234567890".to_string();
        assert!(validate_form_data(&form));
        assert!(matches!(
            validate_form(&form).unwrap_err()[0],
            ValidationError::InvalidFormat { .. }
        ));

        form.landlord_pan = "ABCDE123".to_string();
        assert!(!validate_form_data(&form));
        assert!(matches!(
            validate_form(&form).unwrap_err()[0],
            ValidationError::WrongLength { expected: 10, .. }
        ));
    }

    #[test]
    fn test_rent_amount_rules() {
        let mut form = complete_form();

        form.rent_amount = None;
        assert!(!validate_form_data(&form));

        form.rent_amount = Some(0.0);
        assert!(!validate_form_data(&form));

        form.rent_amount = Some(-100.0);
        assert!(!validate_form_data(&form));

        form.rent_amount = Some(f64::NAN);
        assert!(!validate_form_data(&form));

        form.rent_amount = Some(0.5);
        assert!(validate_form_data(&form));
        assert!(matches!(
            validate_form(&form).unwrap_err()[0],
            ValidationError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_empty_date_fails() {
        let mut form = complete_form();
        form.payment_date.clear();
        assert!(!validate_form_data(&form));
        assert_eq!(validate_form(&form).unwrap_err()[0].field(), "paymentDate");
    }

    #[test]
    fn test_detailed_checks_date_format_and_order() {
        let mut form = complete_form();
        form.rental_period_start = "01/01/2025".to_string();
        assert!(validate_form_data(&form));
        assert_eq!(
            validate_form(&form).unwrap_err()[0].field(),
            "rentalPeriodStart"
        );

        form.rental_period_start = "2025-02-01".to_string();
        let errors = validate_form(&form).unwrap_err();
        assert!(matches!(errors[0], ValidationError::OutOfOrder { .. }));
    }

    #[test]
    fn test_all_errors_reported() {
        let errors = validate_form(&FormData::default()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                "tenantName",
                "landlordName",
                "landlordAddress",
                "landlordPAN",
                "rentAmount",
                "rentalPeriodStart",
                "rentalPeriodEnd",
                "paymentDate",
                "propertyAddress",
            ]
        );
    }
}
