//! # Error Types
//!
//! Domain-specific error types for rentslip-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rentslip-core errors (this file)                                      │
//! │  ├── CoreError        - Domain parsing failures                        │
//! │  └── ValidationError  - Form field failures                            │
//! │                                                                         │
//! │  rentslip-db errors (separate crate)                                   │
//! │  └── DbError          - Store read/write failures                      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the terminal user sees                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while interpreting domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payment mode string that is not one of the four known modes.
    #[error("Unknown payment mode: {0}")]
    UnknownPaymentMode(String),

    /// A receipt number that does not follow `RR-YYYY-NNN`.
    #[error("Invalid receipt number: {0}")]
    InvalidReceiptNumber(String),

    /// A date string that could not be read.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form validation errors.
///
/// The detailed validator collects one of these per failing field so the
/// form layer can show every problem at once.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value does not have the exact length it needs.
    #[error("{field} must be exactly {expected} characters")]
    WrongLength { field: String, expected: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Invalid format (e.g., PAN pattern, unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields are individually valid but inconsistent.
    #[error("{field} must not be before {other}")]
    OutOfOrder { field: String, other: String },
}

impl ValidationError {
    /// Name of the form field this error is about.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::WrongLength { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::OutOfOrder { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "tenantName".to_string(),
        };
        assert_eq!(err.to_string(), "tenantName is required");

        let err = ValidationError::WrongLength {
            field: "landlordPAN".to_string(),
            expected: 10,
        };
        assert_eq!(err.to_string(), "landlordPAN must be exactly 10 characters");
    }

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::OutOfOrder {
            field: "rentalPeriodEnd".to_string(),
            other: "rentalPeriodStart".to_string(),
        };
        assert_eq!(err.field(), "rentalPeriodEnd");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "tenantName".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_core_error_messages() {
        let err = CoreError::UnknownPaymentMode("Barter".to_string());
        assert_eq!(err.to_string(), "Unknown payment mode: Barter");
    }
}
