//! # Application Error Type
//!
//! Unified error type for the CLI.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Rentslip                               │
//! │                                                                         │
//! │  rentslip generate                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler -> AppResult<()>                                │  │
//! │  │         │                                                        │  │
//! │  │  Database Error?   ─── DbError ──────────┐                      │  │
//! │  │  Bad input?        ─── CoreError ────────┤                      │  │
//! │  │  Incomplete form?  ─── ValidationError[] ┼──► AppError          │  │
//! │  │  Config / file?    ─── io, toml ─────────┘        │             │  │
//! │  └───────────────────────────────────────────────────┼─────────────┘  │
//! │                                                      ▼                 │
//! │  main(): print message to stderr, exit with AppError::exit_code()     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rentslip_core::{CoreError, ValidationError};
use rentslip_db::DbError;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Form is missing required data.
    #[error("Form is incomplete: {}", join_messages(.0))]
    InvalidForm(Vec<ValidationError>),

    /// Domain value could not be interpreted.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Receipt id or number not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    // =========================================================================
    // Output Errors
    // =========================================================================
    /// Rendering a receipt failed.
    #[error("Render failed: {0}")]
    RenderFailed(String),

    /// Writing an exported receipt failed.
    #[error("Export failed: {0}")]
    ExportFailed(String),

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    /// Storage failure.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// File system failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The autosave task is gone.
    #[error("Autosave task is not running")]
    AutosaveStopped,
}

impl AppError {
    /// Creates a not found error.
    pub fn not_found(entity: &str, id: &str) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Process exit code for this error.
    ///
    /// ```text
    /// 2  usage / input (form, config, unknown id)
    /// 1  everything else
    /// ```
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidConfig(_)
            | AppError::ConfigLoadFailed(_)
            | AppError::InvalidForm(_)
            | AppError::Core(_)
            | AppError::NotFound { .. } => 2,
            _ => 1,
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::RenderFailed(err.to_string())
    }
}

/// Result type for CLI operations.
pub type AppResult<T> = Result<T, AppError>;
