//! # Draft Commands

use chrono::{Local, Utc};
use clap::{Args, Subcommand};
use std::fmt::Write as _;
use tracing::debug;

use rentslip_core::dates::month_to_date_range;
use rentslip_core::types::{DraftFields, FormData, PaymentMode};
use rentslip_core::validation::validate_form;
use rentslip_core::view::ReceiptView;

use crate::error::{AppError, AppResult};
use crate::render::{ReceiptRenderer, TextReceiptRenderer};
use crate::state::AppState;

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Set one or more fields of the draft.
    Set(DraftSetArgs),
    /// Preview the draft and list what is missing.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Discard the draft.
    Clear,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DraftSetArgs {
    #[arg(long)]
    pub tenant_name: Option<String>,
    #[arg(long)]
    pub landlord_name: Option<String>,
    #[arg(long)]
    pub landlord_address: Option<String>,
    #[arg(long = "pan")]
    pub landlord_pan: Option<String>,
    #[arg(long = "rent")]
    pub rent_amount: Option<f64>,
    /// YYYY-MM-DD
    #[arg(long = "from")]
    pub rental_period_start: Option<String>,
    /// YYYY-MM-DD
    #[arg(long = "to")]
    pub rental_period_end: Option<String>,
    /// Whole calendar month, YYYY-MM (sets --from and --to)
    #[arg(long, conflicts_with_all = ["rental_period_start", "rental_period_end"])]
    pub month: Option<String>,
    /// YYYY-MM-DD
    #[arg(long = "paid-on")]
    pub payment_date: Option<String>,
    #[arg(long)]
    pub property_address: Option<String>,
    /// cash, cheque, online, upi
    #[arg(long, value_parser = parse_payment_mode)]
    pub payment_mode: Option<PaymentMode>,
}

fn parse_payment_mode(value: &str) -> Result<PaymentMode, String> {
    value.parse().map_err(|e: rentslip_core::CoreError| e.to_string())
}

impl DraftSetArgs {
    /// The fields this invocation sets.
    pub fn to_fields(&self) -> AppResult<DraftFields> {
        let (start, end) = match &self.month {
            Some(month) => {
                let (first, last) = month_to_date_range(month).ok_or_else(|| {
                    AppError::Core(rentslip_core::CoreError::InvalidDate(month.clone()))
                })?;
                (
                    Some(first.format("%Y-%m-%d").to_string()),
                    Some(last.format("%Y-%m-%d").to_string()),
                )
            }
            None => (self.rental_period_start.clone(), self.rental_period_end.clone()),
        };

        Ok(DraftFields {
            tenant_name: self.tenant_name.clone(),
            landlord_name: self.landlord_name.clone(),
            landlord_address: self.landlord_address.clone(),
            landlord_pan: self.landlord_pan.as_ref().map(|pan| pan.trim().to_uppercase()),
            rent_amount: self.rent_amount,
            rental_period_start: start,
            rental_period_end: end,
            payment_date: self.payment_date.clone(),
            property_address: self.property_address.clone(),
            payment_mode: self.payment_mode,
        })
    }
}

pub async fn execute(command: DraftCommand, state: &AppState) -> AppResult<String> {
    match command {
        DraftCommand::Set(args) => set(state, &args).await,
        DraftCommand::Show { json } => show(state, json).await,
        DraftCommand::Clear => {
            state.store().clear_draft().await?;
            Ok("Draft cleared.".to_string())
        }
    }
}

/// The stored draft as form state (empty form when there is none).
pub async fn current_form(state: &AppState) -> FormData {
    state
        .store()
        .load_draft()
        .await
        .map(|draft| FormData::from(&draft))
        .unwrap_or_default()
}

async fn set(state: &AppState, args: &DraftSetArgs) -> AppResult<String> {
    let fields = args.to_fields()?;
    if fields == DraftFields::default() {
        return Ok("Nothing to set.".to_string());
    }

    let mut form = current_form(state).await;
    form.apply(fields);

    // Same path as interactive edits: the autosaver decides what gets written
    let autosave = state.autosaver();
    autosave.update(form.clone()).await?;
    autosave.shutdown().await?;
    debug!("Draft updated through autosave");

    if !form.has_data() {
        return Ok("Draft is empty, nothing saved.".to_string());
    }
    Ok(format!("Draft saved.\n{}", missing_summary(&form)))
}

async fn show(state: &AppState, json: bool) -> AppResult<String> {
    let Some(draft) = state.store().load_draft().await else {
        return Ok("No draft.".to_string());
    };

    if json {
        return Ok(serde_json::to_string_pretty(&draft)?);
    }

    let form = FormData::from(&draft);
    let number = state.store().peek_next_receipt_number().await;
    let view = ReceiptView::from_form(&form, &number, Utc::now().with_timezone(&Local).date_naive());
    let snapshot = TextReceiptRenderer::new().render(&view)?;

    let mut out = String::from_utf8_lossy(&snapshot.bytes).into_owned();
    let _ = write!(out, "{}", missing_summary(&form));
    Ok(out)
}

fn missing_summary(form: &FormData) -> String {
    match validate_form(form) {
        Ok(()) => "Ready to generate.".to_string(),
        Err(errors) => {
            let mut out = String::from("Still needed:");
            for error in errors {
                let _ = write!(out, "\n  - {}", error);
            }
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support;

    fn full_args() -> DraftSetArgs {
        DraftSetArgs {
            tenant_name: Some("Asha Verma".to_string()),
            landlord_name: Some("R. K. Iyer".to_string()),
            landlord_address: Some("4 Park Street, Kolkata".to_string()),
            landlord_pan: Some(" abcde1234f ".to_string()),
            rent_amount: Some(15000.0),
            month: Some("2025-02".to_string()),
            payment_date: Some("2025-02-05".to_string()),
            property_address: Some("12 MG Road, Bengaluru".to_string()),
            payment_mode: Some(PaymentMode::Upi),
            ..Default::default()
        }
    }

    #[test]
    fn test_month_expands_to_range() {
        let fields = full_args().to_fields().unwrap();
        assert_eq!(fields.rental_period_start.as_deref(), Some("2025-02-01"));
        assert_eq!(fields.rental_period_end.as_deref(), Some("2025-02-28"));
        assert_eq!(fields.landlord_pan.as_deref(), Some("ABCDE1234F"));
    }

    #[test]
    fn test_bad_month_is_rejected() {
        let args = DraftSetArgs {
            month: Some("2025-13".to_string()),
            ..Default::default()
        };
        assert!(matches!(args.to_fields(), Err(AppError::Core(_))));
    }

    #[tokio::test]
    async fn test_set_merges_into_existing_draft() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path()).await;

        let first = DraftSetArgs {
            tenant_name: Some("Asha".to_string()),
            ..Default::default()
        };
        set(&state, &first).await.unwrap();

        let second = DraftSetArgs {
            rent_amount: Some(9000.0),
            ..Default::default()
        };
        let out = set(&state, &second).await.unwrap();
        assert!(out.contains("Still needed"));

        let draft = state.store().load_draft().await.unwrap();
        assert_eq!(draft.tenant_name, "Asha");
        assert_eq!(draft.rent_amount, 9000.0);
    }

    #[tokio::test]
    async fn test_set_reports_failed_write() {
        use crate::config::AppConfig;
        use rentslip_db::{Database, DbConfig};

        // No kv_store table: every write fails
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        let state = AppState::with_database(AppConfig::default(), db);

        let args = DraftSetArgs {
            tenant_name: Some("Asha".to_string()),
            ..Default::default()
        };
        assert!(matches!(set(&state, &args).await, Err(AppError::Database(_))));
    }

    #[tokio::test]
    async fn test_set_with_every_field_is_ready() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path()).await;

        let out = set(&state, &full_args()).await.unwrap();
        assert!(out.ends_with("Ready to generate."));

        let shown = show(&state, false).await.unwrap();
        assert!(shown.contains("Receipt No: RR-"));
        assert!(shown.contains("01-28 Feb 2025"));

        let json = show(&state, true).await.unwrap();
        assert!(json.contains("\"landlordPAN\": \"ABCDE1234F\""));
    }

    #[tokio::test]
    async fn test_empty_set_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path()).await;

        assert_eq!(set(&state, &DraftSetArgs::default()).await.unwrap(), "Nothing to set.");
        assert_eq!(show(&state, false).await.unwrap(), "No draft.");
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_support::state(dir.path()).await;
        set(&state, &full_args()).await.unwrap();

        execute(DraftCommand::Clear, &state).await.unwrap();
        assert!(state.store().load_draft().await.is_none());
    }
}
