//! # Receipt Commands

use chrono::Local;
use std::fmt::Write as _;
use tracing::info;

use rentslip_core::dates::format_date;
use rentslip_core::format_currency;
use rentslip_core::types::ReceiptRecord;
use rentslip_core::view::ReceiptView;

use super::draft::current_form;
use crate::error::{AppError, AppResult};
use crate::render::{SnapshotFormat, TextReceiptRenderer};
use crate::state::AppState;

pub async fn generate(state: &AppState, export_requested: bool) -> AppResult<String> {
    if state.store().load_draft().await.is_none() {
        return Err(AppError::not_found("Draft", "current"));
    }

    let form = current_form(state).await;
    let auto_export = export_requested && state.config.export.auto_export;

    let generated = state
        .workflow()
        .try_generate(&form, &TextReceiptRenderer::new(), auto_export)
        .await?;

    let record = &generated.record;
    let mut out = format!(
        "Generated {} for {} ({})",
        record.receipt_number,
        record.tenant_name,
        format_currency(record.rent_amount)
    );
    if let Some(path) = &generated.exported_to {
        let _ = write!(out, "\nExported to {}", path.display());
    }
    Ok(out)
}

pub async fn list(state: &AppState, json: bool) -> AppResult<String> {
    let receipts = state.store().get_all_receipts().await;

    if json {
        // The image is large and already rendered by `show`
        let slim: Vec<ReceiptRecord> = receipts
            .into_iter()
            .map(|mut r| {
                r.image_data_url = None;
                r
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&slim)?);
    }

    if receipts.is_empty() {
        return Ok("No receipts yet.".to_string());
    }

    let mut out = format!(
        "{:<13} {:<12} {:<24} {:>14}  {}",
        "NUMBER", "ISSUED", "TENANT", "AMOUNT", "ID"
    );
    for r in &receipts {
        let _ = write!(
            out,
            "\n{:<13} {:<12} {:<24} {:>14}  {}",
            r.receipt_number,
            format_date(r.created_at.with_timezone(&Local).date_naive()),
            truncate(&r.tenant_name, 24),
            format_currency(r.rent_amount),
            r.id
        );
    }
    let _ = write!(out, "\n{} receipt(s)", receipts.len());
    Ok(out)
}

pub async fn show(state: &AppState, key: &str, export: bool, json: bool) -> AppResult<String> {
    let record = find(state, key).await?;

    if json {
        return Ok(serde_json::to_string_pretty(&ReceiptView::from_record(&record))?);
    }

    let workflow = state.workflow();
    let snapshot = workflow.snapshot_of(&record, &TextReceiptRenderer::new())?;

    let mut out = match snapshot.format {
        SnapshotFormat::Text => String::from_utf8_lossy(&snapshot.bytes).into_owned(),
        SnapshotFormat::Png => format!("{} ({} byte image)\n", record.receipt_number, snapshot.bytes.len()),
    };

    if export {
        if !workflow.download_receipt_only(&snapshot, &record.receipt_number) {
            return Err(AppError::ExportFailed(format!(
                "Could not export {}",
                record.receipt_number
            )));
        }
        let _ = write!(out, "Exported to {}", state.config.export.output_dir.display());
    }
    Ok(out)
}

pub async fn delete(state: &AppState, id: &str) -> AppResult<String> {
    let record = state
        .store()
        .get_receipt(id)
        .await
        .ok_or_else(|| AppError::not_found("Receipt", id))?;

    state.store().delete_receipt(id).await?;
    Ok(format!("Deleted {}.", record.receipt_number))
}

pub async fn reset(state: &AppState, confirmed: bool) -> AppResult<String> {
    let count = state.store().receipt_count().await;

    if !confirmed {
        return Ok(format!(
            "This deletes the draft, {} receipt(s) and all receipt counters. Re-run with --yes.",
            count
        ));
    }

    state.store().clear_all().await?;
    info!(receipts = count, "Storage reset");
    Ok(format!("Removed the draft, {} receipt(s) and all counters.", count))
}

/// By id first, then by printed number.
async fn find(state: &AppState, key: &str) -> AppResult<ReceiptRecord> {
    if let Some(record) = state.store().get_receipt(key).await {
        return Ok(record);
    }
    state
        .store()
        .find_by_receipt_number(&key.trim().to_uppercase())
        .await
        .ok_or_else(|| AppError::not_found("Receipt", key))
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut short: String = value.chars().take(width - 1).collect();
    short.push('…');
    short
}
