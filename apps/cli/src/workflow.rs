//! # Receipt Workflow
//!
//! Validation, rendering, persistence and export, in that order.
//!
//! ```text
//!   generate_receipt(form, renderer, auto_export)
//!       │
//!       ├─► validate_form_data(form) ── false ──► return false (nothing written)
//!       ├─► peek_next_receipt_number()          number printed on the card
//!       ├─► renderer.render(view)               Snapshot
//!       ├─► store.save_receipt(form + data URL) counter += 1, list += record
//!       ├─► exporter.export(snapshot)           only when auto_export
//!       └─► store.clear_draft()
//! ```
//!
//! Any failure after validation is logged and reported as `false`.

use chrono::{DateTime, Local, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use rentslip_core::receipt_number::export_filename;
use rentslip_core::types::{FormData, ReceiptRecord};
use rentslip_core::validation;
use rentslip_core::view::ReceiptView;
use rentslip_db::receipt_store::Clock;
use rentslip_db::{KeyValueStore, ReceiptStore};

use crate::error::{AppError, AppResult};
use crate::export::Exporter;
use crate::render::{ReceiptRenderer, Snapshot};

/// Outcome of a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedReceipt {
    pub record: ReceiptRecord,
    /// Where the snapshot was written, when it was exported.
    pub exported_to: Option<PathBuf>,
}

/// Orchestrates receipt generation over a [`ReceiptStore`].
pub struct ReceiptWorkflow<S> {
    store: Arc<ReceiptStore<S>>,
    exporter: Box<dyn Exporter>,
    clock: Clock,
}

impl<S: KeyValueStore> ReceiptWorkflow<S> {
    pub fn new(store: Arc<ReceiptStore<S>>, exporter: Box<dyn Exporter>) -> Self {
        ReceiptWorkflow {
            store,
            exporter,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the clock used for the signature date and export names.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    pub fn store(&self) -> &Arc<ReceiptStore<S>> {
        &self.store
    }

    /// The boolean gate checked before generation.
    pub fn validate_form_data(&self, form: &FormData) -> bool {
        validation::validate_form_data(form)
    }

    /// Generates, saves and (optionally) exports a receipt.
    ///
    /// Returns `false` for an incomplete form and for any failure along
    /// the way; the cause is only logged.
    pub async fn generate_receipt(
        &self,
        form: &FormData,
        renderer: &dyn ReceiptRenderer,
        auto_export: bool,
    ) -> bool {
        match self.try_generate(form, renderer, auto_export).await {
            Ok(_) => true,
            Err(AppError::InvalidForm(errors)) => {
                warn!(errors = errors.len(), "Receipt not generated, form is incomplete");
                false
            }
            Err(e) => {
                error!(error = %e, "Failed to generate receipt");
                false
            }
        }
    }

    /// [`generate_receipt`](Self::generate_receipt) with the failure cause.
    pub async fn try_generate(
        &self,
        form: &FormData,
        renderer: &dyn ReceiptRenderer,
        auto_export: bool,
    ) -> AppResult<GeneratedReceipt> {
        if !self.validate_form_data(form) {
            let errors = validation::validate_form(form).err().unwrap_or_default();
            return Err(AppError::InvalidForm(errors));
        }

        let now = (self.clock)();
        let expected_number = self.store.peek_next_receipt_number().await;
        let view = ReceiptView::from_form(form, &expected_number, now.with_timezone(&Local).date_naive());
        let snapshot = renderer.render(&view)?;

        let record = self
            .store
            .save_receipt(form.to_new_receipt(Some(snapshot.to_data_url())))
            .await?;

        if record.receipt_number != expected_number {
            warn!(
                printed = %expected_number,
                allocated = %record.receipt_number,
                "Receipt number changed between preview and save"
            );
        }

        let exported_to = if auto_export {
            Some(self.export_snapshot(&snapshot, &record.receipt_number, now)?)
        } else {
            None
        };

        self.store.clear_draft().await?;

        info!(
            receipt_number = %record.receipt_number,
            exported = exported_to.is_some(),
            "Receipt generated"
        );
        Ok(GeneratedReceipt { record, exported_to })
    }

    /// Exports an already rendered receipt without saving anything.
    pub fn download_receipt_only(&self, snapshot: &Snapshot, receipt_number: &str) -> bool {
        match self.export_snapshot(snapshot, receipt_number, (self.clock)()) {
            Ok(_) => true,
            Err(e) => {
                error!(receipt_number = %receipt_number, error = %e, "Failed to export receipt");
                false
            }
        }
    }

    /// Snapshot of a stored receipt: the one saved with it, or a fresh
    /// rendering when none was stored or it cannot be decoded.
    pub fn snapshot_of(
        &self,
        record: &ReceiptRecord,
        renderer: &dyn ReceiptRenderer,
    ) -> AppResult<Snapshot> {
        if let Some(url) = &record.image_data_url {
            match Snapshot::from_data_url(url) {
                Ok(snapshot) => return Ok(snapshot),
                Err(e) => warn!(id = %record.id, error = %e, "Stored snapshot unreadable, re-rendering"),
            }
        }
        renderer.render(&ReceiptView::from_record(record))
    }

    fn export_snapshot(
        &self,
        snapshot: &Snapshot,
        receipt_number: &str,
        now: DateTime<Utc>,
    ) -> AppResult<PathBuf> {
        let file_name = export_filename(receipt_number, now.date_naive(), snapshot.format.extension());
        self.exporter.export(snapshot, &file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::FileExporter;
    use crate::render::{SnapshotFormat, TextReceiptRenderer};
    use chrono::TimeZone;
    use rentslip_core::types::{DraftFields, PaymentMode};
    use rentslip_db::MemoryStore;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn complete_form() -> FormData {
        FormData {
            tenant_name: "Asha Verma".to_string(),
            landlord_name: "R. K. Iyer".to_string(),
            landlord_address: "4 Park Street, Kolkata".to_string(),
            landlord_pan: "ABCDE1234F".to_string(),
            rent_amount: Some(15000.0),
            rental_period_start: "2025-06-01".to_string(),
            rental_period_end: "2025-06-30".to_string(),
            payment_date: "2025-06-05".to_string(),
            property_address: "12 MG Road, Bengaluru".to_string(),
            payment_mode: PaymentMode::Cheque,
        }
    }

    fn workflow(exporter: Box<dyn Exporter>) -> ReceiptWorkflow<MemoryStore> {
        let store = Arc::new(ReceiptStore::new(MemoryStore::new()).with_clock(fixed_now));
        ReceiptWorkflow::new(store, exporter).with_clock(fixed_now)
    }

    struct FailingExporter;

    impl Exporter for FailingExporter {
        fn export(&self, _: &Snapshot, _: &str) -> AppResult<PathBuf> {
            Err(AppError::ExportFailed("disk full".to_string()))
        }
    }

    struct FailingRenderer;

    impl ReceiptRenderer for FailingRenderer {
        fn render(&self, _: &ReceiptView) -> AppResult<Snapshot> {
            Err(AppError::RenderFailed("no canvas".to_string()))
        }
    }

    #[tokio::test]
    async fn test_generate_saves_exports_and_clears_draft() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(Box::new(FileExporter::new(dir.path())));
        wf.store()
            .save_draft(DraftFields {
                tenant_name: Some("Asha Verma".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        let generated = wf
            .try_generate(&complete_form(), &TextReceiptRenderer::new(), true)
            .await
            .unwrap();

        let number = &generated.record.receipt_number;
        assert!(number.ends_with("-001"));
        assert!(generated
            .record
            .image_data_url
            .as_deref()
            .unwrap()
            .starts_with("data:text/plain"));

        let path = generated.exported_to.unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("Receipt-{}-2025-06-15.txt", number)
        );
        let exported = std::fs::read_to_string(&path).unwrap();
        assert!(exported.contains(&format!("Receipt No: {}", number)));

        assert!(wf.store().load_draft().await.is_none());
        assert_eq!(wf.store().receipt_count().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_form_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(Box::new(FileExporter::new(dir.path())));

        let mut form = complete_form();
        form.landlord_pan = "ABC".to_string();

        assert!(!wf.validate_form_data(&form));
        assert!(!wf.generate_receipt(&form, &TextReceiptRenderer::new(), true).await);
        assert_eq!(wf.store().receipt_count().await, 0);
        assert!(wf.store().store().is_empty().await);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_form_reports_fields() {
        let wf = workflow(Box::new(FailingExporter));
        let mut form = complete_form();
        form.tenant_name = "  ".to_string();

        match wf.try_generate(&form, &TextReceiptRenderer::new(), false).await {
            Err(AppError::InvalidForm(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field(), "tenantName");
            }
            other => panic!("unexpected: {:?}", other.map(|g| g.record.receipt_number)),
        }
    }

    #[tokio::test]
    async fn test_render_failure_saves_nothing() {
        let wf = workflow(Box::new(FailingExporter));

        assert!(!wf.generate_receipt(&complete_form(), &FailingRenderer, true).await);
        assert_eq!(wf.store().receipt_count().await, 0);
    }

    #[tokio::test]
    async fn test_export_failure_is_false_but_receipt_is_kept() {
        let wf = workflow(Box::new(FailingExporter));
        wf.store().save_draft(complete_form().to_draft_fields()).await.unwrap();

        assert!(!wf.generate_receipt(&complete_form(), &TextReceiptRenderer::new(), true).await);

        // Saved before the export step; the draft survives the failure
        assert_eq!(wf.store().receipt_count().await, 1);
        assert!(wf.store().load_draft().await.is_some());
    }

    #[tokio::test]
    async fn test_no_export_when_disabled() {
        let wf = workflow(Box::new(FailingExporter));

        let generated = wf
            .try_generate(&complete_form(), &TextReceiptRenderer::new(), false)
            .await
            .unwrap();
        assert!(generated.exported_to.is_none());
    }

    #[tokio::test]
    async fn test_sequential_receipts() {
        let wf = workflow(Box::new(FailingExporter));
        let renderer = TextReceiptRenderer::new();

        for _ in 0..3 {
            assert!(wf.generate_receipt(&complete_form(), &renderer, false).await);
        }

        let numbers: Vec<String> = wf
            .store()
            .get_all_receipts()
            .await
            .into_iter()
            .map(|r| r.receipt_number)
            .collect();
        assert_eq!(numbers.len(), 3);
        for suffix in ["-001", "-002", "-003"] {
            assert!(numbers.iter().any(|n| n.ends_with(suffix)), "{suffix}");
        }
    }

    #[tokio::test]
    async fn test_download_only_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(Box::new(FileExporter::new(dir.path())));
        let snapshot = Snapshot {
            bytes: b"preview".to_vec(),
            format: SnapshotFormat::Png,
        };

        assert!(wf.download_receipt_only(&snapshot, "RR-2025-007"));
        assert!(dir.path().join("Receipt-RR-2025-007-2025-06-15.png").exists());
        assert_eq!(wf.store().receipt_count().await, 0);

        let failing = workflow(Box::new(FailingExporter));
        assert!(!failing.download_receipt_only(&snapshot, "RR-2025-007"));
    }

    #[tokio::test]
    async fn test_snapshot_of_prefers_stored_image() {
        let wf = workflow(Box::new(FailingExporter));
        let renderer = TextReceiptRenderer::new();
        let generated = wf.try_generate(&complete_form(), &renderer, false).await.unwrap();

        let stored = wf.snapshot_of(&generated.record, &renderer).unwrap();
        assert_eq!(stored.to_data_url(), generated.record.image_data_url.clone().unwrap());

        let mut bare = generated.record.clone();
        bare.image_data_url = None;
        let fresh = wf.snapshot_of(&bare, &renderer).unwrap();
        assert!(String::from_utf8(fresh.bytes).unwrap().contains("Asha Verma"));
    }
}
