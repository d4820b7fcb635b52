//! # Receipt Store
//!
//! Drafts, finalized receipts and receipt-number allocation over a
//! [`KeyValueStore`].
//!
//! ## Key Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  draft                    → DraftRecord (JSON), at most one            │
//! │  receipts                 → [ReceiptRecord] (JSON array)               │
//! │  receipt_counter_<YEAR>   → numbers issued that year ("3")             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  READS fail soft      load_draft / get_receipt / get_all_receipts      │
//! │                       → None or empty, logged at warn                  │
//! │                                                                         │
//! │  WRITES fail loud     save_draft / clear_draft / save_receipt /        │
//! │                       delete_receipt / clear_all → Err(DbError)        │
//! │                                                                         │
//! │  NUMBERS degrade      generate_receipt_number → RR-<year>-001          │
//! │                       when the counter can't be read or written        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Receipt Save Sequence
//! ```text
//!   save_receipt(fields)
//!       │
//!       ├─► generate_receipt_number()   counter_Y += 1  (write #1)
//!       ├─► id = UUID v4, created_at = now
//!       ├─► read receipts, append
//!       └─► write receipts                              (write #2)
//! ```
//! The two writes are not atomic. A crash between them burns a number
//! without a receipt; the sequence still never repeats.

use chrono::{DateTime, Datelike, Local, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use rentslip_core::receipt_number::{format_receipt_number, parse_receipt_number};
use rentslip_core::types::{DraftFields, DraftRecord, NewReceipt, ReceiptRecord};

use crate::error::DbResult;
use crate::store::KeyValueStore;

/// Key of the single draft document.
pub const DRAFT_KEY: &str = "draft";

/// Key of the receipt list.
pub const RECEIPTS_KEY: &str = "receipts";

/// Namespace of the per-year counters.
pub const COUNTER_KEY_PREFIX: &str = "receipt_counter_";

/// Counter key for a calendar year.
pub fn counter_key(year: i32) -> String {
    format!("{}{}", COUNTER_KEY_PREFIX, year)
}

/// Source of "now" for timestamps and the receipt year.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Receipt persistence over a key-value store.
///
/// ## Example
/// ```rust,ignore
/// let store = ReceiptStore::new(MemoryStore::new());
/// let receipt = store.save_receipt(form.to_new_receipt(None)).await?;
/// assert!(receipt.receipt_number.starts_with("RR-"));
/// ```
pub struct ReceiptStore<S> {
    store: S,
    clock: Clock,
}

impl<S: fmt::Debug> fmt::Debug for ReceiptStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiptStore")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> ReceiptStore<S> {
    /// Creates a store using the system clock.
    pub fn new(store: S) -> Self {
        ReceiptStore {
            store,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the clock (tests pin it to a fixed instant).
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Calendar year in the local time zone.
    fn current_year(&self) -> i32 {
        self.now().with_timezone(&Local).year()
    }

    // =========================================================================
    // Draft
    // =========================================================================

    /// Overwrites the draft with `fields`, stamping `updated_at`.
    pub async fn save_draft(&self, fields: DraftFields) -> DbResult<DraftRecord> {
        let draft = fields.into_record(self.now());
        let json = serde_json::to_string(&draft)?;

        self.store.set(DRAFT_KEY, &json).await?;

        debug!(updated_at = %draft.updated_at, "Draft saved");
        Ok(draft)
    }

    /// Loads the draft. Missing, unreadable and corrupt all give `None`.
    pub async fn load_draft(&self) -> Option<DraftRecord> {
        let raw = match self.store.get(DRAFT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read draft");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!(error = %e, "Stored draft is corrupt, ignoring it");
                None
            }
        }
    }

    /// Removes the draft. Clearing an absent draft succeeds.
    pub async fn clear_draft(&self) -> DbResult<()> {
        self.store.remove(DRAFT_KEY).await?;
        debug!("Draft cleared");
        Ok(())
    }

    // =========================================================================
    // Receipt Numbers
    // =========================================================================

    /// Allocates the next receipt number for the current year.
    ///
    /// Every call advances the counter, whether or not a receipt is saved
    /// with the number. Never fails: a store error yields `RR-<year>-001`.
    pub async fn generate_receipt_number(&self) -> String {
        let year = self.current_year();

        match self.advance_counter(year).await {
            Ok(sequence) => {
                let number = format_receipt_number(year, sequence);
                debug!(receipt_number = %number, "Receipt number allocated");
                number
            }
            Err(e) => {
                warn!(year, error = %e, "Counter unavailable, using first number of the year");
                format_receipt_number(year, 1)
            }
        }
    }

    /// The number the next allocation would return, without advancing.
    ///
    /// Used to print the number on a preview before the receipt is saved.
    pub async fn peek_next_receipt_number(&self) -> String {
        let year = self.current_year();
        let sequence = match self.read_counter(year).await {
            Ok(current) => current.saturating_add(1),
            Err(e) => {
                warn!(year, error = %e, "Counter unavailable for preview");
                1
            }
        };
        format_receipt_number(year, sequence)
    }

    async fn advance_counter(&self, year: i32) -> DbResult<u64> {
        let next = self.read_counter(year).await?.saturating_add(1);
        self.store.set(&counter_key(year), &next.to_string()).await?;
        Ok(next)
    }

    async fn read_counter(&self, year: i32) -> DbResult<u64> {
        let key = counter_key(year);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(0);
        };

        match raw.trim().parse::<u64>() {
            Ok(count) => Ok(count),
            Err(_) => {
                let recovered = self.highest_stored_sequence(year).await;
                warn!(
                    key = %key,
                    value = %raw,
                    recovered,
                    "Counter is not a number, recovering from stored receipts"
                );
                Ok(recovered)
            }
        }
    }

    /// Largest sequence among stored receipts of `year` (0 if none).
    async fn highest_stored_sequence(&self, year: i32) -> u64 {
        self.get_all_receipts()
            .await
            .iter()
            .filter_map(|r| parse_receipt_number(&r.receipt_number).ok())
            .filter(|(y, _)| *y == year)
            .map(|(_, sequence)| sequence)
            .max()
            .unwrap_or(0)
    }

    // =========================================================================
    // Receipts
    // =========================================================================

    /// Finalizes a receipt: allocates its number and id, stamps
    /// `created_at`, appends it to the list.
    ///
    /// Nothing counts as saved unless the list write succeeds.
    pub async fn save_receipt(&self, fields: NewReceipt) -> DbResult<ReceiptRecord> {
        let receipt_number = self.generate_receipt_number().await;
        let record = ReceiptRecord::from_new(
            Uuid::new_v4().to_string(),
            receipt_number,
            fields,
            self.now(),
        );

        let mut receipts = self.read_receipts().await?;
        receipts.push(record.clone());
        self.write_receipts(&receipts).await?;

        info!(
            id = %record.id,
            receipt_number = %record.receipt_number,
            total = receipts.len(),
            "Receipt saved"
        );
        Ok(record)
    }

    /// Looks a receipt up by id.
    pub async fn get_receipt(&self, id: &str) -> Option<ReceiptRecord> {
        self.get_all_receipts()
            .await
            .into_iter()
            .find(|r| r.id == id)
    }

    /// Looks a receipt up by its printed number.
    pub async fn find_by_receipt_number(&self, receipt_number: &str) -> Option<ReceiptRecord> {
        self.get_all_receipts()
            .await
            .into_iter()
            .find(|r| r.receipt_number == receipt_number)
    }

    /// Every receipt, newest first. Unreadable data gives an empty list.
    pub async fn get_all_receipts(&self) -> Vec<ReceiptRecord> {
        let mut receipts = match self.read_receipts().await {
            Ok(receipts) => receipts,
            Err(e) => {
                warn!(error = %e, "Failed to read receipts");
                return Vec::new();
            }
        };

        // Stable: equal timestamps keep insertion order
        receipts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        receipts
    }

    /// Number of stored receipts.
    pub async fn receipt_count(&self) -> usize {
        self.get_all_receipts().await.len()
    }

    /// Removes a receipt by id. Unknown ids are a no-op and write nothing.
    pub async fn delete_receipt(&self, id: &str) -> DbResult<()> {
        let mut receipts = self.read_receipts().await?;

        let Some(position) = receipts.iter().position(|r| r.id == id) else {
            debug!(id = %id, "Receipt not found, nothing to delete");
            return Ok(());
        };

        let removed = receipts.remove(position);
        self.write_receipts(&receipts).await?;

        info!(
            id = %removed.id,
            receipt_number = %removed.receipt_number,
            "Receipt deleted"
        );
        Ok(())
    }

    /// Removes the draft, every receipt and the counters of every year.
    pub async fn clear_all(&self) -> DbResult<()> {
        self.store.remove(DRAFT_KEY).await?;
        self.store.remove(RECEIPTS_KEY).await?;

        let counters = self.store.keys_with_prefix(COUNTER_KEY_PREFIX).await?;
        for key in &counters {
            self.store.remove(key).await?;
        }

        info!(counters = counters.len(), "All receipt data cleared");
        Ok(())
    }

    /// The stored list in insertion order.
    ///
    /// Store errors propagate; a corrupt list reads as empty so that the
    /// next write replaces it.
    async fn read_receipts(&self) -> DbResult<Vec<ReceiptRecord>> {
        let Some(raw) = self.store.get(RECEIPTS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(receipts) => Ok(receipts),
            Err(e) => {
                warn!(error = %e, "Stored receipt list is corrupt, treating it as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_receipts(&self, receipts: &[ReceiptRecord]) -> DbResult<()> {
        let json = serde_json::to_string(receipts)?;
        self.store.set(RECEIPTS_KEY, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
