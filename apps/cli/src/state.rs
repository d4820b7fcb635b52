//! # Application State
//!
//! Everything a command needs, opened once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState                                                               │
//! │  ├── config    AppConfig                                               │
//! │  ├── db        Database (SQLite pool, migrated)                        │
//! │  └── store     Arc<ReceiptStore<SqliteKvStore>>                        │
//! │                   ├──► ReceiptWorkflow  (generate, export)             │
//! │                   └──► DraftAutosaver   (debounced draft writes)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::info;

use rentslip_db::{Database, DbConfig, ReceiptStore, SqliteKvStore};

use crate::autosave::{AutosaveHandle, DraftAutosaver};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::export::FileExporter;
use crate::workflow::ReceiptWorkflow;

pub struct AppState {
    pub config: AppConfig,
    db: Database,
    store: Arc<ReceiptStore<SqliteKvStore>>,
}

impl AppState {
    /// Opens (creating if needed) the configured database.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let path = config.database_path()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        info!(?path, "Opening database");

        let db = Database::new(DbConfig::new(path)).await?;
        Ok(Self::with_database(config, db))
    }

    /// Uses an already connected database.
    pub fn with_database(config: AppConfig, db: Database) -> Self {
        let store = Arc::new(db.receipts());
        AppState { config, db, store }
    }

    pub fn store(&self) -> &Arc<ReceiptStore<SqliteKvStore>> {
        &self.store
    }

    /// Workflow exporting into the configured output directory.
    pub fn workflow(&self) -> ReceiptWorkflow<SqliteKvStore> {
        ReceiptWorkflow::new(
            self.store.clone(),
            Box::new(FileExporter::new(self.config.export.output_dir.clone())),
        )
    }

    /// Starts a draft autosaver with the configured quiet period.
    pub fn autosaver(&self) -> AutosaveHandle {
        DraftAutosaver::new(self.store.clone(), self.config.debounce()).start()
    }

    pub async fn close(self) {
        self.db.close().await;
    }
}
