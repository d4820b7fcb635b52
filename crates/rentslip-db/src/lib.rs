//! # rentslip-db: Persistence Layer for Rentslip
//!
//! This crate stores drafts, receipts and receipt counters in a local
//! key-value store, backed by SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rentslip Data Flow                               │
//! │                                                                         │
//! │  rentslip generate                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   rentslip-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ ReceiptStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ drafts        │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ receipts      │    │ 001_kv_store │  │   │
//! │  │   │               │    │ counters      │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ KeyValueStore                 │   │
//! │  │                    ┌───────────┴───────────┐                   │   │
//! │  │               SqliteKvStore           MemoryStore              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/rentslip.db                               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`store`] - The `KeyValueStore` trait and its implementations
//! - [`receipt_store`] - Drafts, receipts, receipt numbers
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rentslip_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/rentslip.db")).await?;
//! let store = db.receipts();
//!
//! let number = store.peek_next_receipt_number().await;
//! let receipts = store.get_all_receipts().await;
//!
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod receipt_store;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use receipt_store::ReceiptStore;
pub use store::{KeyValueStore, MemoryStore, SqliteKvStore};
