//! # rentslip-cli
//!
//! The `rentslip` command-line application.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize tracing ────────────────────────────────────────────────►│
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,rentslip=debug,sqlx=warn (override with RUST_LOG)   │
//! │                                                                         │
//! │  2. Parse arguments (clap) ────────────────────────────────────────────►│
//! │                                                                         │
//! │  3. Load AppConfig ────────────────────────────────────────────────────►│
//! │     • defaults → config.toml → RENTSLIP_* environment                   │
//! │                                                                         │
//! │  4. Open database (skipped by `format` and `words`) ───────────────────►│
//! │     • <data dir>/rentslip.db unless configured, migrations applied      │
//! │                                                                         │
//! │  5. Run the command, print its output, map errors to an exit code ────►│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`workflow`] - validate, render, save, export, clear draft
//! - [`autosave`] - debounced draft writes
//! - [`render`] / [`export`] - the receipt sinks
//! - [`config`] - configuration file and environment
//! - [`commands`] - clap definitions and handlers

pub mod autosave;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod render;
pub mod state;
pub mod workflow;

pub use commands::{run, Cli};
pub use error::{AppError, AppResult};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rentslip_db=trace` - Trace one crate
/// - `RUST_LOG=warn` - Only warnings and errors
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rentslip=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .init();
}
