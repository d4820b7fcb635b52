//! # Commands
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── Cli, dispatch, format/words
//! ├── draft.rs    ◄─── draft set / show / clear
//! └── receipt.rs  ◄─── generate, list, show, delete, reset
//! ```
//!
//! Every handler returns the text to print; `main` owns stdout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rentslip_core::{format_currency, number_to_words, number_to_words_clean};

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::state::AppState;

pub mod draft;
pub mod receipt;

pub use draft::{DraftCommand, DraftSetArgs};

#[derive(Debug, Parser)]
#[command(name = "rentslip", version, about = "Generate and keep rent receipts")]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the in-progress receipt.
    #[command(subcommand)]
    Draft(DraftCommand),

    /// Turn the draft into a numbered receipt.
    Generate {
        /// Save without writing an export file.
        #[arg(long)]
        no_export: bool,
    },

    /// List saved receipts, newest first.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Print a saved receipt.
    Show {
        /// Receipt id or number (RR-2025-001)
        receipt: String,
        /// Also write it to the export directory.
        #[arg(long)]
        export: bool,
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved receipt by id.
    Delete { id: String },

    /// Delete the draft, every receipt and every counter.
    Reset {
        #[arg(long)]
        yes: bool,
    },

    /// Format an amount as Indian rupees.
    Format {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Spell an amount out in words.
    Words {
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Keep the raw spacing of the conversion.
        #[arg(long)]
        raw: bool,
    },
}

/// Loads config, opens storage when the command needs it, runs it.
pub async fn run(cli: Cli) -> AppResult<String> {
    match cli.command {
        Command::Format { amount } => Ok(format_currency(amount)),
        Command::Words { amount, raw } => Ok(words(amount, raw)),
        command => {
            let config = AppConfig::load(cli.config)?;
            let state = AppState::open(config).await?;
            let result = execute(command, &state).await;
            state.close().await;
            result
        }
    }
}

/// Runs one command against open state.
pub async fn execute(command: Command, state: &AppState) -> AppResult<String> {
    match command {
        Command::Draft(cmd) => draft::execute(cmd, state).await,
        Command::Generate { no_export } => receipt::generate(state, !no_export).await,
        Command::List { json } => receipt::list(state, json).await,
        Command::Show { receipt, export, json } => receipt::show(state, &receipt, export, json).await,
        Command::Delete { id } => receipt::delete(state, &id).await,
        Command::Reset { yes } => receipt::reset(state, yes).await,
        Command::Format { amount } => Ok(format_currency(amount)),
        Command::Words { amount, raw } => Ok(words(amount, raw)),
    }
}

fn words(amount: f64, raw: bool) -> String {
    if raw {
        number_to_words(amount)
    } else {
        number_to_words_clean(amount)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rentslip_db::{Database, DbConfig};

    use crate::config::AppConfig;
    use crate::state::AppState;

    /// In-memory state exporting into `export_dir`.
    pub async fn state(export_dir: &std::path::Path) -> AppState {
        let mut config = AppConfig::default();
        config.export.output_dir = export_dir.to_path_buf();
        config.autosave.debounce_ms = 10;

        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::with_database(config, db)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "rentslip",
            "--config",
            "/tmp/c.toml",
            "draft",
            "set",
            "--tenant-name",
            "Asha",
            "--rent",
            "15000",
            "--payment-mode",
            "upi",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Command::Draft(DraftCommand::Set(_))));

        let cli = Cli::try_parse_from(["rentslip", "generate", "--no-export"]).unwrap();
        assert!(matches!(cli.command, Command::Generate { no_export: true }));
    }

    #[test]
    fn test_bad_payment_mode_is_a_parse_error() {
        assert!(Cli::try_parse_from(["rentslip", "draft", "set", "--payment-mode", "bitcoin"]).is_err());
    }

    #[tokio::test]
    async fn test_format_and_words_need_no_storage() {
        let cli = Cli::try_parse_from(["rentslip", "format", "1500000"]).unwrap();
        assert_eq!(run(cli).await.unwrap(), "₹15,00,000");

        let cli = Cli::try_parse_from(["rentslip", "words", "15000"]).unwrap();
        assert_eq!(run(cli).await.unwrap(), "Fifteen Thousand Only");

        let cli = Cli::try_parse_from(["rentslip", "words", "-5"]).unwrap();
        assert_eq!(run(cli).await.unwrap(), "Negative Five Only");
    }
}
