//! # rentslip
//!
//! ```text
//! rentslip draft set --tenant-name "Asha Verma" --rent 15000 --month 2025-06 ...
//! rentslip draft show
//! rentslip generate
//! rentslip list
//! rentslip show RR-2025-001 --export
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use rentslip_cli::{init_tracing, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    info!(command = ?cli.command, "Starting rentslip");

    match run(cli).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
