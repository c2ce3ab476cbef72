//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mailauth_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mailauth_status::initialization::init_logger_with;
use mailauth_status::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the check using the library
    match run_check(config).await {
        Ok(report) => {
            println!(
                "Checked {} domain{} ({} changed, {} new, {} lookup failure{}) in {:.1}s",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.changed_domains,
                report.new_domains,
                report.lookup_failures,
                if report.lookup_failures == 1 { "" } else { "s" },
                report.elapsed_seconds
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("mailauth_status error: {:#}", e);
            process::exit(1);
        }
    }
}
