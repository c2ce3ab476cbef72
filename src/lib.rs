//! mailauth_status library: DMARC, SPF, and DKIM record checking
//!
//! This library checks the email-authentication DNS records a domain
//! publishes, normalizes them into per-domain snapshots, and diffs them
//! against the snapshots of a prior run so only meaningful changes
//! surface.
//!
//! # Example
//!
//! ```no_run
//! use mailauth_status::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.csv"),
//!     prior: Some(std::path::PathBuf::from("results.json")),
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("Checked {} domains, {} changed", report.total_domains, report.changed_domains);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
mod check;
pub mod config;
mod diff;
mod dns;
mod error_handling;
pub mod export;
pub mod initialization;
mod input;
mod models;
mod snapshot;

// Re-export public API
pub use check::{query_domain, run_queries, Mechanism};
pub use config::{Config, LogFormat, LogLevel};
pub use diff::diff_snapshots;
pub use dns::{quoted_payload, LookupError, TxtLookup};
pub use error_handling::{
    ErrorType, InitializationError, InputError, PersistenceError, ProcessingStats,
};
pub use input::read_domain_list;
pub use models::{
    ChangeRecord, ChangedField, DomainQuery, DomainSnapshot, FieldValue, RecordSet,
};
pub use run::{run_check, CheckReport};
pub use snapshot::{load_prior_index, PriorSnapshotIndex};

// Internal run module (contains the batch orchestration logic)
mod run {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, print_error_statistics};
    use crate::check::run_queries;
    use crate::config::{Config, LOGGING_INTERVAL};
    use crate::diff::diff_snapshots;
    use crate::error_handling::ProcessingStats;
    use crate::export::{export_csv, export_json, write_change_report};
    use crate::initialization::init_resolver;
    use crate::input::read_domain_list;
    use crate::models::ChangeRecord;
    use crate::snapshot::{load_prior_index, PriorSnapshotIndex};

    /// Results of a completed check run.
    ///
    /// Contains summary statistics about the run for the binary (or an
    /// embedding application) to present.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// Number of domains checked (one snapshot each).
        pub total_domains: usize,
        /// Domains with at least one changed field since the prior run.
        pub changed_domains: usize,
        /// Domains with no prior snapshot to compare against.
        pub new_domains: usize,
        /// Total mechanism lookups that failed and were reported as
        /// diagnostics.
        pub lookup_failures: usize,
        /// Elapsed time in seconds.
        pub elapsed_seconds: f64,
    }

    /// Runs a full check with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads the domain
    /// list, checks every domain concurrently, diffs the results against
    /// the prior snapshots, and writes the requested output artifacts.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The domain list cannot be read or contains a malformed row
    /// - The prior-results file is supplied but unreadable or malformed
    /// - An output artifact cannot be written
    ///
    /// Per-mechanism lookup failures never abort the run; they appear as
    /// diagnostic strings in the affected snapshots.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        let queries = read_domain_list(&config.file).context("Failed to read domain list")?;
        info!("Total domains in file: {}", queries.len());

        let prior_index: PriorSnapshotIndex = match &config.prior {
            Some(path) => {
                let index = load_prior_index(path).context("Failed to load prior results")?;
                info!(
                    "Loaded {} prior snapshots from {}",
                    index.len(),
                    path.display()
                );
                index
            }
            None => {
                info!("No prior results supplied; every domain is treated as new");
                PriorSnapshotIndex::new()
            }
        };

        let resolver = init_resolver(config.timeout_seconds);
        let stats = Arc::new(ProcessingStats::new());
        let lookup_timeout = Duration::from_secs(config.timeout_seconds);

        let run_id = format!("run_{}", Utc::now().timestamp_millis());
        info!("Starting run: {}", run_id);
        let start_time = std::time::Instant::now();

        let completed_domains = Arc::new(AtomicUsize::new(0));
        let total_domains = queries.len();

        let cancel = CancellationToken::new();
        let cancel_logging = cancel.child_token();
        let completed_for_logging = Arc::clone(&completed_domains);
        let logging_task = tokio::task::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL as u64));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &completed_for_logging, total_domains);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        });

        let snapshots = run_queries(
            resolver,
            Arc::clone(&stats),
            &queries,
            config.max_concurrency,
            lookup_timeout,
            Arc::clone(&completed_domains),
        )
        .await;

        cancel.cancel();
        let _ = logging_task.await;

        // Pair each snapshot with its prior and collect field-level changes.
        // A missing prior is not an error: the domain is simply new.
        let mut changes: Vec<ChangeRecord> = Vec::new();
        let mut changed_domains = 0usize;
        let mut new_domains = 0usize;
        for snapshot in &snapshots {
            let previous = prior_index.get(&snapshot.domain);
            if previous.is_none() {
                new_domains += 1;
                log::debug!("No prior snapshot for {}", snapshot.domain);
            }
            let domain_changes = diff_snapshots(snapshot, previous);
            if !domain_changes.is_empty() {
                changed_domains += 1;
            }
            changes.extend(domain_changes);
        }

        if new_domains > 0 {
            info!("{new_domains} domains had no prior snapshot");
        }
        print_error_statistics(&stats);

        if let Some(path) = &config.csv_out {
            let written = export_csv(&snapshots, Some(path))?;
            info!("Wrote {} rows to {}", written, path.display());
        }
        if let Some(path) = &config.json_out {
            let written = export_json(&snapshots, Some(path))?;
            info!("Wrote {} snapshots to {}", written, path.display());
        }
        write_change_report(&changes, config.report_out.as_ref())?;

        Ok(CheckReport {
            total_domains: snapshots.len(),
            changed_domains,
            new_domains,
            lookup_failures: stats.total_errors(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

}
