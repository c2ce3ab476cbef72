//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information about domain processing.
///
/// # Arguments
///
/// * `start_time` - The start time of processing
/// * `completed_domains` - Atomic counter of completed domains
/// * `total_domains` - Number of domains in this run
pub fn log_progress(
    start_time: std::time::Instant,
    completed_domains: &Arc<AtomicUsize>,
    total_domains: usize,
) {
    let elapsed = start_time.elapsed();
    let completed = completed_domains.load(Ordering::SeqCst);
    let elapsed_secs = elapsed.as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Checked {}/{} domains in {:.2} seconds (~{:.2} domains/sec)",
        completed, total_domains, elapsed_secs, rate
    );
}
