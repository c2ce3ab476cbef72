//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Prints per-mechanism lookup failure counts.
///
/// Only non-zero counters are printed; a clean run logs a single line.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total = stats.total_errors();
    if total == 0 {
        info!("All lookups completed without failures");
        return;
    }

    info!("Lookup failures: {total}");
    for error_type in ErrorType::iter() {
        let count = stats.get_error_count(error_type);
        if count > 0 {
            info!("  {}: {}", error_type.as_str(), count);
        }
    }
}
