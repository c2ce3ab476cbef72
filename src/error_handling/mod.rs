//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Typed errors for boundary failures (input, persistence, init)
//! - Per-mechanism lookup failure counters
//!
//! Lookup failures inside the normalizer are contained locally and only
//! counted here; boundary failures propagate to the top level and abort
//! the run.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ErrorType, InitializationError, InputError, PersistenceError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert_eq!(stats.total_errors(), 0);
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::SpfLookupError);
        stats.increment_error(ErrorType::SpfLookupError);
        stats.increment_error(ErrorType::DkimLookupError);
        assert_eq!(stats.get_error_count(ErrorType::SpfLookupError), 2);
        assert_eq!(stats.get_error_count(ErrorType::DkimLookupError), 1);
        assert_eq!(stats.get_error_count(ErrorType::DmarcLookupError), 0);
        assert_eq!(stats.total_errors(), 3);
    }

    #[test]
    fn test_all_error_types_have_string_representation() {
        for error_type in ErrorType::iter() {
            assert!(!error_type.as_str().is_empty());
        }
    }
}
