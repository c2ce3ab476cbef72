//! Output artifacts for a check run.
//!
//! This module renders the aggregated results into the three formats the
//! tool produces:
//! - CSV (one row per domain, record sets joined by commas)
//! - JSON (the snapshot array; also the next run's prior-results file)
//! - plain-text change report

mod csv;
mod json;
mod text;

// Re-export public API
pub use csv::export_csv;
pub use json::export_json;
pub use text::{render_change_report, write_change_report};
