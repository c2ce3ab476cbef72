//! JSON export functionality.
//!
//! Pretty-printed array of snapshots, each mechanism field in the
//! `[count, joined]` compatibility shape. This artifact doubles as the
//! prior-results input of the next run.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::error_handling::PersistenceError;
use crate::models::DomainSnapshot;

/// Writes the snapshot set as pretty-printed JSON to `output`, or stdout
/// when `None`.
///
/// File create and write failures surface as
/// [`PersistenceError::WriteError`] carrying the path and the underlying
/// cause. Returns the number of snapshots written.
pub fn export_json(snapshots: &[DomainSnapshot], output: Option<&PathBuf>) -> Result<usize> {
    match output {
        Some(output_path) => {
            let write_error = |source: io::Error| PersistenceError::WriteError {
                path: output_path.clone(),
                source,
            };
            let file = std::fs::File::create(output_path).map_err(write_error)?;
            let mut writer = io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, snapshots)
                .context("Failed to serialize snapshots")?;
            writer.write_all(b"\n").map_err(write_error)?;
            writer.flush().map_err(write_error)?;
        }
        None => {
            let mut writer = io::stdout();
            serde_json::to_writer_pretty(&mut writer, snapshots)
                .context("Failed to serialize snapshots")?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
    }
    Ok(snapshots.len())
}
