//! CSV export functionality.
//!
//! One row per domain with each mechanism's record set flattened into a
//! single column. The values inside a column are joined by commas; the
//! writer quotes such fields so the outer CSV stays parseable.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use csv::Writer;

use crate::error_handling::PersistenceError;
use crate::models::DomainSnapshot;

/// Writes the snapshot set as CSV to `output`, or stdout when `None`.
///
/// File create and write failures surface as
/// [`PersistenceError::WriteError`] carrying the path and the underlying
/// cause. Returns the number of rows written (excluding the header).
pub fn export_csv(snapshots: &[DomainSnapshot], output: Option<&PathBuf>) -> Result<usize> {
    let mut writer: Writer<Box<dyn Write>> = if let Some(output_path) = output {
        let file =
            std::fs::File::create(output_path).map_err(|source| PersistenceError::WriteError {
                path: output_path.clone(),
                source,
            })?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>)
    };

    writer.write_record(["domain", "dmarc", "spf", "dkim"])?;

    for snapshot in snapshots {
        writer.write_record(&[
            snapshot.domain.clone(),
            snapshot.dmarc.joined(),
            snapshot.spf.joined(),
            snapshot.dkim.joined(),
        ])?;
    }

    // The writer buffers internally, so disk errors surface at flush
    match output {
        Some(output_path) => {
            writer
                .flush()
                .map_err(|source| PersistenceError::WriteError {
                    path: output_path.clone(),
                    source,
                })?
        }
        None => writer.flush()?,
    }
    Ok(snapshots.len())
}
