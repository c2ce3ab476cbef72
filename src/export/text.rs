//! Plain-text change report.

use std::path::PathBuf;

use anyhow::Result;

use crate::error_handling::PersistenceError;
use crate::models::{ChangeRecord, ChangedField};

/// Renders the change set as the operator-facing report.
///
/// Each change is a block of the form
/// `<description>:\n\tPrevious: <value>\n\tCurrent: <value>\n\n`; an
/// empty change set renders as exactly `There are no changes`.
pub fn render_change_report(changes: &[ChangeRecord]) -> String {
    if changes.is_empty() {
        return "There are no changes".to_string();
    }

    let mut report = String::new();
    for change in changes {
        let description = match change.field {
            ChangedField::Domain => format!("Domain name changed for \"{}\"", change.domain),
            field => format!("{} record changed for \"{}\"", field, change.domain),
        };
        let previous = change
            .previous
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let current = change
            .current
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        report.push_str(&format!(
            "{description}:\n\tPrevious: {previous}\n\tCurrent: {current}\n\n"
        ));
    }
    report
}

/// Writes the change report to `output`, or prints it when `None`.
///
/// A write failure surfaces as [`PersistenceError::WriteError`] carrying
/// the path and the underlying cause.
pub fn write_change_report(changes: &[ChangeRecord], output: Option<&PathBuf>) -> Result<()> {
    let report = render_change_report(changes);
    match output {
        Some(path) => {
            std::fs::write(path, &report).map_err(|source| PersistenceError::WriteError {
                path: path.clone(),
                source,
            })?
        }
        None => println!("{report}"),
    }
    Ok(())
}
