//! Prior-snapshot loading.
//!
//! The prior-results file is the JSON artifact a previous run wrote: an
//! array of snapshots in the `[count, joined]` field shape. It is loaded
//! once at the start of a run and read-only afterwards.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error_handling::PersistenceError;
use crate::models::DomainSnapshot;

/// Mapping from domain name to its most recent prior snapshot.
pub type PriorSnapshotIndex = HashMap<String, DomainSnapshot>;

/// Loads the prior-results file into a per-domain index.
///
/// When the file holds several snapshots for one domain (a list with
/// duplicates), the last one wins: the file is written in input order,
/// so the last entry is the most recent check. Any read or parse failure
/// is fatal and names the path — a half-loaded index would silently
/// report every domain as new.
pub fn load_prior_index(path: &Path) -> Result<PriorSnapshotIndex, PersistenceError> {
    let file = File::open(path).map_err(|source| PersistenceError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshots: Vec<DomainSnapshot> = serde_json::from_reader(BufReader::new(file))
        .map_err(|source| PersistenceError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

    let mut index = PriorSnapshotIndex::with_capacity(snapshots.len());
    for snapshot in snapshots {
        index.insert(snapshot.domain.clone(), snapshot);
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_snapshots_keyed_by_domain() {
        let file = write_json(
            r#"[
                {
                    "domain": "example.com",
                    "dmarc": [1, "v=DMARC1; p=reject"],
                    "spf": [1, "v=spf1 -all"],
                    "dkim": [0, ""]
                }
            ]"#,
        );
        let index = load_prior_index(file.path()).unwrap();
        assert_eq!(index.len(), 1);
        let snapshot = &index["example.com"];
        assert_eq!(snapshot.dmarc.values, vec!["v=DMARC1; p=reject"]);
        assert_eq!(snapshot.dkim.count, 0);
    }

    #[test]
    fn last_snapshot_wins_for_duplicate_domains() {
        let file = write_json(
            r#"[
                {"domain": "example.com", "dmarc": [1, "v=DMARC1; p=none"], "spf": [0, ""], "dkim": [0, ""]},
                {"domain": "example.com", "dmarc": [1, "v=DMARC1; p=reject"], "spf": [0, ""], "dkim": [0, ""]}
            ]"#,
        );
        let index = load_prior_index(file.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index["example.com"].dmarc.values, vec!["v=DMARC1; p=reject"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_prior_index(Path::new("/nonexistent/prior.json")).unwrap_err();
        assert!(matches!(err, PersistenceError::ReadError { .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error_naming_the_path() {
        let file = write_json("{not json");
        let err = load_prior_index(file.path()).unwrap_err();
        match &err {
            PersistenceError::ParseError { path, .. } => {
                assert_eq!(path, file.path());
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
        assert!(err.to_string().contains("Failed to parse prior results"));
    }
}
