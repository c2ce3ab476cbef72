//! Domain list reading.
//!
//! The input is a small tabular file with `domain,selector` columns.
//! Blank lines and `#` comments are skipped, an optional header row is
//! recognized by its literal column name, and a missing selector column
//! means "no selector" (the DKIM lookup then uses the bare
//! `_domainkey` name and reports accordingly).

use std::path::Path;

use crate::error_handling::InputError;
use crate::models::DomainQuery;

/// Reads the domain list into `DomainQuery` entries, preserving file
/// order.
///
/// A row without a domain is a hard error naming the offending line —
/// silently skipping it would hide a typo'd entry from the whole run.
pub fn read_domain_list(path: &Path) -> Result<Vec<DomainQuery>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|source| InputError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

    let mut queries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| InputError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let row = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);

        let domain = record.get(0).unwrap_or("");
        let selector = record.get(1).unwrap_or("");

        // An optional header row is recognized by its literal column name
        if index == 0 && domain.eq_ignore_ascii_case("domain") {
            continue;
        }

        if domain.is_empty() {
            return Err(InputError::MissingDomain {
                path: path.to_path_buf(),
                row,
            });
        }

        queries.push(DomainQuery {
            domain: domain.to_string(),
            selector: selector.to_string(),
        });
    }

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_list(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_rows_with_and_without_selector() {
        let file = write_list("uoc.com,mail\nuned.es\n");
        let queries = read_domain_list(file.path()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].domain, "uoc.com");
        assert_eq!(queries[0].selector, "mail");
        assert_eq!(queries[1].domain, "uned.es");
        assert_eq!(queries[1].selector, "");
    }

    #[test]
    fn skips_header_row() {
        let file = write_list("domain,selector\nexample.com,mail\n");
        let queries = read_domain_list(file.path()).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].domain, "example.com");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let file = write_list("# production domains\nexample.com,mail\n\nexample.org\n");
        let queries = read_domain_list(file.path()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].domain, "example.com");
        assert_eq!(queries[1].domain, "example.org");
    }

    #[test]
    fn row_without_domain_is_rejected_with_line_number() {
        let file = write_list("example.com,mail\n,orphan-selector\n");
        let err = read_domain_list(file.path()).unwrap_err();
        match err {
            InputError::MissingDomain { row, .. } => assert_eq!(row, 2),
            other => panic!("expected MissingDomain, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_domain_list(Path::new("/nonexistent/domains.csv")).unwrap_err();
        assert!(matches!(err, InputError::ReadError { .. }));
    }

    #[test]
    fn preserves_input_order() {
        let file = write_list("b.example\na.example\nc.example\n");
        let queries = read_domain_list(file.path()).unwrap();
        let domains: Vec<&str> = queries.iter().map(|q| q.domain.as_str()).collect();
        assert_eq!(domains, vec!["b.example", "a.example", "c.example"]);
    }
}
