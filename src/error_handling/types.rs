//! Error type definitions.
//!
//! Boundary failures (input files, prior-results files, output files,
//! logger setup) get typed errors that propagate to the top level.
//! Per-mechanism lookup failures are deliberately NOT here: they are
//! contained inside the normalizer and never surface as errors.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for the domain-list input file.
#[derive(Error, Debug)]
pub enum InputError {
    /// The domain list could not be read or parsed as tabular data.
    #[error("Failed to read domain list {path}: {source}")]
    ReadError {
        /// Path to the domain list.
        path: PathBuf,
        /// Underlying csv/io cause.
        #[source]
        source: csv::Error,
    },

    /// A row had no domain in its first column.
    #[error("Domain list {path} row {row} is missing a domain")]
    MissingDomain {
        /// Path to the domain list.
        path: PathBuf,
        /// 1-based row number of the offending row.
        row: u64,
    },
}

/// Error types for snapshot and report file I/O.
///
/// All of these are fatal to the run and carry the file path so the
/// operator knows which artifact failed.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A file could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadError {
        /// Path that failed.
        path: PathBuf,
        /// Underlying io cause.
        #[source]
        source: std::io::Error,
    },

    /// A prior-results file was not valid snapshot JSON.
    #[error("Failed to parse prior results {path}: {source}")]
    ParseError {
        /// Path that failed.
        path: PathBuf,
        /// Underlying serde cause.
        #[source]
        source: serde_json::Error,
    },

    /// An output artifact could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteError {
        /// Path that failed.
        path: PathBuf,
        /// Underlying io cause.
        #[source]
        source: std::io::Error,
    },
}

/// Types of lookup failures tracked during a run.
///
/// One variant per mechanism; every diagnostic RecordSet produced by the
/// normalizer increments exactly one of these counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// DMARC TXT lookup failed or found no records.
    DmarcLookupError,
    /// SPF TXT lookup failed or found no records.
    SpfLookupError,
    /// DKIM TXT lookup failed or found no records.
    DkimLookupError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DmarcLookupError => "DMARC lookup error",
            ErrorType::SpfLookupError => "SPF lookup error",
            ErrorType::DkimLookupError => "DKIM lookup error",
        }
    }
}
