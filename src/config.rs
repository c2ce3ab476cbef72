use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// constants (used as defaults)
/// Maximum number of domains checked concurrently.
///
/// Bounds in-flight DNS queries so a large list does not overwhelm the
/// resolver or trip rate limits on upstream servers.
pub const SEMAPHORE_LIMIT: usize = 20;
/// Interval in seconds between progress log lines.
pub const LOGGING_INTERVAL: usize = 5;

// Network operation timeouts
/// DNS query timeout in seconds.
///
/// Applied per lookup, so a single slow or unresponsive authoritative
/// server cannot stall the whole batch.
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Normal operational output (default).
    Info,
    /// Verbose debugging output.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored.
    Plain,
    /// One JSON object per line.
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have sensible defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # First run: no prior results, every domain is new
/// mailauth_status domains.csv --json-out results.json
///
/// # Subsequent run: diff against the previous results
/// mailauth_status domains.csv results.json --json-out results.json
///
/// # With custom concurrency and timeout
/// mailauth_status domains.csv --max-concurrency 50 --timeout-seconds 5
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mailauth_status",
    about = "Checks a list of domains for their DMARC, SPF, and DKIM records and reports changes."
)]
pub struct Config {
    /// Domain list to read (columns: domain,selector)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Prior-results JSON from an earlier run (enables change detection)
    #[arg(value_parser)]
    pub prior: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Write the snapshot table as CSV to this path
    #[arg(long, value_parser)]
    pub csv_out: Option<PathBuf>,

    /// Write the snapshot array as JSON to this path
    ///
    /// This file is in the prior-results format, so pointing the next
    /// run's second argument at it closes the change-detection loop.
    #[arg(long, value_parser)]
    pub json_out: Option<PathBuf>,

    /// Write the change report to this path instead of stdout
    #[arg(long, value_parser)]
    pub report_out: Option<PathBuf>,

    /// Maximum concurrent domains in flight
    #[arg(long, default_value_t = SEMAPHORE_LIMIT)]
    pub max_concurrency: usize,

    /// Per-lookup timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: PathBuf::new(),
            prior: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            csv_out: None,
            json_out: None,
            report_out: None,
            max_concurrency: SEMAPHORE_LIMIT,
            timeout_seconds: DNS_TIMEOUT_SECS,
        }
    }
}
