//! TXT lookup capability and its hickory-resolver implementation.

use async_trait::async_trait;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

/// Why a TXT lookup produced no usable answer set.
///
/// This stays typed all the way through the normalizer; it is turned into
/// the user-visible diagnostic string only when the RecordSet is built.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The resolver reported a failure (NXDomain, no records, refused,
    /// network error).
    #[error("resolution failed: {0}")]
    Resolution(String),

    /// The lookup did not complete within the configured deadline.
    #[error("lookup timed out after {0} seconds")]
    Timeout(u64),
}

/// TXT lookup capability.
///
/// The normalizer is generic over this trait; production wires in a
/// `TokioAsyncResolver`, tests wire in a fake with canned records.
#[async_trait]
pub trait TxtLookup: Send + Sync {
    /// Queries TXT records for `name`, returning the raw answer strings
    /// in resolver order.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

#[async_trait]
impl TxtLookup for TokioAsyncResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = self
            .lookup(name, RecordType::TXT)
            .await
            .map_err(|e| LookupError::Resolution(e.to_string()))?;

        let txt_records: Vec<String> = lookup
            .iter()
            .filter_map(|rdata| {
                if let RData::TXT(txt) = rdata {
                    // TXT records can be split across multiple byte slices, join them
                    let parts: Result<Vec<String>, _> = txt
                        .iter()
                        .map(|bytes| String::from_utf8(bytes.to_vec()))
                        .collect();
                    parts.ok().map(|parts| parts.join(""))
                } else {
                    None
                }
            })
            .collect();
        Ok(txt_records)
    }
}
