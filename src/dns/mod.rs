//! DNS TXT resolution behind a capability interface.
//!
//! This module provides:
//! - The `TxtLookup` trait the normalizer depends on, so tests can inject
//!   a fake resolver with canned answers
//! - The `hickory-resolver` implementation used in production
//! - Quoted-payload extraction for raw TXT answer strings
//!
//! All operations are async and respect the resolver's configured
//! timeouts.

mod extract;
mod resolver;

// Re-export public API
pub use extract::quoted_payload;
pub use resolver::{LookupError, TxtLookup};
