//! Core data model for domain checks.
//!
//! These types flow through the whole pipeline: a `DomainQuery` goes in,
//! the normalizer produces a `DomainSnapshot` (one `RecordSet` per
//! mechanism), and the differ turns snapshot pairs into `ChangeRecord`s.

use serde::de::Error as DeError;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single entry from the domain list: the domain to check and the DKIM
/// selector to use for it (empty when the list supplies none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainQuery {
    /// Domain name to check.
    pub domain: String,
    /// DKIM selector; only used for the DKIM lookup.
    pub selector: String,
}

/// All matching TXT answers for one mechanism.
///
/// `count` always equals `values.len()`. A failed lookup is represented as
/// a set containing exactly one synthetic diagnostic string, not as an
/// empty set, so downstream consumers always see why a record is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    /// Number of values in the set.
    pub count: usize,
    /// Record payloads in resolver answer order.
    pub values: Vec<String>,
}

impl RecordSet {
    /// Builds a set from record values, keeping `count` in sync.
    pub fn from_values(values: Vec<String>) -> Self {
        RecordSet {
            count: values.len(),
            values,
        }
    }

    /// Builds the single-element set carrying a lookup diagnostic.
    pub fn diagnostic(message: String) -> Self {
        RecordSet {
            count: 1,
            values: vec![message],
        }
    }

    /// Renders the set the way the output formats expect it: all values
    /// joined by commas.
    pub fn joined(&self) -> String {
        self.values.join(",")
    }
}

// The wire shape is a two-element array `[count, "v1,v2,..."]`, kept
// compatible with prior-results files written by earlier versions of the
// tool. Deserialization reverses the join; a one-element set takes the
// whole string so single records containing commas survive a round trip.
impl Serialize for RecordSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.count)?;
        tup.serialize_element(&self.joined())?;
        tup.end()
    }
}

impl<'de> Deserialize<'de> for RecordSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (count, joined): (usize, String) = Deserialize::deserialize(deserializer)?;
        let values: Vec<String> = match count {
            0 => {
                if !joined.is_empty() {
                    return Err(D::Error::custom(
                        "record set with count 0 carries a non-empty value string",
                    ));
                }
                Vec::new()
            }
            1 => vec![joined],
            _ => joined.split(',').map(str::to_string).collect(),
        };
        Ok(RecordSet::from_values(values))
    }
}

/// The full result of checking one domain in one run.
///
/// Created by the normalizer, never mutated afterwards; consumed by the
/// differ and the report writers. Also the unit persisted to the
/// prior-results JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSnapshot {
    /// The domain the snapshot belongs to.
    pub domain: String,
    /// DMARC records found at `_dmarc.<domain>`.
    pub dmarc: RecordSet,
    /// SPF records found at the domain apex.
    pub spf: RecordSet,
    /// DKIM records found at `<selector>._domainkey.<domain>`.
    pub dkim: RecordSet,
}

/// Which snapshot field a change was detected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangedField {
    /// The domain name itself.
    Domain,
    /// The DMARC record set.
    Dmarc,
    /// The SPF record set.
    Spf,
    /// The DKIM record set.
    Dkim,
}

impl std::fmt::Display for ChangedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ChangedField::Domain => "domain",
            ChangedField::Dmarc => "DMARC",
            ChangedField::Spf => "SPF",
            ChangedField::Dkim => "DKIM",
        })
    }
}

/// One side of a field comparison.
///
/// The `domain` field compares as a plain name; the three mechanism
/// fields compare as record sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A domain name.
    Name(String),
    /// A mechanism's record set.
    Records(RecordSet),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Name(name) => f.write_str(name),
            FieldValue::Records(records) => f.write_str(&records.joined()),
        }
    }
}

/// A single field-level difference between a prior and a current snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Domain the change belongs to.
    pub domain: String,
    /// The snapshot field that differs.
    pub field: ChangedField,
    /// Value from the prior snapshot.
    pub previous: Option<FieldValue>,
    /// Value from the current snapshot.
    pub current: Option<FieldValue>,
}
