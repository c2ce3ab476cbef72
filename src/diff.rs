//! Snapshot diffing: field-level changes between the current run and the
//! prior one.

use crate::models::{ChangeRecord, ChangedField, DomainSnapshot, FieldValue};

/// Compares a fresh snapshot against the prior one for the same domain.
///
/// With no prior snapshot there is nothing to compare: the result is
/// empty and the caller flags the domain as new. When both are present,
/// the fields are compared in the order `domain, dmarc, spf, dkim` for
/// structural equality; each mismatch yields one `ChangeRecord` carrying
/// both values. Equality is exact, so a reordering of the underlying TXT
/// answers counts as a change.
pub fn diff_snapshots(
    current: &DomainSnapshot,
    previous: Option<&DomainSnapshot>,
) -> Vec<ChangeRecord> {
    let Some(previous) = previous else {
        return Vec::new();
    };

    let mut changes = Vec::new();

    if previous.domain != current.domain {
        changes.push(ChangeRecord {
            domain: current.domain.clone(),
            field: ChangedField::Domain,
            previous: Some(FieldValue::Name(previous.domain.clone())),
            current: Some(FieldValue::Name(current.domain.clone())),
        });
    }

    for (field, prior, fresh) in [
        (ChangedField::Dmarc, &previous.dmarc, &current.dmarc),
        (ChangedField::Spf, &previous.spf, &current.spf),
        (ChangedField::Dkim, &previous.dkim, &current.dkim),
    ] {
        if prior != fresh {
            changes.push(ChangeRecord {
                domain: current.domain.clone(),
                field,
                previous: Some(FieldValue::Records(prior.clone())),
                current: Some(FieldValue::Records(fresh.clone())),
            });
        }
    }

    changes
}
