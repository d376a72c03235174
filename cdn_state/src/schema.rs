//! Definition-time checks for root records.
//!
//! `#[derive(Record)]` already rejects these mistakes at compile time; this
//! check covers hand-written [`Record`] implementations.

use std::collections::BTreeSet;

use crate::descriptor::{FieldValue, Record, declares_key};
use crate::error::MarshalError;
use crate::options::DEFAULT_WEIGHT_KEY;

/// Validates the block tags of every field of `record`.
///
/// # Errors
///
/// Returns [`MarshalError::MissingGroupOrBlock`] for a field carrying only
/// one of the two tags, [`MarshalError::DuplicateBlock`] when two fields share
/// a `(group, block)` pair, [`MarshalError::UnsupportedKind`] for a scalar
/// tagged as a block and [`MarshalError::ReservedKey`] when an element of a
/// weighted list tags a scalar with the default weight key. Element tags are
/// read from the elements present, so an empty list passes.
pub fn check<R: Record + ?Sized>(record: &R) -> Result<(), MarshalError> {
    let mut seen = BTreeSet::new();
    for field in record.fields() {
        let Some((group, block)) = field.tags.placement(field.name)? else {
            continue;
        };
        if let FieldValue::Scalar(scalar) = field.value {
            return Err(MarshalError::UnsupportedKind {
                field: field.name.to_owned(),
                kind: scalar.kind(),
            });
        }
        if let FieldValue::List(items) = &field.value
            && field.tags.is_weighted()
            && items
                .iter()
                .any(|item| declares_key(*item, DEFAULT_WEIGHT_KEY))
        {
            return Err(MarshalError::ReservedKey {
                field: field.name.to_owned(),
                key: DEFAULT_WEIGHT_KEY.to_owned(),
            });
        }
        if !seen.insert((group, block)) {
            return Err(MarshalError::DuplicateBlock {
                group: group.to_owned(),
                block: block.to_owned(),
            });
        }
    }
    Ok(())
}
