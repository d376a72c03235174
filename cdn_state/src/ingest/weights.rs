//! Weighted list reconstruction.

use crate::error::MarshalError;
use crate::value::{Map, Value};

/// Reorders list elements by their weight.
///
/// Weights must form a permutation of `0..elements.len()`. Each element is
/// placed into a slot indexed by its weight; a slot claimed twice yields
/// [`MarshalError::DuplicateWeight`]. Because every weight is range-checked
/// and none repeats, all slots are filled once the loop completes.
pub(crate) fn order_by_weight<'m>(
    elements: &[&'m Map],
    block: &str,
    weight_key: &str,
) -> Result<Vec<&'m Map>, MarshalError> {
    let len = elements.len();
    let mut slots: Vec<Option<&'m Map>> = vec![None; len];
    for (index, entries) in elements.iter().copied().enumerate() {
        let raw = entries
            .get(weight_key)
            .and_then(Value::unwrap_set)
            .ok_or_else(|| MarshalError::MissingWeight {
                block: block.to_owned(),
                index,
            })?;
        let weight = raw.as_int().ok_or_else(|| MarshalError::TypeMismatch {
            field: format!("{block}[{index}].{weight_key}"),
            expected: "int",
            found: raw.kind_name(),
        })?;
        let claimed = match usize::try_from(weight) {
            Ok(position) => slots.get_mut(position),
            Err(_) => None,
        };
        let slot = claimed.ok_or_else(|| MarshalError::WeightOutOfRange {
            block: block.to_owned(),
            weight,
            len,
        })?;
        if slot.replace(entries).is_some() {
            return Err(MarshalError::DuplicateWeight {
                block: block.to_owned(),
                weight,
            });
        }
    }
    Ok(slots.into_iter().flatten().collect())
}
