//! Ingestion: grouped external map to typed record.
//!
//! Ingestion fails fast. The first error aborts the walk; blocks populated
//! before it stay populated, while the block being built when the error
//! occurs keeps its previous value.

mod weights;

use crate::descriptor::{FieldMut, FieldSlot, Record};
use crate::error::MarshalError;
use crate::options::MarshalOptions;
use crate::value::{Map, Value};

use weights::order_by_weight;

/// Populates `record` from `map` using the default options.
///
/// Each block is looked up inside its group, the form produced by
/// [`crate::extract()`]. When `map` holds no such group the block is read
/// from the top level instead, so flat maps are accepted too. Missing blocks
/// and empty sets leave the field untouched.
///
/// # Errors
///
/// Returns the first [`MarshalError`] met: a scalar of the wrong kind or
/// width, an unsupported destination kind, a malformed weight, a block value
/// that is not a record, a weighted element tagging a scalar with the weight
/// key, a field with mismatched tags, or (with
/// [`MarshalOptions::deny_unknown_keys`]) an untagged key.
pub fn ingest<R: Record + ?Sized>(record: &mut R, map: &Map) -> Result<(), MarshalError> {
    ingest_with(record, map, &MarshalOptions::default())
}

pub(crate) fn ingest_with<R: Record + ?Sized>(
    record: &mut R,
    map: &Map,
    options: &MarshalOptions,
) -> Result<(), MarshalError> {
    for field in record.fields_mut() {
        let FieldMut {
            name, tags, slot, ..
        } = field;
        let Some((group, block)) = tags.placement(name)? else {
            tracing::debug!(field = name, "ignoring root field without a block");
            continue;
        };
        let Some(raw) = lookup(map, group, block) else {
            tracing::debug!(group, block, "block not supplied; leaving field untouched");
            continue;
        };
        match slot {
            FieldSlot::Scalar(scalar) => {
                return Err(MarshalError::UnsupportedKind {
                    field: name.to_owned(),
                    kind: scalar.kind(),
                });
            }
            FieldSlot::Record(target) => {
                let Some(entries) = record_entries(raw, block)? else {
                    tracing::debug!(group, block, "empty set; leaving record untouched");
                    continue;
                };
                target.replace_with(entries, &mut |nested, source| {
                    populate(nested, source, block, false, options)
                })?;
            }
            FieldSlot::List(target) => {
                let elements = list_elements(raw, block)?;
                if elements.is_empty() {
                    tracing::debug!(group, block, "empty set; leaving list untouched");
                    continue;
                }
                let weighted = tags.is_weighted();
                let ordered = if weighted {
                    order_by_weight(&elements, block, &options.weight_key)?
                } else {
                    elements
                };
                let mut index = 0_usize;
                target.replace_with(&ordered, &mut |nested, source| {
                    let path = format!("{block}[{index}]");
                    index = index.saturating_add(1);
                    populate(nested, source, &path, weighted, options)
                })?;
            }
        }
    }
    Ok(())
}

/// Finds a block inside `map[group]`. The flat `map[block]` form is read only
/// when the map holds no such group.
fn lookup<'m>(map: &'m Map, group: &str, block: &str) -> Option<&'m Value> {
    map.get(group)
        .and_then(Value::unwrap_set)
        .and_then(Value::as_record)
        .map_or_else(|| map.get(block), |blocks| blocks.get(block))
}

/// Normalises a record block to its map. `Ok(None)` marks an empty set.
fn record_entries<'m>(raw: &'m Value, block: &str) -> Result<Option<&'m Map>, MarshalError> {
    let Some(inner) = raw.unwrap_set() else {
        return Ok(None);
    };
    let entries = match inner {
        Value::Record(entries) => Some(entries),
        Value::Sequence(items) => match items.as_slice() {
            [Value::Record(entries)] => Some(entries),
            _ => None,
        },
        _ => None,
    };
    entries.map(Some).ok_or_else(|| MarshalError::NotARecord {
        field: block.to_owned(),
        found: inner.kind_name(),
    })
}

/// Normalises a list block to its element maps, in supplied order.
///
/// Accepts a set-of-one wrapping a sequence, a bare sequence, a sequence of
/// one sequence (the JSON form of a set-of-one) and a set whose members are
/// the elements themselves.
fn list_elements<'m>(raw: &'m Value, block: &str) -> Result<Vec<&'m Map>, MarshalError> {
    let items = match raw {
        Value::Set(members) | Value::Sequence(members) => match members.as_slice() {
            [Value::Sequence(inner)] => inner.as_slice(),
            _ => members.as_slice(),
        },
        other => {
            return Err(MarshalError::TypeMismatch {
                field: block.to_owned(),
                expected: "sequence",
                found: other.kind_name(),
            });
        }
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.unwrap_set() {
            Some(Value::Record(entries)) => Ok(entries),
            found => Err(MarshalError::NotARecord {
                field: format!("{block}[{index}]"),
                found: found.map_or("empty set", Value::kind_name),
            }),
        })
        .collect()
}

/// Coerces the keyed scalars of `target` from `entries`.
fn populate(
    target: &mut dyn Record,
    entries: &Map,
    path: &str,
    weighted: bool,
    options: &MarshalOptions,
) -> Result<(), MarshalError> {
    let mut known: Vec<&str> = Vec::new();
    for field in target.fields_mut() {
        let FieldMut {
            name, tags, slot, ..
        } = field;
        let FieldSlot::Scalar(scalar) = slot else {
            tracing::warn!(block = path, field = name, "skipping nested block");
            continue;
        };
        let Some(key) = tags.key else {
            tracing::warn!(block = path, field = name, "skipping scalar without a key");
            continue;
        };
        if weighted && key == options.weight_key {
            return Err(MarshalError::ReservedKey {
                field: path.to_owned(),
                key: key.to_owned(),
            });
        }
        known.push(key);
        let Some(value) = entries.get(key).and_then(Value::unwrap_set) else {
            continue;
        };
        scalar
            .set_from_dynamic(value)
            .map_err(|source| MarshalError::coerce(format!("{path}.{key}"), source))?;
    }
    if options.deny_unknown_keys
        && let Some(unknown) = entries.keys().find(|key| {
            !known.contains(&key.as_str()) && !(weighted && **key == options.weight_key)
        })
    {
        return Err(MarshalError::UnknownKey {
            field: path.to_owned(),
            key: unknown.clone(),
        });
    }
    Ok(())
}
