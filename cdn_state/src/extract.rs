//! Extraction: typed record to grouped external map.
//!
//! Extraction never fails. Fields that cannot be rendered are skipped and
//! reported through `tracing`.

use crate::descriptor::{FieldDescriptor, FieldValue, Record, declares_key};
use crate::options::MarshalOptions;
use crate::tree::Parents;
use crate::value::{Map, Value};

/// Renders `record` as `{group: {block: Set([content])}}` using the default
/// options.
///
/// Absent blocks are omitted. A record block becomes a map of its keyed
/// scalars; a list block becomes a sequence of such maps, each carrying its
/// position under `weight` when the block is weighted.
///
/// # Examples
///
/// ```
/// use cdn_state::{Record, Value, extract};
///
/// #[derive(Default, Record)]
/// struct Compression {
///     #[record(key = "enabled")]
///     enabled: bool,
/// }
///
/// #[derive(Default, Record)]
/// struct Config {
///     #[record(group = "delivery", block = "compression")]
///     compression: Option<Compression>,
/// }
///
/// let config = Config { compression: Some(Compression { enabled: true }) };
/// let map = extract(&config);
/// let block = map
///     .get("delivery")
///     .and_then(Value::as_record)
///     .and_then(|group| group.get("compression"));
/// assert!(matches!(block, Some(Value::Set(_))));
/// ```
#[must_use]
pub fn extract<R: Record + ?Sized>(record: &R) -> Map {
    extract_with(record, &MarshalOptions::default())
}

pub(crate) fn extract_with<R: Record + ?Sized>(record: &R, options: &MarshalOptions) -> Map {
    let mut tree = Parents::new();
    for field in record.fields() {
        let (group, block) = match field.tags.placement(field.name) {
            Ok(Some(placement)) => placement,
            Ok(None) => {
                tracing::debug!(field = field.name, "skipping root field without a block");
                continue;
            }
            Err(err) => {
                tracing::warn!(field = field.name, error = %err, "skipping mis-tagged field");
                continue;
            }
        };
        if !field.is_present() {
            tracing::debug!(group, block, field = field.name, "skipping absent block");
            continue;
        }
        if let FieldValue::Scalar(_) = field.value {
            tracing::warn!(
                group,
                block,
                field = field.name,
                type_name = field.type_name,
                "skipping block that is neither a record nor a list"
            );
            continue;
        }
        let Some(content) = render_block(&field, options) else {
            continue;
        };
        let parent = tree.get_or_create_parent(group);
        match parent.get_or_create_field(block) {
            Some(slot) => {
                slot.set_content(content);
            }
            None => tracing::warn!(
                group,
                block,
                field = field.name,
                "skipping block already declared by an earlier field"
            ),
        }
    }
    tree.dump()
}

fn render_block(field: &FieldDescriptor<'_>, options: &MarshalOptions) -> Option<Value> {
    match &field.value {
        FieldValue::Scalar(_) => None,
        FieldValue::Record(record) => {
            let inner = (*record)?;
            Some(Value::Record(flatten(inner, field.name)))
        }
        FieldValue::List(items) => {
            let weighted = field.tags.is_weighted();
            if weighted
                && items
                    .iter()
                    .any(|item| declares_key(*item, &options.weight_key))
            {
                tracing::warn!(
                    field = field.name,
                    key = options.weight_key.as_str(),
                    "skipping weighted list whose elements tag a scalar with the weight key"
                );
                return None;
            }
            let elements = items
                .iter()
                .enumerate()
                .map(|(position, item)| {
                    let mut entries = flatten(*item, field.name);
                    if weighted {
                        let weight = i64::try_from(position).unwrap_or(i64::MAX);
                        entries.insert(options.weight_key.clone(), Value::Int(weight));
                    }
                    Value::Record(entries)
                })
                .collect();
            Some(Value::Sequence(elements))
        }
    }
}

/// Collects the keyed scalar fields of `record` into one map. Nested blocks
/// are not descended into.
fn flatten(record: &dyn Record, block: &str) -> Map {
    let mut entries = Map::new();
    for field in record.fields() {
        let FieldValue::Scalar(scalar) = field.value else {
            tracing::warn!(block, field = field.name, "skipping nested block");
            continue;
        };
        let Some(key) = field.tags.key else {
            tracing::warn!(block, field = field.name, "skipping scalar without a key");
            continue;
        };
        match scalar.get_as_dynamic() {
            Ok(Some(value)) => {
                entries.insert(key.to_owned(), value);
            }
            Ok(None) => tracing::debug!(block, key, "omitting absent scalar"),
            Err(err) => tracing::warn!(
                block,
                key,
                type_name = field.type_name,
                error = %err,
                "skipping unsupported scalar"
            ),
        }
    }
    entries
}
