//! Field descriptors: one struct field together with its declared tags.
//!
//! [`Record`] is the visitor interface `#[derive(Record)]` implements. It
//! exposes each tagged field twice: read-only for extraction through
//! [`Record::fields`], and writable for ingestion through
//! [`Record::fields_mut`].

use crate::coerce::Scalar;
use crate::error::MarshalError;
use crate::value::Map;

/// How a list block's order is carried across the external representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListOrder {
    /// Elements keep the order in which they are stored or supplied.
    #[default]
    Storage,
    /// Each element carries an explicit integer weight.
    Weighted,
}

/// Tags declared on a field with `#[record(...)]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldTags {
    /// External key of a scalar field inside a nested record.
    pub key: Option<&'static str>,
    /// Group the block belongs to.
    pub group: Option<&'static str>,
    /// Key of the block inside its group.
    pub block: Option<&'static str>,
    /// Ordering modifier for list blocks.
    pub order: ListOrder,
}

impl FieldTags {
    /// Tags for a scalar field serialised under `key`.
    #[must_use]
    pub const fn scalar(key: &'static str) -> Self {
        Self {
            key: Some(key),
            group: None,
            block: None,
            order: ListOrder::Storage,
        }
    }

    /// Tags for a record or list block placed at `group.block`.
    #[must_use]
    pub const fn block(group: &'static str, block: &'static str) -> Self {
        Self {
            key: None,
            group: Some(group),
            block: Some(block),
            order: ListOrder::Storage,
        }
    }

    /// Marks a list block as weighted.
    #[must_use]
    pub const fn weighted(self) -> Self {
        Self {
            order: ListOrder::Weighted,
            ..self
        }
    }

    /// Returns `true` when the list order is carried by weights.
    #[must_use]
    pub const fn is_weighted(&self) -> bool {
        matches!(self.order, ListOrder::Weighted)
    }

    /// Resolves the `(group, block)` pair of a block field.
    ///
    /// Returns `Ok(None)` for fields without either tag.
    ///
    /// # Errors
    ///
    /// Returns [`MarshalError::MissingGroupOrBlock`] when only one of the two
    /// tags is present.
    pub fn placement(
        &self,
        field: &str,
    ) -> Result<Option<(&'static str, &'static str)>, MarshalError> {
        match (self.group, self.block) {
            (None, None) => Ok(None),
            (Some(group), Some(block)) => Ok(Some((group, block))),
            (group, block) => Err(MarshalError::MissingGroupOrBlock {
                field: field.to_owned(),
                group: group.map(str::to_owned),
                block: block.map(str::to_owned),
            }),
        }
    }
}

/// Read-only view of a field's value.
pub enum FieldValue<'a> {
    /// A scalar field.
    Scalar(&'a dyn Scalar),
    /// An optional nested record.
    Record(Option<&'a dyn Record>),
    /// An ordered list of nested records.
    List(Vec<&'a dyn Record>),
}

impl<'a> FieldValue<'a> {
    /// View over an optional nested record.
    #[must_use]
    pub fn record<T: Record>(value: Option<&'a T>) -> Self {
        Self::Record(value.map(|record| record as &dyn Record))
    }

    /// View over a list of nested records.
    #[must_use]
    pub fn list<T: Record>(items: &'a [T]) -> Self {
        Self::List(items.iter().map(|item| item as &dyn Record).collect())
    }
}

/// One field of a record: name, declared type, tags and value.
pub struct FieldDescriptor<'a> {
    /// Rust field name.
    pub name: &'static str,
    /// Declared Rust type, as reported by `core::any::type_name`.
    pub type_name: &'static str,
    /// Tags declared on the field.
    pub tags: FieldTags,
    /// Borrowed field value.
    pub value: FieldValue<'a>,
}

impl FieldDescriptor<'_> {
    /// Returns `true` when the field should appear in extracted output.
    ///
    /// Records are present when allocated, lists when non-empty and scalars
    /// when non-zero (or `Some` for optionals).
    #[must_use]
    pub fn is_present(&self) -> bool {
        match &self.value {
            FieldValue::Scalar(scalar) => scalar.is_present(),
            FieldValue::Record(record) => record.is_some(),
            FieldValue::List(items) => !items.is_empty(),
        }
    }
}

/// Writable view of a field's storage.
pub enum FieldSlot<'a> {
    /// A scalar field.
    Scalar(&'a mut dyn Scalar),
    /// An optional nested record.
    Record(&'a mut dyn RecordSlot),
    /// An ordered list of nested records.
    List(&'a mut dyn ListSlot),
}

/// Mutable counterpart of [`FieldDescriptor`].
pub struct FieldMut<'a> {
    /// Rust field name.
    pub name: &'static str,
    /// Declared Rust type, as reported by `core::any::type_name`.
    pub type_name: &'static str,
    /// Tags declared on the field.
    pub tags: FieldTags,
    /// Borrowed field storage.
    pub slot: FieldSlot<'a>,
}

/// Callback populating one freshly allocated record from its external map.
pub type Populate<'f> = dyn FnMut(&mut dyn Record, &Map) -> Result<(), MarshalError> + 'f;

/// Storage for an optional nested record.
pub trait RecordSlot {
    /// Allocates a fresh record, hands it to `populate` and stores it only if
    /// population succeeds.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `populate`; the slot is left
    /// untouched in that case.
    fn replace_with(&mut self, entries: &Map, populate: &mut Populate<'_>)
    -> Result<(), MarshalError>;
}

impl<T> RecordSlot for Option<T>
where
    T: Record + Default,
{
    fn replace_with(
        &mut self,
        entries: &Map,
        populate: &mut Populate<'_>,
    ) -> Result<(), MarshalError> {
        let mut record = T::default();
        populate(&mut record, entries)?;
        *self = Some(record);
        Ok(())
    }
}

/// Storage for a list of nested records.
pub trait ListSlot {
    /// Allocates one record per entry, in the given order, and replaces the
    /// list only if every element populates successfully.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by `populate`; the list is left
    /// untouched in that case.
    fn replace_with(
        &mut self,
        elements: &[&Map],
        populate: &mut Populate<'_>,
    ) -> Result<(), MarshalError>;
}

impl<T> ListSlot for Vec<T>
where
    T: Record + Default,
{
    fn replace_with(
        &mut self,
        elements: &[&Map],
        populate: &mut Populate<'_>,
    ) -> Result<(), MarshalError> {
        let mut items = Vec::with_capacity(elements.len());
        for entries in elements {
            let mut item = T::default();
            populate(&mut item, entries)?;
            items.push(item);
        }
        *self = items;
        Ok(())
    }
}

/// A record the marshaller can walk.
///
/// Normally implemented with `#[derive(Record)]`, which lists every field
/// carrying a `#[record(...)]` attribute in declaration order.
pub trait Record {
    /// Read-only descriptors for every tagged field.
    fn fields(&self) -> Vec<FieldDescriptor<'_>>;

    /// Writable descriptors for every tagged field, in the same order as
    /// [`Record::fields`].
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;
}

/// Returns `true` when a scalar field of `record` is tagged with `key`.
pub(crate) fn declares_key(record: &dyn Record, key: &str) -> bool {
    record
        .fields()
        .iter()
        .any(|field| field.tags.key == Some(key))
}

#[cfg(test)]
mod tests {
    //! Unit tests for tag resolution and presence rules.

    use super::*;
    use rstest::rstest;

    #[derive(Default)]
    struct Flag {
        enabled: bool,
    }

    impl Record for Flag {
        fn fields(&self) -> Vec<FieldDescriptor<'_>> {
            vec![FieldDescriptor {
                name: "enabled",
                type_name: "bool",
                tags: FieldTags::scalar("enabled"),
                value: FieldValue::Scalar(&self.enabled),
            }]
        }

        fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
            vec![FieldMut {
                name: "enabled",
                type_name: "bool",
                tags: FieldTags::scalar("enabled"),
                slot: FieldSlot::Scalar(&mut self.enabled),
            }]
        }
    }

    #[rstest]
    #[case::scalar(FieldTags::scalar("level"), Ok(None))]
    #[case::block(FieldTags::block("delivery", "compression"), Ok(Some(("delivery", "compression"))))]
    #[case::group_only(
        FieldTags { group: Some("delivery"), ..FieldTags::default() },
        Err(MarshalError::MissingGroupOrBlock {
            field: "compression".into(),
            group: Some("delivery".into()),
            block: None,
        }),
    )]
    #[case::block_only(
        FieldTags { block: Some("compression"), ..FieldTags::default() },
        Err(MarshalError::MissingGroupOrBlock {
            field: "compression".into(),
            group: None,
            block: Some("compression".into()),
        }),
    )]
    fn resolves_placement(
        #[case] tags: FieldTags,
        #[case] expected: Result<Option<(&'static str, &'static str)>, MarshalError>,
    ) {
        assert_eq!(tags.placement("compression"), expected);
    }

    #[rstest]
    fn weighted_keeps_placement() {
        let tags = FieldTags::block("delivery", "static_header").weighted();
        assert!(tags.is_weighted());
        assert_eq!(tags.block, Some("static_header"));
    }

    #[rstest]
    fn absent_records_and_empty_lists_are_not_present() {
        let none: Option<Flag> = None;
        let empty: Vec<Flag> = Vec::new();
        let some = Some(Flag::default());
        let describe = |value| FieldDescriptor {
            name: "f",
            type_name: "t",
            tags: FieldTags::block("g", "b"),
            value,
        };
        assert!(!describe(FieldValue::record(none.as_ref())).is_present());
        assert!(!describe(FieldValue::list(&empty)).is_present());
        assert!(describe(FieldValue::record(some.as_ref())).is_present());
    }

    #[rstest]
    fn list_slot_is_untouched_when_population_fails() {
        let mut items = vec![Flag { enabled: true }];
        let first = Map::new();
        let second = Map::new();
        let mut calls = 0;
        let outcome = items.replace_with(&[&first, &second], &mut |_, _| {
            calls += 1;
            if calls == 2 {
                return Err(MarshalError::MissingWeight {
                    block: "b".into(),
                    index: 1,
                });
            }
            Ok(())
        });
        assert!(outcome.is_err());
        assert_eq!(items.len(), 1, "list must keep its previous contents");
        assert!(items.first().is_some_and(|flag| flag.enabled));
    }
}
