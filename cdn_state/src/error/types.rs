//! Primary error enums for extraction, ingestion and option loading.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::coerce::{CoerceError, ScalarKind};

/// Errors raised while ingesting an external map or checking a record's tags.
///
/// Extraction never fails; it skips and logs instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MarshalError {
    /// A tagged field's type is neither a supported scalar nor a block.
    #[error("field '{field}' has unsupported kind '{kind}'")]
    UnsupportedKind {
        /// Path of the offending field.
        field: String,
        /// Kind of the destination.
        kind: ScalarKind,
    },

    /// The external value's type does not match the destination.
    #[error("field '{field}' expected {expected} but found {found}")]
    TypeMismatch {
        /// Path of the offending field.
        field: String,
        /// Shape the destination requires.
        expected: &'static str,
        /// Shape found in the external map.
        found: &'static str,
    },

    /// An integer does not fit the destination width.
    #[error("field '{field}': integer {value} does not fit in {target}")]
    Overflow {
        /// Path of the offending field.
        field: String,
        /// Integer received from the state store.
        value: i64,
        /// Rust type of the destination field.
        target: &'static str,
    },

    /// Two elements of a weighted list share a weight.
    #[error("block '{block}' has more than one element with weight {weight}")]
    DuplicateWeight {
        /// Block holding the weighted list.
        block: String,
        /// Weight claimed twice.
        weight: i64,
    },

    /// A weight falls outside `0..len`.
    #[error("block '{block}' has weight {weight} outside 0..{len}")]
    WeightOutOfRange {
        /// Block holding the weighted list.
        block: String,
        /// Offending weight.
        weight: i64,
        /// Number of elements supplied.
        len: usize,
    },

    /// An element of a weighted list carries no weight.
    #[error("block '{block}' element {index} has no weight")]
    MissingWeight {
        /// Block holding the weighted list.
        block: String,
        /// Position of the element in the supplied sequence.
        index: usize,
    },

    /// A field carries a group tag without a block tag, or the reverse.
    #[error(
        "field '{field}' must carry both group and block tags (group: {group:?}, block: {block:?})"
    )]
    MissingGroupOrBlock {
        /// Name of the offending field.
        field: String,
        /// Group tag, if any.
        group: Option<String>,
        /// Block tag, if any.
        block: Option<String>,
    },

    /// Two fields map to the same group and block.
    #[error("block '{group}.{block}' is declared by more than one field")]
    DuplicateBlock {
        /// Shared group tag.
        group: String,
        /// Shared block tag.
        block: String,
    },

    /// A record map holds a key no field is tagged with.
    #[error("field '{field}' has no member tagged '{key}'")]
    UnknownKey {
        /// Path of the record being populated.
        field: String,
        /// Key found in the external map.
        key: String,
    },

    /// An element of a weighted list tags a scalar with the weight key.
    #[error("field '{field}' tags a scalar with the reserved weight key '{key}'")]
    ReservedKey {
        /// Path of the weighted list or element.
        field: String,
        /// The weight key.
        key: String,
    },

    /// A block value or list element is not a record.
    #[error("field '{field}' expected a record but found {found}")]
    NotARecord {
        /// Path of the offending block or element.
        field: String,
        /// Shape found in the external map.
        found: &'static str,
    },
}

impl MarshalError {
    /// Attaches a field path to a scalar coercion failure.
    pub(crate) fn coerce(field: String, source: CoerceError) -> Self {
        match source {
            CoerceError::UnsupportedKind { kind } => Self::UnsupportedKind { field, kind },
            CoerceError::TypeMismatch { expected, found } => Self::TypeMismatch {
                field,
                expected: expected.as_str(),
                found,
            },
            CoerceError::Overflow { value, target } => Self::Overflow {
                field,
                value,
                target,
            },
        }
    }
}

/// Errors raised while loading [`crate::MarshalOptions`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionsError {
    /// The layered providers could not be extracted into options.
    #[error("failed to load marshaller options: {0}")]
    Load(#[from] Box<FigmentError>),
}

impl From<FigmentError> for OptionsError {
    fn from(source: FigmentError) -> Self {
        Self::Load(Box::new(source))
    }
}
