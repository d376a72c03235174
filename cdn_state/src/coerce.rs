//! Primitive coercion between typed scalar fields and external values.
//!
//! Only integer, string and boolean destinations are supported. Float
//! destinations implement [`Scalar`] so they can be tagged, but every
//! coercion into or out of them fails with [`CoerceError::UnsupportedKind`].

use std::fmt;
use std::num::FpCategory;

use thiserror::Error;

use crate::value::Value;

/// Kind of a scalar destination field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Any integer width.
    Int,
    /// Owned string.
    Str,
    /// Boolean flag.
    Bool,
    /// Floating point; recognised but not coercible.
    Float,
}

impl ScalarKind {
    /// Name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Str => "string",
            Self::Bool => "bool",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure converting a single scalar. Carries no field context; the
/// ingestor attaches the field path when converting into
/// [`crate::MarshalError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    /// The destination kind cannot be coerced.
    #[error("unsupported destination kind '{kind}'")]
    UnsupportedKind {
        /// Kind of the destination field.
        kind: ScalarKind,
    },

    /// The external value does not match the destination kind.
    #[error("expected {expected} but found {found}")]
    TypeMismatch {
        /// Kind of the destination field.
        expected: ScalarKind,
        /// Kind of the external value.
        found: &'static str,
    },

    /// The integer does not fit the destination width.
    #[error("integer {value} does not fit in {target}")]
    Overflow {
        /// Integer received from the state store.
        value: i64,
        /// Rust type of the destination field.
        target: &'static str,
    },
}

/// A scalar field that can be read into and written from a [`Value`].
///
/// Implemented for `i64`, `i32`, `u32`, `u16`, `u8`, `String`, `bool`,
/// `Option` of those, and (always failing) `f64`/`f32`.
pub trait Scalar {
    /// Kind of this destination.
    fn kind(&self) -> ScalarKind;

    /// Returns `true` when the field holds a non-zero value, or `Some` for an
    /// optional field.
    fn is_present(&self) -> bool;

    /// Overwrites the field from an external value.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::TypeMismatch`] when `value` has the wrong kind,
    /// [`CoerceError::Overflow`] when an integer does not fit, and
    /// [`CoerceError::UnsupportedKind`] for float destinations.
    fn set_from_dynamic(&mut self, value: &Value) -> Result<(), CoerceError>;

    /// Reads the field as an external value, dereferencing one level of
    /// `Option`. Returns `Ok(None)` for an absent optional.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError::UnsupportedKind`] for float fields.
    fn get_as_dynamic(&self) -> Result<Option<Value>, CoerceError>;
}

macro_rules! impl_int_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Int
            }

            fn is_present(&self) -> bool {
                *self != 0
            }

            fn set_from_dynamic(&mut self, value: &Value) -> Result<(), CoerceError> {
                let Value::Int(raw) = value else {
                    return Err(CoerceError::TypeMismatch {
                        expected: ScalarKind::Int,
                        found: value.kind_name(),
                    });
                };
                *self = <$ty>::try_from(*raw).map_err(|_| CoerceError::Overflow {
                    value: *raw,
                    target: stringify!($ty),
                })?;
                Ok(())
            }

            fn get_as_dynamic(&self) -> Result<Option<Value>, CoerceError> {
                Ok(Some(Value::Int(i64::from(*self))))
            }
        }
    )*};
}

impl_int_scalar!(i64, i32, u32, u16, u8);

impl Scalar for String {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Str
    }

    fn is_present(&self) -> bool {
        !self.is_empty()
    }

    fn set_from_dynamic(&mut self, value: &Value) -> Result<(), CoerceError> {
        let Value::Str(text) = value else {
            return Err(CoerceError::TypeMismatch {
                expected: ScalarKind::Str,
                found: value.kind_name(),
            });
        };
        self.clone_from(text);
        Ok(())
    }

    fn get_as_dynamic(&self) -> Result<Option<Value>, CoerceError> {
        Ok(Some(Value::Str(self.clone())))
    }
}

impl Scalar for bool {
    fn kind(&self) -> ScalarKind {
        ScalarKind::Bool
    }

    fn is_present(&self) -> bool {
        *self
    }

    fn set_from_dynamic(&mut self, value: &Value) -> Result<(), CoerceError> {
        let Value::Bool(flag) = value else {
            return Err(CoerceError::TypeMismatch {
                expected: ScalarKind::Bool,
                found: value.kind_name(),
            });
        };
        *self = *flag;
        Ok(())
    }

    fn get_as_dynamic(&self) -> Result<Option<Value>, CoerceError> {
        Ok(Some(Value::Bool(*self)))
    }
}

macro_rules! impl_float_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl Scalar for $ty {
            fn kind(&self) -> ScalarKind {
                ScalarKind::Float
            }

            fn is_present(&self) -> bool {
                self.classify() != FpCategory::Zero
            }

            fn set_from_dynamic(&mut self, _value: &Value) -> Result<(), CoerceError> {
                Err(CoerceError::UnsupportedKind {
                    kind: ScalarKind::Float,
                })
            }

            fn get_as_dynamic(&self) -> Result<Option<Value>, CoerceError> {
                Err(CoerceError::UnsupportedKind {
                    kind: ScalarKind::Float,
                })
            }
        }
    )*};
}

impl_float_scalar!(f64, f32);

impl<T> Scalar for Option<T>
where
    T: Scalar + Default,
{
    fn kind(&self) -> ScalarKind {
        self.as_ref()
            .map_or_else(|| T::default().kind(), Scalar::kind)
    }

    fn is_present(&self) -> bool {
        self.is_some()
    }

    fn set_from_dynamic(&mut self, value: &Value) -> Result<(), CoerceError> {
        let mut inner = T::default();
        inner.set_from_dynamic(value)?;
        *self = Some(inner);
        Ok(())
    }

    fn get_as_dynamic(&self) -> Result<Option<Value>, CoerceError> {
        self.as_ref().map_or(Ok(None), Scalar::get_as_dynamic)
    }
}
