//! Error types produced by the marshaller.

mod types;

pub use types::{MarshalError, OptionsError};
