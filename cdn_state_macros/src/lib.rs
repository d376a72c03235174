//! Procedural macros for `cdn_state`.
//!
//! `#[derive(Record)]` turns `#[record(...)]` field attributes into a
//! `cdn_state::Record` implementation. Tag pairing is checked while the macro
//! expands, so a block field missing its group (or the reverse) fails to
//! compile instead of failing at run time.
//!
//! Recognised field attributes:
//!
//! - `key = "..."`: external key of a scalar field inside a nested record.
//! - `group = "..."` and `block = "..."`: placement of an `Option<T>` or
//!   `Vec<T>` block in the grouped map. Both are required together.
//! - `weighted`: on a `Vec<T>` block, carry element order through a weight.
//!
//! The struct attribute `#[record(crate = "path")]` changes the path used to
//! reach the runtime crate in generated code.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derives `cdn_state::Record` for a struct with named fields.
///
/// Fields without a `#[record(...)]` attribute are not visible to the
/// marshaller.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
