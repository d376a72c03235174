//! Expansion pipeline for `#[derive(Record)]`: parse and validate the input,
//! then emit the trait implementation.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Expands the derive input into a `Record` implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = parse::parse_input(input)?;
    let krate = crate_path::resolve(record.attrs.crate_path.as_ref());
    Ok(generate::record_impl(&record, &krate))
}
