//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses the literal after `key =` using `extractor`, reporting the expected
/// literal kind when the extractor rejects it.
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be a {expected}")))
}

/// Parses a non-empty string literal from an attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    let value = parse_lit(meta, key, "string", |lit| match lit {
        Lit::Str(text) => Some(text),
        _ => None,
    })?;
    if value.value().is_empty() {
        return Err(syn::Error::new(value.span(), format!("{key} must not be empty")));
    }
    Ok(value)
}
