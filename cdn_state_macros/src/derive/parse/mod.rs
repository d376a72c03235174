//! Parsing and validation of `#[record(...)]` attributes.
//!
//! Every tag combination the marshaller cannot honour is rejected here, so
//! generated code only ever describes well-formed fields.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr, Type};

mod input;
mod literals;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{RecordInput, parse_input};
use literals::lit_str;
use type_utils::{option_inner, vec_inner};

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the runtime crate path in generated code.
    pub crate_path: Option<syn::Path>,
}

/// Raw field-level attributes, before validation.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub key: Option<LitStr>,
    pub group: Option<LitStr>,
    pub block: Option<LitStr>,
    pub weighted: Option<Span>,
}

impl FieldAttrs {
    const fn is_empty(&self) -> bool {
        self.key.is_none() && self.group.is_none() && self.block.is_none() && self.weighted.is_none()
    }
}

/// Storage shape of a tagged field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    /// A scalar coerced through `cdn_state::Scalar`.
    Scalar,
    /// An `Option<T>` nested record.
    Record,
    /// A `Vec<T>` list of nested records.
    List,
}

/// Validated tags of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Tags {
    /// `key = "..."` on a scalar.
    Scalar { key: String },
    /// `group` and `block` on a record or list.
    Block {
        group: String,
        block: String,
        weighted: bool,
    },
}

/// A field that carries `#[record(...)]` and passed validation.
#[derive(Clone)]
pub(crate) struct TaggedField {
    pub ident: syn::Ident,
    pub ty: Type,
    pub kind: FieldKind,
    pub tags: Tags,
}

/// Iterate all `#[record(...)]` attributes once and apply a callback.
fn parse_record<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn unknown(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map_or_else(|| "path".to_owned(), ToString::to_string);
    meta.error(format!("unknown record attribute `{name}`; expected {expected}"))
}

fn assign_str(target: &mut Option<LitStr>, meta: &ParseNestedMeta, key: &str) -> syn::Result<()> {
    if target.is_some() {
        return Err(meta.error(format!("duplicate `{key}` attribute")));
    }
    *target = Some(lit_str(meta, key)?);
    Ok(())
}

/// Extracts `#[record(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; anything else is an error.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_record(attrs, |meta| {
        if !meta.path.is_ident("crate") {
            return Err(unknown(meta, "`crate`"));
        }
        let text = lit_str(meta, "crate")?;
        let path: syn::Path =
            syn::parse_str(&text.value()).map_err(|e| syn::Error::new(text.span(), e))?;
        out.crate_path = Some(path);
        Ok(())
    })?;
    Ok(out)
}

/// Parses field-level `#[record(...)]` attributes without validating how
/// they combine.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_record(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("key") => assign_str(&mut out.key, meta, "key"),
            Some("group") => assign_str(&mut out.group, meta, "group"),
            Some("block") => assign_str(&mut out.block, meta, "block"),
            Some("weighted") => {
                out.weighted = Some(meta.path.span());
                Ok(())
            }
            _ => Err(unknown(meta, "`key`, `group`, `block` or `weighted`")),
        }
    })?;
    Ok(out)
}

/// Checks how the tags on `field` combine with each other and with its type.
///
/// Returns `Ok(None)` for fields without any `#[record(...)]` tag.
pub(crate) fn validate_field(
    field: &syn::Field,
    attrs: FieldAttrs,
) -> syn::Result<Option<TaggedField>> {
    if attrs.is_empty() {
        return Ok(None);
    }
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "Record requires named fields"));
    };
    let ty = field.ty.clone();
    let FieldAttrs {
        key: key_tag,
        group: group_tag,
        block: block_tag,
        weighted,
    } = attrs;

    if let Some(key) = key_tag {
        if group_tag.is_some() || block_tag.is_some() {
            return Err(syn::Error::new(
                key.span(),
                "`key` cannot be combined with `group` or `block`",
            ));
        }
        if let Some(span) = weighted {
            return Err(syn::Error::new(span, "`weighted` only applies to list blocks"));
        }
        if vec_inner(&ty).is_some() {
            return Err(syn::Error::new_spanned(
                &ty,
                "list fields are blocks; tag them with `group` and `block`",
            ));
        }
        return Ok(Some(TaggedField {
            ident,
            ty,
            kind: FieldKind::Scalar,
            tags: Tags::Scalar { key: key.value() },
        }));
    }

    let (group, block) = match (group_tag, block_tag) {
        (Some(group_lit), Some(block_lit)) => (group_lit.value(), block_lit.value()),
        (Some(group_lit), None) => {
            return Err(syn::Error::new(
                group_lit.span(),
                "`group` requires a `block` tag",
            ));
        }
        (None, Some(block_lit)) => {
            return Err(syn::Error::new(
                block_lit.span(),
                "`block` requires a `group` tag",
            ));
        }
        (None, None) => {
            let span = weighted.unwrap_or_else(|| ident.span());
            return Err(syn::Error::new(
                span,
                "`weighted` requires `group` and `block` tags",
            ));
        }
    };

    let kind = if option_inner(&ty).is_some() {
        FieldKind::Record
    } else if vec_inner(&ty).is_some() {
        FieldKind::List
    } else {
        return Err(syn::Error::new_spanned(
            &ty,
            "block fields must be `Option<T>` or `Vec<T>`",
        ));
    };
    if let Some(span) = weighted
        && kind != FieldKind::List
    {
        return Err(syn::Error::new(span, "`weighted` requires a `Vec<T>` field"));
    }

    Ok(Some(TaggedField {
        ident,
        ty,
        kind,
        tags: Tags::Block {
            group,
            block,
            weighted: weighted.is_some(),
        },
    }))
}
