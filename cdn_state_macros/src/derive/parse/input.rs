//! Input parsing for the `Record` derive macro.
//!
//! Gathers the struct identifier, generics and validated fields in one pass
//! so expansion can fail fast with a span pointing at the offending tag.

use std::collections::BTreeSet;

use syn::{Data, DeriveInput, Fields};

use super::{StructAttrs, Tags, TaggedField, parse_field_attrs, parse_struct_attrs, validate_field};

/// Everything code generation needs from the derive input.
pub(crate) struct RecordInput {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<TaggedField>,
}

/// Parses and validates the user-provided struct.
///
/// Fields without `#[record(...)]` are dropped. Two block fields sharing a
/// `(group, block)` pair are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<RecordInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Record requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut seen = BTreeSet::new();
    let mut fields = Vec::new();
    for field in named {
        let field_attrs = parse_field_attrs(&field.attrs)?;
        let Some(tagged) = validate_field(field, field_attrs)? else {
            continue;
        };
        if let Tags::Block { group, block, .. } = &tagged.tags
            && !seen.insert((group.clone(), block.clone()))
        {
            return Err(syn::Error::new_spanned(
                field,
                format!("block `{group}.{block}` is already declared by another field"),
            ));
        }
        fields.push(tagged);
    }

    Ok(RecordInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields,
    })
}
