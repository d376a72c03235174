//! Token generation for the `Record` implementation.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldKind, RecordInput, Tags, TaggedField};

/// Builds the `FieldTags` constructor for one field.
fn tags_tokens(tags: &Tags, krate: &TokenStream) -> TokenStream {
    match tags {
        Tags::Scalar { key } => quote! { #krate::FieldTags::scalar(#key) },
        Tags::Block {
            group,
            block,
            weighted: false,
        } => quote! { #krate::FieldTags::block(#group, #block) },
        Tags::Block {
            group,
            block,
            weighted: true,
        } => quote! { #krate::FieldTags::block(#group, #block).weighted() },
    }
}

fn descriptor_tokens(field: &TaggedField, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let name = ident.to_string();
    let ty = &field.ty;
    let tags = tags_tokens(&field.tags, krate);
    let value = match field.kind {
        FieldKind::Scalar => quote! { #krate::FieldValue::Scalar(&self.#ident) },
        FieldKind::Record => quote! { #krate::FieldValue::record(self.#ident.as_ref()) },
        FieldKind::List => quote! { #krate::FieldValue::list(self.#ident.as_slice()) },
    };
    quote! {
        #krate::FieldDescriptor {
            name: #name,
            type_name: ::core::any::type_name::<#ty>(),
            tags: #tags,
            value: #value,
        }
    }
}

fn slot_tokens(field: &TaggedField, krate: &TokenStream) -> TokenStream {
    let ident = &field.ident;
    let name = ident.to_string();
    let ty = &field.ty;
    let tags = tags_tokens(&field.tags, krate);
    let slot = match field.kind {
        FieldKind::Scalar => quote! { #krate::FieldSlot::Scalar(&mut self.#ident) },
        FieldKind::Record => quote! { #krate::FieldSlot::Record(&mut self.#ident) },
        FieldKind::List => quote! { #krate::FieldSlot::List(&mut self.#ident) },
    };
    quote! {
        #krate::FieldMut {
            name: #name,
            type_name: ::core::any::type_name::<#ty>(),
            tags: #tags,
            slot: #slot,
        }
    }
}

/// Emits `impl Record for <struct>`.
///
/// The impl carries only the struct's own generic bounds; a type parameter
/// used as a block must already be bounded by `Record + Default`.
pub(crate) fn record_impl(record: &RecordInput, krate: &TokenStream) -> TokenStream {
    let ident = &record.ident;
    let (impl_generics, ty_generics, where_clause) = record.generics.split_for_impl();
    let descriptors = record
        .fields
        .iter()
        .map(|field| descriptor_tokens(field, krate));
    let slots = record.fields.iter().map(|field| slot_tokens(field, krate));
    quote! {
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn fields(&self) -> ::std::vec::Vec<#krate::FieldDescriptor<'_>> {
                ::std::vec![#(#descriptors),*]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<#krate::FieldMut<'_>> {
                ::std::vec![#(#slots),*]
            }
        }
    }
}
