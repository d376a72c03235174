//! Tests for `#[record(...)]` parsing and validation.

use super::type_utils::{option_inner, vec_inner};
use super::{FieldKind, Tags, parse_input};
use anyhow::{Result, anyhow, ensure};
use quote::{ToTokens, quote};
use rstest::rstest;
use syn::{DeriveInput, Type, parse_quote};

#[rstest]
fn parses_scalars_records_and_lists() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[record(crate = "crate")]
        struct Demo {
            #[record(key = "level")]
            level: i64,
            #[record(group = "delivery", block = "compression")]
            compression: Option<Compression>,
            #[record(group = "delivery", block = "static_header", weighted)]
            static_header: Vec<StaticHeader>,
            untagged: u8,
        }
    };
    let record = parse_input(&input).map_err(|err| anyhow!(err))?;
    ensure!(record.ident == "Demo", "unexpected ident {}", record.ident);
    ensure!(record.attrs.crate_path.is_some(), "crate path not parsed");
    let kinds: Vec<FieldKind> = record.fields.iter().map(|field| field.kind).collect();
    ensure!(
        kinds == [FieldKind::Scalar, FieldKind::Record, FieldKind::List],
        "unexpected kinds {kinds:?}"
    );
    let last = record
        .fields
        .last()
        .ok_or_else(|| anyhow!("missing list field"))?;
    ensure!(
        last.tags
            == Tags::Block {
                group: "delivery".into(),
                block: "static_header".into(),
                weighted: true,
            },
        "unexpected tags {:?}",
        last.tags
    );
    Ok(())
}

#[rstest]
#[case::group_without_block(
    quote! { #[record(group = "delivery")] compression: Option<Compression> },
    "`group` requires a `block` tag",
)]
#[case::block_without_group(
    quote! { #[record(block = "compression")] compression: Option<Compression> },
    "`block` requires a `group` tag",
)]
#[case::key_with_block(
    quote! { #[record(key = "x", group = "g", block = "b")] x: Option<X> },
    "`key` cannot be combined with `group` or `block`",
)]
#[case::weighted_record(
    quote! { #[record(group = "g", block = "b", weighted)] x: Option<X> },
    "`weighted` requires a `Vec<T>` field",
)]
#[case::weighted_alone(
    quote! { #[record(weighted)] x: Vec<X> },
    "`weighted` requires `group` and `block` tags",
)]
#[case::weighted_scalar(
    quote! { #[record(key = "x", weighted)] x: i64 },
    "`weighted` only applies to list blocks",
)]
#[case::plain_block(
    quote! { #[record(group = "g", block = "b")] x: X },
    "block fields must be `Option<T>` or `Vec<T>`",
)]
#[case::keyed_list(
    quote! { #[record(key = "x")] x: Vec<X> },
    "list fields are blocks; tag them with `group` and `block`",
)]
#[case::unknown(
    quote! { #[record(rename = "x")] x: i64 },
    "unknown record attribute `rename`",
)]
#[case::empty_key(
    quote! { #[record(key = "")] x: i64 },
    "key must not be empty",
)]
#[case::repeated_key(
    quote! { #[record(key = "a", key = "b")] x: i64 },
    "duplicate `key` attribute",
)]
fn rejects_invalid_tags(
    #[case] field: proc_macro2::TokenStream,
    #[case] message: &str,
) -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo { #field }
    };
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected `{message}` to be reported"));
    };
    let rendered = err.to_string();
    ensure!(rendered.contains(message), "unexpected error: {rendered}");
    Ok(())
}

#[rstest]
fn rejects_duplicate_blocks() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[record(group = "origin", block = "origin_pull_host")]
            first: Option<Host>,
            #[record(group = "origin", block = "origin_pull_host")]
            second: Option<Host>,
        }
    };
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("duplicate block accepted"));
    };
    ensure!(
        err.to_string().contains("origin.origin_pull_host"),
        "unexpected error: {err}"
    );
    Ok(())
}

#[rstest]
#[case::tuple(parse_quote! { struct Demo(#[record(key = "x")] i64); })]
#[case::enumeration(parse_quote! { enum Demo { A } })]
fn rejects_non_struct_inputs(#[case] input: DeriveInput) {
    assert!(parse_input(&input).is_err());
}

#[rstest]
#[case::option(parse_quote!(Option<u32>), Some("u32"), None)]
#[case::qualified_option(parse_quote!(std::option::Option<u32>), Some("u32"), None)]
#[case::vec(parse_quote!(Vec<Header>), None, Some("Header"))]
#[case::qualified_vec(parse_quote!(alloc::vec::Vec<Header>), None, Some("Header"))]
#[case::plain(parse_quote!(u32), None, None)]
fn recognises_wrappers(
    #[case] ty: Type,
    #[case] option: Option<&str>,
    #[case] list: Option<&str>,
) {
    let render = |inner: &Type| inner.to_token_stream().to_string();
    assert_eq!(option_inner(&ty).map(render).as_deref(), option);
    assert_eq!(vec_inner(&ty).map(render).as_deref(), list);
}
