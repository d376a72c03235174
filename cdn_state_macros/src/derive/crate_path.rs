//! Crate path resolution for dependency aliasing.
//!
//! Converts the optional `#[record(crate = "...")]` attribute value into the
//! tokens generated code uses to reach the runtime crate.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the runtime crate path, defaulting to `cdn_state`.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { cdn_state }, |path| quote! { #path })
}
