//! Derive macros for asset-profile.
//!
//! This crate provides `#[derive(Resolvable)]`, which names a type so a
//! resolution context can hand it out for a document tag.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! asset-profile = { version = "0.1", features = ["derive"] }
//! ```
//!
//! ## Examples
//!
//! ```rust,ignore
//! use asset_profile::{PluginRegistry, Resolvable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Resolvable)]
//! #[resolvable(name = "acme.RackProfile")]
//! struct RackProfile {
//!     label: String,
//!     rack_units: u32,
//! }
//!
//! let plugins = PluginRegistry::new();
//! plugins.register::<RackProfile>().unwrap();
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Error, ExprPath, LitStr, Result, parse_macro_input};

/// Derive macro for implementing the `Resolvable` trait.
///
/// ## Attributes
///
/// - `#[resolvable(name = "...")]` - Required. The namespaced name documents
///   tag this type with, such as `acme.RackProfile`.
/// - `#[resolvable(home = "path::to::fn")]` - Optional. A function returning
///   the `ResolutionContext` the type is registered in.
///
/// ## Example
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize, Resolvable)]
/// #[resolvable(name = "acme.RackProfile", home = "crate::acme_context")]
/// struct RackProfile {
///     label: String,
/// }
/// ```
#[proc_macro_derive(Resolvable, attributes(resolvable))]
pub fn derive_resolvable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_resolvable_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ResolvableAttrs {
    name: Option<LitStr>,
    home: Option<ExprPath>,
}

fn derive_resolvable_impl(input: DeriveInput) -> Result<TokenStream2> {
    if let Data::Union(_) = input.data {
        return Err(Error::new(proc_macro2::Span::call_site(), "unions are not supported"));
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let attrs = parse_attrs(&input)?;

    let Some(lit) = attrs.name else {
        return Err(Error::new_spanned(
            ident,
            format!("missing `#[resolvable(name = \"vendor.{}\")]`", ident),
        ));
    };
    check_type_name(&lit)?;
    let type_name = lit.value();

    let home = attrs.home.map(|path| {
        quote! {
            fn home_context() -> ::core::option::Option<::asset_profile::resolve::ResolutionContext> {
                ::core::option::Option::Some(#path())
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::asset_profile::resolve::Resolvable for #ident #ty_generics #where_clause {
            fn type_name() -> &'static str {
                #type_name
            }

            #home
        }
    })
}

/// Parse `name = "..."` and `home = "..."` from `#[resolvable(...)]`.
fn parse_attrs(input: &DeriveInput) -> Result<ResolvableAttrs> {
    let mut attrs = ResolvableAttrs::default();
    for attr in &input.attrs {
        if !attr.path().is_ident("resolvable") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                attrs.name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("home") {
                let lit: LitStr = meta.value()?.parse()?;
                attrs.home = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name` or `home`"))
            }
        })?;
    }
    Ok(attrs)
}

/// Rejects names a registry would refuse at runtime.
fn check_type_name(lit: &LitStr) -> Result<()> {
    let name = lit.value();
    if name.is_empty() {
        return Err(Error::new_spanned(lit, "type name cannot be empty"));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '!') {
        return Err(Error::new_spanned(lit, "type name cannot contain whitespace or `!`"));
    }
    if !name.contains('.') || name.starts_with('.') || name.ends_with('.') {
        return Err(Error::new_spanned(lit, "type name must be namespaced, as in `vendor.Type`"));
    }
    Ok(())
}
