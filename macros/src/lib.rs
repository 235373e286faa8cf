//! Derive macros for clientdesk
//!
//! This crate provides procedural macros to reduce boilerplate when building
//! reducer-driven features.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums
//!
//! # Example
//!
//! ```ignore
//! use clientdesk_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum ClientAction {
//!     AddClient { name: String },
//!
//!     #[cascade]
//!     DeleteClient(String),
//! }
//!
//! // Generated methods:
//! assert_eq!(ClientAction::AddClient { name: "Acme".into() }.kind(), "ADD_CLIENT");
//! assert!(ClientAction::DeleteClient("1".into()).is_cascading());
//! assert_eq!(ClientAction::KINDS, &["ADD_CLIENT", "DELETE_CLIENT"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Variant};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `kind()` - Returns the variant's stable tag in `SCREAMING_SNAKE_CASE`
///   (`MarkProjectPaid` becomes `"MARK_PROJECT_PAID"`)
/// - `is_cascading()` - Returns true if the variant removes dependent records
/// - `KINDS` - Every tag, in declaration order
///
/// # Attributes
///
/// - `#[cascade]` - Mark a variant as removing dependent records
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - `#[cascade]` is given arguments
#[proc_macro_derive(Action, attributes(cascade))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    for variant in &data_enum.variants {
        if let Some(attr) = find_attribute(&variant.attrs, "cascade") {
            if attr.meta.require_path_only().is_err() {
                return syn::Error::new_spanned(attr, "#[cascade] takes no arguments")
                    .to_compile_error()
                    .into();
            }
        }
    }

    let tags: Vec<String> = data_enum
        .variants
        .iter()
        .map(|v| screaming_snake(&v.ident.to_string()))
        .collect();

    let kind_arms = data_enum.variants.iter().zip(&tags).map(|(variant, tag)| {
        let pattern = variant_pattern(variant);
        quote! { #pattern => #tag, }
    });

    let cascade_arms = data_enum
        .variants
        .iter()
        .filter(|v| find_attribute(&v.attrs, "cascade").is_some())
        .map(|variant| {
            let pattern = variant_pattern(variant);
            quote! { #pattern => true, }
        });

    let expanded = quote! {
        impl #name {
            /// Every action tag, in declaration order
            pub const KINDS: &'static [&'static str] = &[#(#tags),*];

            /// Returns the stable tag for this action
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    #(#kind_arms)*
                }
            }

            /// Returns true if this action removes dependent records
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_cascading(&self) -> bool {
                match self {
                    #(#cascade_arms)*
                    _ => false,
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Builds a wildcard match pattern for a variant regardless of its field shape
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Returns the first attribute with the given name
fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| attr.path().is_ident(name))
}

/// Converts `CamelCase` into `SCREAMING_SNAKE_CASE`
fn screaming_snake(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.char_indices() {
        if ch.is_uppercase() && i > 0 {
            out.push('_');
        }
        out.extend(ch.to_uppercase());
    }
    out
}
