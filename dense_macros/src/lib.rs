//! `dense_macros` generates the per-kind fast paths of `dense_core`.
//!
//! The single attribute, `expand_kinds`, rewrites an item once for every
//! element kind listed in the kind table (see `kinds.rs`). Three placeholders
//! are recognised:
//! * `Kind`, a path segment (`Storage::Kind`, `ElementKind::Kind`...),
//!   replaced by the kind's variant name,
//! * `Elem`, a type, replaced by the kind's element type,
//! * `ZERO`, an expression, replaced by the kind's zero value.
//!
//! How the item is rewritten depends on what it is:
//! * an `enum` has its `Kind` variant replaced by one variant per kind,
//! * an `impl` whose header mentions `Elem` is duplicated once per kind,
//! * any other `impl` or `fn` has each `match` arm whose pattern mentions
//!   `Kind` duplicated once per kind.

extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::Span;

use quote::quote;
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::visit_mut::VisitMut;
use syn::{parse_macro_input, Error, Item, ItemEnum, ItemImpl, Result};

mod kinds;
use kinds::*;

mod search_replace;
use search_replace::*;

#[proc_macro_attribute]
pub fn expand_kinds(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new(Span::call_site(), "`expand_kinds` does not take arguments")
            .to_compile_error()
            .into();
    }
    let item = parse_macro_input!(item as Item);

    let result = match expand(item) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    };
    result.into()
}

fn expand(item: Item) -> Result<proc_macro2::TokenStream> {
    let substitutions = substitutions()?;

    match item {
        Item::Enum(item_enum) => Ok(expand_enum(item_enum, substitutions)),
        Item::Impl(item_impl) if header_mentions_elem(&item_impl) => {
            let impl_blocks = substitutions.into_iter().map(|mut substitution| {
                let mut impl_block = item_impl.clone();
                substitution.visit_item_impl_mut(&mut impl_block);
                impl_block
            });
            Ok(quote! { #(#impl_blocks)* })
        }
        Item::Impl(mut item_impl) => {
            ExpandArms { substitutions }.visit_item_impl_mut(&mut item_impl);
            Ok(quote! { #item_impl })
        }
        Item::Fn(mut item_fn) => {
            ExpandArms { substitutions }.visit_item_fn_mut(&mut item_fn);
            Ok(quote! { #item_fn })
        }
        other => Err(Error::new_spanned(
            other,
            "`expand_kinds` applies to enums, impl blocks and functions",
        )),
    }
}

fn expand_enum(mut item_enum: ItemEnum, mut substitutions: Vec<Substitution>) -> proc_macro2::TokenStream {
    let variants = std::mem::take(&mut item_enum.variants);
    let mut expanded = Punctuated::new();

    for variant in variants.into_iter() {
        if variant.ident != PLACEHOLDER {
            expanded.push(variant);
            continue;
        }
        for substitution in substitutions.iter_mut() {
            let mut kind_variant = variant.clone();
            kind_variant.ident = substitution.variant.clone();
            substitution.visit_fields_mut(&mut kind_variant.fields);
            expanded.push(kind_variant);
        }
    }

    item_enum.variants = expanded;
    quote! { #item_enum }
}

fn header_mentions_elem(item_impl: &ItemImpl) -> bool {
    mentions(ELEM, |finder| {
        finder.visit_type(&item_impl.self_ty);
        if let Some((_, path, _)) = &item_impl.trait_ {
            finder.visit_path(path);
        }
    })
}
