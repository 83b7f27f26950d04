//! Procedural macros for `record_sync`.
//!
//! `#[derive(Record)]` implements `record_sync::Reflect` together with
//! `record_sync::Record` for structs with named fields, or
//! `record_sync::Variant` for enums whose variants each carry one value.
//! Struct fields take part when they are `pub` and not marked
//! `#[record(skip)]`; `#[record(flatten)]` splices a nested record's fields
//! into the outer record.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;


/// Derive macro for `record_sync::Record`.
///
/// Recognised attributes:
///
/// - `#[record(crate = "path")]` on the type, when `record_sync` is renamed.
/// - `#[record(skip)]` on a field to hide it.
/// - `#[record(flatten)]` on a record-typed field to promote its fields.
/// - `#[record(alias(key = "name", ...))]` on a field to name it for an
///   external format. `#[serde(rename)]` and `#[serde(rename_all)]` supply
///   the `json` alias when no explicit one is given.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
