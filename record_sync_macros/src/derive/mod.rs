//! Expansion pipeline: parse the input, then generate the trait impls.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

use parse::{Shape, parse_input};

/// Expand `#[derive(Record)]` for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse_input(input)?;
    let krate = crate_path::resolve(parsed.attrs.crate_path.as_ref());
    Ok(match &parsed.shape {
        Shape::Struct(fields) => generate::record::generate(&parsed, fields, &krate),
        Shape::Enum(variants) => generate::variant::generate(&parsed, variants, &krate),
    })
}
