//! Attribute and input parsing for `#[derive(Record)]`.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Token, parenthesized};

mod input;
mod literals;
mod serde_attrs;

pub(crate) use input::{RecordField, RecordInput, RecordVariant, Shape, parse_input};
use literals::lit_str;
use serde_attrs::{serde_field_rename, serde_rename_all};

/// Alias key filled from serde renames.
pub(crate) const JSON_KEY: &str = "json";

/// Type-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Record)]`.
///
/// - `skip` hides a public field.
/// - `flatten` promotes the fields of a nested record.
/// - `alias(key = "name")` names the field for an external format.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub skip: bool,
    pub flatten: bool,
    pub aliases: Vec<(String, String)>,
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

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[record(...)]` metadata applied to the type.
///
/// Only `crate` is recognised. Unknown keys are ignored so callers keep
/// compiling when new attributes appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_record(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            discard_unknown(meta)
        }
    })?;
    Ok(out)
}

/// Extracts `#[record(...)]` metadata applied to a field.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_record(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("skip") => out.skip = true,
            Some("flatten") => out.flatten = true,
            Some("alias") => meta.parse_nested_meta(|nested| {
                let Some(key) = nested.path.get_ident().map(ToString::to_string) else {
                    return Err(nested.error("alias keys must be identifiers"));
                };
                let value = lit_str(&nested, &key)?.value();
                out.aliases.retain(|(existing, _)| *existing != key);
                out.aliases.push((key, value));
                Ok(())
            })?,
            _ => discard_unknown(meta)?,
        }
        Ok(())
    })?;
    Ok(out)
}

/// External names for `field`: explicit aliases plus the serde-derived
/// `json` name when no explicit `json` alias was given.
pub(crate) fn field_aliases(
    field: &syn::Field,
    container: &[Attribute],
    explicit: &[(String, String)],
) -> syn::Result<Vec<(String, String)>> {
    let mut aliases = explicit.to_vec();
    if aliases.iter().any(|(key, _)| key == JSON_KEY) {
        return Ok(aliases);
    }
    let renamed = match serde_field_rename(&field.attrs)? {
        Some(name) => Some(name),
        None => match (serde_rename_all(container)?, field.ident.as_ref()) {
            (Some(rule), Some(ident)) => Some(rule.apply(&input::unraw(ident))),
            _ => None,
        },
    };
    if let Some(name) = renamed {
        aliases.push((JSON_KEY.to_owned(), name));
    }
    Ok(aliases)
}
