//! Input parsing for the `Record` derive macro.
//!
//! Gathers the type identifier, generics, attributes, and either the struct
//! fields or the enum variants in one pass so expansion can fail fast.

use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type, Visibility};

use super::{FieldAttrs, StructAttrs, field_aliases, parse_field_attrs, parse_struct_attrs};

/// Parsed derive input.
pub(crate) struct RecordInput {
    pub ident: Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    pub shape: Shape,
}

/// What the derive is generating.
pub(crate) enum Shape {
    /// A struct with named fields.
    Struct(Vec<RecordField>),
    /// An enum of single-value variants.
    Enum(Vec<RecordVariant>),
}

/// A struct field and its parsed attributes.
pub(crate) struct RecordField {
    pub ident: Ident,
    /// Field name without any `r#` prefix.
    pub name: String,
    pub ty: Type,
    /// Declaration position among all fields, reflected or not.
    pub index: usize,
    pub public: bool,
    pub attrs: FieldAttrs,
}

impl RecordField {
    /// Whether the field is visible to the engines.
    pub(crate) const fn reflected(&self) -> bool {
        self.public && !self.attrs.skip
    }

    /// Whether the field is reflected and promotes its own fields.
    pub(crate) const fn promoted(&self) -> bool {
        self.reflected() && self.attrs.flatten
    }
}

/// An enum variant carrying exactly one value.
pub(crate) struct RecordVariant {
    pub ident: Ident,
    pub ty: Type,
}

/// Field name as written, without the raw-identifier prefix.
pub(crate) fn unraw(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// Gathers information from the user-provided type.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<RecordInput> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let shape = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Shape::Struct(parse_fields(named, &input.attrs)?),
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Record requires named fields",
                ));
            }
        },
        Data::Enum(data) if data.variants.is_empty() => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Record enums need at least one variant",
            ));
        }
        Data::Enum(data) => Shape::Enum(
            data.variants
                .iter()
                .map(parse_variant)
                .collect::<syn::Result<Vec<_>>>()?,
        ),
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Record cannot be derived for unions",
            ));
        }
    };
    Ok(RecordInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        shape,
    })
}

fn parse_fields(
    named: &syn::FieldsNamed,
    container: &[syn::Attribute],
) -> syn::Result<Vec<RecordField>> {
    let mut fields = Vec::with_capacity(named.named.len());
    for (index, field) in named.named.iter().enumerate() {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "unnamed fields are not supported"));
        };
        let mut attrs = parse_field_attrs(&field.attrs)?;
        if attrs.skip && attrs.flatten {
            return Err(syn::Error::new_spanned(
                field,
                "`skip` and `flatten` cannot be combined",
            ));
        }
        attrs.aliases = field_aliases(field, container, &attrs.aliases)?;
        fields.push(RecordField {
            name: unraw(&ident),
            ident,
            ty: field.ty.clone(),
            index,
            public: matches!(field.vis, Visibility::Public(_)),
            attrs,
        });
    }
    Ok(fields)
}

fn parse_variant(variant: &syn::Variant) -> syn::Result<RecordVariant> {
    match &variant.fields {
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
            let ty = unnamed
                .unnamed
                .first()
                .map(|field| field.ty.clone())
                .ok_or_else(|| syn::Error::new_spanned(variant, "variant needs one value"))?;
            Ok(RecordVariant {
                ident: variant.ident.clone(),
                ty,
            })
        }
        _ => Err(syn::Error::new_spanned(
            variant,
            "Record enums need variants carrying exactly one unnamed value",
        )),
    }
}
