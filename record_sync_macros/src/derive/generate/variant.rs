//! `Reflect` and `Variant` implementations for enums used as dynamic slots.

use proc_macro2::TokenStream;
use quote::quote;

use super::{bounded_generics, common_reflect_methods};
use crate::derive::parse::{RecordInput, RecordVariant};

/// Generate both trait implementations for an enum.
pub(crate) fn generate(
    input: &RecordInput,
    variants: &[RecordVariant],
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let common = common_reflect_methods(krate);
    let names: Vec<_> = variants.iter().map(|v| &v.ident).collect();
    let labels: Vec<String> = variants.iter().map(|v| v.ident.to_string()).collect();
    let selects = variants.iter().map(|v| select_arm(v, variants.len(), krate));

    quote! {
        impl #impl_generics #krate::Reflect for #ident #ty_generics #where_clause {
            fn kind(&self) -> #krate::Kind {
                #krate::Kind::Dynamic
            }

            fn static_kind() -> #krate::Kind {
                #krate::Kind::Dynamic
            }

            #common

            fn reflect_ref(&self) -> #krate::ReflectRef<'_> {
                #krate::ReflectRef::Dynamic(self)
            }

            fn reflect_mut(&mut self) -> #krate::ReflectMut<'_> {
                #krate::ReflectMut::Dynamic(self)
            }

            fn reflect_eq(&self, other: &dyn #krate::Reflect) -> bool {
                match (self, #krate::Reflect::as_any(other).downcast_ref::<Self>()) {
                    #(
                        (Self::#names(left), ::core::option::Option::Some(Self::#names(right))) => {
                            #krate::Reflect::reflect_eq(left, right)
                        }
                    )*
                    _ => false,
                }
            }
        }

        impl #impl_generics #krate::Variant for #ident #ty_generics #where_clause {
            fn variant_name(&self) -> &'static str {
                match self {
                    #( Self::#names(_) => #labels, )*
                }
            }

            fn payload(&self) -> &dyn #krate::Reflect {
                match self {
                    #( Self::#names(value) => value as &dyn #krate::Reflect, )*
                }
            }

            fn select(
                &mut self,
                payload_type: ::core::any::TypeId,
            ) -> ::core::option::Option<&mut dyn #krate::Reflect> {
                #( #selects )*
                ::core::option::Option::None
            }
        }
    }
}

/// Switch to `variant` when its payload type matches `payload_type`.
///
/// Identity is taken from a default payload's `as_any`, so boxed payloads
/// match their inner type.
fn select_arm(variant: &RecordVariant, count: usize, krate: &TokenStream) -> TokenStream {
    let name = &variant.ident;
    let ty = &variant.ty;
    let fallback = (count > 1).then(|| quote! { _ => ::core::option::Option::None, });
    quote! {
        {
            let candidate = <#ty as ::core::default::Default>::default();
            if #krate::Reflect::as_any(&candidate).type_id() == payload_type {
                *self = Self::#name(candidate);
                return match self {
                    Self::#name(value) => {
                        ::core::option::Option::Some(value as &mut dyn #krate::Reflect)
                    }
                    #fallback
                };
            }
        }
    }
}
