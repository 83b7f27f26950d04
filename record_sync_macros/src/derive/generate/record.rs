//! `Reflect` and `Record` implementations for structs.

use proc_macro2::TokenStream;
use quote::quote;

use super::{bounded_generics, common_reflect_methods};
use crate::derive::parse::{RecordField, RecordInput};

/// Generate both trait implementations for a struct.
pub(crate) fn generate(
    input: &RecordInput,
    fields: &[RecordField],
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let generics = bounded_generics(&input.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let reflected: Vec<&RecordField> = fields.iter().filter(|f| f.reflected()).collect();
    let common = common_reflect_methods(krate);
    let reflect_eq = reflect_eq_body(&reflected, krate);
    let descriptors = descriptors_body(&reflected, krate);
    let indices: Vec<_> = reflected.iter().map(|f| f.index).collect();
    let idents: Vec<_> = reflected.iter().map(|f| &f.ident).collect();

    quote! {
        impl #impl_generics #krate::Reflect for #ident #ty_generics #where_clause {
            fn kind(&self) -> #krate::Kind {
                #krate::Kind::Record
            }

            fn static_kind() -> #krate::Kind {
                #krate::Kind::Record
            }

            #common

            fn reflect_ref(&self) -> #krate::ReflectRef<'_> {
                #krate::ReflectRef::Record(self)
            }

            fn reflect_mut(&mut self) -> #krate::ReflectMut<'_> {
                #krate::ReflectMut::Record(self)
            }

            fn reflect_eq(&self, other: &dyn #krate::Reflect) -> bool {
                #reflect_eq
            }
        }

        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            #descriptors

            fn field_descriptors(&self) -> ::std::vec::Vec<#krate::FieldDescriptor> {
                <Self as #krate::Record>::descriptors()
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #krate::Reflect> {
                match index {
                    #( #indices => ::core::option::Option::Some(&self.#idents as &dyn #krate::Reflect), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn #krate::Reflect> {
                match index {
                    #( #indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn #krate::Reflect), )*
                    _ => ::core::option::Option::None,
                }
            }

            fn reset(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }
        }
    }
}

/// Compare reflected fields pairwise once `other` downcasts to `Self`.
fn reflect_eq_body(reflected: &[&RecordField], krate: &TokenStream) -> TokenStream {
    if reflected.is_empty() {
        return quote! {
            #krate::Reflect::as_any(other).downcast_ref::<Self>().is_some()
        };
    }
    let idents = reflected.iter().map(|f| &f.ident);
    quote! {
        #krate::Reflect::as_any(other)
            .downcast_ref::<Self>()
            .is_some_and(|peer| {
                true #( && #krate::Reflect::reflect_eq(&self.#idents, &peer.#idents) )*
            })
    }
}

/// Build the descriptor functions, splicing in flattened members.
///
/// Records without flattened members list their fields directly. Otherwise
/// the unresolved list is built from each member's own unresolved list and
/// names are resolved once, at the outermost record.
fn descriptors_body(reflected: &[&RecordField], krate: &TokenStream) -> TokenStream {
    if !reflected.iter().any(|f| f.promoted()) {
        let entries = reflected.iter().map(|f| descriptor(f, krate));
        return quote! {
            fn descriptors() -> ::std::vec::Vec<#krate::FieldDescriptor> {
                ::std::vec![ #( #entries ),* ]
            }
        };
    }

    let steps = reflected.iter().map(|f| {
        let entry = descriptor(f, krate);
        if f.promoted() {
            let index = f.index;
            let ty = &f.ty;
            quote! {
                fields.push(#entry);
                #krate::catalog::promote(
                    &mut fields,
                    #index,
                    <#ty as #krate::Record>::declared_descriptors(),
                );
            }
        } else {
            quote! { fields.push(#entry); }
        }
    });
    quote! {
        fn descriptors() -> ::std::vec::Vec<#krate::FieldDescriptor> {
            #krate::catalog::visible(<Self as #krate::Record>::declared_descriptors())
        }

        fn declared_descriptors() -> ::std::vec::Vec<#krate::FieldDescriptor> {
            let mut fields = ::std::vec::Vec::new();
            #( #steps )*
            fields
        }
    }
}

fn descriptor(field: &RecordField, krate: &TokenStream) -> TokenStream {
    let name = &field.name;
    let ty = &field.ty;
    let index = field.index;
    let keys = field.attrs.aliases.iter().map(|(key, _)| key);
    let values = field.attrs.aliases.iter().map(|(_, value)| value);
    let base = quote! {
        #krate::FieldDescriptor::new(
            #name,
            <#ty as #krate::Reflect>::static_kind(),
            ::core::any::type_name::<#ty>(),
            ::core::any::type_name::<Self>(),
            #index,
        )
    };
    if field.attrs.aliases.is_empty() {
        base
    } else {
        quote! { #base.with_aliases(&[ #( (#keys, #values) ),* ]) }
    }
}
