//! Token generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Generics;

pub(crate) mod record;
pub(crate) mod variant;

/// Clone `generics`, bounding every type parameter by the traits the
/// runtime needs from field and payload types.
pub(crate) fn bounded_generics(generics: &Generics, krate: &TokenStream) -> Generics {
    let mut bounded = generics.clone();
    let params: Vec<_> = bounded
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = bounded.make_where_clause();
    for ident in params {
        where_clause.predicates.push(syn::parse_quote! {
            #ident: #krate::Reflect + ::core::clone::Clone + ::core::default::Default
        });
    }
    bounded
}

/// `Reflect` methods shared by records and variant enums.
pub(crate) fn common_reflect_methods(krate: &TokenStream) -> TokenStream {
    quote! {
        fn type_name(&self) -> &'static str {
            ::core::any::type_name::<Self>()
        }

        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }

        fn assign_from(&mut self, source: &dyn #krate::Reflect) -> bool {
            #krate::reflect::assign_same_type(self, source)
        }
    }
}
