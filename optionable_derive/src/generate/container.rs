use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;

use crate::model::DeriveOptionable;

impl From<DeriveOptionable> for TokenStream2 {
    fn from(value: DeriveOptionable) -> Self {
        let DeriveOptionable {
            struct_name,
            fields,
        } = value;
        let schema = if fields.is_empty() {
            syn::Ident::new("_schema", Span::call_site())
        } else {
            syn::Ident::new("schema", Span::call_site())
        };
        let fields = fields.into_iter().map(TokenStream2::from);

        quote! {
            impl ::optionable::Optionable for #struct_name {
                fn declare(#schema: &mut ::optionable::Schema<Self>) {
                    #( #fields )*
                }
            }
        }
    }
}
