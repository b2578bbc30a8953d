use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;

use crate::model::{DeriveField, DeriveValue, FieldKind};

impl From<DeriveField> for TokenStream2 {
    fn from(value: DeriveField) -> Self {
        let DeriveField { field_name, kind } = value;

        match kind {
            FieldKind::Parent => quote! {
                schema.inherit(|target: &mut Self| &mut target.#field_name);
            },
            FieldKind::Option {
                short,
                long,
                description,
                required,
            } => {
                // Raw identifiers (ex: `r#type`) name their option without the prefix.
                let name = field_name.unraw().to_string();
                let short = short.map(|DeriveValue { tokens }| quote! { .short(#tokens) });
                let long = long.map(|DeriveValue { tokens }| quote! { .long(#tokens) });
                let description = description
                    .map(|DeriveValue { tokens }| quote! { .description(#tokens) });
                let required = if required {
                    Some(quote! { .required(true) })
                } else {
                    None
                };

                quote! {
                    schema.declare(
                        ::optionable::OptionDeclaration::new(#name, |target: &mut Self| &mut target.#field_name)
                            #short
                            #long
                            #description
                            #required
                    );
                }
            }
        }
    }
}
