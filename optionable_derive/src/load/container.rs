use crate::model::{DeriveField, DeriveOptionable, FieldKind};

impl TryFrom<syn::DeriveInput> for DeriveOptionable {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        let struct_name = value.ident.clone();

        if value
            .attrs
            .iter()
            .any(|attribute| attribute.path().is_ident("optionable"))
        {
            return Err(syn::Error::new(
                struct_name.span(),
                "Invalid - `#[optionable]` applies to fields, not to the struct.",
            ));
        }

        if !value.generics.params.is_empty() {
            return Err(syn::Error::new(
                struct_name.span(),
                "Invalid - `#[derive(Optionable)]` does not support generic structs.",
            ));
        }

        let fields = match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(ref fields),
                ..
            }) => fields
                .named
                .iter()
                .map(DeriveField::load)
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect::<Vec<_>>(),
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Unit,
                ..
            }) => Vec::default(),
            syn::Data::Struct(_) => {
                return Err(syn::Error::new(
                    struct_name.span(),
                    "Invalid - `#[derive(Optionable)]` requires named fields.",
                ));
            }
            _ => {
                return Err(syn::Error::new(
                    struct_name.span(),
                    "Invalid - `#[derive(Optionable)]` only applies to structs.",
                ));
            }
        };

        let parents: Vec<String> = fields
            .iter()
            .filter(|field| field.kind == FieldKind::Parent)
            .map(|field| field.field_name.to_string())
            .collect();

        if parents.len() > 1 {
            return Err(syn::Error::new(
                struct_name.span(),
                format!("Invalid - struct cannot have multiple parents: {parents:?}."),
            ));
        }

        Ok(DeriveOptionable {
            struct_name,
            fields,
        })
    }
}
