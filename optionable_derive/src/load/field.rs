use crate::load::incompatible_error;
use crate::model::{DeriveField, DeriveValue, FieldKind, IntermediateAttributes};

const SINGLETONS: [&str; 2] = ["required", "parent"];
const PAIRS: [&str; 3] = ["short", "long", "description"];

impl DeriveField {
    /// Load the field, or `None` when it isn't marked `#[optionable]`.
    pub(crate) fn load(value: &syn::Field) -> Result<Option<Self>, syn::Error> {
        let mut attributes = match IntermediateAttributes::collect(&value.attrs)? {
            Some(attributes) => attributes,
            None => return Ok(None),
        };
        let field_name = value
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(value, "Invalid - field must be named."))?;

        for singleton in &attributes.singletons {
            if !SINGLETONS.contains(&singleton.as_str()) {
                return Err(syn::Error::new(
                    field_name.span(),
                    format!("Invalid - unrecognized attribute `#[optionable({singleton})]`."),
                ));
            }
        }

        for (key, values) in &attributes.pairs {
            if !PAIRS.contains(&key.as_str()) {
                return Err(syn::Error::new(
                    field_name.span(),
                    format!("Invalid - unrecognized attribute `#[optionable({key} = ..)]`."),
                ));
            }

            if values.len() > 1 {
                return Err(syn::Error::new(
                    field_name.span(),
                    format!("Invalid - attribute `#[optionable({key} = ..)]` cannot be repeated."),
                ));
            }
        }

        let required = attributes.singletons.contains("required");

        if attributes.singletons.contains("parent") {
            if required {
                return Err(incompatible_error(
                    &field_name,
                    "#[optionable(parent)]",
                    "#[optionable(required)]",
                ));
            }

            if let Some(key) = PAIRS.iter().find(|key| attributes.pairs.contains_key(**key)) {
                return Err(incompatible_error(
                    &field_name,
                    "#[optionable(parent)]",
                    format!("#[optionable({key} = ..)]"),
                ));
            }

            return Ok(Some(DeriveField {
                field_name,
                kind: FieldKind::Parent,
            }));
        }

        let mut take = |key: &str| -> Option<DeriveValue> {
            attributes
                .pairs
                .remove(key)
                .and_then(|values| values.into_iter().next())
        };
        let short = take("short");
        let long = take("long");
        let description = take("description");

        Ok(Some(DeriveField {
            field_name,
            kind: FieldKind::Option {
                short,
                long,
                description,
                required,
            },
        }))
    }
}
