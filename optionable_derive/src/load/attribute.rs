use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;
use std::collections::{HashMap, HashSet};

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let mut singletons = HashSet::default();
        let mut pairs: HashMap<String, Vec<DeriveValue>> = HashMap::default();

        // A bare `#[optionable]` carries no arguments.
        if let syn::Meta::Path(_) = value.meta {
            return Ok(Self { singletons, pairs });
        }

        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;

        for expression in value.parse_args_with(attributes_parser)? {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream();
                    let values = pairs.entry(left.to_string()).or_default();
                    values.push(DeriveValue {
                        tokens: assignment.right.to_token_stream(),
                    });
                }
                syn::Expr::Path(ref path) if path.path.get_ident().is_some() => {
                    let tts = expression.to_token_stream();
                    singletons.insert(tts.to_string());
                }
                _ => {
                    return Err(syn::Error::new_spanned(
                        &expression,
                        format!(
                            "Unparseable attribute: {}",
                            expression.to_token_stream()
                        ),
                    ));
                }
            };
        }

        Ok(Self { singletons, pairs })
    }
}

impl IntermediateAttributes {
    /// Merge in the content of another attribute on the same item.
    pub(crate) fn extend(&mut self, other: IntermediateAttributes) {
        let IntermediateAttributes { singletons, pairs } = other;
        self.singletons.extend(singletons);

        for (key, values) in pairs {
            self.pairs.entry(key).or_default().extend(values);
        }
    }

    /// Collect all the `#[optionable(..)]` attributes, or `None` when there are none.
    pub(crate) fn collect(attributes: &[syn::Attribute]) -> Result<Option<Self>, syn::Error> {
        let mut collected: Option<Self> = None;

        for attribute in attributes {
            if attribute.path().is_ident("optionable") {
                let current = IntermediateAttributes::try_from(attribute)?;

                match collected.as_mut() {
                    Some(existing) => existing.extend(current),
                    None => collected = Some(current),
                }
            }
        }

        Ok(collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use quote::ToTokens;
    use syn::parse_quote;

    #[test]
    fn construct_attributes_bare() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[optionable]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn construct_attributes_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[optionable()]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn construct_attributes() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[optionable(required, long = "number")]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: HashSet::from(["required".to_string()]),
                pairs: HashMap::from([(
                    "long".to_string(),
                    vec![DeriveValue {
                        tokens: Literal::string("number").into_token_stream(),
                    }]
                )])
            }
        );
    }

    #[test]
    fn construct_attributes_multiple() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[optionable(short = 'a', short = 'b')]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: HashSet::default(),
                pairs: HashMap::from([(
                    "short".to_string(),
                    vec![
                        DeriveValue {
                            tokens: Literal::character('a').into_token_stream(),
                        },
                        DeriveValue {
                            tokens: Literal::character('b').into_token_stream(),
                        }
                    ]
                )])
            }
        );
    }

    #[test]
    fn construct_attributes_invalid_expression() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[optionable(1 + 2)]
        };

        // Execute
        let error = IntermediateAttributes::try_from(&attribute).unwrap_err();

        // Verify
        assert_eq!(error.to_string(), "Unparseable attribute: 1 + 2");
    }

    #[test]
    fn construct_attributes_invalid_syntax() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[optionable(let boo = "boo")]
        };

        // Execute & verify
        assert!(IntermediateAttributes::try_from(&attribute).is_err());
    }

    #[test]
    fn collect_attributes() {
        // Setup
        let field: syn::Field = parse_quote! {
            #[doc = "ignored"]
            #[optionable(required)]
            #[optionable(description = "How many.")]
            count: i32
        };

        // Execute
        let attributes = IntermediateAttributes::collect(&field.attrs).unwrap().unwrap();

        // Verify
        assert_eq!(attributes.singletons, HashSet::from(["required".to_string()]));
        assert_eq!(
            attributes.pairs.get("description"),
            Some(&vec![DeriveValue {
                tokens: Literal::string("How many.").into_token_stream(),
            }])
        );
    }

    #[test]
    fn collect_attributes_none() {
        // Setup
        let field: syn::Field = parse_quote! {
            #[doc = "ignored"]
            count: i32
        };

        // Execute & verify
        assert_eq!(IntermediateAttributes::collect(&field.attrs).unwrap(), None);
    }
}
