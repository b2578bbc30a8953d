extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveOptionable;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

/// Derive `optionable::Optionable` for a struct with named fields.
///
/// Only the fields marked `#[optionable]` bind to Cli options:
/// * `#[optionable]`: the option is named after the field (`--count`, `-c`).
/// * `#[optionable(short = 'n', long = "number")]`: explicit names.
/// * `#[optionable(description = "..")]`: documents the option.
/// * `#[optionable(required)]`: the option must be present on the Cli.
/// * `#[optionable(parent)]`: the field is itself `Optionable`; its options are declared first.
#[proc_macro_derive(Optionable, attributes(optionable))]
pub fn optionable(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveOptionable::try_from(derive_input) {
        Ok(optionable) => TokenStream2::from(optionable).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
