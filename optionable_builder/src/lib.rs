//! Builder module for `optionable`.
//! See the `optionable` crate root for full details.
#![deny(missing_docs)]
mod api;
mod binding;
mod constant;
mod convert;
mod model;
mod naming;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use binding::*;
pub use convert::*;
pub use model::*;
pub use naming::*;
pub use parser::*;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
pub(crate) mod test {
    macro_rules! assert_contains {
        ($base:expr, $sub:expr) => {
            assert!(
                $base.contains($sub),
                "'{b}' does not contain '{s}'",
                b = $base,
                s = $sub,
            );
        };
    }

    pub(crate) use assert_contains;
}
