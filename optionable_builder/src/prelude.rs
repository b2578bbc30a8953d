//! Traits which, typically, may be imported without concern: `use optionable::prelude::*`.

// Needs to be imported in order to implement a configuration by hand.
pub use crate::api::Optionable;
// Needs to be imported in order to start an application.
pub use crate::parser::Application;
// Needs to be imported in order to query a parsed Cli.
pub use crate::binding::ParsedOptions;
