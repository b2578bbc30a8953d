//! Derive Api for `optionable` declarations.
//!
//! ### Getting Started
//! Instrument a configuration struct `S` with `#[derive(Optionable)]`, and mark the fields to expose with `#[optionable]`.
//! This generates the [`Optionable`](../trait.Optionable.html) implementation of `S`, so that it may be bound via [`CommandLineBinder`](../struct.CommandLineBinder.html).
//! Unmarked fields are left untouched.
//!
//! ```no_run
#![doc = include_str!("../demos/container.rs")]
//! ```
//!
//! This generates the following Cli program:
//! ```console
//! $ container --workers 4 -r 0.5
//! Starting 4 workers (sampling 0.5).
//!
//! $ container
//! An error occurred while parsing command line parameters: missing required option 'workers'.
//! usage: container --workers N [-o OUTPUT] [-r RATIO] [-v]
//!
//! options:
//!  -o OUTPUT, --output OUTPUT      Where to write the report.
//!  -r RATIO, --ratio RATIO         The fraction of requests to sample.
//!  -v, --verbose                   Indicates if the program output should be verbose.
//!  -w WORKERS, --workers WORKERS   The number of workers to start. (required)
//! ```
//!
//! ### Field Configuration
//! By default, a marked field `name` is exposed as the option `-n, --name`: the short name is the first letter of the field, and the long name is the field itself.
//! Raw identifiers drop their prefix (ex: `r#type` becomes `--type`).
//! The field type decides how the option's value is converted (see [`ConversionRegistry`](../struct.ConversionRegistry.html)); `bool` fields are flags that take no value.
//!
//! The following attributes may be combined as necessary:
//! * `#[optionable(short = C)]` to explicitly set the short name.
//! `C` must be a char value (ex: `'c'`).
//! * `#[optionable(long = "..")]` to explicitly set the long name.
//! * `#[optionable(description = "..")]` to describe the option in the usage message.
//! * `#[optionable(required)]` to fail the binding when the option is absent.
//! * `#[optionable(parent)]` to inherit the declarations of another `Optionable` field (ex: [`Verbosity`](../struct.Verbosity.html)).
//! Parent declarations are bound before those of the struct itself.
//! A struct may have at most one parent, which cannot be combined with any other attribute.
//!
//! Every option name must be unique across the struct and its ancestors.
//! A conflict is reported when binding, naming both the kind of name and where it came from.

pub use optionable_derive::*;
