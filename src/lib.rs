//! `optionable` binds the fields of a configuration struct to command line options.
//!
//! Rather than writing a parser and then copying its results into the program's configuration, the configuration struct itself declares which of its fields are options.
//! `optionable` takes care of the rest:
//! * *Declarative options*:
//! A field is exposed by marking it (`#[optionable]`), optionally naming and describing it.
//! Unmarked fields are never touched.
//! * *Typed values*:
//! Each option value is converted to the field's type through a [`ConversionRegistry`].
//! The built-in conversions cover `bool` (as a flag), `i32`, `i64`, `f32`, `f64`, and `String`; applications may register more.
//! * *Inheritance*:
//! A configuration may inherit the options of a parent configuration (ex: [`Verbosity`]).
//! Every option name, short or long, must be unique across the whole hierarchy.
//! * *Detailed yet basic UX*:
//! Binding failures are reported with the offending input and the usage of the program.
//!
//! # Usage
//! This page includes a few demos on using `optionable`.
//!
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/container.rs")]
//! ```
//!
//! via [`Application`], which binds the Cli before running the program:
//! ```no_run
#![doc = include_str!("../demos/application.rs")]
//! ```
//!
//! ```console
//! $ summer --count 3 --factor 2
//! Sum: 12
//!
//! $ summer -n three
//! An error occurred while parsing command line parameters: option 'count': cannot convert 'three' to i64.
//! usage: summer --count N [--factor F] [-v]
//!
//! options:
//!  -f FACTOR, --factor FACTOR   Scale the sum by this factor.
//!  -n COUNT, --count COUNT      How many integers to sum. (required)
//!  -v, --verbose                Indicates if the program output should be verbose.
//!
//! $ summer --count 3 --bogus
//! An error occurred while parsing command line parameters: unrecognized option '--bogus'.
//! --count 3 --bogus
//!           ^
//! <truncated>
//! ```
//!
//! # Declarations
//! We recommend using the [derive Api](./derive/index.html) to declare options.
//! Under the hood, the derive generates an implementation of [`Optionable`], which may also be written by hand.
//!
//! ```
//! use optionable::{OptionDeclaration, Optionable, Schema, Verbosity};
//!
//! #[derive(Default)]
//! struct Config {
//!     verbosity: Verbosity,
//!     count: i32,
//! }
//!
//! impl Optionable for Config {
//!     fn declare(schema: &mut Schema<Self>) {
//!         schema.inherit(|config: &mut Self| &mut config.verbosity);
//!         schema.declare(
//!             OptionDeclaration::new("count", |config: &mut Self| &mut config.count)
//!                 .description("How many.")
//!                 .required(true),
//!         );
//!     }
//! }
//! ```
//!
//! Binding happens in three steps, each of which may also be driven directly:
//! 1. The [`DescriptorFactory`] resolves the [`FieldDescriptor`]s of the configuration, ancestors first, claiming each option name through a [`NameAllocator`].
//! 2. The [`Tokenizer`] reads the Cli tokens into a [`CommandLine`].
//! 3. The [`BindingEngine`] converts the values of the present options and writes them onto the configuration.
//!
//! The [`CommandLineBinder`] wraps these steps, reporting any failure to the user.
//!
//! ### Defaults
//! `optionable` never resets a field: the value a field holds before binding is its default.
//! Absent options leave their field untouched.
//!
//! Binding is not transactional.
//! When the [`BindingEngine`] fails part way, the fields written before the failure keep their new values.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing.
//! Exposes [`CommandLineBinder::test_dummy`] and [`CommandLineBinder::interface`], as well as the in-memory user interfaces.
//! * `tracing_debug`: Emit [tracing](https://docs.rs/tracing) debug events while allocating names and binding values.
//! Intended for debugging declarations; leave disabled otherwise.

pub mod derive;

pub use optionable_builder::*;
pub use optionable_derive::Optionable;
