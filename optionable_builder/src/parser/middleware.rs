use std::env;
use thiserror::Error;

use crate::api::{DescriptorFactory, FieldDescriptor, OptionDeclaration, Optionable, Schema};
use crate::binding::{BindingEngine, BindingError};
use crate::constant::*;
use crate::convert::ConversionRegistry;
use crate::naming::NameError;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::{ErrorContext, Printer};
use crate::parser::tokenizer::{ParseError, Tokenizer};

/// The failure to bind the Cli onto a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The configuration declares conflicting option names.
    #[error(transparent)]
    Name(#[from] NameError),
    /// The Cli tokens do not fit the declared options.
    #[error("{source}")]
    Parse {
        /// The character offset of the offending token (spaces excluded).
        offset: usize,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },
    /// The Cli values do not fit the configuration.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Binds the Cli onto an [`Optionable`] configuration.
///
/// ### Example
/// ```
/// # use optionable_builder as optionable;
/// use optionable::{CommandLineBinder, OptionDeclaration, Optionable, Schema};
///
/// #[derive(Default)]
/// struct Config {
///     count: i32,
///     verbose: bool,
/// }
///
/// impl Optionable for Config {
///     fn declare(schema: &mut Schema<Self>) {
///         schema
///             .declare(OptionDeclaration::new("count", |c: &mut Config| &mut c.count).required(true))
///             .declare(OptionDeclaration::new("verbose", |c: &mut Config| &mut c.verbose));
///     }
/// }
///
/// let mut config = Config::default();
/// CommandLineBinder::new("program [options]")
///     .bind_tokens(&mut config, &["--count", "5", "-v"])
///     .unwrap();
/// assert_eq!(config.count, 5);
/// assert!(config.verbose);
/// ```
pub struct CommandLineBinder<'r> {
    usage: String,
    registry: &'r ConversionRegistry,
    user_interface: Box<dyn UserInterface>,
}

impl CommandLineBinder<'static> {
    /// Create a binder documented by the `usage` line, converting with the process-wide [`ConversionRegistry`].
    pub fn new(usage: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            registry: ConversionRegistry::global(),
            user_interface: Box::new(ConsoleInterface::default()),
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Create a binder which reports nothing, for use in testing.
    ///
    /// ### Example
    /// ```
    /// # use optionable_builder as optionable;
    /// use optionable::{CommandLineBinder, Verbosity};
    ///
    /// let mut verbosity = Verbosity::default();
    /// assert_eq!(CommandLineBinder::test_dummy().bind_tokens(&mut verbosity, &["--bogus"]), Err(1));
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        Self::new("test-dummy").interface(Box::new(crate::parser::QuietInterface::default()))
    }
}

impl<'r> CommandLineBinder<'r> {
    /// Convert with the `registry` instead.
    pub fn registry<'s>(self, registry: &'s ConversionRegistry) -> CommandLineBinder<'s> {
        let CommandLineBinder {
            usage,
            user_interface,
            ..
        } = self;

        CommandLineBinder {
            usage,
            registry,
            user_interface,
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Report to the `user_interface` instead.
    #[cfg(any(test, feature = "unit_test"))]
    pub fn interface(mut self, user_interface: Box<dyn UserInterface>) -> Self {
        self.user_interface = user_interface;
        self
    }

    /// Bind the `tokens` onto the `target`, without reporting anything.
    ///
    /// Binding happens in three phases, each of which may fail:
    /// 1. Descriptor creation resolves the option names of `C`.
    /// 2. Tokenization reads the `tokens` against those options.
    /// 3. The [`BindingEngine`] converts and writes the values onto the `target`.
    /// This phase is not transactional; a failure leaves earlier writes in place.
    pub fn try_bind_tokens<C: Optionable>(
        &self,
        target: &mut C,
        tokens: &[&str],
    ) -> Result<(), Error> {
        let descriptors = DescriptorFactory::new(self.registry).create::<C>()?;
        self.bind_descriptors(&descriptors, target, tokens)
    }

    /// Bind the `tokens` onto the `target`.
    ///
    /// On failure, reports the error followed by the usage, and returns `Err(1)`.
    pub fn bind_tokens<C: Optionable>(&self, target: &mut C, tokens: &[&str]) -> Result<(), i32> {
        let descriptors = match DescriptorFactory::new(self.registry).create::<C>() {
            Ok(descriptors) => descriptors,
            Err(error) => {
                self.report(&Error::from(error), tokens, &[] as &[FieldDescriptor<C>]);
                return Err(1);
            }
        };

        match self.bind_descriptors(&descriptors, target, tokens) {
            Ok(()) => Ok(()),
            Err(error) => {
                self.report(&error, tokens, &descriptors);
                Err(1)
            }
        }
    }

    /// Bind the Cli [`env::args`] onto the `target`.
    ///
    /// On failure, reports the error followed by the usage, and exits with error code `1` (via [`std::process::exit`]).
    pub fn bind<C: Optionable>(&self, target: &mut C) {
        let command_input: Vec<String> = env::args().skip(1).collect();

        if let Err(exit_code) = self.bind_tokens(
            target,
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            std::process::exit(exit_code);
        }
    }

    fn bind_descriptors<C>(
        &self,
        descriptors: &[FieldDescriptor<C>],
        target: &mut C,
        tokens: &[&str],
    ) -> Result<(), Error> {
        let definitions: Vec<_> = descriptors.iter().map(FieldDescriptor::definition).collect();
        let command_line = Tokenizer::new(&definitions)
            .tokenize(tokens)
            .map_err(|(offset, source)| Error::Parse { offset, source })?;
        BindingEngine::new(self.registry).apply_to(descriptors, &command_line, target)?;
        Ok(())
    }

    fn report<C>(&self, error: &Error, tokens: &[&str], descriptors: &[FieldDescriptor<C>]) {
        self.user_interface
            .print_error(format!("{PARSE_FAILURE}: {error}"));

        if let Error::Parse { offset, .. } = error {
            self.user_interface
                .print_error_context(ErrorContext::new(*offset, tokens));
        }

        if !descriptors.is_empty() {
            let definitions = descriptors.iter().map(FieldDescriptor::definition).collect();
            Printer::terminal(self.usage.as_str(), definitions).print_usage(&*self.user_interface);
        }
    }
}

/// A program driven by its [`Optionable`] configuration.
///
/// ### Example
/// ```no_run
/// # use optionable_builder as optionable;
/// use optionable::{Application, OptionDeclaration, Optionable, Schema, Verbosity};
///
/// #[derive(Default)]
/// struct Greeter {
///     name: String,
///     verbosity: Verbosity,
/// }
///
/// impl Optionable for Greeter {
///     fn declare(schema: &mut Schema<Self>) {
///         schema
///             .inherit(|g: &mut Greeter| &mut g.verbosity)
///             .declare(OptionDeclaration::new("name", |g: &mut Greeter| &mut g.name).required(true));
///     }
/// }
///
/// impl Application for Greeter {
///     fn usage() -> String {
///         "greeter --name NAME [-v]".to_string()
///     }
///
///     fn run(self) {
///         println!("Hello, {}!", self.name);
///     }
/// }
///
/// Greeter::start();
/// ```
pub trait Application: Optionable + Default {
    /// The usage line, printed on failure.
    fn usage() -> String;

    /// Run the program, once its configuration is bound.
    fn run(self);

    /// Bind the `tokens` with the `binder`, and run only on success.
    fn start_with(binder: &CommandLineBinder<'_>, tokens: &[&str]) -> Result<(), i32> {
        let mut application = Self::default();
        binder.bind_tokens(&mut application, tokens)?;
        application.run();
        Ok(())
    }

    /// Bind the `tokens`, and run only on success.
    fn start_tokens(tokens: &[&str]) -> Result<(), i32> {
        Self::start_with(&CommandLineBinder::new(Self::usage()), tokens)
    }

    /// Bind the Cli [`env::args`], and run only on success.
    /// On failure, exits with error code `1` (via [`std::process::exit`]).
    fn start() {
        let command_input: Vec<String> = env::args().skip(1).collect();

        if let Err(exit_code) = Self::start_tokens(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        ) {
            std::process::exit(exit_code);
        }
    }
}

/// A ready-made parent configuration, declaring the `--verbose` flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Verbosity {
    verbose: bool,
}

impl Verbosity {
    /// Whether the verbose flag was given.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl Optionable for Verbosity {
    fn declare(schema: &mut Schema<Self>) {
        schema.declare(
            OptionDeclaration::new("verbose", |v: &mut Verbosity| &mut v.verbose)
                .description("Indicates if the program output should be verbose."),
        );
    }
}
