use std::any::Any;
use std::collections::HashMap;
use thiserror::Error;

use crate::api::FieldDescriptor;
use crate::convert::{ConversionError, ConversionRegistry};
use crate::model::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The parsed Cli, as seen by the [`BindingEngine`].
///
/// Options are always looked up by their long name.
pub trait ParsedOptions {
    /// Check whether the option was specified.
    fn present(&self, long: &str) -> bool;

    /// The raw value given to the option, if any.
    fn value_of(&self, long: &str) -> Option<&str>;
}

impl ParsedOptions for HashMap<String, Option<String>> {
    fn present(&self, long: &str) -> bool {
        self.contains_key(long)
    }

    fn value_of(&self, long: &str) -> Option<&str> {
        self.get(long).and_then(|value| value.as_deref())
    }
}

/// The failure to apply the parsed Cli onto a receiver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The receiver is not an instance of the type the descriptors were created for.
    #[error("receiver is not a {expected}.")]
    InvalidReceiver {
        /// The expected receiver type.
        expected: &'static str,
    },
    /// A required option is absent from the Cli.
    #[error("missing required option '{option}'.")]
    RequiredOptionMissing {
        /// The long name of the option.
        option: String,
    },
    /// The value of an option could not be converted.
    #[error("option '{option}': {source}")]
    Conversion {
        /// The long name of the option.
        option: String,
        /// The underlying conversion failure.
        #[source]
        source: ConversionError,
    },
}

/// Applies the parsed Cli onto a receiver, one [`FieldDescriptor`] at a time.
///
/// A failure leaves the fields written so far in place; there is no rollback.
///
/// ### Example
/// ```
/// # use optionable_builder as optionable;
/// use optionable::{BindingEngine, DescriptorFactory, OptionDeclaration, Optionable, Schema};
/// use std::collections::HashMap;
///
/// #[derive(Default)]
/// struct Config {
///     count: i32,
/// }
///
/// impl Optionable for Config {
///     fn declare(schema: &mut Schema<Self>) {
///         schema.declare(OptionDeclaration::new("count", |c: &mut Config| &mut c.count));
///     }
/// }
///
/// let descriptors = DescriptorFactory::default().create::<Config>().unwrap();
/// let parsed = HashMap::from([("count".to_string(), Some("5".to_string()))]);
/// let mut config = Config::default();
/// BindingEngine::default().apply_to(&descriptors, &parsed, &mut config).unwrap();
/// assert_eq!(config.count, 5);
/// ```
pub struct BindingEngine<'r> {
    registry: &'r ConversionRegistry,
}

impl Default for BindingEngine<'static> {
    fn default() -> Self {
        Self::new(ConversionRegistry::global())
    }
}

impl<'r> BindingEngine<'r> {
    /// Create an engine converting values with `registry`.
    pub fn new(registry: &'r ConversionRegistry) -> Self {
        Self { registry }
    }

    /// Apply the `parsed` Cli onto an arbitrary `receiver`.
    ///
    /// Fails with [`BindingError::InvalidReceiver`] unless the `receiver` is a `C`.
    pub fn apply<C: Any>(
        &self,
        descriptors: &[FieldDescriptor<C>],
        parsed: &(impl ParsedOptions + ?Sized),
        receiver: &mut dyn Any,
    ) -> Result<(), BindingError> {
        match receiver.downcast_mut::<C>() {
            Some(target) => self.apply_to(descriptors, parsed, target),
            None => Err(BindingError::InvalidReceiver {
                expected: std::any::type_name::<C>(),
            }),
        }
    }

    /// Apply the `parsed` Cli onto the `target`, in descriptor order.
    ///
    /// * A present flag writes `true`.
    /// * A present value option writes its converted value (a converter yielding no value skips the write).
    /// * An absent required option fails with [`BindingError::RequiredOptionMissing`].
    pub fn apply_to<C>(
        &self,
        descriptors: &[FieldDescriptor<C>],
        parsed: &(impl ParsedOptions + ?Sized),
        target: &mut C,
    ) -> Result<(), BindingError> {
        for descriptor in descriptors {
            let long = descriptor.long();

            if parsed.present(long) {
                let value = if descriptor.is_flag() {
                    Some(Value::new(true))
                } else {
                    let token = parsed.value_of(long).ok_or_else(|| BindingError::Conversion {
                        option: long.to_string(),
                        source: ConversionError::MissingValue {
                            option: long.to_string(),
                        },
                    })?;
                    self.registry
                        .convert(descriptor.value_type(), token)
                        .map_err(|source| BindingError::Conversion {
                            option: long.to_string(),
                            source,
                        })?
                };

                match value {
                    Some(value) => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Writing {value:?} onto '{long}'.");
                        }

                        descriptor
                            .assign(target, value)
                            .map_err(|source| BindingError::Conversion {
                                option: long.to_string(),
                                source,
                            })?;
                    }
                    None => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("Skipping '{long}': no value converted.");
                        }
                    }
                }
            } else if descriptor.required() {
                return Err(BindingError::RequiredOptionMissing {
                    option: long.to_string(),
                });
            }
        }

        Ok(())
    }
}
