use std::any::Any;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::model::{Value, ValueType};

static GLOBAL: OnceLock<ConversionRegistry> = OnceLock::new();

/// The failure to turn a raw Cli token into a typed value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    /// No registered conversion supports the type.
    #[error("no conversion registered for type {type_name}.")]
    Unsupported {
        /// The unsupported type.
        type_name: &'static str,
    },
    /// The token does not parse as the type.
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidValue {
        /// The raw token.
        token: String,
        /// The target type.
        type_name: &'static str,
    },
    /// The converted value does not fit the field it was meant for.
    #[error("cannot assign a {found} value to a {expected} field.")]
    TypeMismatch {
        /// The field type.
        expected: &'static str,
        /// The converted value type.
        found: &'static str,
    },
    /// The option was present, but no value was provided for it.
    #[error("no value provided for option '{option}'.")]
    MissingValue {
        /// The long name of the option.
        option: String,
    },
}

type Predicate = Box<dyn Fn(&ValueType) -> bool + Send + Sync>;
type Converter = Box<dyn Fn(&str) -> Result<Option<Value>, ConversionError> + Send + Sync>;

/// A (type predicate, converter) pair of the [`ConversionRegistry`].
pub struct Conversion {
    name: &'static str,
    flag: bool,
    predicate: Predicate,
    converter: Converter,
}

impl Conversion {
    /// Create a conversion from an arbitrary predicate and converter.
    ///
    /// A converter may produce `Ok(None)`, in which case the binding skips the write.
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&ValueType) -> bool + Send + Sync + 'static,
        converter: impl Fn(&str) -> Result<Option<Value>, ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            flag: false,
            predicate: Box::new(predicate),
            converter: Box::new(converter),
        }
    }

    /// Create an exact-type conversion for `T`, parsed via [`std::str::FromStr`].
    pub fn parsed<T>() -> Self
    where
        T: FromStr + Any,
    {
        Self::new(
            std::any::type_name::<T>(),
            |value_type: &ValueType| value_type.is::<T>(),
            |token: &str| {
                T::from_str(token)
                    .map(|value| Some(Value::new(value)))
                    .map_err(|_| ConversionError::InvalidValue {
                        token: token.to_string(),
                        type_name: std::any::type_name::<T>(),
                    })
            },
        )
    }

    fn flag() -> Self {
        Self {
            flag: true,
            ..Self::new(
                "bool",
                |value_type: &ValueType| value_type.is::<bool>(),
                |_token: &str| Ok(Some(Value::new(true))),
            )
        }
    }

    /// The name of this conversion (for built-ins, the type name).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check whether this conversion applies to `value_type`.
    pub fn supports(&self, value_type: &ValueType) -> bool {
        (self.predicate)(value_type)
    }

    /// Convert the `token`.
    pub fn convert(&self, token: &str) -> Result<Option<Value>, ConversionError> {
        (self.converter)(token)
    }
}

impl std::fmt::Debug for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Conversion[{}, flag={}]", self.name, self.flag)
    }
}

/// The ordered set of conversions from Cli tokens into typed values.
///
/// The first conversion that supports a type is the one used.
/// The built-in set is, in order: `bool` (flags only), `i32`, `i64`, `f32`, `f64`, `String`.
///
/// ### Example
/// ```
/// # use optionable_builder as optionable;
/// use optionable::{ConversionRegistry, ValueType};
///
/// let registry = ConversionRegistry::builtin().register::<u8>();
/// let value = registry.convert(&ValueType::of::<u8>(), "7").unwrap().unwrap();
/// assert_eq!(value.downcast::<u8>().unwrap(), 7);
/// ```
#[derive(Debug)]
pub struct ConversionRegistry {
    conversions: Vec<Conversion>,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConversionRegistry {
    /// A registry without any conversions.
    pub fn empty() -> Self {
        Self {
            conversions: Vec::default(),
        }
    }

    /// The registry of built-in conversions.
    pub fn builtin() -> Self {
        Self {
            conversions: vec![
                Conversion::flag(),
                Conversion::parsed::<i32>(),
                Conversion::parsed::<i64>(),
                Conversion::parsed::<f32>(),
                Conversion::parsed::<f64>(),
                Conversion::new(
                    "String",
                    |value_type: &ValueType| value_type.is::<String>(),
                    |token: &str| Ok(Some(Value::new(token.to_string()))),
                ),
            ],
        }
    }

    /// Register an exact-type conversion for `T`, parsed via [`std::str::FromStr`].
    pub fn register<T>(self) -> Self
    where
        T: FromStr + Any,
    {
        self.register_with(Conversion::parsed::<T>())
    }

    /// Register an arbitrary conversion.
    /// Conversions registered earlier take precedence.
    pub fn register_with(mut self, conversion: Conversion) -> Self {
        self.conversions.push(conversion);
        self
    }

    /// The process-wide registry.
    /// Initialized with [`ConversionRegistry::builtin`], unless another registry was installed beforehand.
    pub fn global() -> &'static ConversionRegistry {
        GLOBAL.get_or_init(ConversionRegistry::builtin)
    }

    /// Install this registry as the process-wide registry.
    ///
    /// The process-wide registry is immutable once initialized; a late install hands the registry back.
    pub fn install(self) -> Result<(), ConversionRegistry> {
        GLOBAL.set(self)
    }

    /// Check whether some conversion applies to `value_type`.
    pub fn supports(&self, value_type: &ValueType) -> bool {
        self.find(value_type).is_some()
    }

    /// Check whether `value_type` is a flag (it takes no Cli value).
    pub fn is_flag(&self, value_type: &ValueType) -> bool {
        self.conversions
            .iter()
            .any(|conversion| conversion.flag && conversion.supports(value_type))
    }

    /// Convert the `token` into a `value_type` value.
    pub fn convert(
        &self,
        value_type: &ValueType,
        token: &str,
    ) -> Result<Option<Value>, ConversionError> {
        match self.find(value_type) {
            Some(conversion) => conversion.convert(token),
            None => Err(ConversionError::Unsupported {
                type_name: value_type.name(),
            }),
        }
    }

    fn find(&self, value_type: &ValueType) -> Option<&Conversion> {
        self.conversions
            .iter()
            .find(|conversion| conversion.supports(value_type))
    }
}
