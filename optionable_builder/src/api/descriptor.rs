use crate::api::declaration::{Accessor, OptionDeclaration};
use crate::convert::{ConversionError, ConversionRegistry};
use crate::model::{Value, ValueType};
use crate::naming::{NameAllocator, NameError};

/// The resolved, immutable representation of one bound option.
pub struct FieldDescriptor<C> {
    owner: &'static str,
    field: &'static str,
    value_type: ValueType,
    short: char,
    long: String,
    description: String,
    required: bool,
    flag: bool,
    accessor: Accessor<C>,
}

impl<C> FieldDescriptor<C> {
    /// The name of the type declaring the field.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// The field identifier.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The declared field type.
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// The short option name (`-c`).
    pub fn short(&self) -> char {
        self.short
    }

    /// The long option name (`--count`).
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The option documentation.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the option must be present on the Cli.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Whether the option is a flag: it takes no value, and its presence sets the field to `true`.
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    pub(crate) fn assign(&self, target: &mut C, value: Value) -> Result<(), ConversionError> {
        self.accessor.assign(target, value)
    }
}

impl<C> std::fmt::Debug for FieldDescriptor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.flag { "Flag" } else { "Value" };
        let required = if self.required { ", required" } else { "" };

        write!(
            f,
            "{kind}[{owner}::{field}: {t}, -{short}, --{long}{required}]",
            owner = self.owner,
            field = self.field,
            t = self.value_type,
            short = self.short,
            long = self.long,
        )
    }
}

/// Builds [`FieldDescriptor`]s, sharing one [`NameAllocator`] across all the fields of a binding pass.
pub struct DescriptorBuilder<'a> {
    allocator: &'a mut NameAllocator,
    registry: &'a ConversionRegistry,
}

impl<'a> DescriptorBuilder<'a> {
    /// Create a builder claiming names from `allocator`, and detecting flags with `registry`.
    pub fn new(allocator: &'a mut NameAllocator, registry: &'a ConversionRegistry) -> Self {
        Self {
            allocator,
            registry,
        }
    }

    /// Build the descriptor for `declaration`, declared by the type named `owner`.
    ///
    /// The short name is resolved before the long name; either may fail on a name conflict.
    pub fn build<C>(
        &mut self,
        owner: &'static str,
        declaration: OptionDeclaration<C>,
    ) -> Result<FieldDescriptor<C>, NameError> {
        let OptionDeclaration {
            field,
            value_type,
            short,
            long,
            description,
            required,
            accessor,
        } = declaration;
        let short = short.map(String::from);
        let short = self.allocator.resolve_short(short.as_deref(), field)?;
        let long = self.allocator.resolve_long(long.as_deref(), field)?;
        let flag = self.registry.is_flag(&value_type);

        Ok(FieldDescriptor {
            owner,
            field,
            value_type,
            short,
            long,
            description,
            required,
            flag,
            accessor,
        })
    }
}
