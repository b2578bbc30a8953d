use std::any::Any;
use std::rc::Rc;

use crate::constant::DEFAULT_DESCRIPTION;
use crate::convert::ConversionError;
use crate::model::{Value, ValueType};

/// A configuration type whose fields bind to Cli options.
///
/// Typically implemented via `#[derive(Optionable)]`.
/// A manual implementation declares each optionable field on the [`Schema`], and optionally a parent configuration.
///
/// ### Example
/// ```
/// # use optionable_builder as optionable;
/// use optionable::{OptionDeclaration, Optionable, Schema};
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
/// ```
pub trait Optionable: Any + Sized {
    /// Declare the optionable fields of this type.
    fn declare(schema: &mut Schema<Self>);

    /// The schema of this type.
    fn schema() -> Schema<Self> {
        let mut schema = Schema::new();
        Self::declare(&mut schema);
        schema
    }
}

type Assign<C> = Rc<dyn Fn(&mut C, Value) -> Result<(), ConversionError>>;

/// The capability to write a converted [`Value`] onto one field of a `C`.
pub struct Accessor<C> {
    assign: Assign<C>,
}

impl<C: 'static> Accessor<C> {
    /// Create an accessor for the field projected by `field`.
    pub fn new<T: Any>(field: impl Fn(&mut C) -> &mut T + 'static) -> Self {
        Self {
            assign: Rc::new(move |target: &mut C, value: Value| {
                let slot = field(target);
                let value = value.downcast::<T>().map_err(|v| ConversionError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found: v.type_name(),
                })?;
                *slot = value;
                Ok(())
            }),
        }
    }

    /// Lift this accessor onto an outer type `D`, which embeds a `C`.
    pub(crate) fn project<D: 'static>(self, outer: Rc<dyn Fn(&mut D) -> &mut C>) -> Accessor<D> {
        let Accessor { assign } = self;
        Accessor {
            assign: Rc::new(move |target: &mut D, value: Value| assign(outer(target), value)),
        }
    }
}

impl<C> Accessor<C> {
    /// Write `value` onto the field of `target`.
    pub fn assign(&self, target: &mut C, value: Value) -> Result<(), ConversionError> {
        (self.assign)(target, value)
    }
}

impl<C> Clone for Accessor<C> {
    fn clone(&self) -> Self {
        Self {
            assign: Rc::clone(&self.assign),
        }
    }
}

impl<C> std::fmt::Debug for Accessor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Accessor[{}]", std::any::type_name::<C>())
    }
}

/// The declaration of one optionable field.
///
/// Names left undeclared are derived from the field identifier during descriptor creation.
#[derive(Debug)]
pub struct OptionDeclaration<C> {
    pub(crate) field: &'static str,
    pub(crate) value_type: ValueType,
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) description: String,
    pub(crate) required: bool,
    pub(crate) accessor: Accessor<C>,
}

impl<C: 'static> OptionDeclaration<C> {
    /// Declare the field named `field`, reached via the `accessor` projection.
    /// The declared type is that of the projected field.
    pub fn new<T: Any>(field: &'static str, accessor: impl Fn(&mut C) -> &mut T + 'static) -> Self {
        Self {
            field,
            value_type: ValueType::of::<T>(),
            short: None,
            long: None,
            description: DEFAULT_DESCRIPTION.to_string(),
            required: false,
            accessor: Accessor::new(accessor),
        }
    }

    /// Set the explicit short name.
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Set the explicit long name.
    /// An empty name is equivalent to leaving it undeclared.
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long.replace(long.into());
        self
    }

    /// Document the option.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark whether the option must be present on the Cli.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    fn project<D: 'static>(self, outer: Rc<dyn Fn(&mut D) -> &mut C>) -> OptionDeclaration<D> {
        let OptionDeclaration {
            field,
            value_type,
            short,
            long,
            description,
            required,
            accessor,
        } = self;

        OptionDeclaration {
            field,
            value_type,
            short,
            long,
            description,
            required,
            accessor: accessor.project(outer),
        }
    }
}

impl<C> OptionDeclaration<C> {
    /// The field identifier.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The declared field type.
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }
}

/// The optionable fields declared by one type of a configuration lineage.
#[derive(Debug)]
pub struct Level<C> {
    owner: &'static str,
    declarations: Vec<OptionDeclaration<C>>,
}

impl<C: 'static> Level<C> {
    fn new(owner: &'static str) -> Self {
        Self {
            owner,
            declarations: Vec::default(),
        }
    }

    fn project<D: 'static>(self, outer: &Rc<dyn Fn(&mut D) -> &mut C>) -> Level<D> {
        let Level {
            owner,
            declarations,
        } = self;

        Level {
            owner,
            declarations: declarations
                .into_iter()
                .map(|declaration| declaration.project(Rc::clone(outer)))
                .collect(),
        }
    }
}

impl<C> Level<C> {
    /// The name of the type declaring these fields.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// The declarations, in declaration order.
    pub fn declarations(&self) -> &[OptionDeclaration<C>] {
        &self.declarations
    }

    pub(crate) fn consume(self) -> (&'static str, Vec<OptionDeclaration<C>>) {
        (self.owner, self.declarations)
    }
}

/// The declarative option schema of a configuration type `C`.
///
/// Levels are ordered from the root ancestor down to `C` itself, so that ancestors always claim their names first.
#[derive(Debug)]
pub struct Schema<C> {
    ancestors: Vec<Level<C>>,
    own: Level<C>,
}

impl<C: 'static> Default for Schema<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Schema<C> {
    /// Create an empty schema for `C`.
    pub fn new() -> Self {
        Self {
            ancestors: Vec::default(),
            own: Level::new(std::any::type_name::<C>()),
        }
    }

    /// Declare an optionable field of `C`.
    pub fn declare(&mut self, declaration: OptionDeclaration<C>) -> &mut Self {
        self.own.declarations.push(declaration);
        self
    }

    /// Compose the parent configuration `P`, embedded in `C` via the `parent` projection.
    ///
    /// The parent's levels precede the levels of `C`, regardless of the order of declaration.
    pub fn inherit<P: Optionable>(
        &mut self,
        parent: impl Fn(&mut C) -> &mut P + 'static,
    ) -> &mut Self {
        let outer: Rc<dyn Fn(&mut C) -> &mut P> = Rc::new(parent);

        for level in P::schema().into_levels() {
            self.ancestors.push(level.project(&outer));
        }

        self
    }

    /// Consume the schema into its levels, root ancestor first.
    pub fn into_levels(self) -> Vec<Level<C>> {
        let Schema { mut ancestors, own } = self;
        ancestors.push(own);
        ancestors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Base {
        verbose: bool,
    }

    impl Optionable for Base {
        fn declare(schema: &mut Schema<Self>) {
            schema.declare(
                OptionDeclaration::new("verbose", |b: &mut Base| &mut b.verbose)
                    .description("Indicates if the program output should be verbose."),
            );
        }
    }

    #[derive(Debug, Default)]
    struct Derived {
        count: i32,
        base: Base,
    }

    impl Optionable for Derived {
        fn declare(schema: &mut Schema<Self>) {
            schema
                .declare(
                    OptionDeclaration::new("count", |d: &mut Derived| &mut d.count)
                        .short('n')
                        .long("number")
                        .required(true),
                )
                .inherit(|d: &mut Derived| &mut d.base);
        }
    }

    #[test]
    fn declaration_defaults() {
        let declaration = OptionDeclaration::new("count", |d: &mut Derived| &mut d.count);

        assert_eq!(declaration.field(), "count");
        assert_eq!(declaration.value_type(), &ValueType::of::<i32>());
        assert_eq!(declaration.short, None);
        assert_eq!(declaration.long, None);
        assert_eq!(declaration.description, "Description not provided.");
        assert!(!declaration.required);
    }

    #[test]
    fn declaration_explicit() {
        let declaration = OptionDeclaration::new("count", |d: &mut Derived| &mut d.count)
            .short('x')
            .short('n')
            .long("number")
            .description("How many.")
            .required(true);

        assert_eq!(declaration.short, Some('n'));
        assert_eq!(declaration.long, Some("number".to_string()));
        assert_eq!(declaration.description, "How many.");
        assert!(declaration.required);
    }

    #[test]
    fn accessor_assign() {
        let accessor = Accessor::new(|d: &mut Derived| &mut d.count);
        let mut derived = Derived::default();

        accessor.assign(&mut derived, Value::new(5i32)).unwrap();
        assert_eq!(derived.count, 5);
    }

    #[test]
    fn accessor_mismatch() {
        let accessor = Accessor::new(|d: &mut Derived| &mut d.count);
        let mut derived = Derived::default();

        let error = accessor
            .assign(&mut derived, Value::new(5i64))
            .unwrap_err();
        assert_eq!(
            error,
            ConversionError::TypeMismatch {
                expected: "i32",
                found: "i64",
            }
        );
        assert_eq!(derived.count, 0);
    }

    // No lifetime bound on `C`, as for the descriptors and the binding engine.
    fn assign_through<C>(
        accessor: &Accessor<C>,
        target: &mut C,
        value: Value,
    ) -> Result<(), ConversionError> {
        accessor.assign(target, value)
    }

    #[test]
    fn accessor_assign_unbounded() {
        let accessor = Accessor::new(|d: &mut Derived| &mut d.count);
        let mut derived = Derived::default();

        assign_through(&accessor, &mut derived, Value::new(3i32)).unwrap();
        assert_eq!(derived.count, 3);
    }

    #[test]
    fn schema_levels() {
        let levels = Derived::schema().into_levels();

        assert_eq!(levels.len(), 2);
        assert!(levels[0].owner().ends_with("Base"));
        assert_eq!(
            levels[0]
                .declarations()
                .iter()
                .map(OptionDeclaration::field)
                .collect::<Vec<_>>(),
            vec!["verbose"]
        );
        assert!(levels[1].owner().ends_with("Derived"));
        assert_eq!(
            levels[1]
                .declarations()
                .iter()
                .map(OptionDeclaration::field)
                .collect::<Vec<_>>(),
            vec!["count"]
        );
    }

    #[test]
    fn schema_projection() {
        let mut levels = Derived::schema().into_levels();
        let (_, mut declarations) = levels.remove(0).consume();
        let declaration = declarations.remove(0);
        let mut derived = Derived::default();

        declaration.accessor.assign(&mut derived, Value::new(true)).unwrap();
        assert!(derived.base.verbose);
    }

    #[test]
    fn schema_empty() {
        let levels = Schema::<Base>::new().into_levels();
        assert_eq!(levels.len(), 1);
        assert!(levels[0].declarations().is_empty());
    }
}
