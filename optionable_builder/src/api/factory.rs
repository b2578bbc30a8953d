use crate::api::declaration::Optionable;
use crate::api::descriptor::{DescriptorBuilder, FieldDescriptor};
use crate::convert::ConversionRegistry;
use crate::naming::{NameAllocator, NameError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Creates the ordered [`FieldDescriptor`]s of a configuration type.
///
/// Each call to [`DescriptorFactory::create`] is a fresh binding pass, with its own [`NameAllocator`].
///
/// ### Example
/// ```
/// # use optionable_builder as optionable;
/// use optionable::{DescriptorFactory, OptionDeclaration, Optionable, Schema};
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
/// assert_eq!(descriptors.len(), 1);
/// assert_eq!(descriptors[0].short(), 'c');
/// assert_eq!(descriptors[0].long(), "count");
/// ```
pub struct DescriptorFactory<'r> {
    registry: &'r ConversionRegistry,
}

impl Default for DescriptorFactory<'static> {
    fn default() -> Self {
        Self::new(ConversionRegistry::global())
    }
}

impl<'r> DescriptorFactory<'r> {
    /// Create a factory detecting flags with `registry`.
    pub fn new(registry: &'r ConversionRegistry) -> Self {
        Self { registry }
    }

    /// Create the descriptors of every optionable field of `C`, root ancestor fields first.
    ///
    /// Names are unique across the whole lineage of `C`.
    /// Any naming error aborts the entire walk.
    pub fn create<C: Optionable>(&self) -> Result<Vec<FieldDescriptor<C>>, NameError> {
        let mut allocator = NameAllocator::new();
        let mut builder = DescriptorBuilder::new(&mut allocator, self.registry);
        let mut descriptors = Vec::default();

        for level in C::schema().into_levels() {
            let (owner, declarations) = level.consume();

            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Walking {owner} with {n} optionable field(s).",
                    n = declarations.len()
                );
            }

            for declaration in declarations {
                descriptors.push(builder.build(owner, declaration)?);
            }
        }

        Ok(descriptors)
    }
}
