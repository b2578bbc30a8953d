use std::any::{Any, TypeId};

/// The declared scalar type of an optionable field.
///
/// Conversion dispatch compares the [`TypeId`]; the type name is kept for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ValueType {
    id: TypeId,
    name: &'static str,
}

impl ValueType {
    /// The value type of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Check whether this value type is precisely `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// The [`TypeId`] of this value type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type name of this value type (ex: `i32`).
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ValueType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ValueType {}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A converted option value, waiting to be written onto its field.
pub struct Value {
    inner: Box<dyn Any>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a typed value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// The type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Unwrap into a `T`, or hand back the value when it holds some other type.
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        let Value { inner, type_name } = self;

        match inner.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(inner) => Err(Value { inner, type_name }),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Value[{}]", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type() {
        let value_type = ValueType::of::<i32>();
        assert!(value_type.is::<i32>());
        assert!(!value_type.is::<i64>());
        assert_eq!(value_type.name(), "i32");
        assert_eq!(value_type, ValueType::of::<i32>());
        assert_ne!(value_type, ValueType::of::<u32>());
        assert_eq!(value_type.to_string(), "i32");
    }

    #[test]
    fn value_downcast() {
        let value = Value::new(5i64);
        assert!(value.is::<i64>());
        assert_eq!(value.type_name(), "i64");
        assert_eq!(value.downcast::<i64>().unwrap(), 5);
    }

    #[test]
    fn value_downcast_mismatch() {
        let value = Value::new("abc".to_string());
        let value = value.downcast::<i32>().unwrap_err();
        assert!(value.type_name().ends_with("String"));
        assert_eq!(value.downcast::<String>().unwrap(), "abc");
    }
}
