use strand_common::{Error, Result};
use strand_value::{AsValue, Value};

/// How to derive a value from each element, for grouping and aggregation.
pub enum Selector<'a, T> {
    /// The element itself.
    Identity,
    /// A named field: a text key for mapping elements, an attribute for
    /// records and objects.
    Field(String),
    /// An arbitrary projection.
    Callback(Box<dyn Fn(&T) -> Value + 'a>),
}

impl<'a, T> Selector<'a, T> {
    pub fn field(name: impl Into<String>) -> Selector<'a, T> {
        Selector::Field(name.into())
    }

    pub fn with<V: Into<Value>>(f: impl Fn(&T) -> V + 'a) -> Selector<'a, T> {
        Selector::Callback(Box::new(move |item: &T| -> Value { f(item).into() }))
    }

    /// Selected value of an element, or the lookup error for a missing field.
    pub(crate) fn select(&self, item: &T) -> Result<Value>
    where
        T: AsValue,
    {
        match self {
            Selector::Identity => Ok(item.as_value()),
            Selector::Field(name) => item.as_value().lookup(name),
            Selector::Callback(f) => Ok(f(item)),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Selector::Identity => "element".to_string(),
            Selector::Field(name) => format!("field '{name}'"),
            Selector::Callback(_) => "callback result".to_string(),
        }
    }
}

impl<T> Default for Selector<'_, T> {
    fn default() -> Self {
        Selector::Identity
    }
}

impl<T> From<&str> for Selector<'_, T> {
    fn from(name: &str) -> Self {
        Selector::Field(name.to_string())
    }
}

impl<T> From<String> for Selector<'_, T> {
    fn from(name: String) -> Self {
        Selector::Field(name)
    }
}

/// Selector described by a dynamic value: `Null` selects the element itself,
/// text names a field. Any other kind is rejected with `InvalidArgument`.
impl<T> TryFrom<Value> for Selector<'_, T> {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Selector::Identity),
            Value::Str(name) => Ok(Selector::Field(name)),
            other => Err(Error::invalid_arg(
                "selector",
                format!(
                    "expected nothing, a field name or a callback, got '{}'",
                    other.type_name()
                ),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_value() {
        assert!(matches!(
            Selector::<i32>::try_from(Value::Null).unwrap(),
            Selector::Identity
        ));
        assert!(matches!(
            Selector::<i32>::try_from(Value::from("price")).unwrap(),
            Selector::Field(name) if name == "price"
        ));
        for bad in [
            Value::Int(123),
            Value::list(["not", "allowed"]),
            Value::map([("not", "allowed")]),
        ] {
            let err = Selector::<i32>::try_from(bad).err().unwrap();
            assert!(err.is_invalid_arg());
        }
    }

    #[test]
    fn test_select() {
        let item = Value::map([("a", 1)]);
        assert_eq!(Selector::Identity.select(&item).unwrap(), item);
        assert_eq!(Selector::field("a").select(&item).unwrap(), Value::Int(1));
        assert!(Selector::field("b").select(&item).is_err());
        let doubled = Selector::with(|v: &Value| v.get("a").and_then(|a| a.as_f64()).map(|a| a * 2.0));
        assert_eq!(doubled.select(&item).unwrap(), Value::Float(2.0));
    }
}
