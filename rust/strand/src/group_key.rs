use std::fmt;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use strand_value::{Plain, Value};

/// Hashable key of a group.
///
/// Built from a selected [`Value`] by [`GroupKey::from_value`]: scalars keep
/// their kind (integral floats fold into `Int`, so `1` and `1.0` share a
/// group), tuples stay structured, and values that cannot be hashed (lists,
/// sets, mappings, records) are replaced by their canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    /// `null`, also used for elements lacking the selected field.
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat<f64>),
    Str(String),
    Tuple(Vec<GroupKey>),
    /// Canonical text of an unhashable value.
    Canonical(String),
    /// Text of a library scalar or an opaque object.
    Other(String),
}

impl GroupKey {
    pub fn from_value(value: &Value) -> GroupKey {
        match value {
            Value::Null => GroupKey::Null,
            Value::Bool(b) => GroupKey::Bool(*b),
            Value::Int(i) => GroupKey::Int(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    GroupKey::Int(*f as i64)
                } else {
                    GroupKey::Float(OrderedFloat(*f))
                }
            }
            Value::Str(s) => GroupKey::Str(s.clone()),
            Value::Tuple(items) => GroupKey::Tuple(items.iter().map(GroupKey::from_value).collect()),
            Value::List(_) | Value::Set(_) | Value::Map(_) | Value::Record(_) => {
                GroupKey::Canonical(value.to_string())
            }
            Value::Date(_)
            | Value::DateTime(_)
            | Value::Time(_)
            | Value::Decimal(_)
            | Value::Uuid(_)
            | Value::Object(_) => GroupKey::Other(value.to_string()),
        }
    }

    /// Plain form of the key, used as a mapping key in structural output.
    pub fn to_plain(&self) -> Plain {
        match self {
            GroupKey::Null => Plain::Null,
            GroupKey::Bool(b) => Plain::Bool(*b),
            GroupKey::Int(i) => Plain::Int(*i),
            GroupKey::Float(f) => Plain::Float(f.0),
            GroupKey::Str(s) | GroupKey::Canonical(s) | GroupKey::Other(s) => Plain::Str(s.clone()),
            GroupKey::Tuple(items) => Plain::List(items.iter().map(GroupKey::to_plain).collect()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Null => write!(f, "null"),
            GroupKey::Bool(b) => write!(f, "{b}"),
            GroupKey::Int(i) => write!(f, "{i}"),
            GroupKey::Float(v) => write!(f, "{:?}", v.0),
            GroupKey::Str(s) | GroupKey::Canonical(s) | GroupKey::Other(s) => f.write_str(s),
            GroupKey::Tuple(items) => write!(f, "({})", items.iter().join(", ")),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey::Str(s.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(s: String) -> Self {
        GroupKey::Str(s)
    }
}

impl From<i64> for GroupKey {
    fn from(i: i64) -> Self {
        GroupKey::Int(i)
    }
}

impl From<i32> for GroupKey {
    fn from(i: i32) -> Self {
        GroupKey::Int(i.into())
    }
}

impl From<bool> for GroupKey {
    fn from(b: bool) -> Self {
        GroupKey::Bool(b)
    }
}

impl From<&Value> for GroupKey {
    fn from(value: &Value) -> Self {
        GroupKey::from_value(value)
    }
}
