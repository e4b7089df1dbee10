//! Projection of Rust values into the dynamic [`Value`] model.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fastnum::D128;
use uuid::Uuid;

use crate::value::Value;

/// Types that can present themselves as a [`Value`].
///
/// Field selectors, identity grouping keys and structural conversion all work
/// on this projection, so any element type implementing `AsValue` can be
/// grouped, averaged and converted.
pub trait AsValue {
    fn as_value(&self) -> Value;
}

impl AsValue for Value {
    fn as_value(&self) -> Value {
        self.clone()
    }
}

impl<T: AsValue + ?Sized> AsValue for &T {
    fn as_value(&self) -> Value {
        (**self).as_value()
    }
}

impl<T: AsValue + ?Sized> AsValue for Box<T> {
    fn as_value(&self) -> Value {
        (**self).as_value()
    }
}

impl AsValue for () {
    fn as_value(&self) -> Value {
        Value::Null
    }
}

impl AsValue for bool {
    fn as_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! as_value_int {
    ($($t:ty),*) => {
        $(
            impl AsValue for $t {
                fn as_value(&self) -> Value {
                    Value::Int(i64::from(*self))
                }
            }
        )*
    };
}

as_value_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! as_value_wide_int {
    ($($t:ty),*) => {
        $(
            impl AsValue for $t {
                fn as_value(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(v) => Value::Int(v),
                        Err(_) => Value::Float(*self as f64),
                    }
                }
            }
        )*
    };
}

as_value_wide_int!(u64, usize, isize);

impl AsValue for f32 {
    fn as_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl AsValue for f64 {
    fn as_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl AsValue for char {
    fn as_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl AsValue for str {
    fn as_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl AsValue for String {
    fn as_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl AsValue for NaiveDate {
    fn as_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl AsValue for NaiveDateTime {
    fn as_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl AsValue for NaiveTime {
    fn as_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl AsValue for D128 {
    fn as_value(&self) -> Value {
        Value::Decimal(*self)
    }
}

impl AsValue for Uuid {
    fn as_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, AsValue::as_value)
    }
}

impl<T: AsValue> AsValue for [T] {
    fn as_value(&self) -> Value {
        Value::list(self.iter().map(AsValue::as_value))
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_value(&self) -> Value {
        self.as_slice().as_value()
    }
}

impl<T: AsValue> AsValue for VecDeque<T> {
    fn as_value(&self) -> Value {
        Value::list(self.iter().map(AsValue::as_value))
    }
}

impl<T: AsValue> AsValue for BTreeSet<T> {
    fn as_value(&self) -> Value {
        Value::set(self.iter().map(AsValue::as_value))
    }
}

impl<T: AsValue, S> AsValue for HashSet<T, S> {
    fn as_value(&self) -> Value {
        Value::set(self.iter().map(AsValue::as_value))
    }
}

impl<K: AsValue, V: AsValue> AsValue for BTreeMap<K, V> {
    fn as_value(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.as_value(), v.as_value())))
    }
}

impl<K: AsValue, V: AsValue, S> AsValue for HashMap<K, V, S> {
    fn as_value(&self) -> Value {
        Value::map(self.iter().map(|(k, v)| (k.as_value(), v.as_value())))
    }
}

impl<A: AsValue, B: AsValue> AsValue for (A, B) {
    fn as_value(&self) -> Value {
        Value::tuple([self.0.as_value(), self.1.as_value()])
    }
}

impl<A: AsValue, B: AsValue, C: AsValue> AsValue for (A, B, C) {
    fn as_value(&self) -> Value {
        Value::tuple([self.0.as_value(), self.1.as_value(), self.2.as_value()])
    }
}

impl AsValue for serde_json::Value {
    fn as_value(&self) -> Value {
        Value::from_json(self)
    }
}
