//! The dynamic value model.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fastnum::D128;
use strand_common::{Error, Result};
use uuid::Uuid;

use crate::inspect::Inspect;
use crate::record::Record;

/// Shared, interior-mutable storage of a compound value.
pub type Shared<T> = Rc<RefCell<T>>;

/// A dynamically typed value.
///
/// Scalars are held inline. Compound values (`List`, `Tuple`, `Set`, `Map`,
/// `Record`, `Object`) are handles: cloning a `Value` clones the handle, not
/// the contents, so two clones observe each other's mutations and have the
/// same [identity](Value::identity). This is what allows a value graph to
/// share nodes and to contain cycles.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    Decimal(D128),
    Uuid(Uuid),
    /// Ordered, growable sequence.
    List(Shared<Vec<Value>>),
    /// Fixed-size sequence.
    Tuple(Rc<[Value]>),
    /// Unordered collection of distinct values, kept in insertion order.
    Set(Shared<Vec<Value>>),
    /// Mapping with arbitrary keys, kept in insertion order.
    Map(Shared<Vec<(Value, Value)>>),
    /// Structured record with named fields.
    Record(Shared<Record>),
    /// Opaque object exposing a record-like surface.
    Object(Rc<dyn Inspect>),
}

impl Value {
    pub fn list<I>(items: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::List(Rc::new(RefCell::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    pub fn tuple<I>(items: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a set; values equal to an earlier one are dropped.
    pub fn set<I>(items: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Value::Set(Rc::new(RefCell::new(unique)))
    }

    /// Builds a mapping; a later entry with a key equal to an earlier one
    /// replaces the earlier value and keeps its position.
    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut map: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            insert_entry(&mut map, key.into(), value.into());
        }
        Value::Map(Rc::new(RefCell::new(map)))
    }

    pub fn record<I, S, V>(name: impl Into<String>, fields: I) -> Value
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Value>,
    {
        let mut record = Record::new(name);
        for (field, value) in fields {
            record.set(field, value);
        }
        Value::Record(Rc::new(RefCell::new(record)))
    }

    pub fn object(object: impl Inspect + 'static) -> Value {
        Value::Object(Rc::new(object))
    }

    /// Appends an item to a list, or adds it to a set if not already present.
    pub fn push(&self, item: impl Into<Value>) -> Result<()> {
        let item = item.into();
        match self {
            Value::List(items) => {
                items.borrow_mut().push(item);
                Ok(())
            }
            Value::Set(items) => {
                let present = items.borrow().contains(&item);
                if !present {
                    items.borrow_mut().push(item);
                }
                Ok(())
            }
            other => Err(Error::type_mismatch(
                "push",
                format!("'{}' is not a list or a set", other.type_name()),
            )),
        }
    }

    /// Inserts an entry into a mapping, or sets a field of a record.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        match self {
            Value::Map(entries) => {
                insert_entry(&mut entries.borrow_mut(), key, value.into());
                Ok(())
            }
            Value::Record(record) => match key {
                Value::Str(name) => {
                    record.borrow_mut().set(name, value);
                    Ok(())
                }
                other => Err(Error::type_mismatch(
                    "insert",
                    format!("record field names must be text, got '{}'", other.type_name()),
                )),
            },
            other => Err(Error::type_mismatch(
                "insert",
                format!("'{}' is not a mapping or a record", other.type_name()),
            )),
        }
    }

    /// Address of the shared node behind a compound value.
    ///
    /// Two values have the same identity iff they are handles to the same node.
    /// Scalars have no identity.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::List(items) | Value::Set(items) => Some(Rc::as_ptr(items) as *const () as usize),
            Value::Tuple(items) => Some(Rc::as_ptr(items) as *const () as usize),
            Value::Map(entries) => Some(Rc::as_ptr(entries) as *const () as usize),
            Value::Record(record) => Some(Rc::as_ptr(record) as *const () as usize),
            Value::Object(object) => Some(Rc::as_ptr(object) as *const () as usize),
            _ => None,
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::Bool(_) => "bool".into(),
            Value::Int(_) => "int".into(),
            Value::Float(_) => "float".into(),
            Value::Str(_) => "str".into(),
            Value::Date(_) => "date".into(),
            Value::DateTime(_) => "datetime".into(),
            Value::Time(_) => "time".into(),
            Value::Decimal(_) => "decimal".into(),
            Value::Uuid(_) => "uuid".into(),
            Value::List(_) => "list".into(),
            Value::Tuple(_) => "tuple".into(),
            Value::Set(_) => "set".into(),
            Value::Map(_) => "map".into(),
            Value::Record(record) => record.borrow().name().to_string(),
            Value::Object(object) => object.type_name().to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of ints and floats. Booleans are not numbers here.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Snapshot of the elements of a list, tuple or set.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) | Value::Set(items) => Some(items.borrow().clone()),
            Value::Tuple(items) => Some(items.to_vec()),
            _ => None,
        }
    }

    /// Value stored under a text key of a mapping.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(entries) => entries
                .borrow()
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// Resolves a named field.
    ///
    /// Mappings are looked up by text key and fail with `KeyMissing`. Records,
    /// objects and every other shape are looked up by attribute and fail with
    /// `AttributeMissing`.
    pub fn lookup(&self, name: &str) -> Result<Value> {
        match self {
            Value::Map(_) => self.get(name).ok_or_else(|| Error::key_missing(name)),
            Value::Record(record) => record
                .borrow()
                .field(name)
                .cloned()
                .ok_or_else(|| Error::attribute_missing(self.type_name(), name)),
            Value::Object(object) => object
                .attribute(name)
                .ok_or_else(|| Error::attribute_missing(object.type_name(), name)),
            other => Err(Error::attribute_missing(other.type_name(), name)),
        }
    }

    fn write_repr(&self, f: &mut fmt::Formatter<'_>, path: &mut Vec<usize>, nested: bool) -> fmt::Result {
        if let Some(id) = self.identity() {
            if path.contains(&id) {
                return match self {
                    Value::Map(_) => write!(f, "{{...}}"),
                    Value::Record(record) => write!(f, "{}(...)", record.borrow().name()),
                    Value::Tuple(_) => write!(f, "(...)"),
                    _ => write!(f, "[...]"),
                };
            }
            path.push(id);
        }

        let result = match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(s) if nested => write!(f, "{s:?}"),
            Value::Str(s) => f.write_str(s),
            Value::Date(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
            Value::List(items) => {
                write_seq(f, "[", "]", &items.borrow(), path)
            }
            Value::Tuple(items) if items.len() == 1 => {
                write!(f, "(")?;
                items[0].write_repr(f, path, true)?;
                write!(f, ",)")
            }
            Value::Tuple(items) => write_seq(f, "(", ")", items, path),
            Value::Set(items) => write_seq(f, "{", "}", &items.borrow(), path),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    key.write_repr(f, path, true)?;
                    write!(f, ": ")?;
                    value.write_repr(f, path, true)?;
                }
                write!(f, "}}")
            }
            Value::Record(record) => {
                let record = record.borrow();
                write!(f, "{}(", record.name())?;
                for (i, (name, value)) in record.fields().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}=")?;
                    value.write_repr(f, path, true)?;
                }
                write!(f, ")")
            }
            Value::Object(object) => write!(f, "{object}"),
        };

        if self.identity().is_some() {
            path.pop();
        }
        result
    }
}

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    close: &str,
    items: &[Value],
    path: &mut Vec<usize>,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        item.write_repr(f, path, true)?;
    }
    f.write_str(close)
}

fn insert_entry(entries: &mut Vec<(Value, Value)>, key: Value, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// Structural equality.
///
/// Handles to the same node are equal without looking inside. Ints and floats
/// compare numerically. Sets and mappings ignore order. Objects compare by
/// identity only. Cyclic graphs compare equal when they unfold the same way:
/// a pair of nodes met again while already being compared counts as equal.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.eq_on_path(other, &mut Vec::new())
    }
}

impl Value {
    fn eq_on_path(&self, other: &Value, path: &mut Vec<(usize, usize)>) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Time(a), Value::Time(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                Rc::ptr_eq(a, b)
                    || on_pair(node_id(a), node_id(b), path, |path| {
                        seq_eq(&a.borrow(), &b.borrow(), path)
                    })
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                Rc::ptr_eq(a, b) || on_pair(node_id(a), node_id(b), path, |path| seq_eq(a, b, path))
            }
            (Value::Set(a), Value::Set(b)) => {
                Rc::ptr_eq(a, b)
                    || on_pair(node_id(a), node_id(b), path, |path| {
                        let (a, b) = (a.borrow(), b.borrow());
                        a.len() == b.len()
                            && a.iter().all(|x| b.iter().any(|y| x.eq_on_path(y, path)))
                    })
            }
            (Value::Map(a), Value::Map(b)) => {
                Rc::ptr_eq(a, b)
                    || on_pair(node_id(a), node_id(b), path, |path| {
                        let (a, b) = (a.borrow(), b.borrow());
                        a.len() == b.len()
                            && a.iter().all(|(key, value)| {
                                b.iter().any(|(k, v)| {
                                    k.eq_on_path(key, path) && v.eq_on_path(value, path)
                                })
                            })
                    })
            }
            (Value::Record(a), Value::Record(b)) => {
                Rc::ptr_eq(a, b)
                    || on_pair(node_id(a), node_id(b), path, |path| {
                        let (a, b) = (a.borrow(), b.borrow());
                        a.name() == b.name()
                            && a.fields().len() == b.fields().len()
                            && a.fields()
                                .iter()
                                .zip(b.fields())
                                .all(|((na, va), (nb, vb))| na == nb && va.eq_on_path(vb, path))
                    })
            }
            (Value::Object(a), Value::Object(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
            _ => false,
        }
    }
}

fn node_id<T: ?Sized>(node: &Rc<T>) -> usize {
    Rc::as_ptr(node) as *const () as usize
}

/// Runs `f` with the pair of nodes pushed on the comparison path. A pair
/// already on the path is reported equal.
fn on_pair(
    a: usize,
    b: usize,
    path: &mut Vec<(usize, usize)>,
    f: impl FnOnce(&mut Vec<(usize, usize)>) -> bool,
) -> bool {
    if path.contains(&(a, b)) {
        return true;
    }
    path.push((a, b));
    let eq = f(path);
    path.pop();
    eq
}

fn seq_eq(a: &[Value], b: &[Value], path: &mut Vec<(usize, usize)>) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_on_path(y, path))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f, &mut Vec::new(), false)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f, &mut Vec::new(), true)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<D128> for Value {
    fn from(v: D128) -> Self {
        Value::Decimal(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<Record> for Value {
    fn from(v: Record) -> Self {
        Value::Record(Rc::new(RefCell::new(v)))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_common::ErrorKind;

    #[test]
    fn test_clone_shares_node() {
        let a = Value::list([1, 2]);
        let b = a.clone();
        b.push(3).unwrap();
        assert_eq!(a, Value::list([1, 2, 3]));
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), Value::list([1, 2, 3]).identity());
        assert_eq!(Value::Int(1).identity(), None);
    }

    #[test]
    fn test_set_keeps_distinct_values() {
        let s = Value::set([1, 2, 1, 3, 2]);
        assert_eq!(s.elements().unwrap().len(), 3);
        s.push(3).unwrap();
        assert_eq!(s.elements().unwrap().len(), 3);
        assert_eq!(s, Value::set([3, 2, 1]));
    }

    #[test]
    fn test_map_replaces_equal_key() {
        let m = Value::map([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(m.get("a"), Some(Value::Int(3)));
        match &m {
            Value::Map(entries) => assert_eq!(entries.borrow().len(), 2),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_numeric_equality() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_eq!(Value::Bool(true).as_f64(), None);
    }

    #[test]
    fn test_cyclic_equality() {
        let a = Value::list([1, 2]);
        a.push(a.clone()).unwrap();
        let b = Value::list([1, 2]);
        b.push(b.clone()).unwrap();
        let c = Value::list([1, 3]);
        c.push(c.clone()).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, Value::list([Value::from(1), Value::from(2), Value::list([1, 2])]));

        let m = Value::map([("id", 1)]);
        m.insert("me", m.clone()).unwrap();
        let n = Value::map([("id", 1)]);
        n.insert("me", n.clone()).unwrap();
        assert_eq!(m, n);

        let r = Value::record("Node", [("id", 1)]);
        r.insert("next", Value::list([r.clone()])).unwrap();
        let s = Value::record("Node", [("id", 1)]);
        s.insert("next", Value::list([s.clone()])).unwrap();
        assert_eq!(r, s);
        s.insert("id", 2).unwrap();
        assert_ne!(r, s);
    }

    #[test]
    fn test_set_of_cyclic_values() {
        let a = Value::list([1]);
        a.push(a.clone()).unwrap();
        let b = Value::list([1]);
        b.push(b.clone()).unwrap();
        let set = Value::set([a.clone(), b]);
        assert_eq!(set.elements().unwrap().len(), 1);
        set.push(a).unwrap();
        assert_eq!(set.elements().unwrap().len(), 1);
    }

    #[test]
    fn test_lookup_error_kinds() {
        let m = Value::map([("price", 10)]);
        assert_eq!(m.lookup("price").unwrap(), Value::Int(10));
        assert!(matches!(
            m.lookup("cost").unwrap_err().kind(),
            ErrorKind::KeyMissing { .. }
        ));

        let r = Value::record("Item", [("price", 5)]);
        assert_eq!(r.lookup("price").unwrap(), Value::Int(5));
        match r.lookup("cost").unwrap_err().kind() {
            ErrorKind::AttributeMissing {
                type_name,
                attribute,
            } => {
                assert_eq!(type_name, "Item");
                assert_eq!(attribute, "cost");
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert!(matches!(
            Value::Int(1).lookup("x").unwrap_err().kind(),
            ErrorKind::AttributeMissing { .. }
        ));
    }

    #[test]
    fn test_display_cyclic_list() {
        let a = Value::list([1, 2]);
        a.push(a.clone()).unwrap();
        assert_eq!(a.to_string(), "[1, 2, [...]]");
    }

    #[test]
    fn test_display_shapes() {
        assert_eq!(Value::from("x").to_string(), "x");
        assert_eq!(Value::list(["x"]).to_string(), "[\"x\"]");
        assert_eq!(Value::tuple([1]).to_string(), "(1,)");
        assert_eq!(Value::tuple([1, 2]).to_string(), "(1, 2)");
        assert_eq!(Value::map([("k", 1.5)]).to_string(), "{\"k\": 1.5}");
        assert_eq!(
            Value::record("P", [("n", Value::from("bob"))]).to_string(),
            "P(n=\"bob\")"
        );
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_push_on_scalar_fails() {
        let err = Value::Int(3).push(1).unwrap_err();
        assert!(err.is_type_mismatch());
    }
}
