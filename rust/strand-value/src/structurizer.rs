//! Recursive conversion of value graphs into [`Plain`] trees.
//!
//! Conversion dispatches each value through an ordered list of
//! [`Classifier`]s: the first classifier that matches the value and agrees to
//! convert it wins. A classifier may decline (return `Ok(None)`), in which case
//! dispatch continues with the next one. If every classifier declines, the
//! value's text is used.
//!
//! Cycles are detected with the identities of the compound values on the
//! current recursion path only: a node is pushed when its conversion starts
//! and popped when it ends, so a value shared by two sibling branches is
//! converted twice, while a value reached again from one of its own
//! descendants is replaced by the circular marker.

use ahash::AHashSet;
use strand_common::{Error, Result};

use crate::classifiers;
use crate::mode::Mode;
use crate::plain::Plain;
use crate::value::Value;

/// Text substituted for a value that is already being converted higher up the
/// recursion path.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// One conversion strategy: a predicate over values and a converter.
pub trait Classifier {
    /// Stable name, used to position other classifiers relative to this one.
    fn name(&self) -> &'static str;

    /// Whether this classifier handles the value in the given mode.
    fn matches(&self, value: &Value, mode: Mode) -> bool;

    /// Converts a matching value, recursing through `cx` for nested values.
    ///
    /// `Ok(None)` declines, letting the next classifier try.
    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>>;
}

/// An ordered, extensible list of classifiers.
pub struct Structurizer {
    classifiers: Vec<Box<dyn Classifier>>,
    circular_marker: String,
}

impl Structurizer {
    /// Structurizer with the default classifiers, in priority order:
    /// primitive, container, sequence, set, mapping, record,
    /// conversion-method, library-scalar, attributes, text.
    pub fn new() -> Structurizer {
        Structurizer {
            classifiers: classifiers::default_classifiers(),
            circular_marker: CIRCULAR_MARKER.to_string(),
        }
    }

    /// Structurizer without any classifier: every value converts to its text.
    pub fn empty() -> Structurizer {
        Structurizer {
            classifiers: Vec::new(),
            circular_marker: CIRCULAR_MARKER.to_string(),
        }
    }

    pub fn with_circular_marker(mut self, marker: impl Into<String>) -> Structurizer {
        self.circular_marker = marker.into();
        self
    }

    pub fn circular_marker(&self) -> &str {
        &self.circular_marker
    }

    pub fn classifier_names(&self) -> Vec<&'static str> {
        self.classifiers.iter().map(|c| c.name()).collect()
    }

    /// Adds a classifier with the lowest priority.
    pub fn push(&mut self, classifier: Box<dyn Classifier>) {
        self.classifiers.push(classifier);
    }

    /// Adds a classifier with the highest priority.
    pub fn prepend(&mut self, classifier: Box<dyn Classifier>) {
        self.classifiers.insert(0, classifier);
    }

    /// Adds a classifier right before the one with the given name.
    pub fn insert_before(&mut self, name: &str, classifier: Box<dyn Classifier>) -> Result<()> {
        let pos = self
            .classifiers
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| Error::invalid_arg("name", format!("no classifier named '{name}'")))?;
        self.classifiers.insert(pos, classifier);
        Ok(())
    }

    pub fn convert(&self, value: &Value, mode: Mode) -> Result<Plain> {
        self.converter(mode).convert(value)
    }

    /// Converts a sequence of values. Each value starts with an empty
    /// recursion path.
    pub fn convert_all<I>(&self, values: I, mode: Mode) -> Result<Vec<Plain>>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut cx = self.converter(mode);
        values.into_iter().map(|value| cx.convert(&value)).collect()
    }

    fn converter(&self, mode: Mode) -> Converter<'_> {
        Converter {
            classifiers: &self.classifiers,
            circular_marker: &self.circular_marker,
            mode,
            path: AHashSet::new(),
        }
    }
}

impl Default for Structurizer {
    fn default() -> Self {
        Structurizer::new()
    }
}

/// State of one conversion: the classifier list, the mode and the identities
/// of the compound values on the current recursion path.
pub struct Converter<'a> {
    classifiers: &'a [Box<dyn Classifier>],
    circular_marker: &'a str,
    mode: Mode,
    path: AHashSet<usize>,
}

impl Converter<'_> {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of compound values currently being converted.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn convert(&mut self, value: &Value) -> Result<Plain> {
        let identity = value.identity();
        if let Some(id) = identity {
            if !self.path.insert(id) {
                log::trace!("cycle detected at '{}'", value.type_name());
                return Ok(Plain::Str(self.circular_marker.to_string()));
            }
        }

        let result = self.dispatch(value);

        if let Some(id) = identity {
            self.path.remove(&id);
        }
        result
    }

    fn dispatch(&mut self, value: &Value) -> Result<Plain> {
        let classifiers = self.classifiers;
        for classifier in classifiers {
            if !classifier.matches(value, self.mode) {
                continue;
            }
            if let Some(plain) = classifier.convert(value, self)? {
                return Ok(plain);
            }
            log::debug!(
                "classifier '{}' declined '{}'",
                classifier.name(),
                value.type_name()
            );
        }
        Ok(Plain::Str(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use strand_common::ErrorKind;

    use crate::inspect::Inspect;

    #[test]
    fn test_self_referencing_list() {
        let a = Value::list([1, 2]);
        a.push(a.clone()).unwrap();
        let plain = Structurizer::new().convert(&a, Mode::Native).unwrap();
        assert_eq!(
            plain,
            Plain::List(vec![
                Plain::Int(1),
                Plain::Int(2),
                Plain::Str(CIRCULAR_MARKER.into())
            ])
        );
    }

    #[test]
    fn test_shared_siblings_are_not_circular() {
        let shared = Value::list([7]);
        let outer = Value::list([shared.clone(), shared.clone()]);
        let plain = Structurizer::new().convert(&outer, Mode::Json).unwrap();
        let inner = Plain::List(vec![Plain::Int(7)]);
        assert_eq!(plain, Plain::List(vec![inner.clone(), inner]));
    }

    #[test]
    fn test_cycle_through_mapping_and_record() {
        let node = Value::record("Node", [("id", 1)]);
        let index = Value::map([("root", node.clone())]);
        node.insert("index", index.clone()).unwrap();

        let plain = Structurizer::new().convert(&node, Mode::Json).unwrap();
        let root = plain.get("index").and_then(|i| i.get("root")).unwrap();
        assert_eq!(root, &Plain::Str(CIRCULAR_MARKER.into()));
        assert_eq!(plain.get("id"), Some(&Plain::Int(1)));
    }

    #[test]
    fn test_custom_marker() {
        let a = Value::list(Vec::<Value>::new());
        a.push(a.clone()).unwrap();
        let s = Structurizer::new().with_circular_marker("<cycle>");
        assert_eq!(
            s.convert(&a, Mode::Native).unwrap(),
            Plain::List(vec![Plain::Str("<cycle>".into())])
        );
    }

    #[test]
    fn test_duplicate_key_after_stringification() {
        let m = Value::map([(Value::Int(1), Value::from("int")), (Value::from("1"), Value::from("str"))]);
        let err = Structurizer::new().convert(&m, Mode::Json).unwrap_err();
        match err.kind() {
            ErrorKind::DuplicateKey { key } => assert_eq!(key, "1"),
            other => panic!("unexpected error {other:?}"),
        }

        // Native mode keeps the original keys, so nothing collides.
        let plain = Structurizer::new().convert(&m, Mode::Native).unwrap();
        assert_eq!(plain.get_key(&Plain::Int(1)), Some(&Plain::Str("int".into())));
        assert_eq!(plain.get("1"), Some(&Plain::Str("str".into())));
    }

    struct Money(i64);

    impl fmt::Display for Money {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "${}", self.0)
        }
    }

    impl Inspect for Money {
        fn type_name(&self) -> &str {
            "Money"
        }
    }

    struct MoneyClassifier;

    impl Classifier for MoneyClassifier {
        fn name(&self) -> &'static str {
            "money"
        }

        fn matches(&self, value: &Value, _mode: Mode) -> bool {
            matches!(value, Value::Object(o) if o.type_name() == "Money")
        }

        fn convert(&self, value: &Value, _cx: &mut Converter<'_>) -> Result<Option<Plain>> {
            Ok(Some(Plain::Str(format!("{value} USD"))))
        }
    }

    #[test]
    fn test_extension_classifier() {
        let value = Value::list([Value::object(Money(5))]);
        let default = Structurizer::new().convert(&value, Mode::Json).unwrap();
        assert_eq!(default, Plain::List(vec![Plain::Str("$5".into())]));

        let mut s = Structurizer::new();
        s.insert_before("attributes", Box::new(MoneyClassifier)).unwrap();
        let names = s.classifier_names();
        let pos = names.iter().position(|n| *n == "money").unwrap();
        assert_eq!(names[pos + 1], "attributes");
        let extended = s.convert(&value, Mode::Json).unwrap();
        assert_eq!(extended, Plain::List(vec![Plain::Str("$5 USD".into())]));

        assert!(s.insert_before("nope", Box::new(MoneyClassifier)).is_err());
    }

    #[test]
    fn test_empty_structurizer_uses_text() {
        let s = Structurizer::empty();
        assert_eq!(
            s.convert(&Value::list([1, 2]), Mode::Native).unwrap(),
            Plain::Str("[1, 2]".into())
        );
    }
}
