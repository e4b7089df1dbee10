//! Structural conversion of a collection's elements into [`Plain`] data.

use std::fmt;

use strand_common::Result;
use strand_value::{AsValue, Inspect, Mode, Plain, Structurizer, Value};

use crate::collection::Collection;

impl<T: AsValue> Collection<T> {
    /// Converts every element with the default classifiers.
    pub fn to_structure(&self, mode: Mode) -> Result<Vec<Plain>> {
        self.to_structure_with(&Structurizer::new(), mode)
    }

    /// Converts every element with a custom structurizer.
    pub fn to_structure_with(&self, structurizer: &Structurizer, mode: Mode) -> Result<Vec<Plain>> {
        structurizer.convert_all(self.iter().map(AsValue::as_value), mode)
    }

    /// JSON text of the JSON-mode structure.
    pub fn to_text(&self) -> Result<String> {
        let structure = self.to_structure(Mode::Json)?;
        Ok(serde_json::to_string(&structure)?)
    }
}

/// A collection held inside a value graph is a container of its elements.
impl<T: AsValue + fmt::Debug> Inspect for Collection<T> {
    fn type_name(&self) -> &str {
        "Collection"
    }

    fn items(&self) -> Option<Vec<Value>> {
        Some(self.iter().map(AsValue::as_value).collect())
    }
}

impl<T> AsValue for Collection<T>
where
    T: AsValue + Clone + fmt::Debug + 'static,
{
    fn as_value(&self) -> Value {
        Value::object(self.clone())
    }
}
