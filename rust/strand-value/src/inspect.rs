//! Record-like surface of opaque objects.

use std::fmt;

use strand_common::Result;

use crate::mode::Mode;
use crate::value::Value;

/// Surface an opaque object exposes to structural conversion and field
/// selectors.
///
/// Every method has a default that reports "not supported", so an
/// implementation only overrides what the object actually offers. The
/// `Display` text is the last-resort rendering of the object.
pub trait Inspect: fmt::Display {
    /// Name of the object's type, used in error messages.
    fn type_name(&self) -> &str;

    /// Elements of a container-like object (for example a collection held
    /// inside another value). Such objects are converted to a list.
    fn items(&self) -> Option<Vec<Value>> {
        None
    }

    /// Object-specific conversion into a value that is then converted
    /// recursively. `None` means the object has no such method; an `Err`
    /// makes the conversion fall back to the next strategy.
    fn to_structure(&self, mode: Mode) -> Option<Result<Value>> {
        let _ = mode;
        None
    }

    /// Named attributes of the object, in a stable order.
    fn attributes(&self) -> Option<Vec<(String, Value)>> {
        None
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes()?
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }
}
