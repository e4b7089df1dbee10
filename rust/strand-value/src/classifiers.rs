//! Default conversion strategies.

use ahash::AHashSet;
use strand_common::{Error, Result};

use crate::mode::Mode;
use crate::plain::{Plain, float_text};
use crate::structurizer::{Classifier, Converter};
use crate::value::Value;

pub(crate) fn default_classifiers() -> Vec<Box<dyn Classifier>> {
    vec![
        Box::new(Primitive),
        Box::new(HeldContainer),
        Box::new(Sequence),
        Box::new(SetLike),
        Box::new(Mapping),
        Box::new(RecordFields),
        Box::new(ConversionMethod),
        Box::new(LibraryScalar),
        Box::new(Attributes),
        Box::new(Text),
    ]
}

/// Null, booleans, numbers and text pass through unchanged.
///
/// In JSON mode non-finite floats become the text `NaN`, `Infinity` or
/// `-Infinity`.
pub struct Primitive;

impl Classifier for Primitive {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(
            value,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_)
        )
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let plain = match value {
            Value::Null => Plain::Null,
            Value::Bool(b) => Plain::Bool(*b),
            Value::Int(i) => Plain::Int(*i),
            Value::Float(f) if cx.mode().is_json() && !f.is_finite() => Plain::Str(float_text(*f)),
            Value::Float(f) => Plain::Float(*f),
            Value::Str(s) => Plain::Str(s.clone()),
            _ => return Ok(None),
        };
        Ok(Some(plain))
    }
}

/// Objects holding a sequence of elements (such as a collection nested in
/// another value) become a list of their converted elements.
pub struct HeldContainer;

impl Classifier for HeldContainer {
    fn name(&self) -> &'static str {
        "container"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::Object(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let Value::Object(object) = value else {
            return Ok(None);
        };
        match object.items() {
            Some(items) => convert_items(&items, cx).map(Some),
            None => Ok(None),
        }
    }
}

/// Lists and tuples convert element-wise.
pub struct Sequence;

impl Classifier for Sequence {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::List(_) | Value::Tuple(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        match value {
            Value::List(items) => convert_items(&items.borrow(), cx).map(Some),
            Value::Tuple(items) => convert_items(items, cx).map(Some),
            _ => Ok(None),
        }
    }
}

/// Sets convert to a list, in insertion order.
pub struct SetLike;

impl Classifier for SetLike {
    fn name(&self) -> &'static str {
        "set"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::Set(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        match value {
            Value::Set(items) => convert_items(&items.borrow(), cx).map(Some),
            _ => Ok(None),
        }
    }
}

/// Mappings convert key- and value-wise.
///
/// Native mode keeps each converted key as is. JSON mode replaces each key
/// by its [canonical text](Plain::key_text) and fails with `DuplicateKey`
/// when two keys of the same mapping end up with the same text.
pub struct Mapping;

impl Classifier for Mapping {
    fn name(&self) -> &'static str {
        "mapping"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::Map(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let Value::Map(entries) = value else {
            return Ok(None);
        };
        let entries = entries.borrow();
        let mut out = Vec::with_capacity(entries.len());
        let mut seen = AHashSet::with_capacity(entries.len());
        for (key, item) in entries.iter() {
            let key = cx.convert(key)?;
            let key = if cx.mode().is_json() {
                let text = key.key_text();
                if !seen.insert(text.clone()) {
                    log::debug!("mapping key '{text}' collides after conversion to text");
                    return Err(Error::duplicate_key(text));
                }
                Plain::Str(text)
            } else {
                key
            };
            out.push((key, cx.convert(item)?));
        }
        Ok(Some(Plain::Map(out)))
    }
}

/// Records convert field by field into a mapping keyed by field name.
pub struct RecordFields;

impl Classifier for RecordFields {
    fn name(&self) -> &'static str {
        "record"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::Record(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let Value::Record(record) = value else {
            return Ok(None);
        };
        let record = record.borrow();
        convert_fields(record.fields().iter().map(|(n, v)| (n.as_str(), v)), cx).map(Some)
    }
}

/// Objects with their own conversion method. A failing method is logged and
/// the object falls through to the remaining classifiers.
pub struct ConversionMethod;

impl Classifier for ConversionMethod {
    fn name(&self) -> &'static str {
        "conversion-method"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::Object(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let Value::Object(object) = value else {
            return Ok(None);
        };
        match object.to_structure(cx.mode()) {
            Some(Ok(structure)) => cx.convert(&structure).map(Some),
            Some(Err(e)) => {
                log::debug!(
                    "conversion method of '{}' failed, falling back: {e}",
                    object.type_name()
                );
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// JSON mode only: dates and times become ISO-8601 text, decimals floats and
/// UUIDs hyphenated text. In native mode these values keep their text form.
pub struct LibraryScalar;

impl Classifier for LibraryScalar {
    fn name(&self) -> &'static str {
        "library-scalar"
    }

    fn matches(&self, value: &Value, mode: Mode) -> bool {
        mode.is_json()
            && matches!(
                value,
                Value::Date(_)
                    | Value::DateTime(_)
                    | Value::Time(_)
                    | Value::Decimal(_)
                    | Value::Uuid(_)
            )
    }

    fn convert(&self, value: &Value, _cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let plain = match value {
            Value::Date(d) => Plain::Str(d.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => Plain::Str(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            Value::Time(t) => Plain::Str(t.format("%H:%M:%S%.f").to_string()),
            Value::Decimal(d) => {
                let text = d.to_string();
                let f = text
                    .parse::<f64>()
                    .map_err(|e| Error::conversion("decimal", format!("'{text}': {e}")))?;
                if f.is_finite() {
                    Plain::Float(f)
                } else {
                    Plain::Str(float_text(f))
                }
            }
            Value::Uuid(u) => Plain::Str(u.hyphenated().to_string()),
            _ => return Ok(None),
        };
        Ok(Some(plain))
    }
}

/// Objects exposing named attributes become a mapping of their converted
/// attributes. Dunder-style names (`__x`) are skipped.
pub struct Attributes;

impl Classifier for Attributes {
    fn name(&self) -> &'static str {
        "attributes"
    }

    fn matches(&self, value: &Value, _mode: Mode) -> bool {
        matches!(value, Value::Object(_))
    }

    fn convert(&self, value: &Value, cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        let Value::Object(object) = value else {
            return Ok(None);
        };
        let Some(attributes) = object.attributes() else {
            return Ok(None);
        };
        convert_fields(
            attributes
                .iter()
                .filter(|(n, _)| !n.starts_with("__"))
                .map(|(n, v)| (n.as_str(), v)),
            cx,
        )
        .map(Some)
    }
}

/// Last resort: the value's text.
pub struct Text;

impl Classifier for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn matches(&self, _value: &Value, _mode: Mode) -> bool {
        true
    }

    fn convert(&self, value: &Value, _cx: &mut Converter<'_>) -> Result<Option<Plain>> {
        Ok(Some(Plain::Str(value.to_string())))
    }
}

fn convert_items(items: &[Value], cx: &mut Converter<'_>) -> Result<Plain> {
    items
        .iter()
        .map(|item| cx.convert(item))
        .collect::<Result<Vec<_>>>()
        .map(Plain::List)
}

fn convert_fields<'v>(
    fields: impl Iterator<Item = (&'v str, &'v Value)>,
    cx: &mut Converter<'_>,
) -> Result<Plain> {
    fields
        .map(|(name, value)| Ok((Plain::Str(name.to_string()), cx.convert(value)?)))
        .collect::<Result<Vec<_>>>()
        .map(Plain::Map)
}
