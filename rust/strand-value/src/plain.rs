//! Output tree of structural conversion.

use itertools::Itertools;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A plain value: only primitives, lists and mappings.
///
/// In [`Mode::Json`](crate::Mode::Json) every mapping key is a `Str` and no
/// non-finite float remains, so the tree serializes to valid JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Plain {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Plain>),
    Map(Vec<(Plain, Plain)>),
}

impl Plain {
    /// Canonical text of a value used as a JSON object key.
    ///
    /// Text is kept verbatim, `Null` becomes `"null"`, numbers and booleans
    /// their JSON spelling, lists and mappings their compact JSON text
    /// (a tuple `(1, 2)` converts to the list `[1,2]`).
    pub fn key_text(&self) -> String {
        match self {
            Plain::Str(s) => s.clone(),
            Plain::Null => "null".to_string(),
            Plain::Bool(b) => b.to_string(),
            Plain::Int(i) => i.to_string(),
            Plain::Float(f) => float_text(*f),
            Plain::List(_) | Plain::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Plain::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Plain]> {
        match self {
            Plain::List(items) => Some(items),
            _ => None,
        }
    }

    /// Entry of a mapping whose key is the given text.
    pub fn get(&self, key: &str) -> Option<&Plain> {
        match self {
            Plain::Map(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Entry of a mapping whose key equals the given plain value.
    pub fn get_key(&self, key: &Plain) -> Option<&Plain> {
        match self {
            Plain::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

/// JSON spelling of a float; non-finite values get the names JavaScript uses.
pub(crate) fn float_text(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        serde_json::Number::from_f64(f).map_or_else(|| f.to_string(), |n| n.to_string())
    }
}

impl Serialize for Plain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Plain::Null => serializer.serialize_unit(),
            Plain::Bool(b) => serializer.serialize_bool(*b),
            Plain::Int(i) => serializer.serialize_i64(*i),
            Plain::Float(f) => serializer.serialize_f64(*f),
            Plain::Str(s) => serializer.serialize_str(s),
            Plain::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Plain::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.key_text(), value)?;
                }
                map.end()
            }
        }
    }
}

impl std::fmt::Display for Plain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plain::Null => write!(f, "null"),
            Plain::Bool(b) => write!(f, "{b}"),
            Plain::Int(i) => write!(f, "{i}"),
            Plain::Float(v) => write!(f, "{v:?}"),
            Plain::Str(s) => write!(f, "{s:?}"),
            Plain::List(items) => write!(f, "[{}]", items.iter().join(", ")),
            Plain::Map(entries) => write!(
                f,
                "{{{}}}",
                entries.iter().map(|(k, v)| format!("{k}: {v}")).join(", ")
            ),
        }
    }
}
