//! Dynamic value graph and structural conversion.
//!
//! [`Value`] models arbitrarily nested data: scalars, library scalars (dates,
//! decimals, UUIDs), shared compound values (lists, tuples, sets, mappings,
//! records) and opaque objects exposing an [`Inspect`] surface. Compound values
//! are reference-counted handles, so a graph may share nodes or even contain
//! cycles.
//!
//! [`Structurizer`] flattens such a graph into a [`Plain`] tree made only of
//! primitives, lists and mappings, detecting cycles along the way. In
//! [`Mode::Json`] the output is guaranteed to be JSON-serializable.

pub mod as_value;
pub mod classifiers;
pub mod inspect;
pub mod json;
pub mod mode;
pub mod plain;
pub mod record;
pub mod structurizer;
pub mod value;

pub use as_value::AsValue;
pub use inspect::Inspect;
pub use mode::Mode;
pub use plain::Plain;
pub use record::Record;
pub use structurizer::{CIRCULAR_MARKER, Classifier, Converter, Structurizer};
pub use value::Value;
