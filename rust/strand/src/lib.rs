//! Ordered in-memory collections with a fluent query surface.
//!
//! [`Collection<T>`] owns an ordered sequence of elements and offers search
//! and navigation (`first`, `last`, `after`, `before`, ...), transformation
//! (`filter`, `reverse`, `map`, `take`, ...), grouping into a [`GroupMap`],
//! chunking, numeric aggregation and structural conversion into plain,
//! JSON-safe data.
//!
//! Every transformation returns a new collection; only `append`, `extend`,
//! `remove` and `remove_one` mutate the receiver.
//!
//! ```
//! use strand::{Collection, Needle};
//!
//! let c = Collection::from(vec![1, 2, 3, 4, 5]);
//! assert_eq!(c.first(), Some(&1));
//! assert_eq!(c.first_where(|x| x % 2 == 0), Some(&2));
//! assert_eq!(c.after(&2), Some(&3));
//! assert_eq!(c.before(Needle::when(|x: &i32| *x > 3)), Some(&3));
//! assert_eq!(c.chunk(2).unwrap().len(), 3);
//! ```

mod aggregate;
mod collection;
mod dump;
mod group_key;
mod group_map;
mod needle;
mod search;
mod selector;
mod structure;
mod transform;


pub use collection::Collection;
pub use dump::Halt;
pub use group_key::GroupKey;
pub use group_map::GroupMap;
pub use needle::Needle;
pub use selector::Selector;

pub use strand_common::{Error, ErrorKind, NotFoundReason, Result};
pub use strand_value::{AsValue, Inspect, Mode, Plain, Record, Structurizer, Value};
