//! Transformations and grouping. Each operation returns new collections and
//! leaves the receiver untouched.

use strand_common::{Error, Result, verify_arg};
use strand_value::{AsValue, Value};

use crate::collection::Collection;
use crate::group_key::GroupKey;
use crate::group_map::GroupMap;
use crate::selector::Selector;

impl<T> Collection<T> {
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Collection<T>
    where
        T: Clone,
    {
        self.iter().filter(|item| predicate(item)).cloned().collect()
    }

    pub fn reverse(&self) -> Collection<T>
    where
        T: Clone,
    {
        self.iter().rev().cloned().collect()
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Collection<U> {
        self.iter().map(f).collect()
    }

    /// Value of a named field of every element; `Null` where the field is
    /// missing.
    pub fn pluck(&self, field: &str) -> Collection<Value>
    where
        T: AsValue,
    {
        self.iter()
            .map(|item| item.as_value().lookup(field).unwrap_or(Value::Null))
            .collect()
    }

    /// The first `count` elements, or the last `-count` ones for a negative
    /// count. Asking for more than there is yields everything.
    pub fn take(&self, count: isize) -> Collection<T>
    where
        T: Clone,
    {
        let items = self.as_slice();
        let n = count.unsigned_abs().min(items.len());
        if count >= 0 {
            Collection::from_slice(&items[..n])
        } else {
            Collection::from_slice(&items[items.len() - n..])
        }
    }

    /// Groups elements by the key the selector derives from each of them.
    ///
    /// With [`Selector::Field`] an element lacking the field shares the
    /// [`GroupKey::Null`] group with elements whose field is `null`. Elements
    /// keep their relative order inside each group; an empty collection yields
    /// an empty map.
    pub fn group_by(&self, selector: Selector<'_, T>) -> GroupMap<T>
    where
        T: AsValue + Clone,
    {
        let mut groups = GroupMap::new();
        for item in self.iter() {
            let key = match selector.select(item) {
                Ok(value) => GroupKey::from_value(&value),
                Err(_) => GroupKey::Null,
            };
            groups.add(key, item.clone());
        }
        log::debug!(
            "grouped {} elements by {} into {} groups",
            self.len(),
            selector.describe(),
            groups.len()
        );
        groups
    }

    /// Splits into consecutive collections of `size` elements; the last one
    /// may be shorter.
    ///
    /// `size` must be a positive integer, otherwise the call fails with
    /// `InvalidArgument`. An empty collection yields no chunks.
    pub fn chunk<N>(&self, size: N) -> Result<Vec<Collection<T>>>
    where
        N: TryInto<usize>,
        T: Clone,
    {
        let size: usize = size.try_into().map_err(|_| {
            Error::invalid_arg("size", "chunk size must be a positive integer")
        })?;
        verify_arg!(size, size > 0);
        Ok(self
            .as_slice()
            .chunks(size)
            .map(Collection::from_slice)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_value::{Mode, Record};

    #[test]
    fn test_filter_reverse_clone() {
        let c = Collection::from(vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(c.filter(|x| x % 2 == 0).all(), vec![2, 4, 6]);
        assert!(c.filter(|x| *x > 10).is_empty());
        assert_eq!(c.reverse().all(), vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(c.all(), vec![1, 2, 3, 4, 5, 6]);

        let mut copy = c.clone();
        copy.append(7);
        assert_eq!(c.len(), 6);
        assert_eq!(copy.len(), 7);
    }

    #[test]
    fn test_clone_is_shallow_for_shared_values() {
        let inner = Value::list([1]);
        let c = Collection::from(vec![inner.clone()]);
        let copy = c.clone();
        inner.push(2).unwrap();
        assert_eq!(copy.first(), Some(&Value::list([1, 2])));
    }

    #[test]
    fn test_map_and_pluck() {
        let c = Collection::from(vec![1, 2, 3]);
        assert_eq!(c.map(|x| x * 10).all(), vec![10, 20, 30]);

        let people = Collection::from(vec![
            Value::map([("name", "Alice")]),
            Value::map([("nick", "B")]),
            Value::from(Record::new("Person").with_field("name", "Carol")),
        ]);
        assert_eq!(
            people.pluck("name").all(),
            vec![Value::from("Alice"), Value::Null, Value::from("Carol")]
        );
    }

    #[test]
    fn test_take() {
        let c = Collection::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(c.take(2).all(), vec![1, 2]);
        assert_eq!(c.take(-2).all(), vec![4, 5]);
        assert_eq!(c.take(10).all(), vec![1, 2, 3, 4, 5]);
        assert_eq!(c.take(-10).all(), vec![1, 2, 3, 4, 5]);
        assert!(c.take(0).is_empty());
        assert!(Collection::<i32>::new().take(3).is_empty());
    }

    #[test]
    fn test_group_by_field() {
        let items = vec![
            Value::map([("d", "Eng")]),
            Value::map([("d", "Sales")]),
            Value::map([("d", "Eng")]),
        ];
        let c = Collection::from(items.clone());
        let groups = c.group_by("d".into());
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups.get(&"Eng".into()).unwrap().all(),
            vec![items[0].clone(), items[2].clone()]
        );
        assert_eq!(groups.get(&"Sales".into()).unwrap().all(), vec![items[1].clone()]);
    }

    #[test]
    fn test_group_by_missing_field_and_records() {
        let c = Collection::from(vec![
            Value::record("User", [("role", "admin")]),
            Value::map([("role", "user")]),
            Value::map([("name", "nobody")]),
            Value::Int(3),
        ]);
        let groups = c.group_by(Selector::field("role"));
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.get(&GroupKey::Null).unwrap().len(), 2);
        assert_eq!(groups.get(&"admin".into()).unwrap().len(), 1);
    }

    #[test]
    fn test_group_by_identity_and_callback() {
        let c = Collection::from(vec![1, 2, 1, 3, 2, 1]);
        let groups = c.group_by(Selector::Identity);
        assert_eq!(groups.get(&1.into()).unwrap().len(), 3);
        assert_eq!(
            groups.keys().cloned().collect::<Vec<_>>(),
            vec![GroupKey::Int(1), GroupKey::Int(2), GroupKey::Int(3)]
        );

        let parity = c.group_by(Selector::with(|x: &i32| if x % 2 == 0 { "even" } else { "odd" }));
        assert_eq!(parity.get(&"odd".into()).unwrap().all(), vec![1, 1, 3, 1]);
        assert_eq!(parity.get(&"even".into()).unwrap().all(), vec![2, 2]);
    }

    #[test]
    fn test_group_by_unhashable_keys() {
        let c = Collection::from(vec![
            Value::map([("tags", Value::list(["a", "b"]))]),
            Value::map([("tags", Value::list(["a", "b"]))]),
            Value::map([("tags", Value::list(["c"]))]),
        ]);
        let groups = c.group_by("tags".into());
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups
                .get(&GroupKey::Canonical("[\"a\", \"b\"]".into()))
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_group_by_null_and_missing_share_a_group() {
        let items = vec![Value::map([("age", Value::Null)]), Value::map([("name", "Bob")])];
        let c = Collection::from(items.clone());
        let groups = c.group_by("age".into());
        assert_eq!(groups.keys().cloned().collect::<Vec<_>>(), vec![GroupKey::Null]);
        assert_eq!(groups.get(&GroupKey::Null).unwrap().all(), items);
    }

    #[test]
    fn test_group_by_field_text_does_not_collide_with_absent_field() {
        let c = Collection::from(vec![Value::map([("d", "<missing>")]), Value::map([("x", 1)])]);
        let groups = c.group_by("d".into());
        assert_eq!(groups.len(), 2);
        let json = groups.to_structure(Mode::Json).unwrap();
        assert_eq!(json.get("<missing>").unwrap().as_list().unwrap().len(), 1);
        assert_eq!(json.get("null").unwrap().as_list().unwrap().len(), 1);
    }

    #[test]
    fn test_group_by_empty() {
        let c = Collection::<Value>::new();
        assert!(c.group_by("d".into()).is_empty());
    }

    #[test]
    fn test_chunk() {
        let c: Collection<i32> = (1..=9).collect();
        let chunks = c.chunk(3).unwrap();
        assert_eq!(
            chunks.iter().map(Collection::all).collect::<Vec<_>>(),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]
        );

        let c = Collection::from(vec![1, 2, 3]);
        let chunks = c.chunk(5).unwrap();
        assert_eq!(chunks, vec![Collection::from(vec![1, 2, 3])]);

        let chunks = Collection::from(vec![1, 2, 3, 4, 5]).chunk(2usize).unwrap();
        assert_eq!(chunks.last().unwrap().all(), vec![5]);

        assert!(Collection::<i32>::new().chunk(3).unwrap().is_empty());
    }

    #[test]
    fn test_chunk_invalid_size() {
        let c = Collection::from(vec![1, 2, 3]);
        assert!(c.chunk(0).unwrap_err().is_invalid_arg());
        assert!(c.chunk(-1).unwrap_err().is_invalid_arg());
        assert!(c.chunk(-1i64).unwrap_err().is_invalid_arg());
    }
}
