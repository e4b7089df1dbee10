use std::any::Any;
use std::fmt;
use std::ops::Add;

use strand_common::{Error, Result};

use crate::needle::Needle;

/// An ordered sequence of elements, exclusively owned by the collection.
///
/// Building a collection copies the source elements and [`all`](Self::all)
/// returns a fresh copy, so neither side ever observes the other's
/// mutations.
///
/// Collections are compared element-wise, in order. They deliberately do not
/// implement `Hash`: their contents are mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Collection<T> {
    pub fn new() -> Collection<T> {
        Collection { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Collection<T> {
        Collection {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn from_slice(items: &[T]) -> Collection<T>
    where
        T: Clone,
    {
        Collection {
            items: items.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
    }

    /// Appends a copy of every element of another collection.
    pub fn extend_from(&mut self, other: &Collection<T>)
    where
        T: Clone,
    {
        self.items.extend_from_slice(&other.items);
    }

    /// A fresh copy of the elements.
    pub fn all(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    /// Iterates from the first element. Each call starts over.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Element at a position; negative positions count from the end (`-1` is
    /// the last element).
    pub fn at(&self, index: isize) -> Result<&T> {
        let len = self.items.len();
        let pos = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        pos.and_then(|pos| self.items.get(pos))
            .ok_or_else(|| Error::index_out_of_range(index, len))
    }

    /// Copy of the elements between two positions, with slice semantics:
    /// negative bounds count from the end, out-of-range bounds are clamped and
    /// an empty range yields an empty vector.
    pub fn slice(&self, start: Option<isize>, end: Option<isize>) -> Vec<T>
    where
        T: Clone,
    {
        let len = self.items.len();
        let resolve = |bound: Option<isize>, default: usize| match bound {
            None => default,
            Some(i) if i < 0 => len.saturating_sub(i.unsigned_abs()),
            Some(i) => i.unsigned_abs().min(len),
        };
        let start = resolve(start, 0);
        let end = resolve(end, len);
        if start >= end {
            Vec::new()
        } else {
            self.items[start..end].to_vec()
        }
    }

    /// New collection with this collection's elements followed by `other`'s.
    pub fn concat(&self, other: &Collection<T>) -> Collection<T>
    where
        T: Clone,
    {
        let mut items = Vec::with_capacity(self.len() + other.len());
        items.extend_from_slice(&self.items);
        items.extend_from_slice(&other.items);
        Collection { items }
    }

    /// Like [`concat`](Self::concat) for a right operand of unknown type.
    /// Fails with `TypeMismatch` unless `other` is a `Collection<T>`.
    pub fn try_concat(&self, other: &dyn Any) -> Result<Collection<T>>
    where
        T: Clone + 'static,
    {
        other
            .downcast_ref::<Collection<T>>()
            .map(|other| self.concat(other))
            .ok_or_else(|| {
                Error::type_mismatch(
                    "concat",
                    format!(
                        "right operand is not a Collection<{}>",
                        std::any::type_name::<T>()
                    ),
                )
            })
    }

    /// Removes every element matching the target.
    pub fn remove<'a>(&mut self, target: impl Into<Needle<'a, T>>)
    where
        T: PartialEq + 'a,
    {
        let needle = target.into();
        self.items.retain(|item| !needle.matches(item));
    }

    /// Removes the first element matching the target, if any.
    pub fn remove_one<'a>(&mut self, target: impl Into<Needle<'a, T>>)
    where
        T: PartialEq + 'a,
    {
        let needle = target.into();
        if let Some(pos) = self.items.iter().position(|item| needle.matches(item)) {
            self.items.remove(pos);
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection::new()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Collection { items }
    }
}

impl<T: Clone> From<&[T]> for Collection<T> {
    fn from(items: &[T]) -> Self {
        Collection::from_slice(items)
    }
}

impl<T, const N: usize> From<[T; N]> for Collection<T> {
    fn from(items: [T; N]) -> Self {
        Collection {
            items: items.into(),
        }
    }
}

impl<T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Add for Collection<T> {
    type Output = Collection<T>;

    fn add(mut self, rhs: Collection<T>) -> Collection<T> {
        self.items.extend(rhs.items);
        self
    }
}

impl<T: Clone> Add<&Collection<T>> for &Collection<T> {
    type Output = Collection<T>;

    fn add(self, rhs: &Collection<T>) -> Collection<T> {
        self.concat(rhs)
    }
}

impl<T: fmt::Debug> fmt::Display for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Collection({:?})", self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_copies_source() {
        let mut source = vec![1, 2, 3];
        let c = Collection::from_slice(&source);
        source.push(4);
        assert_eq!(c.all(), vec![1, 2, 3]);

        let empty = Collection::<i32>::new();
        assert!(empty.is_empty());
        assert_eq!(empty.all(), Vec::<i32>::new());
    }

    #[test]
    fn test_all_returns_copy() {
        let c = Collection::from(vec![1, 2, 3]);
        let mut copy = c.all();
        copy.push(4);
        copy[0] = 100;
        assert_eq!(c.all(), vec![1, 2, 3]);
    }

    #[test]
    fn test_append_extend() {
        let mut c = Collection::from(vec![1]);
        c.append(2);
        c.extend(vec![3, 4]);
        c.extend_from(&Collection::from(vec![5]));
        assert_eq!(c.all(), vec![1, 2, 3, 4, 5]);
        assert_eq!(c.len(), 5);
    }

    #[test]
    fn test_iteration_restarts() {
        let c = Collection::from(vec!["a", "b"]);
        assert_eq!(c.iter().count(), 2);
        assert_eq!(c.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        let mut seen = Vec::new();
        for item in &c {
            seen.push(*item);
        }
        assert_eq!(seen, vec!["a", "b"]);
    }

    #[test]
    fn test_at() {
        let c = Collection::from(vec![10, 20, 30]);
        assert_eq!(c.at(0).unwrap(), &10);
        assert_eq!(c.at(2).unwrap(), &30);
        assert_eq!(c.at(-1).unwrap(), &30);
        assert_eq!(c.at(-3).unwrap(), &10);
        assert!(c.at(3).unwrap_err().is_index_out_of_range());
        assert!(c.at(-4).unwrap_err().is_index_out_of_range());
        assert!(Collection::<i32>::new().at(0).is_err());
    }

    #[test]
    fn test_slice() {
        let c = Collection::from(vec![1, 2, 3, 4, 5]);
        assert_eq!(c.slice(Some(1), Some(3)), vec![2, 3]);
        assert_eq!(c.slice(None, Some(-2)), vec![1, 2, 3]);
        assert_eq!(c.slice(Some(-2), None), vec![4, 5]);
        assert_eq!(c.slice(Some(3), Some(1)), Vec::<i32>::new());
        assert_eq!(c.slice(Some(-100), Some(100)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_equality() {
        assert_eq!(Collection::from(vec![1, 2, 3]), Collection::from(vec![1, 2, 3]));
        assert_ne!(Collection::from(vec![1, 2, 3]), Collection::from(vec![3, 2, 1]));
        assert_ne!(Collection::from(vec![1, 2, 3]), Collection::from(vec![1, 2]));
        assert_eq!(Collection::<i32>::new(), Collection::from(vec![]));
    }

    #[test]
    fn test_concat_leaves_operands() {
        let a = Collection::from(vec![1, 2, 3]);
        let b = Collection::from(vec![4, 5, 6]);
        let ab = &a + &b;
        assert_eq!(ab, Collection::from(vec![1, 2, 3, 4, 5, 6]));
        assert_ne!(ab, &b + &a);
        assert_eq!(a.all(), vec![1, 2, 3]);
        assert_eq!(b.all(), vec![4, 5, 6]);
        assert_eq!(a.clone() + Collection::new(), a);
    }

    #[test]
    fn test_try_concat() {
        let a = Collection::from(vec![1, 2]);
        let b = Collection::from(vec![3]);
        assert_eq!(a.try_concat(&b).unwrap().all(), vec![1, 2, 3]);

        let err = a.try_concat(&vec![3]).unwrap_err();
        assert!(err.is_type_mismatch());
        let err = a.try_concat(&Collection::from(vec!["x"])).unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_remove() {
        let mut c = Collection::from(vec![1, 2, 1, 3, 1]);
        c.remove_one(&1);
        assert_eq!(c.all(), vec![2, 1, 3, 1]);
        c.remove(&1);
        assert_eq!(c.all(), vec![2, 3]);
        c.remove(Needle::when(|x: &i32| *x > 2));
        assert_eq!(c.all(), vec![2]);
        c.remove_one(&42);
        assert_eq!(c.all(), vec![2]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Collection::from(vec![1, 2]).to_string(), "Collection([1, 2])");
    }
}
