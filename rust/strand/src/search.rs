//! Search and navigation, all built on [`Collection::find_first_index`].

use strand_common::{Error, NotFoundReason, Result};

use crate::collection::Collection;
use crate::needle::Needle;

impl<T> Collection<T> {
    /// Position of the first element satisfying the predicate.
    ///
    /// Without a predicate this is `0` for a non-empty collection. `None` when
    /// the collection is empty or nothing matches.
    pub fn find_first_index(&self, predicate: Option<&dyn Fn(&T) -> bool>) -> Option<usize> {
        match predicate {
            None if self.is_empty() => None,
            None => Some(0),
            Some(predicate) => self.as_slice().iter().position(predicate),
        }
    }

    pub fn first(&self) -> Option<&T> {
        self.nth_found(None)
    }

    pub fn first_where(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.nth_found(Some(&predicate))
    }

    pub fn exists(&self) -> bool {
        self.find_first_index(None).is_some()
    }

    pub fn exists_where(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.find_first_index(Some(&predicate)).is_some()
    }

    /// First element, failing with `ItemNotFound` when the collection is empty.
    pub fn first_or_fail(&self) -> Result<&T> {
        self.first_or_fail_impl(None)
    }

    /// First element satisfying the predicate. Fails with `ItemNotFound`,
    /// whose reason tells an empty collection from a predicate that never
    /// holds.
    pub fn first_or_fail_where(&self, predicate: impl Fn(&T) -> bool) -> Result<&T> {
        self.first_or_fail_impl(Some(&predicate))
    }

    /// Last element. Unlike [`first`](Self::first), an empty collection is an
    /// `IndexOutOfRange` error rather than `None`.
    pub fn last(&self) -> Result<&T> {
        self.at(-1)
    }

    /// Element right after the first match of the target.
    ///
    /// `None` when nothing matches or the match is the last element.
    pub fn after<'a>(&self, target: impl Into<Needle<'a, T>>) -> Option<&T>
    where
        T: PartialEq + 'a,
    {
        let index = self.find_needle(target.into())?;
        self.as_slice().get(index + 1)
    }

    /// Element right before the first match of the target.
    ///
    /// `None` when nothing matches or the match is the first element.
    pub fn before<'a>(&self, target: impl Into<Needle<'a, T>>) -> Option<&T>
    where
        T: PartialEq + 'a,
    {
        let index = self.find_needle(target.into())?;
        index.checked_sub(1).and_then(|i| self.as_slice().get(i))
    }

    fn find_needle(&self, needle: Needle<'_, T>) -> Option<usize>
    where
        T: PartialEq,
    {
        self.find_first_index(Some(&|item: &T| needle.matches(item)))
    }

    fn nth_found(&self, predicate: Option<&dyn Fn(&T) -> bool>) -> Option<&T> {
        self.find_first_index(predicate)
            .and_then(|i| self.as_slice().get(i))
    }

    fn first_or_fail_impl(&self, predicate: Option<&dyn Fn(&T) -> bool>) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::item_not_found(NotFoundReason::Empty));
        }
        self.nth_found(predicate)
            .ok_or_else(|| Error::item_not_found(NotFoundReason::NoMatch))
    }
}
