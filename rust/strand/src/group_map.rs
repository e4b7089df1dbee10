//! Groups of elements keyed by [`GroupKey`].

use ahash::{AHashMap, AHashSet};
use strand_common::{Error, Result};
use strand_value::{AsValue, Mode, Plain, Structurizer};

use crate::collection::Collection;
use crate::group_key::GroupKey;

/// A mapping from group keys to collections.
///
/// Groups are stored in a vector in key insertion order, with a hash index
/// from key to position. The insertion order is what breaks ties in
/// [`largest_group`](Self::largest_group) and
/// [`smallest_group`](Self::smallest_group).
#[derive(Debug, Clone)]
pub struct GroupMap<T> {
    groups: Vec<(GroupKey, Collection<T>)>,
    index: AHashMap<GroupKey, usize>,
}

impl<T> GroupMap<T> {
    pub fn new() -> GroupMap<T> {
        GroupMap {
            groups: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains_key(&self, key: &GroupKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &GroupKey) -> Option<&Collection<T>> {
        self.index.get(key).map(|&pos| &self.groups[pos].1)
    }

    pub fn get_mut(&mut self, key: &GroupKey) -> Option<&mut Collection<T>> {
        self.index.get(key).map(|&pos| &mut self.groups[pos].1)
    }

    /// The group under `key`, or an empty collection.
    pub fn get_or_empty(&self, key: &GroupKey) -> Collection<T>
    where
        T: Clone,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// The group under `key`, created empty if absent.
    pub fn get_or_insert(&mut self, key: GroupKey) -> &mut Collection<T> {
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                log::trace!("new group {key}");
                let pos = self.groups.len();
                self.index.insert(key.clone(), pos);
                self.groups.push((key, Collection::new()));
                pos
            }
        };
        &mut self.groups[pos].1
    }

    /// Sets the group under `key`, replacing an existing one in place.
    pub fn insert(&mut self, key: GroupKey, group: Collection<T>) {
        *self.get_or_insert(key) = group;
    }

    /// Appends one element to the group under `key`, creating the group if
    /// absent.
    pub fn add(&mut self, key: GroupKey, item: T) {
        self.get_or_insert(key).append(item);
    }

    /// Appends several elements to the group under `key`, creating the group
    /// if absent.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, key: GroupKey, items: I) {
        self.get_or_insert(key).extend(items);
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &Collection<T>)> {
        self.groups.iter().map(|(key, group)| (key, group))
    }

    /// Number of elements over all groups.
    pub fn total_items(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.len()).sum()
    }

    pub fn group_sizes(&self) -> Vec<(GroupKey, usize)> {
        self.groups
            .iter()
            .map(|(key, group)| (key.clone(), group.len()))
            .collect()
    }

    /// Applies `f` to every group, keeping the key order.
    pub fn map<U>(&self, mut f: impl FnMut(&Collection<T>) -> U) -> Vec<(GroupKey, U)> {
        self.groups
            .iter()
            .map(|(key, group)| (key.clone(), f(group)))
            .collect()
    }

    /// Groups holding at least `min_size` elements.
    pub fn filter_by_size(&self, min_size: usize) -> GroupMap<T>
    where
        T: Clone,
    {
        self.groups
            .iter()
            .filter(|(_, group)| group.len() >= min_size)
            .cloned()
            .collect()
    }

    /// Group with the most elements; the first such group on ties.
    pub fn largest_group(&self) -> Option<(&GroupKey, &Collection<T>)> {
        self.pick_group(|candidate, best| candidate > best)
    }

    /// Group with the fewest elements; the first such group on ties.
    pub fn smallest_group(&self) -> Option<(&GroupKey, &Collection<T>)> {
        self.pick_group(|candidate, best| candidate < best)
    }

    /// All elements, group after group.
    pub fn flatten(&self) -> Collection<T>
    where
        T: Clone,
    {
        let mut all = Collection::with_capacity(self.total_items());
        for (_, group) in &self.groups {
            all.extend_from(group);
        }
        all
    }

    /// Mapping from each key's plain form to the converted elements of its
    /// group. In JSON mode keys become text and colliding texts fail with
    /// `DuplicateKey`.
    pub fn to_structure(&self, mode: Mode) -> Result<Plain>
    where
        T: AsValue,
    {
        let structurizer = Structurizer::new();
        let mut seen = AHashSet::with_capacity(self.groups.len());
        let mut entries = Vec::with_capacity(self.groups.len());
        for (key, group) in &self.groups {
            let key = if mode.is_json() {
                let text = key.to_plain().key_text();
                if !seen.insert(text.clone()) {
                    return Err(Error::duplicate_key(text));
                }
                Plain::Str(text)
            } else {
                key.to_plain()
            };
            let items = group.to_structure_with(&structurizer, mode)?;
            entries.push((key, Plain::List(items)));
        }
        Ok(Plain::Map(entries))
    }

    fn pick_group(
        &self,
        better: impl Fn(usize, usize) -> bool,
    ) -> Option<(&GroupKey, &Collection<T>)> {
        let mut best: Option<&(GroupKey, Collection<T>)> = None;
        for entry in &self.groups {
            let replace = match best {
                None => true,
                Some(current) => better(entry.1.len(), current.1.len()),
            };
            if replace {
                best = Some(entry);
            }
        }
        best.map(|(key, group)| (key, group))
    }
}

impl<T> Default for GroupMap<T> {
    fn default() -> Self {
        GroupMap::new()
    }
}

impl<T> FromIterator<(GroupKey, Collection<T>)> for GroupMap<T> {
    fn from_iter<I: IntoIterator<Item = (GroupKey, Collection<T>)>>(iter: I) -> Self {
        let mut map = GroupMap::new();
        for (key, group) in iter {
            map.insert(key, group);
        }
        map
    }
}

impl<T> IntoIterator for GroupMap<T> {
    type Item = (GroupKey, Collection<T>);
    type IntoIter = std::vec::IntoIter<(GroupKey, Collection<T>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
