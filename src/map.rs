use std::{
    fmt,
    hash::{Hash, Hasher},
};

use indexmap::IndexMap;

use crate::{closest, Closest, Direction, Key, SortedIndex};

/// Insertion ordered map from numeric keys to values.
///
/// Iteration follows insertion order until [`OrderedIndex::sort_by_key`] is
/// called, then it follows the sorted order. [`OrderedIndex::find_closest_key`]
/// relies on the index being sorted, use [`OrderedIndex::into_sorted`] to have
/// that checked by the type system.
///
/// # Example
/// ```rust
/// use ordered_index::{Closest, Direction, OrderedIndex};
///
/// let mut index = OrderedIndex::new();
/// for (k, v) in [(100, "a"), (5, "a"), (4, "b"), (1, "e"), (3, "c"), (2, "d")] {
///     index.set(k, v);
/// }
///
/// index.sort_by_key(Direction::Descending);
/// assert_eq!(index.keys().collect::<Vec<_>>(), vec![100, 5, 4, 3, 2, 1]);
/// assert_eq!(index.find_closest_key(3), Some(Closest { key: 3, index: 3 }));
/// ```
#[derive(Clone)]
pub struct OrderedIndex<K: Key, V> {
    entries: IndexMap<Slot<K>, V>,
}

/// Float keyed index, the shape feeds usually come in.
pub type OrderedAssociativeIndex<V> = OrderedIndex<f64, V>;

/// Hash identity of a key, see [`Key::to_bits`].
#[derive(Clone, Copy)]
struct Slot<K>(K);

impl<K: Key> PartialEq for Slot<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl<K: Key> Eq for Slot<K> {}

impl<K: Key> Hash for Slot<K> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}

impl<K: Key, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> OrderedIndex<K, V> {
    /// Create an empty index
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::<i64, String>::new();
    /// assert!(index.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create an empty index with room for `capacity` entries
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Bulk load entries in the given order. A repeated key overwrites the
    /// value at its first position.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from_entries([(3, 'a'), (1, 'b'), (3, 'c')]);
    /// assert_eq!(index.len(), 2);
    /// assert_eq!(index.iter().collect::<Vec<_>>(), vec![(3, &'c'), (1, &'b')]);
    /// ```
    pub fn from_entries(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        let entries = entries.into_iter();
        let mut me = Self::with_capacity(entries.size_hint().0);
        me.extend(entries);
        me
    }

    /// Returns the entry count
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index holds no entry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert or overwrite the value for `key`. An existing key keeps its position.
    #[inline]
    pub fn set(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Same as [`OrderedIndex::set`], returns the replaced value if any.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// assert!(index.insert(1.5, "x").is_none());
    /// assert_eq!(index.insert(1.5, "y"), Some("x"));
    /// assert_eq!(index.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(Slot(key), value)
    }

    /// Returns a reference to the value for `key`.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from_entries([(-0.0, 'a')]);
    /// assert_eq!(index.get(0.0), Some(&'a'));
    /// assert!(index.get(1.0).is_none());
    /// ```
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(&Slot(key))
    }

    /// Returns a mut reference to the value for `key`
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.entries.get_mut(&Slot(key))
    }

    /// Returns true if the index has an entry for `key`
    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.entries.contains_key(&Slot(key))
    }

    /// Returns the position of `key` in iteration order
    #[inline]
    pub fn position(&self, key: K) -> Option<usize> {
        self.entries.get_index_of(&Slot(key))
    }

    /// Returns the entry at position `index` in iteration order
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(K, &V)> {
        self.entries.get_index(index).map(|(slot, v)| (slot.0, v))
    }

    /// Removes `key`, the remaining entries keep their relative order.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::from_entries([(1, ()), (2, ()), (3, ())]);
    /// assert!(index.remove(2).is_some());
    /// assert!(index.remove(2).is_none());
    /// assert_eq!(index.keys().collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.entries.shift_remove(&Slot(key))
    }

    /// Removes all entries
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Reverse the iteration order in place
    #[inline]
    pub(crate) fn reverse(&mut self) {
        self.entries.reverse();
    }

    /// Reorder all entries by key.
    ///
    /// The entries are sorted and swapped back in one step, readers holding a
    /// shared borrow never see a half sorted index.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::{Direction, OrderedIndex};
    ///
    /// let mut index = OrderedIndex::from_entries([(2, ()), (7, ()), (1, ())]);
    /// index.sort_by_key(Direction::Ascending);
    /// assert_eq!(index.keys().collect::<Vec<_>>(), vec![1, 2, 7]);
    ///
    /// index.sort_by_key(Direction::Descending);
    /// assert_eq!(index.keys().collect::<Vec<_>>(), vec![7, 2, 1]);
    /// ```
    pub fn sort_by_key(&mut self, direction: Direction) {
        if self.is_empty() {
            return;
        }

        self.entries
            .sort_by(|a, _, b, _| direction.apply(a.0.key_cmp(&b.0)));

        tracing::trace!(len = self.len(), ?direction, "sorted index");
    }

    /// Find the entry whose key is nearest to `target`, with its position.
    ///
    /// The index must be sorted, in either direction, for the result to be the
    /// true nearest key: the scan stops once the distance starts growing. On
    /// an unsorted index the result is some key, never a panic. Ties go to the
    /// earlier entry.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::{Closest, Direction, OrderedIndex};
    ///
    /// let mut index = OrderedIndex::from_entries([(1, ()), (100, ()), (5, ()), (4, ())]);
    /// index.sort_by_key(Direction::Descending);
    ///
    /// assert_eq!(index.find_closest_key(8), Some(Closest { key: 5, index: 1 }));
    /// assert_eq!(index.find_closest_key(80), Some(Closest { key: 100, index: 0 }));
    ///
    /// index.clear();
    /// assert_eq!(index.find_closest_key(8), None);
    /// ```
    #[inline]
    pub fn find_closest_key(&self, target: K) -> Option<Closest<K>> {
        closest::scan(self.keys(), &target)
    }

    /// Sort by `direction` and hand back an index that stays sorted.
    pub fn into_sorted(mut self, direction: Direction) -> SortedIndex<K, V> {
        self.sort_by_key(direction);
        SortedIndex::new_unchecked(self, direction)
    }

    /// Returns an iterator over `(key, &value)` in iteration order.
    #[inline]
    pub fn iter(&self) -> iter::Iter<'_, K, V> {
        iter::Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the keys in iteration order
    #[inline]
    pub fn keys(&self) -> iter::Keys<'_, K, V> {
        iter::Keys {
            inner: self.entries.keys(),
        }
    }

    /// Returns an iterator over the values in iteration order
    #[inline]
    pub fn values(&self) -> iter::Values<'_, K, V> {
        iter::Values {
            inner: self.entries.values(),
        }
    }

    /// Returns an iterator over mut references to the values in iteration order
    #[inline]
    pub fn values_mut(&mut self) -> iter::ValuesMut<'_, K, V> {
        iter::ValuesMut {
            inner: self.entries.values_mut(),
        }
    }
}

impl<K: Key, V: fmt::Debug> fmt::Debug for OrderedIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Key, V> Extend<(K, V)> for OrderedIndex<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (Slot(k), v)));
    }
}

impl<K: Key, V> FromIterator<(K, V)> for OrderedIndex<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl<K: Key, V> IntoIterator for OrderedIndex<K, V> {
    type Item = (K, V);
    type IntoIter = iter::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        iter::IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, K: Key, V> IntoIterator for &'a OrderedIndex<K, V> {
    type Item = (K, &'a V);
    type IntoIter = iter::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub mod iter {
    use std::iter::FusedIterator;

    use super::Slot;
    use crate::Key;

    /// Borrowed iterator over `(key, &value)`
    pub struct Iter<'a, K, V> {
        pub(super) inner: indexmap::map::Iter<'a, Slot<K>, V>,
    }

    impl<'a, K: Key, V> Iterator for Iter<'a, K, V> {
        type Item = (K, &'a V);

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next().map(|(slot, v)| (slot.0, v))
        }
    }

    impl<'a, K: Key, V> DoubleEndedIterator for Iter<'a, K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back().map(|(slot, v)| (slot.0, v))
        }
    }

    impl<'a, K: Key, V> ExactSizeIterator for Iter<'a, K, V> {}
    impl<'a, K: Key, V> FusedIterator for Iter<'a, K, V> {}

    pub struct Keys<'a, K, V> {
        pub(super) inner: indexmap::map::Keys<'a, Slot<K>, V>,
    }

    impl<'a, K: Key, V> Iterator for Keys<'a, K, V> {
        type Item = K;

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next().map(|slot| slot.0)
        }
    }

    impl<'a, K: Key, V> DoubleEndedIterator for Keys<'a, K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back().map(|slot| slot.0)
        }
    }

    impl<'a, K: Key, V> ExactSizeIterator for Keys<'a, K, V> {}
    impl<'a, K: Key, V> FusedIterator for Keys<'a, K, V> {}

    pub struct Values<'a, K, V> {
        pub(super) inner: indexmap::map::Values<'a, Slot<K>, V>,
    }

    impl<'a, K, V> Iterator for Values<'a, K, V> {
        type Item = &'a V;

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back()
        }
    }

    impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}
    impl<'a, K, V> FusedIterator for Values<'a, K, V> {}

    pub struct ValuesMut<'a, K, V> {
        pub(super) inner: indexmap::map::ValuesMut<'a, Slot<K>, V>,
    }

    impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
        type Item = &'a mut V;

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next()
        }
    }

    impl<'a, K, V> DoubleEndedIterator for ValuesMut<'a, K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back()
        }
    }

    impl<'a, K, V> ExactSizeIterator for ValuesMut<'a, K, V> {}
    impl<'a, K, V> FusedIterator for ValuesMut<'a, K, V> {}

    /// Owned iterator, yields entries in iteration order
    pub struct IntoIter<K, V> {
        pub(super) inner: indexmap::map::IntoIter<Slot<K>, V>,
    }

    impl<K: Key, V> Iterator for IntoIter<K, V> {
        type Item = (K, V);

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            self.inner.size_hint()
        }

        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            self.inner.next().map(|(slot, v)| (slot.0, v))
        }
    }

    impl<K: Key, V> DoubleEndedIterator for IntoIter<K, V> {
        fn next_back(&mut self) -> Option<Self::Item> {
            self.inner.next_back().map(|(slot, v)| (slot.0, v))
        }
    }

    impl<K: Key, V> ExactSizeIterator for IntoIter<K, V> {}
    impl<K: Key, V> FusedIterator for IntoIter<K, V> {}
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};

    use super::OrderedIndex;
    use crate::Key;

    /// Serialized as a sequence of `(key, value)` pairs in iteration order.
    impl<K: Key + Serialize, V: Serialize> Serialize for OrderedIndex<K, V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for entry in self.iter() {
                seq.serialize_element(&entry)?;
            }
            seq.end()
        }
    }

    impl<'de, K, V> Deserialize<'de> for OrderedIndex<K, V>
    where
        K: Key + Deserialize<'de>,
        V: Deserialize<'de>,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Vec::<(K, V)>::deserialize(deserializer).map(Self::from_entries)
        }
    }
}
