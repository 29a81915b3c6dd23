use crate::{closest, map::iter, Closest, Direction, Error, Key, OrderedIndex, Result};

/// An [`OrderedIndex`] known to be sorted by key in one direction.
///
/// Only reachable through [`OrderedIndex::into_sorted`] or
/// [`SortedIndex::try_from_entries`], so `find_closest_key` always sees sorted
/// keys. There is no `set`, go through [`SortedIndex::into_inner`] to mutate.
///
/// # Example
/// ```rust
/// use ordered_index::{Closest, Direction, OrderedIndex};
///
/// let index = OrderedIndex::from_entries([(10, "x"), (30, "z"), (20, "y")])
///     .into_sorted(Direction::Ascending);
///
/// assert_eq!(index.find_closest_key(24), Some(Closest { key: 20, index: 1 }));
///
/// let mut index = index.into_inner();
/// index.set(25, "w");
/// ```
#[derive(Debug, Clone)]
pub struct SortedIndex<K: Key, V> {
    inner: OrderedIndex<K, V>,
    direction: Direction,
}

impl<K: Key, V> SortedIndex<K, V> {
    pub(crate) fn new_unchecked(inner: OrderedIndex<K, V>, direction: Direction) -> Self {
        Self { inner, direction }
    }

    /// Build from entries that are already strictly ordered in `direction`.
    ///
    /// # Examples
    /// ```rust
    /// use ordered_index::{Direction, Error, SortedIndex};
    ///
    /// let index = SortedIndex::try_from_entries(Direction::Descending, [(3, ()), (2, ()), (1, ())]);
    /// assert!(index.is_ok());
    ///
    /// let err = SortedIndex::try_from_entries(Direction::Descending, [(3, ()), (4, ())]).unwrap_err();
    /// assert_eq!(err, Error::OutOfOrder { position: 1, direction: Direction::Descending });
    /// ```
    pub fn try_from_entries(
        direction: Direction,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self> {
        let entries = entries.into_iter();
        let mut inner = OrderedIndex::with_capacity(entries.size_hint().0);
        let mut prev: Option<K> = None;

        for (position, (key, value)) in entries.enumerate() {
            if let Err(err) = Self::check_next(direction, prev, key, position) {
                tracing::debug!(%err, "rejected sorted entries");
                return Err(err);
            }
            inner.set(key, value);
            prev = Some(key);
        }

        Ok(Self::new_unchecked(inner, direction))
    }

    fn check_next(direction: Direction, prev: Option<K>, key: K, position: usize) -> Result<()> {
        if !key.is_comparable() {
            return Err(Error::IncomparableKey { position });
        }

        let Some(prev) = prev else {
            return Ok(());
        };

        // identity is by bits, `-0.0` and `0.0` are one key
        if prev.to_bits() == key.to_bits() {
            return Err(Error::DuplicateKey { position });
        }

        match direction.apply(prev.key_cmp(&key)) {
            std::cmp::Ordering::Less => Ok(()),
            std::cmp::Ordering::Equal => Err(Error::DuplicateKey { position }),
            std::cmp::Ordering::Greater => Err(Error::OutOfOrder {
                position,
                direction,
            }),
        }
    }

    /// Returns the direction the keys are sorted in
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the entry count
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the index holds no entry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a reference to the value for `key`
    #[inline]
    pub fn get(&self, key: K) -> Option<&V> {
        self.inner.get(key)
    }

    /// Values can change in place, keys can't.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.inner.get_mut(key)
    }

    /// Returns an iterator over `(key, &value)` in sorted order
    #[inline]
    pub fn iter(&self) -> iter::Iter<'_, K, V> {
        self.inner.iter()
    }

    /// Returns an iterator over the keys in sorted order
    #[inline]
    pub fn keys(&self) -> iter::Keys<'_, K, V> {
        self.inner.keys()
    }

    /// See [`OrderedIndex::find_closest_key`], here the result is always the
    /// nearest key.
    #[inline]
    pub fn find_closest_key(&self, target: K) -> Option<Closest<K>> {
        closest::scan(self.inner.keys(), &target)
    }

    /// Flip the order in place. Keys are unique, so reversing the sorted
    /// entries is the same as sorting the other way.
    pub fn reverse(&mut self) {
        self.direction = self.direction.reverse();
        self.inner.reverse();
    }

    /// Borrow the underlying [`OrderedIndex`]
    #[inline]
    pub fn as_index(&self) -> &OrderedIndex<K, V> {
        &self.inner
    }

    /// Give up the order guarantee and get the [`OrderedIndex`] back
    #[inline]
    pub fn into_inner(self) -> OrderedIndex<K, V> {
        self.inner
    }
}

impl<K: Key, V> From<SortedIndex<K, V>> for OrderedIndex<K, V> {
    fn from(sorted: SortedIndex<K, V>) -> Self {
        sorted.into_inner()
    }
}

impl<'a, K: Key, V> IntoIterator for &'a SortedIndex<K, V> {
    type Item = (K, &'a V);
    type IntoIter = iter::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_sorted() {
        let index = OrderedIndex::from_entries([(4, 'b'), (100, 'a'), (1, 'e'), (5, 'a')])
            .into_sorted(Direction::Descending);

        assert_eq!(index.direction(), Direction::Descending);
        assert_eq!(index.keys().collect::<Vec<_>>(), vec![100, 5, 4, 1]);
        assert_eq!(index.find_closest_key(8), Some(Closest { key: 5, index: 1 }));
        assert_eq!(index.get(1), Some(&'e'));
    }

    #[test]
    fn test_reverse() {
        let mut index =
            OrderedIndex::from_entries((0..10).map(|i| (i, ()))).into_sorted(Direction::Ascending);
        index.reverse();
        assert_eq!(index.direction(), Direction::Descending);
        assert_eq!(
            index.keys().collect::<Vec<_>>(),
            (0..10).rev().collect::<Vec<_>>()
        );
        assert_eq!(index.find_closest_key(3), Some(Closest { key: 3, index: 6 }));
    }

    #[test]
    fn test_try_from_entries() {
        let index =
            SortedIndex::try_from_entries(Direction::Ascending, [(1.0, 'a'), (2.5, 'b')]).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.find_closest_key(2.0),
            Some(Closest { key: 2.5, index: 1 })
        );

        let empty = SortedIndex::<i32, ()>::try_from_entries(Direction::Descending, []).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.find_closest_key(0), None);
    }

    #[test]
    fn test_try_from_entries_errors() {
        assert_eq!(
            SortedIndex::try_from_entries(Direction::Ascending, [(1, ()), (1, ())]).unwrap_err(),
            Error::DuplicateKey { position: 1 }
        );
        assert_eq!(
            SortedIndex::try_from_entries(Direction::Ascending, [(1, ()), (3, ()), (2, ())])
                .unwrap_err(),
            Error::OutOfOrder {
                position: 2,
                direction: Direction::Ascending
            }
        );
        assert_eq!(
            SortedIndex::try_from_entries(Direction::Ascending, [(1.0, ()), (f64::NAN, ())])
                .unwrap_err(),
            Error::IncomparableKey { position: 1 }
        );
        assert_eq!(
            Error::IncomparableKey { position: 1 }.to_string(),
            "key at position 1 is not comparable"
        );
    }

    #[test]
    fn test_try_from_entries_signed_zero() {
        // `-0.0` sorts before `0.0` but both are the same entry
        assert_eq!(
            SortedIndex::try_from_entries(Direction::Ascending, [(-0.0f64, 'a'), (0.0, 'b')])
                .unwrap_err(),
            Error::DuplicateKey { position: 1 }
        );
        assert_eq!(
            SortedIndex::try_from_entries(
                Direction::Descending,
                [(1.0f64, 'a'), (0.0, 'b'), (-0.0, 'c')]
            )
            .unwrap_err(),
            Error::DuplicateKey { position: 2 }
        );
    }

    #[test]
    fn test_reverse_keeps_values() {
        let mut index =
            SortedIndex::try_from_entries(Direction::Descending, [(3.5, 'c'), (2.0, 'b'), (-1.0, 'a')])
                .unwrap();
        index.reverse();

        assert_eq!(index.direction(), Direction::Ascending);
        assert_eq!(
            index.iter().collect::<Vec<_>>(),
            vec![(-1.0, &'a'), (2.0, &'b'), (3.5, &'c')]
        );
        assert_eq!(index.as_index().position(3.5), Some(2));
        assert_eq!(
            index.find_closest_key(0.0),
            Some(Closest { key: -1.0, index: 0 })
        );

        index.reverse();
        assert_eq!(index.keys().collect::<Vec<_>>(), vec![3.5, 2.0, -1.0]);
    }

    #[test]
    fn test_into_inner() {
        let sorted = OrderedIndex::from_entries([(2, ()), (1, ())]).into_sorted(Direction::Ascending);
        let mut index: OrderedIndex<_, _> = sorted.into();
        index.set(0, ());
        assert_eq!(index.keys().collect::<Vec<_>>(), vec![1, 2, 0]);
    }
}
