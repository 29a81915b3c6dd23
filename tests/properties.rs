use std::collections::BTreeSet;

use ordered_index::{Closest, Direction, OrderedIndex, SortedIndex};
use proptest::prelude::*;
use proptest::test_runner::Config;

/// Brute force nearest key, ties go to the lower position.
fn nearest(keys: &[i64], target: i64) -> Option<Closest<i64>> {
    keys.iter()
        .enumerate()
        .fold(None, |best: Option<Closest<i64>>, (index, key)| match best {
            Some(b) if b.key.abs_diff(target) <= key.abs_diff(target) => Some(b),
            _ => Some(Closest { key: *key, index }),
        })
}

fn unique_keys() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(-10_000_i64..10_000, 0..200)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn direction() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)]
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn sort_orders_keys(keys in unique_keys(), direction in direction()) {
        let mut index = keys.iter().map(|k| (*k, ())).collect::<OrderedIndex<_, _>>();
        index.sort_by_key(direction);

        let sorted = index.keys().collect::<Vec<_>>();
        prop_assert_eq!(sorted.len(), keys.len());
        for pair in sorted.windows(2) {
            match direction {
                Direction::Ascending => prop_assert!(pair[0] <= pair[1]),
                Direction::Descending => prop_assert!(pair[0] >= pair[1]),
            }
        }
    }

    #[test]
    fn sort_reverse_roundtrip(keys in unique_keys()) {
        let mut index = keys.iter().map(|k| (*k, *k)).collect::<OrderedIndex<_, _>>();

        index.sort_by_key(Direction::Ascending);
        let ascending = index.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>();

        index.sort_by_key(Direction::Descending);
        let descending = index.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>();

        prop_assert_eq!(descending, ascending.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn closest_matches_brute_force(
        keys in unique_keys(),
        direction in direction(),
        target in -12_000_i64..12_000,
    ) {
        let index = keys.iter().map(|k| (*k, ())).collect::<OrderedIndex<_, _>>()
            .into_sorted(direction);
        let sorted = index.keys().collect::<Vec<_>>();

        prop_assert_eq!(index.find_closest_key(target), nearest(&sorted, target));
    }

    #[test]
    fn closest_exact_match(keys in unique_keys(), direction in direction(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!keys.is_empty());

        let mut index = keys.iter().map(|k| (*k, ())).collect::<OrderedIndex<_, _>>();
        index.sort_by_key(direction);

        let key = keys[pick.index(keys.len())];
        let position = index.position(key).unwrap();
        prop_assert_eq!(index.find_closest_key(key), Some(Closest { key, index: position }));
    }

    #[test]
    fn overwrite_keeps_len(keys in unique_keys(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!keys.is_empty());

        let mut index = keys.iter().map(|k| (*k, 0)).collect::<OrderedIndex<_, _>>();
        let key = keys[pick.index(keys.len())];
        let position = index.position(key);

        index.set(key, 1);
        index.set(key, 2);

        prop_assert_eq!(index.len(), keys.len());
        prop_assert_eq!(index.get(key), Some(&2));
        prop_assert_eq!(index.position(key), position);
    }

    #[test]
    fn sorted_entries_validate(keys in unique_keys(), direction in direction()) {
        let mut sorted = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>();
        if direction == Direction::Descending {
            sorted.reverse();
        }

        let index = SortedIndex::try_from_entries(direction, sorted.iter().map(|k| (*k, ())));
        prop_assert!(index.is_ok());

        if sorted.len() > 1 {
            let index = SortedIndex::try_from_entries(direction.reverse(), sorted.iter().map(|k| (*k, ())));
            prop_assert!(index.is_err());
        }
    }
}

#[test]
fn empty_index_has_no_closest_key() {
    let index = OrderedIndex::<i64, ()>::new();
    for target in [i64::MIN, -1, 0, 1, i64::MAX] {
        assert_eq!(index.find_closest_key(target), None);
    }
}

#[test]
fn float_keys_closest() {
    let index = OrderedIndex::from_entries([(0.5, 'a'), (-3.25, 'b'), (10.0, 'c'), (2.0, 'd')])
        .into_sorted(Direction::Descending);

    assert_eq!(
        index.keys().collect::<Vec<_>>(),
        vec![10.0, 2.0, 0.5, -3.25]
    );
    assert_eq!(
        index.find_closest_key(1.0),
        Some(Closest { key: 0.5, index: 2 })
    );
    assert_eq!(
        index.find_closest_key(-100.0),
        Some(Closest { key: -3.25, index: 3 })
    );
}
