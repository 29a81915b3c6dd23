use crate::Key;

/// Result of a closest key search, `index` is the position in iteration order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Closest<K> {
    pub key: K,
    pub index: usize,
}

/// Scan `keys` from the front for the key nearest to `target`.
///
/// The scan stops on an exact match, or as soon as the distance grows past the
/// best one seen, which is only correct when `keys` is sorted in either
/// direction. Ties keep the earlier key. NaN keys are skipped, a NaN target
/// finds nothing.
pub(crate) fn scan<K: Key>(keys: impl Iterator<Item = K>, target: &K) -> Option<Closest<K>> {
    if !target.is_comparable() {
        return None;
    }

    let mut best: Option<(Closest<K>, K::Distance)> = None;
    let mut visited = 0;
    let mut stopped = false;

    for (index, key) in keys.enumerate() {
        visited += 1;

        if key == *target {
            tracing::trace!(visited, index, "closest key: exact match");
            return Some(Closest { key, index });
        }

        if !key.is_comparable() {
            continue;
        }

        let distance = key.distance(target);
        match best {
            Some((_, best_distance)) if distance > best_distance => {
                stopped = true;
                break;
            }
            Some((_, best_distance)) if !(distance < best_distance) => {}
            _ => best = Some((Closest { key, index }, distance)),
        }
    }

    tracing::trace!(visited, stopped, found = best.is_some(), "closest key scan");

    best.map(|(closest, _)| closest)
}
