use std::{cmp::Ordering, fmt::Debug, hash::Hash};

/// Numeric key of an [`OrderedIndex`](crate::OrderedIndex).
///
/// A key is used three ways: as the identity of an entry, as the sort order,
/// and as the metric for closest key search.
pub trait Key: Copy + PartialOrd + Debug {
    /// Hashable identity of the key, two keys with equal bits are the same entry.
    type Bits: Copy + Eq + Hash + Debug;

    /// Absolute difference between two keys.
    type Distance: Copy + PartialOrd + Debug;

    fn to_bits(&self) -> Self::Bits;

    /// Total order used when sorting, never panics.
    fn key_cmp(&self, other: &Self) -> Ordering;

    fn distance(&self, other: &Self) -> Self::Distance;

    /// Returns false if the key can't be compared with others (NaN).
    #[inline]
    fn is_comparable(&self) -> bool {
        true
    }
}

macro_rules! impl_int_key {
    ($($t:ty => $d:ty),* $(,)?) => {
        $(
            impl Key for $t {
                type Bits = $t;
                type Distance = $d;

                #[inline]
                fn to_bits(&self) -> Self::Bits {
                    *self
                }

                #[inline]
                fn key_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                #[inline]
                fn distance(&self, other: &Self) -> Self::Distance {
                    self.abs_diff(*other)
                }
            }
        )*
    };
}

impl_int_key!(
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
    i128 => u128,
    isize => usize,
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    u128 => u128,
    usize => usize,
);

macro_rules! impl_float_key {
    ($($t:ty => $bits:ty),* $(,)?) => {
        $(
            impl Key for $t {
                type Bits = $bits;
                type Distance = $t;

                /// `-0.0` and `0.0` share one identity, so does every NaN.
                #[inline]
                fn to_bits(&self) -> Self::Bits {
                    if self.is_nan() {
                        <$t>::NAN.to_bits()
                    } else if *self == 0.0 {
                        (0.0 as $t).to_bits()
                    } else {
                        <$t>::to_bits(*self)
                    }
                }

                #[inline]
                fn key_cmp(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }

                #[inline]
                fn distance(&self, other: &Self) -> Self::Distance {
                    (self - other).abs()
                }

                #[inline]
                fn is_comparable(&self) -> bool {
                    !self.is_nan()
                }
            }
        )*
    };
}

impl_float_key!(f32 => u32, f64 => u64);
