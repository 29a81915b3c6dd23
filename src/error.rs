use crate::Direction;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reasons a sequence of entries can't back a [`SortedIndex`](crate::SortedIndex).
///
/// `position` is the 0 based offset of the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("duplicate key at position {position}")]
    DuplicateKey { position: usize },

    #[error("key at position {position} breaks {direction:?} order")]
    OutOfOrder {
        position: usize,
        direction: Direction,
    },

    #[error("key at position {position} is not comparable")]
    IncomparableKey { position: usize },
}
