mod key;
pub use key::Key;

mod direction;
pub use direction::Direction;

mod error;
pub use error::{Error, Result};

mod closest;
pub use closest::Closest;

pub mod map;
pub use map::{OrderedAssociativeIndex, OrderedIndex};

mod sorted;
pub use sorted::SortedIndex;
