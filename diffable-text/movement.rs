//! Directions for caret search and placement.
//!
//! # Usage
//!
//! ```ignore
//! use diffable_text::movement::{Direction, Jump};
//!
//! assert_eq!(Direction::Forward.reversed(), Direction::Backward);
//! assert_eq!(Direction::between(3, 5), Some(Direction::Forward));
//! assert_eq!(Direction::between(5, 5), None);
//! ```

/// The direction of caret movement or search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
  /// Moving toward the end of the text (increasing positions).
  Forward,
  /// Moving toward the start of the text (decreasing positions).
  Backward,
}

impl Direction {
  #[must_use]
  pub fn reversed(self) -> Self {
    match self {
      Direction::Forward => Direction::Backward,
      Direction::Backward => Direction::Forward,
    }
  }

  /// The direction of travel from `from` to `to`, if they differ.
  pub fn between<T: Ord>(from: T, to: T) -> Option<Self> {
    match from.cmp(&to) {
      std::cmp::Ordering::Less => Some(Direction::Forward),
      std::cmp::Ordering::Equal => None,
      std::cmp::Ordering::Greater => Some(Direction::Backward),
    }
  }
}

/// How far a caret search travels once it finds a symbol it may rest
/// against.
///
/// A caret sits between two symbols. Searching toward a symbol and stopping
/// at its near edge is [`Jump::To`]; continuing over it to its far edge is
/// [`Jump::Through`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Jump {
  To,
  Through,
}
