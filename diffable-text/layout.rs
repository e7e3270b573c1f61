//! Position-aware traversal of a [`Snapshot`].
//!
//! A [`Layout`] owns one snapshot and addresses it with [`Index`]es that pair
//! a [`snapshot::Index`] with a [`Position`] in the counting scheme `S`. Every
//! step forward adds the size of the stepped-over character in `S`, every
//! step backward subtracts it, so stepping is O(1) and scanning the whole
//! layout is O(n).
//!
//! ```text
//! characters:  $   1   ,   2   3   4
//! utf16:      0   1   2   3   4   5   6
//! ```
//!
//! # Caret search
//!
//! A caret rests between two symbols and is represented by the index of the
//! symbol after it. It may only rest against symbols without
//! [`crate::attribute::Attribute::PASSTHROUGH`], see [`Layout::nonpassthrough`].
//! [`Layout::caret`] searches for such a resting place in one direction:
//!
//! - forward, [`Jump::To`]: before the first nonpassthrough symbol
//! - forward, [`Jump::Through`]: after it
//! - backward, [`Jump::To`]: after the last nonpassthrough symbol
//! - backward, [`Jump::Through`]: before it

use std::{
  cmp::Ordering,
  hash::{
    Hash,
    Hasher,
  },
  marker::PhantomData,
  ops::Range,
};

use diffable_core::{
  Position,
  Scheme,
};

use crate::{
  movement::{
    Direction,
    Jump,
  },
  snapshot::{
    self,
    Snapshot,
  },
};

/// A [`snapshot::Index`] together with its position in scheme `S`.
///
/// Indices of one layout compare by position, which grows strictly with the
/// symbol offset.
#[derive(Debug, Clone, Copy)]
pub struct Index<S: Scheme> {
  snapshot: snapshot::Index,
  position: Position<S>,
}

impl<S: Scheme> Index<S> {
  pub(crate) const fn new(snapshot: snapshot::Index, position: Position<S>) -> Self {
    Self { snapshot, position }
  }

  pub const fn snapshot(self) -> snapshot::Index {
    self.snapshot
  }

  pub const fn position(self) -> Position<S> {
    self.position
  }

  /// Symbol offset into the snapshot.
  pub const fn offset(self) -> usize {
    self.snapshot.attribute()
  }
}

impl<S: Scheme> PartialEq for Index<S> {
  fn eq(&self, other: &Self) -> bool {
    self.position == other.position
  }
}

impl<S: Scheme> Eq for Index<S> {}

impl<S: Scheme> PartialOrd for Index<S> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<S: Scheme> Ord for Index<S> {
  fn cmp(&self, other: &Self) -> Ordering {
    self.position.cmp(&other.position)
  }
}

impl<S: Scheme> Hash for Index<S> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.position.hash(state);
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<S: Scheme> {
  snapshot: Snapshot,
  end:      Position<S>,
  scheme:   PhantomData<S>,
}

impl<S: Scheme> Default for Layout<S> {
  fn default() -> Self {
    Self::new(Snapshot::new())
  }
}

impl<S: Scheme> Layout<S> {
  pub fn new(snapshot: Snapshot) -> Self {
    let end = Position::zero().traverse(snapshot.characters(), snapshot.len());
    Self {
      snapshot,
      end,
      scheme: PhantomData,
    }
  }

  pub fn snapshot(&self) -> &Snapshot {
    &self.snapshot
  }

  pub fn characters(&self) -> &str {
    self.snapshot.characters()
  }

  pub fn start_index(&self) -> Index<S> {
    Index::new(self.snapshot.start_index(), Position::zero())
  }

  pub fn end_index(&self) -> Index<S> {
    Index::new(self.snapshot.end_index(), self.end)
  }

  pub fn range(&self) -> Range<Index<S>> {
    self.start_index()..self.end_index()
  }

  /// # Panics
  ///
  /// Panics if `index` is the end index.
  pub fn index_after(&self, index: Index<S>) -> Index<S> {
    let character = self.snapshot.character(index.snapshot);
    Index::new(
      self.snapshot.index_after(index.snapshot),
      index.position.after(character),
    )
  }

  /// # Panics
  ///
  /// Panics if `index` is the start index.
  pub fn index_before(&self, index: Index<S>) -> Index<S> {
    let snapshot = self.snapshot.index_before(index.snapshot);
    let character = self.snapshot.character(snapshot);
    Index::new(snapshot, index.position.before(character))
  }

  /// The layout index of a snapshot index, measured from the start.
  pub fn index(&self, snapshot: snapshot::Index) -> Index<S> {
    let prefix = &self.snapshot.characters()[..snapshot.character()];
    Index::new(
      snapshot,
      Position::zero().traverse(prefix, snapshot.attribute()),
    )
  }

  /// The index at `position`, scanning from `from`.
  ///
  /// Positions past the end are clamped. A position inside a character
  /// rounds away from `from`: up when scanning forward, down when scanning
  /// backward.
  pub fn index_at(&self, position: Position<S>, from: Index<S>) -> Index<S> {
    let position = position.min(self.end);
    let mut index = from;
    match Direction::between(from.position, position) {
      Some(Direction::Forward) => {
        while index.position < position {
          index = self.index_after(index);
        }
      },
      Some(Direction::Backward) => {
        while index.position > position {
          index = self.index_before(index);
        }
      },
      None => (),
    }
    index
  }

  /// Whether a caret may rest against the symbol at `index`.
  pub fn nonpassthrough(&self, index: Index<S>) -> bool {
    self.snapshot.nonpassthrough(index.snapshot)
  }

  /// The index of the symbol next to `index` in `direction`, if any.
  pub fn peek(&self, index: Index<S>, direction: Direction) -> Option<Index<S>> {
    match direction {
      Direction::Forward => (index != self.end_index()).then_some(index),
      Direction::Backward => (index != self.start_index()).then(|| self.index_before(index)),
    }
  }

  /// Searches from `from` toward `direction` for a place where a caret may
  /// rest, stopping at or jumping over the first nonpassthrough symbol.
  pub fn caret(&self, from: Index<S>, direction: Direction, jump: Jump) -> Option<Index<S>> {
    match direction {
      Direction::Forward => self.caret_forward(from, jump),
      Direction::Backward => self.caret_backward(from, jump),
    }
  }

  fn caret_forward(&self, from: Index<S>, jump: Jump) -> Option<Index<S>> {
    let end = self.end_index();
    let mut index = from;
    while index != end {
      if self.nonpassthrough(index) {
        return Some(match jump {
          Jump::To => index,
          Jump::Through => self.index_after(index),
        });
      }
      index = self.index_after(index);
    }
    None
  }

  fn caret_backward(&self, from: Index<S>, jump: Jump) -> Option<Index<S>> {
    let start = self.start_index();
    let mut index = from;
    while index != start {
      let after = index;
      index = self.index_before(index);
      if self.nonpassthrough(index) {
        return Some(match jump {
          Jump::To => after,
          Jump::Through => index,
        });
      }
    }
    None
  }
}
