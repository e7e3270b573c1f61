//! Caret placement.
//!
//! The nominal position of a caret, computed from offset arithmetic after a
//! diff or requested by the user, often lands inside formatting filler. The
//! placement algorithm moves it to the nearest place where a caret may rest:
//!
//! 1. if the snapshot has an anchor, the anchor, regardless of input
//! 2. the index itself, if the symbol next to it in the preferred direction
//!    is nonpassthrough
//! 3. a search toward the momentum (or the preference, absent momentum),
//!    jumping *to* the found symbol when both agree and *through* it when
//!    they disagree
//! 4. a search in the reverse direction, always jumping *to*
//! 5. the start index
//!
//! The reverse search always jumps *to*, regardless of the jump step 3 used:
//! it rounds back to the closest content rather than nudging past it.

use diffable_core::Scheme;
use tracing::trace;

use crate::{
  layout::{
    Index,
    Layout,
  },
  movement::{
    Direction,
    Jump,
  },
};

/// A caret detached from its layout while it is being placed.
///
/// `affinity` is the side the caret conceptually came from: forward for the
/// lower bound of a selection, backward for the upper bound. `momentum`
/// overrides it when the caller knows which way the caret is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret<S: Scheme> {
  pub index:    Index<S>,
  pub affinity: Direction,
  pub momentum: Option<Direction>,
}

impl<S: Scheme> Caret<S> {
  pub fn new(index: Index<S>, affinity: Direction) -> Self {
    Self {
      index,
      affinity,
      momentum: None,
    }
  }

  /// A caret for the lower bound of a selection.
  pub fn lower(index: Index<S>) -> Self {
    Self::new(index, Direction::Forward)
  }

  /// A caret for the upper bound of a selection, or a collapsed caret.
  pub fn upper(index: Index<S>) -> Self {
    Self::new(index, Direction::Backward)
  }

  #[must_use]
  pub fn with_momentum(mut self, momentum: Option<Direction>) -> Self {
    self.momentum = momentum;
    self
  }
}

impl<S: Scheme> Layout<S> {
  /// The index where `caret` comes to rest.
  pub fn place(&self, caret: Caret<S>) -> Index<S> {
    self.preferred(caret.index, caret.affinity, caret.momentum)
  }

  /// The nearest index to `index` where a caret may rest.
  pub fn preferred(
    &self,
    index: Index<S>,
    preference: Direction,
    momentum: Option<Direction>,
  ) -> Index<S> {
    if let Some(anchor) = self.snapshot().anchor() {
      trace!(anchor = anchor.attribute(), "caret collapsed to anchor");
      return self.index(anchor);
    }

    if self
      .peek(index, preference)
      .is_some_and(|peek| self.nonpassthrough(peek))
    {
      return index;
    }

    let direction = momentum.unwrap_or(preference);
    let jump = if direction == preference {
      Jump::To
    } else {
      Jump::Through
    };

    if let Some(caret) = self.caret(index, direction, jump) {
      trace!(from = index.offset(), to = caret.offset(), ?direction, ?jump, "caret moved");
      return caret;
    }

    // the reverse search always jumps to, even when step 3 jumped through
    let reversed = direction.reversed();
    if let Some(caret) = self.caret(index, reversed, Jump::To) {
      trace!(from = index.offset(), to = caret.offset(), direction = ?reversed, "caret reversed");
      return caret;
    }

    trace!(from = index.offset(), "no resting place, caret moved to start");
    self.start_index()
  }
}
