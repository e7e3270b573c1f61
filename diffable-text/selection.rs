//! Carets and selections over a [`Layout`].
//!
//! A [`Selection`] is a range of layout indices. When `lower == upper` the
//! selection is a collapsed caret, which is the common case.
//!
//! ```text
//! lower=2, upper=2: "$1|,234"    (caret)
//! lower=1, upper=6: "$[1,234]"   (selection)
//! ```
//!
//! # Placement
//!
//! [`Layout::preferred_selection`] places both bounds with
//! [`Layout::preferred`](crate::layout::Layout::preferred). The upper bound
//! is placed first, looking backward. A non-empty selection then places its
//! lower bound looking forward and clamps it to the upper bound, so the
//! selection collapses to a caret when both bounds converge. A selection of
//! the whole layout is returned as is.

use std::ops::Range;

use diffable_core::{
  Position,
  Scheme,
};

use crate::{
  caret::Caret,
  layout::{
    Index,
    Layout,
  },
  movement::Direction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection<S: Scheme> {
  lower: Index<S>,
  upper: Index<S>,
}

impl<S: Scheme> Selection<S> {
  /// A selection between two indices, in either order.
  pub fn new(a: Index<S>, b: Index<S>) -> Self {
    Self {
      lower: a.min(b),
      upper: a.max(b),
    }
  }

  pub fn caret(index: Index<S>) -> Self {
    Self {
      lower: index,
      upper: index,
    }
  }

  pub fn lower(&self) -> Index<S> {
    self.lower
  }

  pub fn upper(&self) -> Index<S> {
    self.upper
  }

  /// Whether this is a collapsed caret.
  pub fn is_empty(&self) -> bool {
    self.lower == self.upper
  }

  pub fn range(&self) -> Range<Index<S>> {
    self.lower..self.upper
  }

  pub fn positions(&self) -> Range<Position<S>> {
    self.lower.position()..self.upper.position()
  }

  /// Maps both bounds, keeping the result ordered.
  #[must_use]
  pub fn map<L, U>(self, lower: L, upper: U) -> Self
  where
    L: FnOnce(Index<S>) -> Index<S>,
    U: FnOnce(Index<S>) -> Index<S>,
  {
    Self::new(lower(self.lower), upper(self.upper))
  }
}

impl<S: Scheme> From<Range<Index<S>>> for Selection<S> {
  fn from(range: Range<Index<S>>) -> Self {
    Self::new(range.start, range.end)
  }
}

/// The direction each bound of a selection travelled, if it moved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Momentum {
  pub lower: Option<Direction>,
  pub upper: Option<Direction>,
}

impl Momentum {
  pub fn between<S: Scheme>(from: &Selection<S>, to: &Selection<S>) -> Self {
    Self {
      lower: Direction::between(from.lower, to.lower),
      upper: Direction::between(from.upper, to.upper),
    }
  }
}

impl<S: Scheme> Layout<S> {
  /// The whole layout as a selection.
  pub fn selection(&self) -> Selection<S> {
    Selection::new(self.start_index(), self.end_index())
  }

  /// Places both bounds of `selection` where carets may rest.
  pub fn preferred_selection(&self, selection: Selection<S>, momentum: Momentum) -> Selection<S> {
    if !selection.is_empty() && selection == self.selection() {
      return selection;
    }

    let upper = self.place(Caret::upper(selection.upper).with_momentum(momentum.upper));
    if selection.is_empty() {
      return Selection::caret(upper);
    }

    let lower = self
      .place(Caret::lower(selection.lower).with_momentum(momentum.lower))
      .min(upper);
    Selection::new(lower, upper)
  }
}
