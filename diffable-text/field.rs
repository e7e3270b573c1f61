//! A layout with a selection, kept consistent across edits.
//!
//! [`Field`] owns the text currently on screen and where the user's caret
//! is in it. It changes in three ways:
//!
//! - [`Field::update_snapshot`]: a formatter produced new text. The old
//!   selection is carried over by aligning the old and new snapshots around
//!   it (see [`crate::mismatch`]) and then placed without momentum.
//! - [`Field::update_selection`]: the user moved the caret. The requested
//!   positions are translated to indices and placed with the momentum of the
//!   movement.
//! - [`Field::merge`]: the user's edit was resolved by a formatter. The caret
//!   goes to the end of what was typed or pasted.

use std::{
  ops::Range,
  time::Instant,
};

use diffable_core::{
  Position,
  Scheme,
};
use tracing::{
  debug,
  trace,
};

use crate::{
  layout::Layout,
  mismatch,
  proposal::Proposal,
  selection::{
    Momentum,
    Selection,
  },
  snapshot::{
    self,
    Snapshot,
  },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<S: Scheme> {
  layout:    Layout<S>,
  selection: Selection<S>,
}

impl<S: Scheme> Default for Field<S> {
  fn default() -> Self {
    Self::new(Snapshot::new())
  }
}

impl<S: Scheme> Field<S> {
  /// A field showing `snapshot` with the caret at its end, unplaced.
  pub fn new(snapshot: Snapshot) -> Self {
    let layout = Layout::new(snapshot);
    let selection = Selection::caret(layout.end_index());
    Self { layout, selection }
  }

  pub fn layout(&self) -> &Layout<S> {
    &self.layout
  }

  pub fn snapshot(&self) -> &Snapshot {
    self.layout.snapshot()
  }

  pub fn text(&self) -> &str {
    self.layout.characters()
  }

  pub fn selection(&self) -> Selection<S> {
    self.selection
  }

  /// The selection in scheme `S`.
  pub fn positions(&self) -> Range<Position<S>> {
    self.selection.positions()
  }

  /// Replaces the text, carrying the selection over to the new snapshot.
  pub fn update_snapshot(&mut self, snapshot: Snapshot) {
    let start = tracing::enabled!(tracing::Level::DEBUG).then(Instant::now);
    let past = self.layout.snapshot();

    let upper = mismatch::suffix(past, self.selection.upper().snapshot(), &snapshot).next;
    let lower = if self.selection.is_empty() {
      upper
    } else {
      mismatch::prefix(past, self.selection.lower().snapshot(), &snapshot)
        .next
        .min(upper)
    };

    let layout = Layout::new(snapshot);
    let carried = Selection::new(layout.index(lower), layout.index(upper));
    self.selection = layout.preferred_selection(carried, Momentum::default());
    self.layout = layout;

    if let Some(start) = start {
      debug!(
        lower = self.selection.lower().offset(),
        upper = self.selection.upper().offset(),
        "snapshot replaced in {}s",
        Instant::now().duration_since(start).as_secs_f64()
      );
    }
  }

  /// The indices at `positions`, scanned from the nearer bound of the
  /// current selection. Positions past the end are clamped.
  pub fn indices(&self, positions: Range<Position<S>>) -> Selection<S> {
    let index = |position: Position<S>| {
      let (lower, upper) = (self.selection.lower(), self.selection.upper());
      let from = if position.distance(lower.position()) <= position.distance(upper.position()) {
        lower
      } else {
        upper
      };
      self.layout.index_at(position, from)
    };

    let selection = Selection::new(index(positions.start), index(positions.end));
    trace!(
      requested = ?positions,
      lower = selection.lower().offset(),
      upper = selection.upper().offset(),
      "positions translated"
    );
    selection
  }

  /// Moves the selection to `positions` and places it.
  ///
  /// With `momentum`, each bound is nudged in the direction it travelled
  /// from the current selection. Returns whether the placed selection
  /// differs from the requested one.
  pub fn update_selection(&mut self, positions: Range<Position<S>>, momentum: bool) -> bool {
    let requested = self.indices(positions);
    let momentum = if momentum {
      Momentum::between(&self.selection, &requested)
    } else {
      Momentum::default()
    };

    self.selection = self.layout.preferred_selection(requested, momentum);
    self.selection != requested
  }

  /// Shows `snapshot`, the resolved form of `proposal`, with the caret after
  /// the replaced text.
  ///
  /// The caret is first put at the end of the replacement in the naive
  /// [`Proposal::merged`] snapshot, then carried into `snapshot` like any
  /// other reformat. Nothing changes if the replacement cannot be spliced
  /// into the base.
  pub fn merge(&mut self, proposal: &Proposal, snapshot: Snapshot) -> snapshot::Result<()> {
    let merged = proposal.merged()?;
    let offset = proposal.end_offset().min(merged.len());
    let layout = Layout::new(merged);
    let caret = layout.index(layout.snapshot().index_at(offset));

    self.layout = layout;
    self.selection = Selection::caret(caret);
    self.update_snapshot(snapshot);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use diffable_core::scheme::{
    Character,
    Utf16,
  };

  use super::*;
  use crate::attribute::Attribute;

  fn dollars(text: &str) -> Snapshot {
    Snapshot::from_str_with(text, |character| match character {
      "$" | "," => Attribute::PHANTOM,
      _ => Attribute::CONTENT,
    })
  }

  fn with_selection(text: &str, lower: usize, upper: usize) -> Field<Character> {
    let mut field = Field::new(dollars(text));
    field.update_selection(Position::new(lower)..Position::new(upper), false);
    field
  }

  fn offsets<S: Scheme>(field: &Field<S>) -> (usize, usize) {
    (field.selection().lower().offset(), field.selection().upper().offset())
  }

  #[test]
  fn test_new_field_rests_at_end() {
    let field = Field::<Utf16>::new(Snapshot::phantom("USD 1"));
    assert_eq!(field.positions(), Position::new(5)..Position::new(5));
    assert_eq!(field.text(), "USD 1");
  }

  #[test]
  fn test_inserted_separator_carries_caret() {
    let mut field = with_selection("$12", 3, 3);
    field.update_snapshot(dollars("$1,2"));
    assert_eq!(field.text(), "$1,2");
    assert_eq!(offsets(&field), (4, 4));
  }

  #[test]
  fn test_removed_separator_carries_caret() {
    // caret between "2" and "3" of "$1,234"
    let mut field = with_selection("$1,234", 4, 4);
    field.update_snapshot(dollars("$1234"));
    assert_eq!(offsets(&field), (3, 3));

    // caret between "1" and ","
    let mut field = with_selection("$1,234", 2, 2);
    field.update_snapshot(dollars("$1234"));
    assert_eq!(offsets(&field), (2, 2));
  }

  #[test]
  fn test_selection_bounds_are_carried_separately() {
    let mut field = with_selection("$1,234", 1, 6);
    field.update_snapshot(dollars("$12,345"));
    // the lower bound follows the prefix "$", the upper the empty suffix
    assert_eq!(offsets(&field), (1, 7));
  }

  #[test]
  fn test_whole_range_survives_reformat() {
    let mut field = Field::<Character>::new(dollars("$1,234"));
    let end = field.layout().end_index().position();
    field.update_selection(Position::zero()..end, false);
    assert_eq!(offsets(&field), (0, 6));

    field.update_snapshot(dollars("$1,234"));
    assert_eq!(offsets(&field), (0, 6));
  }

  #[test]
  fn test_unchanged_snapshot_keeps_selection() {
    for (lower, upper) in [(1, 1), (2, 2), (4, 4), (6, 6), (1, 4), (2, 5)] {
      let mut field = with_selection("$1,234", lower, upper);
      let before = field.selection();
      field.update_snapshot(dollars("$1,234"));
      assert_eq!(field.selection(), before, "{lower}..{upper}");
    }
  }

  #[test]
  fn test_update_selection_reports_correction() {
    let mut field = Field::<Character>::new(dollars("$1,234"));
    assert!(field.update_selection(Position::new(0)..Position::new(0), false));
    assert_eq!(offsets(&field), (1, 1));
    assert!(!field.update_selection(Position::new(4)..Position::new(4), false));
    assert_eq!(offsets(&field), (4, 4));
  }

  #[test]
  fn test_update_selection_uses_momentum() {
    // moving right from "1|,234" onto ",|234" passes over the "2"
    let mut field = with_selection("$1,234", 2, 2);
    field.update_selection(Position::new(3)..Position::new(3), true);
    assert_eq!(offsets(&field), (4, 4));

    // without momentum the same request rounds back
    let mut field = with_selection("$1,234", 2, 2);
    field.update_selection(Position::new(3)..Position::new(3), false);
    assert_eq!(offsets(&field), (2, 2));
  }

  #[test]
  fn test_indices_clamp_and_order() {
    let field = Field::<Utf16>::new(Snapshot::content("a😀b"));
    let selection = field.indices(Position::new(99)..Position::new(2));
    assert_eq!(selection.lower().offset(), 1);
    assert_eq!(selection.upper(), field.layout().end_index());
  }

  #[test]
  fn test_merge_moves_caret_after_replacement() {
    let mut field = with_selection("$1,234", 6, 6);
    let base = field.snapshot().clone();
    let proposal = Proposal::new(
      base.clone(),
      Snapshot::content("5"),
      base.end_index()..base.end_index(),
    );
    field.merge(&proposal, dollars("$12,345")).unwrap();
    assert_eq!(field.text(), "$12,345");
    assert_eq!(offsets(&field), (7, 7));

    // typing "9" after "$" of "$12,345"
    let base = field.snapshot().clone();
    let proposal = Proposal::new(
      base.clone(),
      Snapshot::content("9"),
      base.index_at(1)..base.index_at(1),
    );
    field.merge(&proposal, dollars("$912,345")).unwrap();
    assert_eq!(offsets(&field), (2, 2));
  }

  #[test]
  fn test_unsplittable_merge_changes_nothing() {
    let mut field = Field::<Utf16>::new(Snapshot::content("e"));
    let before = field.clone();
    let base = field.snapshot().clone();
    let proposal = Proposal::new(
      base.clone(),
      Snapshot::content("\u{301}"),
      base.end_index()..base.end_index(),
    );
    assert!(field.merge(&proposal, Snapshot::content("e\u{301}")).is_err());
    assert_eq!(field, before);
  }
}
