//! The state behind one text field session.
//!
//! A [`Context`] pairs a [`Field`] with the [`Status`] it was rendered from
//! and drives the formatting round trip:
//!
//! - while focused, text comes from [`DiffableTextStyle::interpret`] and
//!   edits go through [`DiffableTextStyle::resolve`]
//! - while unfocused, text comes from [`DiffableTextStyle::format`] as a
//!   single phantom run, and edits are refused
//!
//! Every mutating call returns an [`Update`] naming what the UI layer must
//! write back to its control. A rejected edit returns an error and leaves the
//! context exactly as it was.

use std::ops::Range;

use bitflags::bitflags;
use diffable_core::{
  Position,
  Scheme,
  scheme::Utf16,
};
use thiserror::Error;
use tracing::debug;

use crate::{
  commit::Commit,
  field::Field,
  proposal::Proposal,
  snapshot::{
    Snapshot,
    SnapshotError,
  },
  style::{
    DiffableTextStyle,
    Rejection,
  },
};

pub type Result<T> = std::result::Result<T, ContextError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ContextError {
  #[error(transparent)]
  Rejected(#[from] Rejection),
  #[error(transparent)]
  Unsplittable(#[from] SnapshotError),
  #[error("edits are not accepted while the field is unfocused")]
  Unfocused,
}

bitflags! {
  /// Which parts of a [`Status`] differ after [`Status::merge`].
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct Changes: u8 {
    const STYLE = 1 << 0;
    const VALUE = 1 << 1;
    const FOCUS = 1 << 2;
  }
}

bitflags! {
  /// What the UI layer must read back after a [`Context`] call.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct Update: u8 {
    const TEXT      = 1 << 0;
    const SELECTION = 1 << 1;
    const VALUE     = 1 << 2;
  }
}

/// The inputs a context is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Status<T: DiffableTextStyle> {
  pub style: T,
  pub value: T::Value,
  pub focus: bool,
}

impl<T: DiffableTextStyle> Status<T> {
  pub fn new(style: T, value: T::Value, focus: bool) -> Self {
    Self {
      style,
      value,
      focus,
    }
  }

  /// Replaces `self` with `other`, reporting what changed.
  pub fn merge(&mut self, other: Self) -> Changes {
    let mut changes = Changes::empty();
    changes.set(Changes::STYLE, self.style != other.style);
    changes.set(Changes::VALUE, self.value != other.value);
    changes.set(Changes::FOCUS, self.focus != other.focus);
    *self = other;
    changes
  }
}

#[derive(Debug, Clone)]
pub struct Context<T: DiffableTextStyle, S: Scheme = Utf16> {
  status: Status<T>,
  field:  Field<S>,
}

impl<T: DiffableTextStyle, S: Scheme> Context<T, S> {
  pub fn new(status: Status<T>) -> Self {
    let mut context = Self {
      status,
      field: Field::default(),
    };
    context.render();
    context
  }

  pub fn focused(style: T, value: T::Value) -> Self {
    Self::new(Status::new(style, value, true))
  }

  pub fn unfocused(style: T, value: T::Value) -> Self {
    Self::new(Status::new(style, value, false))
  }

  pub fn status(&self) -> &Status<T> {
    &self.status
  }

  pub fn style(&self) -> &T {
    &self.status.style
  }

  pub fn value(&self) -> &T::Value {
    &self.status.value
  }

  pub fn focus(&self) -> bool {
    self.status.focus
  }

  pub fn field(&self) -> &Field<S> {
    &self.field
  }

  pub fn text(&self) -> &str {
    self.field.text()
  }

  /// The selection in scheme `S`.
  pub fn selection(&self) -> Range<Position<S>> {
    self.field.positions()
  }

  /// Re-renders the field from `status` if it differs from the current one.
  ///
  /// A focused context carries its selection over to the interpreted text,
  /// an unfocused one shows the formatted text with the caret at its end.
  pub fn merge_status(&mut self, status: Status<T>) -> Update {
    let changes = self.status.merge(status);
    if changes.is_empty() {
      return Update::empty();
    }

    debug!(?changes, focus = self.status.focus, "status changed");
    self.render()
  }

  /// Proposes replacing `range` with `characters`, as typed or pasted.
  ///
  /// On success the caret rests after the inserted text.
  pub fn merge(&mut self, characters: &str, range: Range<Position<S>>) -> Result<Update> {
    if !self.status.focus {
      return Err(ContextError::Unfocused);
    }

    let selection = self.field.indices(range);
    let proposal = Proposal::new(
      self.field.snapshot().clone(),
      Snapshot::content(characters),
      selection.lower().snapshot()..selection.upper().snapshot(),
    );

    let Commit { value, snapshot } = self
      .status
      .style
      .resolve(&proposal)
      .inspect_err(|rejection| debug!(reason = rejection.reason(), "proposal rejected"))?;

    let mut merged = Ok(());
    let update = self.observe(|field| merged = field.merge(&proposal, snapshot));
    merged?;
    Ok(update | self.set_value(value))
  }

  /// Moves the selection as the user requested, correcting it onto legal
  /// caret positions.
  ///
  /// Reports [`Update::SELECTION`] if the result differs from the request.
  /// An unfocused context has no caret to move.
  pub fn update_selection(&mut self, positions: Range<Position<S>>, momentum: bool) -> Update {
    if !self.status.focus {
      return Update::empty();
    }

    match self.field.update_selection(positions, momentum) {
      true => Update::SELECTION,
      false => Update::empty(),
    }
  }

  fn render(&mut self) -> Update {
    if self.status.focus {
      let Commit { value, snapshot } = self.status.style.interpret(&self.status.value);
      let update = self.observe(|field| field.update_snapshot(snapshot));
      update | self.set_value(value)
    } else {
      let text = self.status.style.format(&self.status.value);
      self.observe(|field| *field = Field::new(Snapshot::phantom(&text)))
    }
  }

  fn set_value(&mut self, value: T::Value) -> Update {
    if value == self.status.value {
      return Update::empty();
    }
    debug!(?value, "value changed");
    self.status.value = value;
    Update::VALUE
  }

  fn observe<F>(&mut self, f: F) -> Update
  where
    F: FnOnce(&mut Field<S>),
  {
    let text = self.field.text().to_owned();
    let positions = self.field.positions();
    f(&mut self.field);

    let mut update = Update::empty();
    update.set(Update::TEXT, self.field.text() != text);
    update.set(Update::SELECTION, self.field.positions() != positions);
    update
  }
}

impl<T: DiffableTextStyle, S: Scheme> PartialEq for Context<T, S> {
  fn eq(&self, other: &Self) -> bool {
    self.status == other.status && self.field == other.field
  }
}
