//! The formatter boundary.
//!
//! A [`DiffableTextStyle`] turns values into text and user edits back into
//! values. A [`Rejection`] from [`DiffableTextStyle::resolve`] means the edit
//! is not acceptable text for the value type, and the caller keeps its state.

use std::fmt;

use thiserror::Error;

use crate::{
  commit::Commit,
  proposal::Proposal,
};

pub type Result<T> = std::result::Result<T, Rejection>;

/// A proposal the style refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("proposal rejected: {reason}")]
pub struct Rejection {
  reason: String,
}

impl Rejection {
  pub fn new(reason: impl Into<String>) -> Self {
    Self {
      reason: reason.into(),
    }
  }

  pub fn reason(&self) -> &str {
    &self.reason
  }
}

pub trait DiffableTextStyle: PartialEq {
  type Value: Clone + PartialEq + fmt::Debug;

  /// Static display text, shown while the field is not being edited.
  fn format(&self, value: &Self::Value) -> String;

  /// Editable text for `value`. The commit may carry a corrected value.
  fn interpret(&self, value: &Self::Value) -> Commit<Self::Value>;

  /// Turns a pending edit into a commit, or rejects it.
  fn resolve(&self, proposal: &Proposal) -> Result<Commit<Self::Value>>;
}
