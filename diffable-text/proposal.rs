//! Pending text edits.
//!
//! A [`Proposal`] is what the user asked for: the current snapshot, the
//! characters they typed or pasted, and the range those characters replace.
//! Nothing is applied until a style resolves it into a
//! [`Commit`](crate::commit::Commit).
//!
//! ```text
//! base:        $1,234
//! range:          ^^     (offsets 3..5)
//! replacement: 9
//! merged:      $1,94
//! ```

use std::ops::Range;

use crate::snapshot::{
  Index,
  Result,
  Snapshot,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
  pub base:        Snapshot,
  pub replacement: Snapshot,
  pub range:       Range<Index>,
}

impl Proposal {
  pub fn new(base: Snapshot, replacement: Snapshot, range: Range<Index>) -> Self {
    Self {
      base,
      replacement,
      range,
    }
  }

  /// The base with the replacement spliced in, before any formatting.
  ///
  /// Fails if the replacement would fuse with the symbols around the range,
  /// as a combining mark typed after a letter does.
  pub fn merged(&self) -> Result<Snapshot> {
    let mut merged = self.base.clone();
    merged.replace_range(self.range.clone(), &self.replacement)?;
    Ok(merged)
  }

  /// The symbol offset in [`Proposal::merged`] just after the replacement.
  pub fn end_offset(&self) -> usize {
    self.range.start.attribute() + self.replacement.len()
  }
}
