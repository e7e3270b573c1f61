use serde::{
  Deserialize,
  Serialize,
};

use crate::snapshot::Snapshot;

/// A value together with the text a formatter decided to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit<V> {
  pub value:    V,
  pub snapshot: Snapshot,
}

impl<V> Commit<V> {
  pub fn new(value: V, snapshot: Snapshot) -> Self {
    Self { value, snapshot }
  }

  pub fn map<W, F>(self, f: F) -> Commit<W>
  where
    F: FnOnce(V) -> W,
  {
    Commit {
      value:    f(self.value),
      snapshot: self.snapshot,
    }
  }
}

impl<V: Default> Default for Commit<V> {
  fn default() -> Self {
    Self::new(V::default(), Snapshot::new())
  }
}
