use std::{
  fmt,
  marker::PhantomData,
  ops::{
    Add,
    AddAssign,
    Sub,
    SubAssign,
  },
};

use crate::scheme::Scheme;

/// An offset into text, measured in the units of scheme `S`.
/// 0-indexed as all things should be.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position<S: Scheme> {
  value:  usize,
  scheme: PhantomData<S>,
}

impl<S: Scheme> AddAssign for Position<S> {
  fn add_assign(&mut self, rhs: Self) {
    self.value += rhs.value;
  }
}

impl<S: Scheme> SubAssign for Position<S> {
  fn sub_assign(&mut self, rhs: Self) {
    self.value -= rhs.value;
  }
}

impl<S: Scheme> Sub for Position<S> {
  type Output = Position<S>;

  fn sub(mut self, rhs: Self) -> Self::Output {
    self -= rhs;
    self
  }
}

impl<S: Scheme> Add for Position<S> {
  type Output = Position<S>;

  fn add(mut self, rhs: Self) -> Self::Output {
    self += rhs;
    self
  }
}

impl<S: Scheme> Position<S> {
  pub const fn new(value: usize) -> Self {
    Self {
      value,
      scheme: PhantomData,
    }
  }

  pub const fn zero() -> Self {
    Self::new(0)
  }

  pub const fn is_zero(&self) -> bool {
    self.value == 0
  }

  pub const fn value(self) -> usize {
    self.value
  }

  /// The position one symbol further, past `character`.
  #[must_use]
  pub fn after(self, character: &str) -> Self {
    Self::new(self.value + S::size(character))
  }

  /// The position one symbol back, before `character`.
  #[must_use]
  pub fn before(self, character: &str) -> Self {
    Self::new(self.value - S::size(character))
  }

  /// The position reached by moving past `text`, which spans `symbols`
  /// symbols.
  #[must_use]
  pub fn traverse(self, text: &str, symbols: usize) -> Self {
    Self::new(self.value + S::size_of(text, symbols))
  }

  /// Distance to `other`, regardless of order.
  pub fn distance(self, other: Self) -> usize {
    self.value.abs_diff(other.value)
  }
}

impl<S: Scheme> From<usize> for Position<S> {
  fn from(value: usize) -> Self {
    Position::new(value)
  }
}

impl<S: Scheme> fmt::Display for Position<S> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}({})", S::NAME, self.value)
  }
}
