//! Counting schemes for caret offsets.
//!
//! The same text has different lengths depending on who is asking: a
//! grapheme-aware editor counts characters, a platform text widget usually
//! counts UTF-16 code units, a byte-oriented API counts UTF-8 bytes. A
//! [`Scheme`] names one of these unit systems so that offsets in different
//! systems cannot be mixed up at compile time.
//!
//! ```ignore
//! use diffable_core::scheme::{Scheme, Utf16};
//!
//! assert_eq!(Utf16::size("😀"), 2);
//! ```
//!
//! The set of schemes is closed: [`Scheme`] is sealed.

use std::{
  fmt::Debug,
  hash::Hash,
};

mod sealed {
  pub trait Sealed {}
}

/// A unit system in which offsets into text are measured.
pub trait Scheme:
  sealed::Sealed + Copy + Clone + Debug + Default + PartialEq + Eq + PartialOrd + Ord + Hash + 'static
{
  /// Human readable name, used in diagnostics.
  const NAME: &'static str;

  /// Size of a single symbol's character (one grapheme cluster).
  fn size(character: &str) -> usize;

  /// Size of `text`, which the caller knows to span `symbols` symbols.
  fn size_of(text: &str, symbols: usize) -> usize;
}

/// Counts symbols (grapheme clusters).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Character;

/// Counts UTF-8 code units (bytes).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf8;

/// Counts UTF-16 code units.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf16;

/// Counts Unicode scalar values.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnicodeScalar;

impl sealed::Sealed for Character {}
impl sealed::Sealed for Utf8 {}
impl sealed::Sealed for Utf16 {}
impl sealed::Sealed for UnicodeScalar {}

impl Scheme for Character {
  const NAME: &'static str = "character";

  #[inline]
  fn size(_character: &str) -> usize {
    1
  }

  #[inline]
  fn size_of(_text: &str, symbols: usize) -> usize {
    symbols
  }
}

impl Scheme for Utf8 {
  const NAME: &'static str = "utf8";

  #[inline]
  fn size(character: &str) -> usize {
    character.len()
  }

  #[inline]
  fn size_of(text: &str, _symbols: usize) -> usize {
    text.len()
  }
}

impl Scheme for Utf16 {
  const NAME: &'static str = "utf16";

  #[inline]
  fn size(character: &str) -> usize {
    character.chars().map(char::len_utf16).sum()
  }

  #[inline]
  fn size_of(text: &str, _symbols: usize) -> usize {
    if text.is_ascii() {
      return text.len();
    }
    Self::size(text)
  }
}

impl Scheme for UnicodeScalar {
  const NAME: &'static str = "unicode-scalar";

  #[inline]
  fn size(character: &str) -> usize {
    character.chars().count()
  }

  #[inline]
  fn size_of(text: &str, _symbols: usize) -> usize {
    Self::size(text)
  }
}
