//! Annotated text buffers.
//!
//! A [`Snapshot`] is the rendered text of a field together with one
//! [`Attribute`] per symbol and an optional anchor. It is the value a
//! formatter hands to the engine on every edit.
//!
//! # Storage
//!
//! The characters are kept in one `String` so that the display text is
//! available without copying. The attributes live in a parallel `Vec`, and a
//! third `Vec` records the byte offset at which each symbol ends. The three
//! are only ever mutated together, so the grapheme count of the string always
//! equals the attribute count.
//!
//! Every symbol end is a grapheme boundary of the whole string. Appending or
//! splicing in a character that would fuse with its neighbour, such as a
//! combining mark after a letter, fails with
//! [`SnapshotError::NotOneGrapheme`] and leaves the snapshot unchanged.
//!
//! ```ignore
//! use diffable_text::{attribute::Attribute, snapshot::Snapshot};
//!
//! let mut snapshot = Snapshot::new();
//! snapshot.append('$', Attribute::PHANTOM)?;
//! snapshot.append_str("12", Attribute::CONTENT)?;
//! assert_eq!(snapshot.characters(), "$12");
//! assert_eq!(snapshot.len(), 3);
//! ```
//!
//! # Indices
//!
//! An [`Index`] carries both the byte offset into the characters and the
//! symbol offset into the attributes. Indices compare by symbol offset.
//!
//! # Anchor
//!
//! A snapshot may name one index as its anchor. Every caret placement
//! against an anchored snapshot collapses onto the anchor, see
//! [`crate::layout::Layout::preferred`].

use std::{
  cmp::Ordering,
  fmt,
  hash::{
    Hash,
    Hasher,
  },
  iter::FusedIterator,
  ops::Range,
};

use diffable_core::grapheme::{
  grapheme_count,
  graphemes,
  is_grapheme_boundary,
};
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  attribute::Attribute,
  symbol::Symbol,
};

pub type Result<T> = std::result::Result<T, SnapshotError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotError {
  #[error("snapshot has {graphemes} characters but {attributes} attributes")]
  AttributeCountMismatch { graphemes: usize, attributes: usize },
  #[error("snapshot symbol {offset} does not start a grapheme cluster of its own")]
  NotOneGrapheme { offset: usize },
  #[error("anchor {anchor} is out of bounds for snapshot of length {len}")]
  AnchorOutOfBounds { anchor: usize, len: usize },
}

/// A position between two symbols of a [`Snapshot`].
///
/// `character` is a byte offset into [`Snapshot::characters`], `attribute`
/// is a symbol offset into [`Snapshot::attributes`]. Only the latter takes
/// part in comparisons.
#[derive(Debug, Default, Clone, Copy)]
pub struct Index {
  character: usize,
  attribute: usize,
}

impl Index {
  pub(crate) const fn new(character: usize, attribute: usize) -> Self {
    Self {
      character,
      attribute,
    }
  }

  /// Byte offset into the characters.
  pub const fn character(self) -> usize {
    self.character
  }

  /// Symbol offset into the attributes.
  pub const fn attribute(self) -> usize {
    self.attribute
  }
}

impl PartialEq for Index {
  fn eq(&self, other: &Self) -> bool {
    self.attribute == other.attribute
  }
}

impl Eq for Index {}

impl PartialOrd for Index {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Index {
  fn cmp(&self, other: &Self) -> Ordering {
    self.attribute.cmp(&other.attribute)
  }
}

impl Hash for Index {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.attribute.hash(state);
  }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SnapshotRepr", into = "SnapshotRepr")]
pub struct Snapshot {
  characters: String,
  attributes: Vec<Attribute>,
  /// Byte offset at which each symbol ends.
  ends:       Vec<usize>,
  anchor:     Option<usize>,
}

impl Snapshot {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_capacity(symbols: usize) -> Self {
    Self {
      characters: String::with_capacity(symbols),
      attributes: Vec::with_capacity(symbols),
      ends:       Vec::with_capacity(symbols),
      anchor:     None,
    }
  }

  /// Every grapheme of `text` as user content.
  pub fn content(text: &str) -> Self {
    Self::with_attribute(text, Attribute::CONTENT)
  }

  /// Every grapheme of `text` as formatting decoration.
  pub fn phantom(text: &str) -> Self {
    Self::with_attribute(text, Attribute::PHANTOM)
  }

  pub fn with_attribute(text: &str, attribute: Attribute) -> Self {
    Self::from_str_with(text, |_| attribute)
  }

  /// Builds a snapshot from formatted text, classifying each grapheme.
  pub fn from_str_with<F>(text: &str, mut classify: F) -> Self
  where
    F: FnMut(&str) -> Attribute,
  {
    let mut snapshot = Self::with_capacity(text.len());
    for grapheme in graphemes(text) {
      snapshot.push_str(grapheme, classify(grapheme));
    }
    snapshot
  }

  /// Builds a snapshot from separately computed characters and attributes.
  ///
  /// Fails unless there is exactly one attribute per grapheme cluster.
  pub fn from_parts(characters: &str, attributes: Vec<Attribute>) -> Result<Self> {
    let count = grapheme_count(characters);
    if count != attributes.len() {
      return Err(SnapshotError::AttributeCountMismatch {
        graphemes:  count,
        attributes: attributes.len(),
      });
    }

    let mut snapshot = Self::with_capacity(count);
    for (grapheme, attribute) in graphemes(characters).zip(attributes) {
      snapshot.push_str(grapheme, attribute);
    }
    Ok(snapshot)
  }

  /// Builds a snapshot symbol by symbol.
  pub fn from_symbols<I>(symbols: I) -> Result<Self>
  where
    I: IntoIterator<Item = Symbol>,
  {
    let symbols = symbols.into_iter();
    let mut snapshot = Self::with_capacity(symbols.size_hint().0);
    for symbol in symbols {
      snapshot.push(symbol)?;
    }
    Ok(snapshot)
  }

  /// Pushes a grapheme segmented out of a larger text, where its boundaries
  /// are already known.
  fn push_str(&mut self, character: &str, attribute: Attribute) {
    debug_assert!(!character.is_empty());
    self.characters.push_str(character);
    self.attributes.push(attribute);
    self.ends.push(self.characters.len());
  }

  fn try_push_str(&mut self, character: &str, attribute: Attribute) -> Result<()> {
    let start = self.characters.len();
    self.characters.push_str(character);
    if !is_grapheme_boundary(&self.characters, start) {
      self.characters.truncate(start);
      return Err(SnapshotError::NotOneGrapheme { offset: self.len() });
    }
    self.attributes.push(attribute);
    self.ends.push(self.characters.len());
    Ok(())
  }

  fn truncate(&mut self, len: usize) {
    self.characters.truncate(self.start_byte(len));
    self.attributes.truncate(len);
    self.ends.truncate(len);
  }

  pub fn push(&mut self, symbol: Symbol) -> Result<()> {
    self.try_push_str(symbol.as_str(), symbol.attribute())
  }

  pub fn append(&mut self, character: char, attribute: Attribute) -> Result<()> {
    let mut buf = [0; 4];
    self.try_push_str(character.encode_utf8(&mut buf), attribute)
  }

  /// Appends every grapheme of `text` with the same attribute.
  ///
  /// Either all of `text` is appended or none of it is.
  pub fn append_str(&mut self, text: &str, attribute: Attribute) -> Result<()> {
    let len = self.len();
    for grapheme in graphemes(text) {
      if let Err(error) = self.try_push_str(grapheme, attribute) {
        self.truncate(len);
        return Err(error);
      }
    }
    Ok(())
  }

  pub fn characters(&self) -> &str {
    &self.characters
  }

  pub fn attributes(&self) -> &[Attribute] {
    &self.attributes
  }

  /// Number of symbols.
  pub fn len(&self) -> usize {
    self.attributes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.attributes.is_empty()
  }

  pub fn anchor(&self) -> Option<Index> {
    self.anchor.map(|offset| self.index_at(offset))
  }

  pub fn start_index(&self) -> Index {
    Index::new(0, 0)
  }

  pub fn end_index(&self) -> Index {
    Index::new(self.characters.len(), self.len())
  }

  /// The whole snapshot as an index range.
  pub fn range(&self) -> Range<Index> {
    self.start_index()..self.end_index()
  }

  fn start_byte(&self, offset: usize) -> usize {
    match offset {
      0 => 0,
      _ => self.ends[offset - 1],
    }
  }

  /// The index `offset` symbols from the start.
  ///
  /// # Panics
  ///
  /// Panics if `offset > self.len()`.
  pub fn index_at(&self, offset: usize) -> Index {
    assert!(
      offset <= self.len(),
      "offset {offset} out of bounds for snapshot of length {}",
      self.len()
    );
    Index::new(self.start_byte(offset), offset)
  }

  /// The index after `index`.
  ///
  /// # Panics
  ///
  /// Panics if `index` is the end index.
  pub fn index_after(&self, index: Index) -> Index {
    Index::new(self.ends[index.attribute], index.attribute + 1)
  }

  /// The index before `index`.
  ///
  /// # Panics
  ///
  /// Panics if `index` is the start index.
  pub fn index_before(&self, index: Index) -> Index {
    let attribute = index.attribute - 1;
    Index::new(self.start_byte(attribute), attribute)
  }

  /// The character of the symbol at `index`.
  pub fn character(&self, index: Index) -> &str {
    &self.characters[index.character..self.ends[index.attribute]]
  }

  /// The attribute of the symbol at `index`.
  pub fn attribute(&self, index: Index) -> Attribute {
    self.attributes[index.attribute]
  }

  pub fn symbol(&self, index: Index) -> Symbol {
    Symbol::from_grapheme(self.character(index), self.attribute(index))
  }

  /// The symbol `offset` symbols from the start, if any.
  pub fn get(&self, offset: usize) -> Option<(&str, Attribute)> {
    (offset < self.len()).then(|| {
      let index = self.index_at(offset);
      (self.character(index), self.attribute(index))
    })
  }

  /// Whether a caret may rest against the symbol at `index`.
  ///
  /// The end index has no symbol and is never nonpassthrough.
  pub fn nonpassthrough(&self, index: Index) -> bool {
    self
      .attributes
      .get(index.attribute)
      .is_some_and(|attribute| !attribute.is_passthrough())
  }

  pub fn symbols(&self) -> Symbols<'_> {
    self.symbols_in(self.range())
  }

  pub fn symbols_in(&self, range: Range<Index>) -> Symbols<'_> {
    debug_assert!(range.start <= range.end && range.end.attribute <= self.len());
    Symbols {
      snapshot: self,
      front:    range.start.attribute,
      back:     range.end.attribute,
    }
  }

  /// The characters of all symbols that are not [`Attribute::VIRTUAL`].
  pub fn nonvirtuals(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
    self
      .symbols()
      .filter(|(_, attribute)| !attribute.is_virtual())
      .map(|(character, _)| character)
  }

  /// Replaces the symbols in `range` with the symbols of `replacement`.
  ///
  /// Fails if either end of the splice would fuse two symbols into one
  /// grapheme cluster. The anchor does not survive a structural change and
  /// is cleared.
  pub fn replace_range(&mut self, range: Range<Index>, replacement: &Snapshot) -> Result<()> {
    assert!(range.start <= range.end && range.end.attribute <= self.len());

    let (lower, upper) = (range.start, range.end);
    let inserted = replacement.characters.len();
    let removed = upper.character - lower.character;

    let mut characters = String::with_capacity(self.characters.len() - removed + inserted);
    characters.push_str(&self.characters[..lower.character]);
    characters.push_str(&replacement.characters);
    characters.push_str(&self.characters[upper.character..]);
    let seams = [
      (lower.character, lower.attribute),
      (lower.character + inserted, lower.attribute + replacement.len()),
    ];
    if let Some(&(_, offset)) = seams
      .iter()
      .find(|&&(byte, _)| !is_grapheme_boundary(&characters, byte))
    {
      return Err(SnapshotError::NotOneGrapheme { offset });
    }

    self.characters = characters;
    self.attributes.splice(
      lower.attribute..upper.attribute,
      replacement.attributes.iter().copied(),
    );

    let tail: Vec<usize> = self.ends[upper.attribute..]
      .iter()
      .map(|end| end - removed + inserted)
      .collect();
    self.ends.truncate(lower.attribute);
    self
      .ends
      .extend(replacement.ends.iter().map(|end| end + lower.character));
    self.ends.extend(tail);

    self.anchor = None;
    Ok(())
  }

  /// Applies `transform` to the attributes of every symbol in `range`.
  pub fn transform<F>(&mut self, range: Range<Index>, transform: F)
  where
    F: FnMut(&mut Attribute),
  {
    self.attributes[range.start.attribute..range.end.attribute]
      .iter_mut()
      .for_each(transform);
  }

  /// Applies `transform` to the attribute of the symbol at `index`.
  pub fn transform_at<F>(&mut self, index: Index, transform: F)
  where
    F: FnOnce(&mut Attribute),
  {
    transform(&mut self.attributes[index.attribute]);
  }

  /// Anchors every caret placement at `index`.
  pub fn anchor_at(&mut self, index: Index) {
    assert!(index.attribute <= self.len());
    self.anchor = Some(index.attribute);
  }

  pub fn anchor_at_end(&mut self) {
    self.anchor = Some(self.len());
  }

  pub fn clear_anchor(&mut self) {
    self.anchor = None;
  }
}

impl fmt::Display for Snapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.characters)
  }
}

/// Double-ended iterator over `(character, attribute)` pairs of a snapshot.
#[derive(Debug, Clone)]
pub struct Symbols<'a> {
  snapshot: &'a Snapshot,
  front:    usize,
  back:     usize,
}

impl<'a> Symbols<'a> {
  fn at(&self, offset: usize) -> (&'a str, Attribute) {
    let snapshot = self.snapshot;
    let start = snapshot.start_byte(offset);
    (
      &snapshot.characters[start..snapshot.ends[offset]],
      snapshot.attributes[offset],
    )
  }
}

impl<'a> Iterator for Symbols<'a> {
  type Item = (&'a str, Attribute);

  fn next(&mut self) -> Option<Self::Item> {
    if self.front == self.back {
      return None;
    }
    let item = self.at(self.front);
    self.front += 1;
    Some(item)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    let len = self.back - self.front;
    (len, Some(len))
  }
}

impl DoubleEndedIterator for Symbols<'_> {
  fn next_back(&mut self) -> Option<Self::Item> {
    if self.front == self.back {
      return None;
    }
    self.back -= 1;
    Some(self.at(self.back))
  }
}

impl ExactSizeIterator for Symbols<'_> {}
impl FusedIterator for Symbols<'_> {}

#[derive(Serialize, Deserialize)]
struct SnapshotRepr {
  symbols: Vec<Symbol>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  anchor:  Option<usize>,
}

impl TryFrom<SnapshotRepr> for Snapshot {
  type Error = SnapshotError;

  fn try_from(repr: SnapshotRepr) -> Result<Self> {
    let mut snapshot = Snapshot::from_symbols(repr.symbols)?;

    if let Some(anchor) = repr.anchor {
      if anchor > snapshot.len() {
        return Err(SnapshotError::AnchorOutOfBounds {
          anchor,
          len: snapshot.len(),
        });
      }
      snapshot.anchor = Some(anchor);
    }
    Ok(snapshot)
  }
}

impl From<Snapshot> for SnapshotRepr {
  fn from(snapshot: Snapshot) -> Self {
    Self {
      symbols: snapshot
        .symbols()
        .map(|(character, attribute)| Symbol::from_grapheme(character, attribute))
        .collect(),
      anchor:  snapshot.anchor,
    }
  }
}
