//! Utility functions over the unicode graphemes of a `&str`.
//!
//! All byte indices taken by this module are byte offsets into
//! the given text. The whole text is always handed to the segmenter as a
//! single chunk, so the cursor never asks for more context.

use unicode_segmentation::{
  GraphemeCursor,
  UnicodeSegmentation,
};

/// Iterates the extended grapheme clusters of `text`.
#[inline]
pub fn graphemes(text: &str) -> impl DoubleEndedIterator<Item = &str> {
  text.graphemes(true)
}

/// Number of extended grapheme clusters in `text`.
#[must_use]
pub fn grapheme_count(text: &str) -> usize {
  if text.is_ascii() {
    // Fast-path for pure ASCII: every byte is its own cluster except CRLF.
    return text.len() - text.as_bytes().windows(2).filter(|w| w == b"\r\n").count();
  }
  graphemes(text).count()
}

/// Whether `text` is exactly one extended grapheme cluster.
#[must_use]
pub fn is_single_grapheme(text: &str) -> bool {
  let mut iter = graphemes(text);
  iter.next().is_some() && iter.next().is_none()
}

/// Returns whether the given byte index is a grapheme boundary.
#[must_use]
pub fn is_grapheme_boundary(text: &str, byte_idx: usize) -> bool {
  if byte_idx > text.len() || !text.is_char_boundary(byte_idx) {
    return false;
  }
  GraphemeCursor::new(byte_idx, text.len(), true)
    .is_boundary(text, 0)
    .unwrap_or(false)
}
