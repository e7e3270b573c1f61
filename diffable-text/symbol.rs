use std::fmt;

use diffable_core::grapheme::is_single_grapheme;
use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::{
  Tendril,
  attribute::Attribute,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{character:?} is not exactly one grapheme cluster")]
pub struct NotOneGrapheme {
  pub character: Tendril,
}

/// One character of a snapshot together with its [`Attribute`].
///
/// The character is always exactly one extended grapheme cluster. Equality
/// compares both the character and the attribute. Diffing only compares
/// characters and lets the attributes decide what may be skipped, see
/// [`crate::mismatch`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SymbolRepr")]
pub struct Symbol {
  character: Tendril,
  attribute: Attribute,
}

impl Symbol {
  pub fn new(character: char, attribute: Attribute) -> Self {
    let mut buf = [0; 4];
    Self {
      character: Tendril::from(&*character.encode_utf8(&mut buf)),
      attribute,
    }
  }

  /// A symbol from a string, which must be exactly one grapheme cluster.
  pub fn grapheme(character: &str, attribute: Attribute) -> Option<Self> {
    is_single_grapheme(character).then(|| Self::from_grapheme(character, attribute))
  }

  /// A symbol from a cluster already segmented out of a snapshot.
  pub(crate) fn from_grapheme(character: &str, attribute: Attribute) -> Self {
    debug_assert!(is_single_grapheme(character));
    Self {
      character: Tendril::from(character),
      attribute,
    }
  }

  pub fn content(character: char) -> Self {
    Self::new(character, Attribute::CONTENT)
  }

  pub fn phantom(character: char) -> Self {
    Self::new(character, Attribute::PHANTOM)
  }

  pub fn as_str(&self) -> &str {
    &self.character
  }

  pub fn attribute(&self) -> Attribute {
    self.attribute
  }

  #[inline]
  pub fn is_virtual(&self) -> bool {
    self.attribute.is_virtual()
  }

  #[inline]
  pub fn is_passthrough(&self) -> bool {
    self.attribute.is_passthrough()
  }
}

impl fmt::Display for Symbol {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.character)
  }
}

#[derive(Deserialize)]
struct SymbolRepr {
  character: Tendril,
  attribute: Attribute,
}

impl TryFrom<SymbolRepr> for Symbol {
  type Error = NotOneGrapheme;

  fn try_from(repr: SymbolRepr) -> Result<Self, NotOneGrapheme> {
    match is_single_grapheme(&repr.character) {
      true => Ok(Self {
        character: repr.character,
        attribute: repr.attribute,
      }),
      false => Err(NotOneGrapheme {
        character: repr.character,
      }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_equality_includes_attribute() {
    assert_eq!(Symbol::content('1'), Symbol::new('1', Attribute::CONTENT));
    assert_ne!(Symbol::content('1'), Symbol::phantom('1'));
    assert_ne!(Symbol::content('1'), Symbol::content('2'));
  }

  #[test]
  fn test_grapheme_requires_one_cluster() {
    assert!(Symbol::grapheme("e\u{301}", Attribute::CONTENT).is_some());
    assert!(Symbol::grapheme("🇳🇴", Attribute::PHANTOM).is_some());
    assert!(Symbol::grapheme("", Attribute::CONTENT).is_none());
    assert!(Symbol::grapheme("12", Attribute::CONTENT).is_none());
  }

  #[test]
  fn test_deserialize_requires_one_cluster() {
    let symbol: Symbol =
      serde_json::from_str(r#"{"character":"e\u0301","attribute":"VIRTUAL"}"#).unwrap();
    assert_eq!(symbol.as_str(), "e\u{301}");
    assert_eq!(symbol.attribute(), Attribute::VIRTUAL);

    for character in ["12", ""] {
      let json = format!(r#"{{"character":"{character}","attribute":""}}"#);
      let error = serde_json::from_str::<Symbol>(&json).unwrap_err();
      assert!(error.to_string().contains("not exactly one grapheme cluster"));
    }
  }
}
