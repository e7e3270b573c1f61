//! Small styles for exercising the engine end to end.

use crate::{
  attribute::Attribute,
  commit::Commit,
  proposal::Proposal,
  snapshot::Snapshot,
  style::{
    DiffableTextStyle,
    Rejection,
    Result,
  },
};

fn digits(proposal: &Proposal) -> Result<String> {
  let merged = proposal
    .merged()
    .map_err(|error| Rejection::new(error.to_string()))?;
  let mut digits = String::new();
  for character in merged.nonvirtuals() {
    if !character.bytes().all(|byte| byte.is_ascii_digit()) {
      return Err(Rejection::new(format!("{character:?} is not a digit")));
    }
    digits.push_str(character);
  }
  Ok(digits)
}

/// Whole dollars grouped by thousands: `$1,234`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dollars {
  /// Largest accepted value. Larger values are clamped when interpreted.
  pub max: Option<u64>,
}

impl Dollars {
  fn snapshot(value: u64) -> Snapshot {
    let digits = value.to_string();
    let mut text = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    text.push('$');
    for (i, digit) in digits.chars().enumerate() {
      if i > 0 && (digits.len() - i) % 3 == 0 {
        text.push(',');
      }
      text.push(digit);
    }
    Snapshot::from_str_with(&text, |character| match character {
      "$" | "," => Attribute::PHANTOM,
      _ => Attribute::CONTENT,
    })
  }

  fn clamp(&self, value: u64) -> u64 {
    self.max.map_or(value, |max| value.min(max))
  }
}

impl DiffableTextStyle for Dollars {
  type Value = u64;

  fn format(&self, value: &u64) -> String {
    Self::snapshot(self.clamp(*value)).to_string()
  }

  fn interpret(&self, value: &u64) -> Commit<u64> {
    let value = self.clamp(*value);
    Commit::new(value, Self::snapshot(value))
  }

  fn resolve(&self, proposal: &Proposal) -> Result<Commit<u64>> {
    let digits = digits(proposal)?;
    let value = match digits.trim_start_matches('0') {
      "" => 0,
      digits => digits
        .parse()
        .map_err(|_| Rejection::new("too many digits"))?,
    };
    Ok(self.interpret(&value))
  }
}

/// Digits poured into a template, where `#` marks a placeholder:
/// `+## (###)` shows `+12 (3__)` for `"123"`.
///
/// An empty value anchors the caret at the first placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
  pub template: &'static str,
}

impl Pattern {
  const PLACEHOLDER: char = '#';
  const EMPTY: char = '_';

  pub fn new(template: &'static str) -> Self {
    Self { template }
  }

  fn capacity(&self) -> usize {
    self
      .template
      .chars()
      .filter(|&character| character == Self::PLACEHOLDER)
      .count()
  }

  fn snapshot(&self, value: &str) -> Snapshot {
    let mut digits = value.chars();
    let mut attributes = Vec::with_capacity(self.template.len());
    let text: String = self
      .template
      .chars()
      .map(|character| match character {
        Self::PLACEHOLDER => match digits.next() {
          Some(digit) => {
            attributes.push(Attribute::CONTENT);
            digit
          },
          None => {
            attributes.push(Attribute::PHANTOM);
            Self::EMPTY
          },
        },
        _ => {
          attributes.push(Attribute::PHANTOM);
          character
        },
      })
      .collect();

    let mut attributes = attributes.into_iter();
    let mut snapshot =
      Snapshot::from_str_with(&text, |_| attributes.next().unwrap_or(Attribute::PHANTOM));
    let first = self
      .template
      .chars()
      .position(|character| character == Self::PLACEHOLDER);
    if let Some(first) = first.filter(|_| value.is_empty()) {
      snapshot.anchor_at(snapshot.index_at(first));
    }
    snapshot
  }
}

impl DiffableTextStyle for Pattern {
  type Value = String;

  fn format(&self, value: &String) -> String {
    self.interpret(value).snapshot.to_string()
  }

  fn interpret(&self, value: &String) -> Commit<String> {
    let value: String = value
      .chars()
      .filter(char::is_ascii_digit)
      .take(self.capacity())
      .collect();
    let snapshot = self.snapshot(&value);
    Commit::new(value, snapshot)
  }

  fn resolve(&self, proposal: &Proposal) -> Result<Commit<String>> {
    let digits = digits(proposal)?;
    if digits.len() > self.capacity() {
      return Err(Rejection::new("pattern is full"));
    }
    Ok(self.interpret(&digits))
  }
}

/// Free text, resolved from the characters of a proposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lenient;

impl DiffableTextStyle for Lenient {
  type Value = String;

  fn format(&self, value: &String) -> String {
    value.clone()
  }

  fn interpret(&self, value: &String) -> Commit<String> {
    Commit::new(value.clone(), Snapshot::content(value))
  }

  fn resolve(&self, proposal: &Proposal) -> Result<Commit<String>> {
    let base = proposal.base.characters();
    let (lower, upper) = (proposal.range.start.character(), proposal.range.end.character());
    let value = [&base[..lower], proposal.replacement.characters(), &base[upper..]].concat();
    Ok(self.interpret(&value))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_dollars_group_thousands() {
    let style = Dollars::default();
    assert_eq!(style.format(&0), "$0");
    assert_eq!(style.format(&123), "$123");
    assert_eq!(style.format(&1234), "$1,234");
    assert_eq!(style.format(&1234567), "$1,234,567");

    let commit = style.interpret(&1234);
    assert_eq!(commit.snapshot.attributes()[2], Attribute::PHANTOM);
    assert_eq!(commit.snapshot.nonvirtuals().collect::<String>(), "1234");
  }

  #[test]
  fn test_unsplittable_proposal_is_rejected() {
    let style = Dollars::default();
    let base = style.interpret(&1).snapshot;
    let proposal = Proposal::new(
      base.clone(),
      Snapshot::content("\u{301}"),
      base.end_index()..base.end_index(),
    );
    let rejection = style.resolve(&proposal).unwrap_err();
    assert!(rejection.reason().contains("grapheme cluster"));
  }

  #[test]
  fn test_dollars_clamp() {
    let style = Dollars { max: Some(999) };
    assert_eq!(style.interpret(&1000).value, 999);
    assert_eq!(style.format(&1000), "$999");
  }

  #[test]
  fn test_pattern_fills_placeholders() {
    let style = Pattern::new("+## (###)");
    assert_eq!(style.format(&"123".into()), "+12 (3__)");
    assert_eq!(style.interpret(&"1x2345678".into()).value, "12345");

    let empty = style.interpret(&String::new()).snapshot;
    assert_eq!(empty.characters(), "+__ (___)");
    assert_eq!(empty.anchor(), Some(empty.index_at(1)));
    assert_eq!(style.interpret(&"1".into()).snapshot.anchor(), None);
  }
}
