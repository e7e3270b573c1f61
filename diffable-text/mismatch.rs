//! Alignment of previously displayed text with freshly formatted text.
//!
//! A formatter is a black box from value to text, so there is no edit script
//! telling us where the user's caret went. Instead the old and new snapshots
//! are walked side by side from one end until they stop agreeing:
//!
//! 1. equal characters are consumed from both sides
//! 2. otherwise a [`Attribute::REMOVABLE`] past symbol is consumed alone
//! 3. otherwise an [`Attribute::INSERTABLE`] next symbol is consumed alone
//! 4. otherwise the walk stops
//!
//! [`prefix`] walks from the front, [`suffix`] walks both sequences reversed
//! and maps the result back onto the forward indices.
//!
//! ```text
//! past: $ 1 2          prefix agreement: "$1" + inserted "," + "2"
//! next: $ 1 , 2        past.end, next.end
//! ```

use tracing::trace;

use crate::{
  attribute::Attribute,
  snapshot::{
    Index,
    Snapshot,
  },
};

/// The boundary reached in both sequences when they stopped agreeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
  pub past: Index,
  pub next: Index,
}

/// Number of symbols consumed from `past` and from `next` before the first
/// irreconcilable mismatch, or before either sequence runs out.
pub fn agreement<'a, P, N>(past: P, next: N) -> (usize, usize)
where
  P: IntoIterator<Item = (&'a str, Attribute)>,
  N: IntoIterator<Item = (&'a str, Attribute)>,
{
  let mut past = past.into_iter().peekable();
  let mut next = next.into_iter().peekable();
  let (mut consumed_past, mut consumed_next) = (0, 0);

  while let (Some(&(past_character, past_attribute)), Some(&(next_character, next_attribute))) =
    (past.peek(), next.peek())
  {
    if past_character == next_character {
      past.next();
      next.next();
      consumed_past += 1;
      consumed_next += 1;
    } else if past_attribute.is_removable() {
      past.next();
      consumed_past += 1;
    } else if next_attribute.is_insertable() {
      next.next();
      consumed_next += 1;
    } else {
      break;
    }
  }

  (consumed_past, consumed_next)
}

/// Aligns `past[..until]` with `next` from the front.
pub fn prefix(past: &Snapshot, until: Index, next: &Snapshot) -> Mismatch {
  let (consumed_past, consumed_next) = agreement(
    past.symbols_in(past.start_index()..until),
    next.symbols(),
  );

  let mismatch = Mismatch {
    past: past.index_at(consumed_past),
    next: next.index_at(consumed_next),
  };
  trace!(
    until = until.attribute(),
    past = consumed_past,
    next = consumed_next,
    "prefix mismatch"
  );
  mismatch
}

/// Aligns `past[from..]` with `next` from the back.
pub fn suffix(past: &Snapshot, from: Index, next: &Snapshot) -> Mismatch {
  let (consumed_past, consumed_next) = agreement(
    past.symbols_in(from..past.end_index()).rev(),
    next.symbols().rev(),
  );

  let mismatch = Mismatch {
    past: past.index_at(past.len() - consumed_past),
    next: next.index_at(next.len() - consumed_next),
  };
  trace!(
    from = from.attribute(),
    past = consumed_past,
    next = consumed_next,
    "suffix mismatch"
  );
  mismatch
}

#[cfg(test)]
mod tests {
  use quickcheck::{
    Arbitrary,
    Gen,
  };

  use super::*;
  use crate::symbol::Symbol;

  fn snapshot(text: &str, phantoms: &str) -> Snapshot {
    Snapshot::from_str_with(text, |character| {
      if phantoms.contains(character) {
        Attribute::PHANTOM
      } else {
        Attribute::CONTENT
      }
    })
  }

  fn reversed(snapshot: &Snapshot) -> Snapshot {
    let symbols = snapshot.symbols().rev().filter_map(|(character, attribute)| {
      Symbol::grapheme(character, attribute)
    });
    Snapshot::from_symbols(symbols).unwrap()
  }

  #[test]
  fn test_inserted_separator_is_skipped() {
    let past = snapshot("$12", "$,");
    let next = snapshot("$1,2", "$,");
    let mismatch = prefix(&past, past.end_index(), &next);
    assert_eq!(mismatch.past, past.end_index());
    assert_eq!(mismatch.next, next.end_index());
  }

  #[test]
  fn test_removed_separator_is_skipped() {
    let past = snapshot("$1,234", "$,");
    let next = snapshot("$234", "$,");
    let mismatch = suffix(&past, past.index_at(3), &next);
    assert_eq!(mismatch.past, past.index_at(3));
    assert_eq!(mismatch.next, next.index_at(1));

    let past = snapshot("1,2", ",");
    let next = snapshot("12", ",");
    let mismatch = prefix(&past, past.end_index(), &next);
    assert_eq!(mismatch.past, past.end_index());
    assert_eq!(mismatch.next, next.end_index());
  }

  #[test]
  fn test_content_mismatch_stops() {
    let past = snapshot("123", "");
    let next = snapshot("193", "");
    let mismatch = prefix(&past, past.end_index(), &next);
    assert_eq!(mismatch.past, past.index_at(1));
    assert_eq!(mismatch.next, next.index_at(1));

    let mismatch = suffix(&past, past.start_index(), &next);
    assert_eq!(mismatch.past, past.index_at(2));
    assert_eq!(mismatch.next, next.index_at(2));
  }

  #[test]
  fn test_exhausted_sequences() {
    let past = snapshot("12", "");
    let next = Snapshot::new();
    assert_eq!(prefix(&past, past.end_index(), &next), Mismatch {
      past: past.start_index(),
      next: next.start_index(),
    });

    let mismatch = suffix(&past, past.end_index(), &snapshot("$12", "$"));
    assert_eq!(mismatch.past, past.end_index());
    assert_eq!(mismatch.next.attribute(), 3);
  }

  #[test]
  fn test_removable_wins_over_insertable() {
    let past = snapshot(",1", ",.");
    let next = snapshot(".1", ",.");
    let (consumed_past, consumed_next) = agreement(past.symbols(), next.symbols());
    assert_eq!((consumed_past, consumed_next), (2, 2));

    let past = snapshot("a", "");
    let next = snapshot(".", ".");
    assert_eq!(agreement(past.symbols(), next.symbols()), (0, 1));
  }

  #[derive(Debug, Clone)]
  struct Sequence(Snapshot);

  impl Arbitrary for Sequence {
    fn arbitrary(g: &mut Gen) -> Self {
      let len = usize::arbitrary(g) % 8;
      let characters = ['1', '2', '3', ',', '$', ' '];
      let attributes = [
        Attribute::CONTENT,
        Attribute::PHANTOM,
        Attribute::INSERTABLE,
        Attribute::REMOVABLE,
      ];
      let symbols = (0..len).map(|_| {
        let character = *g.choose(&characters).unwrap_or(&'1');
        let attribute = *g.choose(&attributes).unwrap_or(&Attribute::CONTENT);
        Symbol::new(character, attribute)
      });
      Self(Snapshot::from_symbols(symbols).unwrap())
    }
  }

  quickcheck::quickcheck! {
      fn suffix_is_reversed_prefix(past: Sequence, next: Sequence, from: usize) -> bool {
          let (past, next) = (past.0, next.0);
          let from = past.index_at(from % (past.len() + 1));

          let direct = suffix(&past, from, &next);

          let past_reversed = reversed(&past);
          let next_reversed = reversed(&next);
          let until = past_reversed.index_at(past.len() - from.attribute());
          let backwards = prefix(&past_reversed, until, &next_reversed);

          direct.past.attribute() == past.len() - backwards.past.attribute()
              && direct.next.attribute() == next.len() - backwards.next.attribute()
      }

      fn identical_sequences_agree_fully(past: Sequence) -> bool {
          let past = past.0;
          let mismatch = prefix(&past, past.end_index(), &past);
          mismatch.past == past.end_index() && mismatch.next == past.end_index()
      }
  }
}
