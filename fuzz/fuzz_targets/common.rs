use diffable_text::{
  Attribute,
  Field,
  Snapshot,
  layout::{
    Index,
    Layout,
  },
  movement::Direction,
  scheme::Utf16,
};

const MAX_SYMBOLS: usize = 64;
const MAX_OPS: usize = 32;
const CHARACTERS: &[char] = &['1', '2', ',', '$', ' ', '€', '😀', '_', '\u{301}', '\u{200d}'];

#[derive(Debug, Clone)]
pub enum Op {
  Select {
    lower:    u16,
    upper:    u16,
    momentum: bool,
  },
  Reformat(Snapshot),
}

pub struct FuzzSession {
  pub field: Field<Utf16>,
  pub ops:   Vec<Op>,
}

pub fn session_from_bytes(data: &[u8]) -> FuzzSession {
  let mut cursor = ByteCursor::new(data);
  let field = Field::new(cursor.next_snapshot());
  let op_count = cursor.next_usize(MAX_OPS);
  let mut ops = Vec::with_capacity(op_count);
  for _ in 0..op_count {
    let op = match cursor.next_u8() % 2 {
      0 => Op::Select {
        lower:    cursor.next_u16(),
        upper:    cursor.next_u16(),
        momentum: cursor.next_u8() % 2 == 0,
      },
      _ => Op::Reformat(cursor.next_snapshot()),
    };
    ops.push(op);
  }

  FuzzSession { field, ops }
}

/// Checks where a placed selection may rest.
///
/// A selection covering the whole layout is exempt: it is kept as is.
pub fn assert_placed(field: &Field<Utf16>) {
  let layout = field.layout();
  let snapshot = layout.snapshot();
  assert!(Snapshot::from_parts(snapshot.characters(), snapshot.attributes().to_vec()).is_ok());

  let selection = field.selection();
  if !selection.is_empty() && selection == layout.selection() {
    return;
  }

  for index in [selection.lower(), selection.upper()] {
    match layout.snapshot().anchor() {
      Some(anchor) => assert_eq!(index, layout.index(anchor)),
      None => assert_rests_against_content(layout, index),
    }
  }
}

fn assert_rests_against_content(layout: &Layout<Utf16>, index: Index<Utf16>) {
  let attributes = layout.snapshot().attributes();
  if attributes.iter().all(|attribute| attribute.is_passthrough()) {
    assert_eq!(index, layout.start_index());
    return;
  }

  let behind = layout.peek(index, Direction::Backward);
  let ahead = layout.peek(index, Direction::Forward);
  assert!(
    behind.is_some_and(|index| layout.nonpassthrough(index))
      || ahead.is_some_and(|index| layout.nonpassthrough(index)),
    "caret at {} rests inside passthrough symbols of {:?}",
    index.offset(),
    layout.characters()
  );
}

struct ByteCursor<'a> {
  data: &'a [u8],
  pos:  usize,
}

impl<'a> ByteCursor<'a> {
  fn new(data: &'a [u8]) -> Self {
    Self { data, pos: 0 }
  }

  fn next_u8(&mut self) -> u8 {
    let value = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos = self.pos.saturating_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    let lo = self.next_u8() as u16;
    let hi = self.next_u8() as u16;
    lo | (hi << 8)
  }

  fn next_usize(&mut self, max: usize) -> usize {
    if max == 0 {
      return 0;
    }
    (self.next_u16() as usize) % (max + 1)
  }

  fn next_snapshot(&mut self) -> Snapshot {
    let len = self.next_usize(MAX_SYMBOLS);
    let mut snapshot = Snapshot::with_capacity(len);
    for _ in 0..len {
      let byte = self.next_u8();
      let character = CHARACTERS[(byte >> 4) as usize % CHARACTERS.len()];
      // a mark that would fuse with the previous symbol is dropped
      let _ = snapshot.append(character, Attribute::from_bits_truncate(byte));
    }
    if self.next_u8() % 4 == 0 {
      let anchor = self.next_usize(snapshot.len());
      snapshot.anchor_at(snapshot.index_at(anchor));
    }
    snapshot
  }
}
