#![no_main]

mod common;

use std::mem;

use diffable_text::Position;
use libfuzzer_sys::fuzz_target;

use crate::common::{
  Op,
  assert_placed,
  session_from_bytes,
};

fuzz_target!(|data: &[u8]| {
  let mut session = session_from_bytes(data);

  for op in mem::take(&mut session.ops) {
    match op {
      Op::Select {
        lower,
        upper,
        momentum,
      } => {
        let positions = Position::new(lower as usize)..Position::new(upper as usize);
        session.field.update_selection(positions, momentum);
      },
      Op::Reformat(snapshot) => session.field.update_snapshot(snapshot),
    }
    assert_placed(&session.field);

    // placing again changes nothing
    let placed = session.field.selection();
    session.field.update_selection(session.field.positions(), false);
    assert_eq!(session.field.selection(), placed);
  }
});
