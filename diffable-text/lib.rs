use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod attribute;
pub mod caret;
pub mod commit;
pub mod context;
pub mod field;
pub mod layout;
pub mod mismatch;
pub mod movement;
pub mod proposal;
pub mod selection;
pub mod snapshot;
pub mod style;
pub mod symbol;

#[cfg(test)]
mod testing;

pub use attribute::Attribute;
pub use commit::Commit;
pub use context::{
  Context,
  ContextError,
  Status,
  Update,
};
pub use diffable_core::{
  Position,
  Scheme,
  scheme,
};
pub use field::Field;
pub use proposal::Proposal;
pub use snapshot::Snapshot;
pub use style::{
  DiffableTextStyle,
  Rejection,
};
pub use symbol::Symbol;

pub type Tendril = SmartString<LazyCompact>;
