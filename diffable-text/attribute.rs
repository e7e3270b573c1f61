//! Behavioural flags attached to every symbol of a snapshot.
//!
//! The flags are independent, any subset is legal:
//!
//! - **VIRTUAL** - formatting decoration, not user content
//! - **INSERTABLE** - may be skipped when matching newly inserted text
//! - **REMOVABLE** - may be skipped when matching removed text
//! - **PASSTHROUGH** - has no interactive width, carets pass through it
//!
//! [`Attribute::CONTENT`] is the empty set and [`Attribute::PHANTOM`] is the
//! union of all four, which is what grouping separators, currency codes and
//! mask literals usually carry.

use bitflags::bitflags;
use serde::{
  Deserialize,
  Serialize,
};

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
  #[serde(transparent)]
  pub struct Attribute: u8 {
    const VIRTUAL     = 0b0001;
    const INSERTABLE  = 0b0010;
    const REMOVABLE   = 0b0100;
    const PASSTHROUGH = 0b1000;

    const CONTENT = 0b0000;
    const PHANTOM = Self::VIRTUAL.bits()
      | Self::INSERTABLE.bits()
      | Self::REMOVABLE.bits()
      | Self::PASSTHROUGH.bits();
  }
}

impl Default for Attribute {
  fn default() -> Self {
    Self::CONTENT
  }
}

impl Attribute {
  #[inline]
  pub fn is_virtual(self) -> bool {
    self.contains(Self::VIRTUAL)
  }

  #[inline]
  pub fn is_insertable(self) -> bool {
    self.contains(Self::INSERTABLE)
  }

  #[inline]
  pub fn is_removable(self) -> bool {
    self.contains(Self::REMOVABLE)
  }

  #[inline]
  pub fn is_passthrough(self) -> bool {
    self.contains(Self::PASSTHROUGH)
  }
}
