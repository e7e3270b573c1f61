//! Unicode primitives shared by the diffable text engine: grapheme
//! segmentation over plain strings, and the counting schemes used to express
//! caret offsets to external text APIs.

pub mod grapheme;
pub mod position;
pub mod scheme;

pub use position::Position;
pub use scheme::Scheme;
