//! Editable text primitives for the tag field.
//!
//! - [`TextRange`]: half-open character range (selection marker, edit targets)
//! - [`ActiveRange`]: the span currently being typed, not yet a tag
//! - [`TagBuffer`] / [`TagBufferMut`]: traits over the attributed buffer
//! - [`RopeTagBuffer`]: buffer backed by `ropey::Rope` with per-character attributes
//! - [`Content`]: replacement content, styled text or a single attachment

mod active;
mod buffer;
mod range;

pub use active::{ActiveRange, MoveDirection};
pub use buffer::{Content, RopeTagBuffer, TagBuffer, TagBufferMut, ATTACHMENT_CHAR};
pub use range::TextRange;
