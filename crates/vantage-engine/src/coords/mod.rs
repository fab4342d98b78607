//! Coordinate spaces and the letterbox projector.
//!
//! Three spaces are in play:
//! - screen space: physical pixels of the output buffer, origin top-left
//! - normalized space: `0..1` on both axes, origin top-left, used for draw coordinates
//! - virtual space: the fixed design resolution the application reasons in
//!
//! `LetterboxView` is the only place that maps between them.

mod letterbox;
mod rect;
mod vec2;

pub use letterbox::{LetterboxView, Projection};
pub use rect::Rect;
pub use vec2::Vec2;
