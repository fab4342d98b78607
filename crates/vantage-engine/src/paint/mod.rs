//! Color representation shared by the draw list and backends.

mod color;

pub use color::Color;
