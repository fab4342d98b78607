//! Frame geometry and its GPU renderer.
//!
//! Convention:
//! - Geometry is stored in normalized output space (`0..1`, top-left origin, +Y down).
//! - [`Canvas`] converts from virtual and screen space on the way in.
//! - The vertex shader maps normalized space to NDC.

mod canvas;
mod list;
mod triangles;

pub use canvas::Canvas;
pub use list::{DrawList, Vertex};
pub use triangles::{PassTarget, TriangleRenderer};
