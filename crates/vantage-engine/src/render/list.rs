use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// Vertex in normalized output space (`0..1`, top-left origin, +Y down).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4], // premultiplied
}

impl Vertex {
    #[inline]
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self {
            pos: [pos.x, pos.y],
            color: color.to_array(),
        }
    }
}

/// One frame of geometry: a clear color plus a triangle list in paint order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    clear: Color,
    vertices: Vec<Vertex>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all geometry and resets the clear color to transparent black.
    /// Keeps the allocation.
    pub fn reset(&mut self) {
        self.clear = Color::TRANSPARENT;
        self.vertices.clear();
    }

    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear
    }

    #[inline]
    pub fn set_clear_color(&mut self, color: Color) {
        self.clear = color;
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.vertices.extend([
            Vertex::new(a, color),
            Vertex::new(b, color),
            Vertex::new(c, color),
        ]);
    }

    /// Pushes a quad given its corners in winding order.
    pub fn push_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let [a, b, c, d] = corners;
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }
}
