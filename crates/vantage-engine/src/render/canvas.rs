use crate::coords::{LetterboxView, Rect, Vec2};
use crate::paint::Color;

use super::list::DrawList;

/// Immediate-mode drawing helpers over a [`DrawList`].
///
/// Accepts geometry in virtual, normalized or screen space and converts
/// through the view's current projection. Thicknesses are in screen pixels.
pub struct Canvas<'a> {
    list: &'a mut DrawList,
    view: &'a LetterboxView,
}

impl<'a> Canvas<'a> {
    pub fn new(list: &'a mut DrawList, view: &'a LetterboxView) -> Self {
        Self { list, view }
    }

    #[inline]
    pub fn view(&self) -> &LetterboxView {
        self.view
    }

    /// Color the whole target is cleared to before geometry is drawn.
    pub fn clear(&mut self, color: Color) {
        self.list.set_clear_color(color);
    }

    pub fn fill_normalized(&mut self, rect: Rect, color: Color) {
        let r = rect.normalized();
        if r.is_empty() || !r.is_finite() {
            return;
        }
        self.list.push_quad(r.corners(), color);
    }

    pub fn fill_virtual(&mut self, rect: Rect, color: Color) {
        let r = self.view.project_virtual_rect(rect.normalized());
        self.fill_normalized(r, color);
    }

    pub fn fill_screen(&mut self, rect: Rect, color: Color) {
        let r = rect.normalized();
        let min = self.view.project_screen_point(r.min());
        let max = self.view.project_screen_point(r.max());
        self.fill_normalized(Rect::from_corners(min, max), color);
    }

    /// Fills the letterboxed content area.
    pub fn fill_content(&mut self, color: Color) {
        let r = self.view.content_rect();
        self.fill_normalized(r, color);
    }

    /// Outlines a screen-space rectangle with bars of `thickness` pixels drawn inside it.
    pub fn stroke_screen_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        let r = rect.normalized();
        let t = thickness.min(r.size.x * 0.5).min(r.size.y * 0.5);
        if t <= 0.0 {
            return;
        }

        let (x, y, w, h) = (r.origin.x, r.origin.y, r.size.x, r.size.y);
        self.fill_screen(Rect::new(x, y, w, t), color);
        self.fill_screen(Rect::new(x, y + h - t, w, t), color);
        self.fill_screen(Rect::new(x, y + t, t, h - 2.0 * t), color);
        self.fill_screen(Rect::new(x + w - t, y + t, t, h - 2.0 * t), color);
    }

    pub fn line_screen(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color) {
        let d = b - a;
        let len = d.length();
        if len <= f32::EPSILON || thickness <= 0.0 || !len.is_finite() {
            return;
        }

        // Perpendicular offset of half the thickness, in pixels.
        let n = Vec2::new(-d.y, d.x) * (thickness * 0.5 / len);
        let corners = [a + n, b + n, b - n, a - n].map(|p| self.view.project_screen_point(p));
        self.list.push_quad(corners, color);
    }

    pub fn line_virtual(&mut self, a: Vec2, b: Vec2, thickness: f32, color: Color) {
        let to_screen = |p| {
            self.view
                .project_normalized_to_screen(self.view.project_virtual_point(p))
        };
        let (a, b) = (to_screen(a), to_screen(b));
        self.line_screen(a, b, thickness, color);
    }
}
