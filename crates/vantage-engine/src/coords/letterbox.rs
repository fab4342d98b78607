use crate::error::{ConfigError, ViewError};

use super::{Rect, Vec2};

/// Derived mapping for one buffer size.
///
/// Always replaced as a whole, so scale and margins can never disagree.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Physical output size in pixels.
    pub buffer: Vec2,
    /// Physical pixels per virtual unit; preserves the virtual aspect ratio.
    pub scale: f32,
    /// Horizontal letterbox bar width, normalized `0..0.5`.
    pub margin_x: f32,
    /// Vertical letterbox bar height, normalized `0..0.5`.
    pub margin_y: f32,
}

impl Projection {
    fn compute(virtual_size: Vec2, buffer: Vec2) -> Self {
        let scale = (buffer.x / virtual_size.x).min(buffer.y / virtual_size.y);
        let content = virtual_size * scale;

        // Limiting axis yields exactly zero; clamp rounding noise on that axis.
        let margin_x = ((buffer.x - content.x) / (2.0 * buffer.x)).max(0.0);
        let margin_y = ((buffer.y - content.y) / (2.0 * buffer.y)).max(0.0);

        Self {
            buffer,
            scale,
            margin_x,
            margin_y,
        }
    }
}

/// Letterboxed mapping between screen, normalized and virtual space.
///
/// The virtual resolution is fixed at construction. The buffer size changes on
/// resize; each change recomputes the whole [`Projection`] in one assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterboxView {
    virtual_size: Vec2,
    projection: Projection,
}

impl LetterboxView {
    /// Creates a view whose buffer initially matches the virtual resolution.
    pub fn new(virtual_width: f32, virtual_height: f32) -> Result<Self, ConfigError> {
        if !is_valid_extent(virtual_width, virtual_height) {
            return Err(ConfigError::InvalidVirtualSize {
                width: virtual_width,
                height: virtual_height,
            });
        }

        let virtual_size = Vec2::new(virtual_width, virtual_height);
        Ok(Self {
            virtual_size,
            projection: Projection::compute(virtual_size, virtual_size),
        })
    }

    /// Applies a new physical output size.
    ///
    /// Zero, negative or non-finite sizes are rejected and the previous
    /// projection stays in effect.
    pub fn set_buffer_size(&mut self, width: f32, height: f32) -> Result<(), ViewError> {
        if !is_valid_extent(width, height) {
            return Err(ViewError::InvalidDimension { width, height });
        }

        self.projection = Projection::compute(self.virtual_size, Vec2::new(width, height));
        Ok(())
    }

    #[inline]
    pub fn virtual_size(&self) -> Vec2 {
        self.virtual_size
    }

    #[inline]
    pub fn buffer_size(&self) -> Vec2 {
        self.projection.buffer
    }

    /// Buffer size rounded to whole pixels.
    #[inline]
    pub fn pixel_size(&self) -> (u32, u32) {
        let b = self.projection.buffer;
        (b.x.round().max(1.0) as u32, b.y.round().max(1.0) as u32)
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.projection.scale
    }

    #[inline]
    pub fn margin_x(&self) -> f32 {
        self.projection.margin_x
    }

    #[inline]
    pub fn margin_y(&self) -> f32 {
        self.projection.margin_y
    }

    /// Normalized units per virtual unit along X.
    #[inline]
    pub fn virtual_scale_x(&self) -> f32 {
        (1.0 - 2.0 * self.projection.margin_x) / self.virtual_size.x
    }

    /// Normalized units per virtual unit along Y.
    #[inline]
    pub fn virtual_scale_y(&self) -> f32 {
        (1.0 - 2.0 * self.projection.margin_y) / self.virtual_size.y
    }

    /// The letterboxed content area in normalized space.
    pub fn content_rect(&self) -> Rect {
        let Projection { margin_x, margin_y, .. } = self.projection;
        Rect::new(margin_x, margin_y, 1.0 - 2.0 * margin_x, 1.0 - 2.0 * margin_y)
    }

    /// Virtual point to normalized output space, centered within the letterbox.
    pub fn project_virtual_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.projection.margin_x + p.x * self.virtual_scale_x(),
            self.projection.margin_y + p.y * self.virtual_scale_y(),
        )
    }

    /// Virtual rectangle to normalized output space.
    pub fn project_virtual_rect(&self, r: Rect) -> Rect {
        Rect::from_origin_size(
            self.project_virtual_point(r.origin),
            r.size.scale(self.virtual_scale_x(), self.virtual_scale_y()),
        )
    }

    /// Screen pixel to normalized output space, ignoring the letterbox.
    pub fn project_screen_point(&self, p: Vec2) -> Vec2 {
        let b = self.projection.buffer;
        Vec2::new(p.x / b.x, p.y / b.y)
    }

    /// Normalized output point back to screen pixels.
    pub fn project_normalized_to_screen(&self, p: Vec2) -> Vec2 {
        let b = self.projection.buffer;
        Vec2::new(p.x * b.x, p.y * b.y)
    }

    /// Screen pixel to virtual space; exact inverse of
    /// [`project_virtual_point`](Self::project_virtual_point) composed with
    /// [`project_normalized_to_screen`](Self::project_normalized_to_screen).
    pub fn project_screen_point_to_virtual(&self, p: Vec2) -> Vec2 {
        let n = self.project_screen_point(p);
        Vec2::new(
            (n.x - self.projection.margin_x) / self.virtual_scale_x(),
            (n.y - self.projection.margin_y) / self.virtual_scale_y(),
        )
    }
}

fn is_valid_extent(width: f32, height: f32) -> bool {
    width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const EPS: f32 = 1e-5;

    fn view(w: f32, h: f32) -> LetterboxView {
        let mut v = LetterboxView::new(1920.0, 1080.0).unwrap();
        v.set_buffer_size(w, h).unwrap();
        v
    }

    // ── scale / margins ───────────────────────────────────────────────────

    #[test]
    fn height_limited_buffer_gets_side_bars() {
        let v = view(800.0, 400.0);

        assert_abs_diff_eq!(v.scale(), 400.0 / 1080.0, epsilon = EPS);
        assert_abs_diff_eq!(v.margin_y(), 0.0, epsilon = EPS);

        let content_w = 1920.0 * 400.0 / 1080.0;
        assert_abs_diff_eq!(v.margin_x(), (800.0 - content_w) / 1600.0, epsilon = EPS);
        assert!(v.margin_x() > 0.0);
    }

    #[test]
    fn width_limited_buffer_gets_top_and_bottom_bars() {
        let v = view(1000.0, 1000.0);

        assert_abs_diff_eq!(v.scale(), 1000.0 / 1920.0, epsilon = EPS);
        assert_abs_diff_eq!(v.margin_x(), 0.0, epsilon = EPS);
        assert!(v.margin_y() > 0.0);
    }

    #[test]
    fn matching_aspect_has_zero_margins() {
        for (w, h) in [(1920.0, 1080.0), (1280.0, 720.0), (16.0, 9.0)] {
            let v = view(w, h);
            assert_abs_diff_eq!(v.margin_x(), 0.0, epsilon = EPS);
            assert_abs_diff_eq!(v.margin_y(), 0.0, epsilon = EPS);
        }
    }

    #[test]
    fn virtual_center_maps_to_output_center_for_any_buffer() {
        for (w, h) in [(800.0, 400.0), (400.0, 800.0), (1.0, 1.0), (3840.0, 2160.0), (333.0, 71.0)] {
            let c = view(w, h).project_virtual_point(Vec2::new(960.0, 540.0));
            assert_abs_diff_eq!(c.x, 0.5, epsilon = EPS);
            assert_abs_diff_eq!(c.y, 0.5, epsilon = EPS);
        }
    }

    // ── letterbox symmetry ────────────────────────────────────────────────

    #[test]
    fn virtual_corners_form_centered_rectangle_with_virtual_aspect() {
        for (w, h) in [(800.0, 400.0), (500.0, 500.0), (1024.0, 768.0), (2560.0, 1080.0)] {
            let v = view(w, h);
            let [tl, tr, br, bl] = Rect::new(0.0, 0.0, 1920.0, 1080.0)
                .corners()
                .map(|c| v.project_virtual_point(c));

            assert_abs_diff_eq!(tl.x, v.margin_x(), epsilon = EPS);
            assert_abs_diff_eq!(tl.y, v.margin_y(), epsilon = EPS);
            assert_abs_diff_eq!(br.x, 1.0 - v.margin_x(), epsilon = EPS);
            assert_abs_diff_eq!(br.y, 1.0 - v.margin_y(), epsilon = EPS);
            assert_eq!(tl.y, tr.y);
            assert_eq!(bl.y, br.y);
            assert_eq!(tl.x, bl.x);
            assert_eq!(tr.x, br.x);

            // Aspect in physical pixels equals the virtual aspect.
            let px_w = (tr.x - tl.x) * w;
            let px_h = (bl.y - tl.y) * h;
            assert_abs_diff_eq!(px_w / px_h, 1920.0 / 1080.0, epsilon = 1e-3);
            assert!(v.margin_x() >= 0.0 && v.margin_y() >= 0.0);
        }
    }

    // ── invertibility ─────────────────────────────────────────────────────

    #[test]
    fn screen_to_virtual_inverts_virtual_projection() {
        let sizes = [(800.0, 400.0), (400.0, 800.0), (1.0, 3.0), (1920.0, 1080.0), (2000.0, 300.0)];
        for (w, h) in sizes {
            let v = view(w, h);
            for ix in 0..=8 {
                for iy in 0..=8 {
                    let p = Vec2::new(ix as f32 * 240.0, iy as f32 * 135.0);
                    let screen = v.project_normalized_to_screen(v.project_virtual_point(p));
                    let back = v.project_screen_point_to_virtual(screen);
                    assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-2);
                    assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-2);
                }
            }
        }
    }

    #[test]
    fn screen_point_ignores_letterbox() {
        let v = view(800.0, 400.0);
        let n = v.project_screen_point(Vec2::new(200.0, 100.0));
        assert_eq!(n, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn virtual_rect_scales_with_projection() {
        let v = view(800.0, 400.0);
        let r = v.project_virtual_rect(Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert_abs_diff_eq!(r.origin.x, v.margin_x(), epsilon = EPS);
        assert_abs_diff_eq!(r.size.x, 1.0 - 2.0 * v.margin_x(), epsilon = EPS);
        assert_abs_diff_eq!(r.size.y, 1.0, epsilon = EPS);
        assert_eq!(r, v.content_rect());
    }

    // ── updates ───────────────────────────────────────────────────────────

    #[test]
    fn repeated_resizes_equal_single_resize_to_final_size() {
        let mut many = LetterboxView::new(1920.0, 1080.0).unwrap();
        for (w, h) in [(100.0, 900.0), (1600.0, 200.0), (7.0, 7.0), (640.0, 480.0)] {
            many.set_buffer_size(w, h).unwrap();
        }
        let single = view(640.0, 480.0);

        assert_eq!(many.projection(), single.projection());
        let p = Vec2::new(123.0, 456.0);
        assert_eq!(many.project_virtual_point(p), single.project_virtual_point(p));
    }

    #[test]
    fn invalid_dimensions_keep_previous_projection() {
        let mut v = view(800.0, 400.0);
        let before = v.projection();

        for (w, h) in [(0.0, 400.0), (800.0, 0.0), (-1.0, 5.0), (f32::NAN, 5.0), (f32::INFINITY, 1.0)] {
            let err = v.set_buffer_size(w, h).unwrap_err();
            assert!(matches!(err, ViewError::InvalidDimension { .. }));
            assert_eq!(v.projection(), before);
        }
    }

    #[test]
    fn invalid_virtual_size_is_rejected() {
        assert!(LetterboxView::new(0.0, 1080.0).is_err());
        assert!(LetterboxView::new(1920.0, -1.0).is_err());
    }

    #[test]
    fn pixel_size_rounds_buffer() {
        assert_eq!(view(800.0, 400.0).pixel_size(), (800, 400));
        assert_eq!(view(799.6, 400.2).pixel_size(), (800, 400));
    }
}
