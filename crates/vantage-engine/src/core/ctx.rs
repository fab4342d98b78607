use crate::coords::LetterboxView;
use crate::render::Canvas;
use crate::time::FrameTime;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `view` holds the projection in effect for the whole frame; `canvas`
/// collects the frame's geometry.
pub struct FrameCtx<'a> {
    pub view: &'a LetterboxView,
    pub time: FrameTime,
    pub canvas: Canvas<'a>,
}
