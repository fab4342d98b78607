use anyhow::Result;

use crate::input::InputSink;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Input arrives through the [`InputSink`] methods, flushed from the event
/// queue once per frame before [`on_frame`](Self::on_frame) runs.
pub trait App: InputSink {
    /// Called once per drawable frame. An error ends the loop after teardown.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl>;
}
