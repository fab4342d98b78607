use std::time::Duration;

use anyhow::Result;

use crate::input::{Action, Key, Modifiers, MouseButton};

/// Receiver of raw window notifications, invoked from inside
/// [`WindowBackend::poll_events`].
///
/// Cursor positions are physical pixels relative to the top-left of the
/// drawable area.
pub trait WindowCallbacks {
    fn cursor_moved(&mut self, x: f64, y: f64);
    fn mouse_button(&mut self, button: MouseButton, action: Action, modifiers: Modifiers);
    fn key(&mut self, code: Key, scancode: u32, action: Action, modifiers: Modifiers);
    /// Offsets in lines.
    fn scroll(&mut self, dx: f64, dy: f64);
    fn window_resized(&mut self, width: u32, height: u32);
    fn framebuffer_resized(&mut self, width: u32, height: u32);
    fn close_requested(&mut self);
}

/// Windowing system seen by the frame loop.
pub trait WindowBackend {
    /// Dispatches pending OS events to `callbacks`.
    ///
    /// With `wait`, blocks up to that long when nothing is pending; otherwise
    /// returns as soon as the pending events are handled.
    fn poll_events(&mut self, wait: Option<Duration>, callbacks: &mut dyn WindowCallbacks) -> Result<()>;

    /// Current drawable size in physical pixels.
    fn framebuffer_size(&self) -> (u32, u32);

    /// Called right before the frame is presented.
    fn pre_present(&self) {}
}
