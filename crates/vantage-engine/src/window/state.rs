/// Which notification produced a resize.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeSource {
    /// Window size in screen units.
    Window,
    /// Drawable size in physical pixels.
    Framebuffer,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PendingResize {
    pub width: u32,
    pub height: u32,
    pub source: ResizeSource,
}

impl PendingResize {
    /// Zero-sized (e.g. minimized) outputs cannot be drawn to.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Flags raised by window callbacks and consumed by the frame loop.
///
/// Callbacks only record requests here; GPU state is touched by the loop.
#[derive(Debug, Default)]
pub struct WindowRuntimeState {
    resize_pending: Option<PendingResize>,
    framebuffer_seen: bool,
    should_close: bool,
}

impl WindowRuntimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new polling pass. Source precedence only applies within one pass.
    pub fn begin_poll(&mut self) {
        self.framebuffer_seen = false;
    }

    /// Marks a resize pending. Within one polling pass a framebuffer size
    /// beats any window size; otherwise the latest request wins.
    pub fn request_resize(&mut self, width: u32, height: u32, source: ResizeSource) {
        match source {
            ResizeSource::Framebuffer => self.framebuffer_seen = true,
            ResizeSource::Window if self.framebuffer_seen => {
                log::debug!("window size {width}x{height} ignored; framebuffer size already reported");
                return;
            }
            ResizeSource::Window => {}
        }

        self.resize_pending = Some(PendingResize {
            width,
            height,
            source,
        });
    }

    pub fn pending_resize(&self) -> Option<PendingResize> {
        self.resize_pending
    }

    /// Called once the new size has been applied to the target.
    pub fn clear_resize(&mut self) {
        self.resize_pending = None;
    }

    pub fn request_close(&mut self) {
        self.should_close = true;
    }

    pub fn should_close(&self) -> bool {
        self.should_close
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(s: &WindowRuntimeState) -> (u32, u32) {
        let p = s.pending_resize().unwrap();
        (p.width, p.height)
    }

    #[test]
    fn latest_request_of_same_source_wins() {
        let mut s = WindowRuntimeState::new();
        s.begin_poll();
        s.request_resize(100, 100, ResizeSource::Window);
        s.request_resize(200, 150, ResizeSource::Window);
        assert_eq!(pending(&s), (200, 150));
    }

    #[test]
    fn framebuffer_size_beats_window_size_in_one_pass() {
        let mut s = WindowRuntimeState::new();
        s.begin_poll();
        s.request_resize(1600, 1200, ResizeSource::Framebuffer);
        s.request_resize(800, 600, ResizeSource::Window);
        assert_eq!(pending(&s), (1600, 1200));
        assert_eq!(s.pending_resize().unwrap().source, ResizeSource::Framebuffer);

        // Window first, framebuffer second: framebuffer still wins.
        s.clear_resize();
        s.begin_poll();
        s.request_resize(800, 600, ResizeSource::Window);
        s.request_resize(1600, 1200, ResizeSource::Framebuffer);
        assert_eq!(pending(&s), (1600, 1200));
    }

    #[test]
    fn precedence_resets_between_passes() {
        let mut s = WindowRuntimeState::new();
        s.begin_poll();
        s.request_resize(0, 0, ResizeSource::Framebuffer);

        s.begin_poll();
        s.request_resize(640, 480, ResizeSource::Window);
        assert_eq!(pending(&s), (640, 480));
    }

    #[test]
    fn pending_stays_until_cleared() {
        let mut s = WindowRuntimeState::new();
        assert!(s.pending_resize().is_none());

        s.request_resize(0, 10, ResizeSource::Framebuffer);
        assert!(!s.pending_resize().unwrap().is_drawable());
        s.begin_poll();
        assert!(s.pending_resize().is_some());

        s.clear_resize();
        assert!(s.pending_resize().is_none());
    }

    #[test]
    fn close_is_sticky() {
        let mut s = WindowRuntimeState::new();
        assert!(!s.should_close());
        s.request_close();
        s.begin_poll();
        assert!(s.should_close());
    }
}
