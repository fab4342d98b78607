use super::types::{InputEvent, KeyEvent, MouseButtonEvent, MouseMovedEvent, ScrollEvent};

/// Consumer of flushed input.
///
/// Application logic implements this to observe input without depending on
/// the queue. Every method defaults to ignoring the event.
pub trait InputSink {
    fn mouse_moved(&mut self, e: MouseMovedEvent) {
        let _ = e;
    }

    fn mouse_button(&mut self, e: MouseButtonEvent) {
        let _ = e;
    }

    fn key(&mut self, e: KeyEvent) {
        let _ = e;
    }

    fn scroll(&mut self, e: ScrollEvent) {
        let _ = e;
    }
}

impl<S: InputSink + ?Sized> InputSink for &mut S {
    fn mouse_moved(&mut self, e: MouseMovedEvent) {
        (**self).mouse_moved(e)
    }

    fn mouse_button(&mut self, e: MouseButtonEvent) {
        (**self).mouse_button(e)
    }

    fn key(&mut self, e: KeyEvent) {
        (**self).key(e)
    }

    fn scroll(&mut self, e: ScrollEvent) {
        (**self).scroll(e)
    }
}

impl InputEvent {
    /// Routes the event to the matching sink method.
    pub fn dispatch<S: InputSink + ?Sized>(self, sink: &mut S) {
        match self {
            InputEvent::MouseMoved(e) => sink.mouse_moved(e),
            InputEvent::MouseButton(e) => sink.mouse_button(e),
            InputEvent::Key(e) => sink.key(e),
            InputEvent::Scroll(e) => sink.scroll(e),
        }
    }
}
