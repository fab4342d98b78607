use std::collections::HashSet;

use crate::coords::Vec2;

use super::sink::InputSink;
use super::types::{
    Action,
    Key,
    KeyEvent,
    Modifiers,
    MouseButton,
    MouseButtonEvent,
    MouseMovedEvent,
    ScrollEvent,
};

/// Held-state tracker fed by flushed input.
///
/// Holds "is down" information and the last pointer position, plus the
/// transitions seen since the last [`end_frame`](Self::end_frame).
#[derive(Debug, Default)]
pub struct InputState {
    /// Modifier state of the most recent key or button event.
    pub modifiers: Modifiers,

    /// Pointer position in screen pixels.
    pub pointer_screen: Option<Vec2>,

    /// Pointer position in virtual units.
    pub pointer_virtual: Option<Vec2>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,

    /// Mouse buttons pressed this frame.
    pub buttons_pressed: HashSet<MouseButton>,

    /// Mouse buttons released this frame.
    pub buttons_released: HashSet<MouseButton>,

    /// Scroll accumulated this frame, in lines.
    pub scroll: (f64, f64),
}

impl InputState {
    /// Clears per-frame transitions; held state is kept.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll = (0.0, 0.0);
    }

    /// Drops all held keys and buttons, e.g. after focus loss.
    pub fn release_all(&mut self) {
        self.keys_down.clear();
        self.buttons_down.clear();
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

impl InputSink for InputState {
    fn mouse_moved(&mut self, e: MouseMovedEvent) {
        self.pointer_screen = Some(Vec2::new(e.screen_x, e.screen_y));
        self.pointer_virtual = Some(Vec2::new(e.virtual_x, e.virtual_y));
    }

    fn mouse_button(&mut self, e: MouseButtonEvent) {
        self.modifiers = e.modifiers;

        match e.action {
            Action::Press => {
                if self.buttons_down.insert(e.button) {
                    self.buttons_pressed.insert(e.button);
                }
            }
            Action::Release => {
                if self.buttons_down.remove(&e.button) {
                    self.buttons_released.insert(e.button);
                }
            }
            Action::Repeat => {}
        }
    }

    fn key(&mut self, e: KeyEvent) {
        self.modifiers = e.modifiers;

        match e.action {
            Action::Press => {
                if self.keys_down.insert(e.code) {
                    self.keys_pressed.insert(e.code);
                }
            }
            Action::Release => {
                if self.keys_down.remove(&e.code) {
                    self.keys_released.insert(e.code);
                }
            }
            // Held already; repeats are not new transitions.
            Action::Repeat => {}
        }
    }

    fn scroll(&mut self, e: ScrollEvent) {
        self.scroll.0 += e.dx;
        self.scroll.1 += e.dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: Key, action: Action) -> KeyEvent {
        KeyEvent {
            code,
            scancode: 0,
            action,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn press_and_release_record_transitions_once() {
        let mut s = InputState::default();

        s.key(key(Key::W, Action::Press));
        s.key(key(Key::W, Action::Repeat));
        s.key(key(Key::W, Action::Press));
        assert!(s.key_down(Key::W));
        assert_eq!(s.keys_pressed.len(), 1);

        s.end_frame();
        assert!(s.keys_pressed.is_empty());
        assert!(s.key_down(Key::W));

        s.key(key(Key::W, Action::Release));
        assert!(!s.key_down(Key::W));
        assert!(s.keys_released.contains(&Key::W));
    }

    #[test]
    fn release_without_press_is_not_a_transition() {
        let mut s = InputState::default();
        s.key(key(Key::Escape, Action::Release));
        assert!(s.keys_released.is_empty());
    }

    #[test]
    fn buttons_track_modifiers_and_held_state() {
        let mut s = InputState::default();
        let mods = Modifiers { shift: true, ..Modifiers::default() };

        s.mouse_button(MouseButtonEvent { button: MouseButton::Right, action: Action::Press, modifiers: mods });
        assert!(s.button_down(MouseButton::Right));
        assert!(s.buttons_pressed.contains(&MouseButton::Right));
        assert_eq!(s.modifiers, mods);

        s.release_all();
        assert!(!s.button_down(MouseButton::Right));
    }

    #[test]
    fn pointer_and_scroll_accumulate() {
        let mut s = InputState::default();
        s.mouse_moved(MouseMovedEvent { screen_x: 10.0, screen_y: 20.0, virtual_x: 30.0, virtual_y: 40.0 });
        s.scroll(ScrollEvent { dx: 1.0, dy: -2.0 });
        s.scroll(ScrollEvent { dx: 0.5, dy: -1.0 });

        assert_eq!(s.pointer_screen, Some(Vec2::new(10.0, 20.0)));
        assert_eq!(s.pointer_virtual, Some(Vec2::new(30.0, 40.0)));
        assert_eq!(s.scroll, (1.5, -3.0));

        s.end_frame();
        assert_eq!(s.scroll, (0.0, 0.0));
        assert!(s.pointer_virtual.is_some());
    }
}
