use std::fmt;

/// Keyboard key identifier.
///
/// The window backend maps platform keycodes into these variants where possible.
/// For unsupported keys, use `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers as keys
    Shift,
    Control,
    Alt,
    Meta,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

/// Transition reported for a key or mouse button.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    Press,
    Release,
    /// Auto-repeat while a key is held.
    Repeat,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Cursor movement, carried in both screen pixels and virtual units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMovedEvent {
    pub screen_x: f32,
    pub screen_y: f32,
    pub virtual_x: f32,
    pub virtual_y: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub action: Action,
    pub modifiers: Modifiers,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyEvent {
    pub code: Key,
    /// Platform scancode, `0` when the platform does not expose one.
    pub scancode: u32,
    pub action: Action,
    pub modifiers: Modifiers,
}

/// Scroll offsets in wheel lines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollEvent {
    pub dx: f64,
    pub dy: f64,
}

/// Input as delivered by the window backend.
///
/// Immutable once built; the queue owns it until delivery, then the sink gets a copy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    MouseMoved(MouseMovedEvent),
    MouseButton(MouseButtonEvent),
    Key(KeyEvent),
    Scroll(ScrollEvent),
}

impl InputEvent {
    /// `false` for events carrying non-finite coordinates or offsets.
    pub fn is_well_formed(&self) -> bool {
        match self {
            InputEvent::MouseMoved(e) => {
                e.screen_x.is_finite()
                    && e.screen_y.is_finite()
                    && e.virtual_x.is_finite()
                    && e.virtual_y.is_finite()
            }
            InputEvent::Scroll(e) => e.dx.is_finite() && e.dy.is_finite(),
            InputEvent::MouseButton(_) | InputEvent::Key(_) => true,
        }
    }
}

impl From<MouseMovedEvent> for InputEvent {
    fn from(e: MouseMovedEvent) -> Self {
        InputEvent::MouseMoved(e)
    }
}

impl From<MouseButtonEvent> for InputEvent {
    fn from(e: MouseButtonEvent) -> Self {
        InputEvent::MouseButton(e)
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(e: KeyEvent) -> Self {
        InputEvent::Key(e)
    }
}

impl From<ScrollEvent> for InputEvent {
    fn from(e: ScrollEvent) -> Self {
        InputEvent::Scroll(e)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
