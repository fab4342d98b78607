//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Window backends translate platform callbacks into `InputEvent`s and push them
//! into the `EventQueue`; the render loop flushes the queue into an `InputSink`
//! once per frame.

mod queue;
mod sink;
mod state;
mod types;

pub use queue::{EventProducer, EventQueue};
pub use sink::InputSink;
pub use state::InputState;
pub use types::{
    Action,
    InputEvent,
    Key,
    KeyEvent,
    Modifiers,
    MouseButton,
    MouseButtonEvent,
    MouseMovedEvent,
    ScrollEvent,
};
