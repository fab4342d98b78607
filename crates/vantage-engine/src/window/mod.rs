//! Window + frame loop.
//!
//! `WindowBackend` is the windowing-system seam; `WinitWindow` implements it
//! by pumping a winit event loop. `FrameLoop` drives one frame per iteration
//! and is the only writer of `WindowRuntimeState`.

mod backend;
mod runtime;
mod state;
mod winit;

pub use backend::{WindowBackend, WindowCallbacks};
pub use runtime::{FrameLoop, Runtime};
pub use state::{PendingResize, ResizeSource, WindowRuntimeState};
pub use winit::WinitWindow;
