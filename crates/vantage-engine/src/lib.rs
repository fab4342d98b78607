//! Vantage engine crate.
//!
//! Render loop core for a single window: input events are queued from window
//! callbacks and flushed once per frame, a letterbox projection maps between
//! screen, normalized and virtual space, and a multisampled offscreen target
//! follows the output size and is resolved into the surface every frame.

pub mod config;
pub mod coords;
pub mod core;
pub mod device;
pub mod error;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod target;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;

pub use config::{MsaaConfig, RuntimeConfig};
pub use error::{BackendError, ConfigError, TargetError, ViewError};
