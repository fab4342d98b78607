//! Typed failures surfaced by the engine core.
//!
//! Configuration errors are rejected at the call that would apply them and leave
//! the previous state in place. Backend errors are never retried.

use thiserror::Error;

use crate::target::{FramebufferId, RenderbufferId, TargetPhase};

/// Rejected projector update.
#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error("invalid buffer dimension {width}x{height}")]
    InvalidDimension { width: f32, height: f32 },
}

/// Invalid runtime configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid virtual resolution {width}x{height}")]
    InvalidVirtualSize { width: f32, height: f32 },

    #[error("unsupported multisample ceiling {0} (expected a power of two in 1..=16)")]
    UnsupportedSampleCount(u32),

    #[error("initial window size must be non-zero")]
    ZeroWindowSize,
}

/// Failure reported by the graphics backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("framebuffer {id:?} is incomplete: {reason}")]
    IncompleteFramebuffer { id: FramebufferId, reason: String },

    #[error("allocation failed: {0}")]
    Allocation(String),

    #[error("unknown renderbuffer {0:?}")]
    UnknownRenderbuffer(RenderbufferId),

    #[error("unknown framebuffer {0:?}")]
    UnknownFramebuffer(FramebufferId),

    #[error("no frame is in flight")]
    NoActiveFrame,

    #[error("surface failure: {0}")]
    Surface(String),
}

/// Failure of a render target lifecycle operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TargetError {
    #[error("`{op}` is not valid while the render target is {phase:?}")]
    InvalidState { op: &'static str, phase: TargetPhase },

    #[error("resolve source {source_size:?} does not match target {target_size:?}")]
    SizeMismatch {
        source_size: (u32, u32),
        target_size: (u32, u32),
    },

    #[error(transparent)]
    Backend(#[from] BackendError),
}
