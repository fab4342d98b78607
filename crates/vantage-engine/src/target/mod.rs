//! Offscreen multisampled render target.
//!
//! `RenderBackend` is the seam to the graphics API: it hands out opaque
//! renderbuffer/framebuffer handles and performs the per-frame operations.
//! `RenderTargetManager` is the single owner of those handles and keeps the
//! target in lock-step with the output buffer size.

mod backend;
mod manager;

pub use backend::{
    AttachmentFormat,
    FrameStatus,
    FramebufferId,
    FramebufferStatus,
    RenderBackend,
    RenderbufferId,
};
pub use manager::{RenderTarget, RenderTargetManager, TargetPhase, choose_sample_count};
