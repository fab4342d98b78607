use crate::error::BackendError;
use crate::render::DrawList;

/// Opaque renderbuffer handle. Only meaningful to the backend that issued it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RenderbufferId(pub u32);

/// Opaque framebuffer handle. Only meaningful to the backend that issued it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FramebufferId(pub u32);

/// Storage kind of a renderbuffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AttachmentFormat {
    /// Same format as the visible surface, so it can be resolved into it.
    Color,
    DepthStencil,
}

/// Completeness reported for a framebuffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FramebufferStatus {
    Complete,
    Incomplete(String),
}

/// Outcome of acquiring the visible surface for a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Surface image acquired; draw, resolve and present may follow.
    Ready,
    /// Transient surface condition; nothing is drawn this frame.
    Skipped,
}

/// Graphics backend used by the render loop.
///
/// Errors are configuration or driver failures and are treated as fatal by
/// callers.
pub trait RenderBackend {
    /// Largest sample count usable for both attachment formats.
    fn max_samples(&self) -> u32;

    /// Resizes the visible surface.
    fn configure_surface(&mut self, width: u32, height: u32);

    // ── resources ─────────────────────────────────────────────────────────

    fn create_renderbuffer(
        &mut self,
        format: AttachmentFormat,
        samples: u32,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferId, BackendError>;

    fn delete_renderbuffer(&mut self, id: RenderbufferId);

    /// Binds a color and a depth renderbuffer into a new framebuffer.
    fn create_framebuffer(
        &mut self,
        color: RenderbufferId,
        depth: RenderbufferId,
    ) -> Result<FramebufferId, BackendError>;

    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus;

    fn delete_framebuffer(&mut self, id: FramebufferId);

    // ── per frame ─────────────────────────────────────────────────────────

    /// Acquires the visible surface for drawing.
    fn begin_frame(&mut self) -> Result<FrameStatus, BackendError>;

    /// Selects where `draw` renders; `None` is the visible surface.
    fn bind_framebuffer(&mut self, id: Option<FramebufferId>);

    /// Clears the bound target and renders the list into it.
    fn draw(&mut self, list: &DrawList) -> Result<(), BackendError>;

    /// Resolves `source` into the visible surface at 1:1 pixel mapping.
    fn blit_to_surface(
        &mut self,
        source: FramebufferId,
        width: u32,
        height: u32,
    ) -> Result<(), BackendError>;

    /// Submits the frame and shows it.
    fn present(&mut self) -> Result<(), BackendError>;
}
