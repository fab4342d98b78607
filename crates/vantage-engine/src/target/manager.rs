use crate::config::MsaaConfig;
use crate::error::{BackendError, ConfigError, TargetError};

use super::backend::{
    AttachmentFormat,
    FramebufferId,
    FramebufferStatus,
    RenderBackend,
    RenderbufferId,
};

/// Lifecycle phase: `Uninitialized → Created → (Destroyed → Created)* → Destroyed`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetPhase {
    Uninitialized,
    Created,
    Destroyed,
}

/// Handles of one live offscreen target.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderTarget {
    pub color: RenderbufferId,
    pub depth: RenderbufferId,
    pub framebuffer: FramebufferId,
    pub sample_count: u32,
    pub width: u32,
    pub height: u32,
}

impl RenderTarget {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Picks the sample count for the offscreen target.
///
/// Returns `None` when multisampling is disabled by configuration or the
/// backend cannot do better than one sample.
pub fn choose_sample_count(backend_max: u32, msaa: &MsaaConfig) -> Result<Option<u32>, ConfigError> {
    if !msaa.enabled {
        return Ok(None);
    }

    let ceiling = msaa.max_samples;
    if !ceiling.is_power_of_two() || ceiling > 16 {
        return Err(ConfigError::UnsupportedSampleCount(ceiling));
    }

    let limit = backend_max.min(ceiling).max(1);
    // Largest power of two not above `limit`.
    let count = 1 << (u32::BITS - 1 - limit.leading_zeros());

    Ok((count > 1).then_some(count))
}

/// Sole owner of the offscreen target and the backend that backs it.
///
/// With multisampling off, `create`, `resize` and `resolve` are no-ops and
/// drawing goes straight to the visible surface.
pub struct RenderTargetManager<B: RenderBackend> {
    backend: B,
    sample_count: Option<u32>,
    phase: TargetPhase,
    target: Option<RenderTarget>,
}

impl<B: RenderBackend> RenderTargetManager<B> {
    /// Queries the backend's sample limit once and clamps it to `msaa`.
    pub fn new(backend: B, msaa: &MsaaConfig) -> Result<Self, ConfigError> {
        let sample_count = choose_sample_count(backend.max_samples(), msaa)?;

        match sample_count {
            Some(n) => log::info!("using {n}x multisampling"),
            None => log::info!("multisampling disabled; drawing to the surface directly"),
        }

        Ok(Self {
            backend,
            sample_count,
            phase: TargetPhase::Uninitialized,
            target: None,
        })
    }

    pub fn phase(&self) -> TargetPhase {
        self.phase
    }

    pub fn target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    pub fn sample_count(&self) -> Option<u32> {
        self.sample_count
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Allocates the target at `width`x`height`.
    ///
    /// Valid from `Uninitialized` or `Destroyed`. A backend failure releases
    /// everything allocated so far and leaves the phase unchanged.
    pub fn create(&mut self, width: u32, height: u32) -> Result<(), TargetError> {
        let Some(samples) = self.sample_count else {
            return Ok(());
        };

        if self.phase == TargetPhase::Created {
            return Err(TargetError::InvalidState {
                op: "create",
                phase: self.phase,
            });
        }

        let target = self.allocate(samples, width, height)?;
        log::debug!(
            "render target created: {}x{} @ {}x (fbo {:?})",
            width,
            height,
            samples,
            target.framebuffer
        );

        self.target = Some(target);
        self.phase = TargetPhase::Created;
        Ok(())
    }

    /// Releases all three handles. No-op unless a target is live.
    pub fn destroy(&mut self) {
        let Some(target) = self.target.take() else {
            return;
        };

        self.backend.delete_framebuffer(target.framebuffer);
        self.backend.delete_renderbuffer(target.depth);
        self.backend.delete_renderbuffer(target.color);
        self.phase = TargetPhase::Destroyed;

        log::debug!("render target destroyed (fbo {:?})", target.framebuffer);
    }

    /// Destroys the current target, then creates one at the new size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), TargetError> {
        if self.sample_count.is_none() {
            return Ok(());
        }

        self.destroy();
        self.create(width, height)
    }

    /// Routes subsequent draws to the target, or to the surface when there is none.
    pub fn bind(&mut self) {
        let fbo = self.target.as_ref().map(|t| t.framebuffer);
        self.backend.bind_framebuffer(fbo);
    }

    /// Resolves the multisampled contents into the visible surface.
    ///
    /// `source_size` must equal the live target's size.
    pub fn resolve(&mut self, source_size: (u32, u32)) -> Result<(), TargetError> {
        if self.sample_count.is_none() {
            return Ok(());
        }

        let Some(target) = self.target.as_ref() else {
            return Err(TargetError::InvalidState {
                op: "resolve",
                phase: self.phase,
            });
        };

        if target.size() != source_size {
            return Err(TargetError::SizeMismatch {
                source_size,
                target_size: target.size(),
            });
        }

        self.backend
            .blit_to_surface(target.framebuffer, target.width, target.height)?;
        Ok(())
    }

    fn allocate(&mut self, samples: u32, width: u32, height: u32) -> Result<RenderTarget, BackendError> {
        let backend = &mut self.backend;

        let color = backend.create_renderbuffer(AttachmentFormat::Color, samples, width, height)?;

        let depth = match backend.create_renderbuffer(AttachmentFormat::DepthStencil, samples, width, height) {
            Ok(id) => id,
            Err(e) => {
                backend.delete_renderbuffer(color);
                return Err(e);
            }
        };

        let framebuffer = match backend.create_framebuffer(color, depth) {
            Ok(id) => id,
            Err(e) => {
                backend.delete_renderbuffer(depth);
                backend.delete_renderbuffer(color);
                return Err(e);
            }
        };

        if let FramebufferStatus::Incomplete(reason) = backend.framebuffer_status(framebuffer) {
            backend.delete_framebuffer(framebuffer);
            backend.delete_renderbuffer(depth);
            backend.delete_renderbuffer(color);
            return Err(BackendError::IncompleteFramebuffer {
                id: framebuffer,
                reason,
            });
        }

        Ok(RenderTarget {
            color,
            depth,
            framebuffer,
            sample_count: samples,
            width,
            height,
        })
    }
}

impl<B: RenderBackend> Drop for RenderTargetManager<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
