use std::collections::HashMap;

use crate::error::BackendError;
use crate::render::{DrawList, PassTarget, TriangleRenderer};
use crate::target::{
    AttachmentFormat,
    FrameStatus,
    FramebufferId,
    FramebufferStatus,
    RenderBackend,
    RenderbufferId,
};

use super::{Gpu, GpuFrame, SurfaceErrorAction};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

struct Renderbuffer {
    format: AttachmentFormat,
    samples: u32,
    size: (u32, u32),
    // Keeps the allocation alive; destroyed explicitly on delete.
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

#[derive(Copy, Clone)]
struct Framebuffer {
    color: RenderbufferId,
    depth: RenderbufferId,
}

/// [`RenderBackend`] over wgpu.
///
/// Renderbuffers are render-attachment textures; a framebuffer pairs a color
/// and a depth-stencil renderbuffer. Resolving uses a load/discard render pass
/// whose resolve target is the surface view.
pub struct WgpuBackend {
    gpu: Gpu,
    renderer: TriangleRenderer,

    renderbuffers: HashMap<RenderbufferId, Renderbuffer>,
    framebuffers: HashMap<FramebufferId, Framebuffer>,
    next_id: u32,

    frame: Option<GpuFrame>,
    bound: Option<FramebufferId>,
}

impl WgpuBackend {
    pub fn new(gpu: Gpu) -> Self {
        Self {
            gpu,
            renderer: TriangleRenderer::new(),
            renderbuffers: HashMap::new(),
            framebuffers: HashMap::new(),
            next_id: 1,
            frame: None,
            bound: None,
        }
    }

    pub fn gpu(&self) -> &Gpu {
        &self.gpu
    }

    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    fn texture_format(&self, format: AttachmentFormat) -> wgpu::TextureFormat {
        match format {
            AttachmentFormat::Color => self.gpu.surface_format(),
            AttachmentFormat::DepthStencil => DEPTH_FORMAT,
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn max_samples(&self) -> u32 {
        self.gpu
            .max_sample_count(&[self.gpu.surface_format(), DEPTH_FORMAT])
    }

    fn configure_surface(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn create_renderbuffer(
        &mut self,
        format: AttachmentFormat,
        samples: u32,
        width: u32,
        height: u32,
    ) -> Result<RenderbufferId, BackendError> {
        let max_dim = self.gpu.device().limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max_dim || height > max_dim {
            return Err(BackendError::Allocation(format!(
                "renderbuffer size {width}x{height} outside 1..={max_dim}"
            )));
        }

        let texture = self.gpu.device().create_texture(&wgpu::TextureDescriptor {
            label: Some("vantage renderbuffer"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: samples,
            dimension: wgpu::TextureDimension::D2,
            format: self.texture_format(format),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let id = RenderbufferId(self.next_id());
        self.renderbuffers.insert(
            id,
            Renderbuffer {
                format,
                samples,
                size: (width, height),
                texture,
                view,
            },
        );
        Ok(id)
    }

    fn delete_renderbuffer(&mut self, id: RenderbufferId) {
        match self.renderbuffers.remove(&id) {
            Some(rb) => rb.texture.destroy(),
            None => log::warn!("delete of unknown renderbuffer {id:?}"),
        }
    }

    fn create_framebuffer(
        &mut self,
        color: RenderbufferId,
        depth: RenderbufferId,
    ) -> Result<FramebufferId, BackendError> {
        for rb in [color, depth] {
            if !self.renderbuffers.contains_key(&rb) {
                return Err(BackendError::UnknownRenderbuffer(rb));
            }
        }

        let id = FramebufferId(self.next_id());
        self.framebuffers.insert(id, Framebuffer { color, depth });
        Ok(id)
    }

    fn framebuffer_status(&self, id: FramebufferId) -> FramebufferStatus {
        let (color, depth) = match attachments(&self.framebuffers, &self.renderbuffers, id) {
            Ok(pair) => pair,
            Err(e) => return FramebufferStatus::Incomplete(e.to_string()),
        };

        if color.format != AttachmentFormat::Color || depth.format != AttachmentFormat::DepthStencil {
            return FramebufferStatus::Incomplete("attachment formats swapped".into());
        }
        if color.size != depth.size {
            return FramebufferStatus::Incomplete(format!(
                "attachment sizes differ: {:?} vs {:?}",
                color.size, depth.size
            ));
        }
        if color.samples != depth.samples {
            return FramebufferStatus::Incomplete(format!(
                "attachment sample counts differ: {} vs {}",
                color.samples, depth.samples
            ));
        }

        FramebufferStatus::Complete
    }

    fn delete_framebuffer(&mut self, id: FramebufferId) {
        if self.framebuffers.remove(&id).is_none() {
            log::warn!("delete of unknown framebuffer {id:?}");
        }
        if self.bound == Some(id) {
            self.bound = None;
        }
    }

    fn begin_frame(&mut self) -> Result<FrameStatus, BackendError> {
        if self.frame.is_some() {
            log::warn!("begin_frame with a frame still in flight; discarding it");
            self.frame = None;
        }

        match self.gpu.begin_frame() {
            Ok(frame) => {
                self.frame = Some(frame);
                Ok(FrameStatus::Ready)
            }
            Err(err) => {
                let msg = err.to_string();
                match self.gpu.handle_surface_error(&err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        log::debug!("surface unavailable ({msg}); skipping frame");
                        Ok(FrameStatus::Skipped)
                    }
                    SurfaceErrorAction::Fatal => Err(BackendError::Surface(msg)),
                }
            }
        }
    }

    fn bind_framebuffer(&mut self, id: Option<FramebufferId>) {
        self.bound = id;
    }

    fn draw(&mut self, list: &DrawList) -> Result<(), BackendError> {
        let format = self.gpu.surface_format();

        let offscreen = match self.bound {
            Some(id) => {
                let (color, depth) = attachments(&self.framebuffers, &self.renderbuffers, id)?;
                Some((&color.view, &depth.view, color.samples))
            }
            None => None,
        };

        let frame = self.frame.as_mut().ok_or(BackendError::NoActiveFrame)?;

        let target = match offscreen {
            Some((color, depth, sample_count)) => PassTarget {
                color,
                depth: Some(depth),
                format,
                sample_count,
            },
            None => PassTarget {
                color: &frame.view,
                depth: None,
                format,
                sample_count: 1,
            },
        };

        self.renderer.render(
            self.gpu.device(),
            self.gpu.queue(),
            &mut frame.encoder,
            &target,
            list,
        );
        Ok(())
    }

    fn blit_to_surface(
        &mut self,
        source: FramebufferId,
        width: u32,
        height: u32,
    ) -> Result<(), BackendError> {
        let (sw, sh) = self.gpu.size();
        if (sw, sh) != (width, height) {
            return Err(BackendError::Surface(format!(
                "resolve of {width}x{height} into a {sw}x{sh} surface"
            )));
        }

        let (color, _) = attachments(&self.framebuffers, &self.renderbuffers, source)?;
        let frame = self.frame.as_mut().ok_or(BackendError::NoActiveFrame)?;

        let _ = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vantage resolve pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &color.view,
                resolve_target: Some(&frame.view),
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Discard,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        Ok(())
    }

    fn present(&mut self) -> Result<(), BackendError> {
        let frame = self.frame.take().ok_or(BackendError::NoActiveFrame)?;
        self.gpu.submit(frame);
        Ok(())
    }
}

/// Looks up both attachments of `id`.
fn attachments<'a>(
    framebuffers: &HashMap<FramebufferId, Framebuffer>,
    renderbuffers: &'a HashMap<RenderbufferId, Renderbuffer>,
    id: FramebufferId,
) -> Result<(&'a Renderbuffer, &'a Renderbuffer), BackendError> {
    let fb = framebuffers
        .get(&id)
        .ok_or(BackendError::UnknownFramebuffer(id))?;
    let color = renderbuffers
        .get(&fb.color)
        .ok_or(BackendError::UnknownRenderbuffer(fb.color))?;
    let depth = renderbuffers
        .get(&fb.depth)
        .ok_or(BackendError::UnknownRenderbuffer(fb.depth))?;
    Ok((color, depth))
}

impl Drop for WgpuBackend {
    fn drop(&mut self) {
        // Frame first; its texture belongs to the surface.
        self.frame = None;
        for (_, rb) in self.renderbuffers.drain() {
            rb.texture.destroy();
        }
    }
}
