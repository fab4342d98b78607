//! Surface configuration and frame acquisition helpers.

/// What the backend does after a failed acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was reconfigured; the next frame may succeed.
    Reconfigured,
    /// Transient; drop this frame and try again next time.
    SkipFrame,
    /// Unrecoverable (out of memory).
    Fatal,
}

/// One acquired swapchain image plus the encoder recording into it.
///
/// Must be presented or dropped before the next acquire.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

const SRGB_FORMATS: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let srgb = SRGB_FORMATS.into_iter().find(|f| formats.contains(f));
    match srgb {
        Some(f) if prefer_srgb => Some(f),
        _ => formats.first().copied(),
    }
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Records `size` and reconfigures unless it is degenerate.
///
/// Returns whether the surface was configured. wgpu rejects zero extents, so a
/// minimized window only updates the recorded size.
pub(crate) fn configure(
    surface: &wgpu::Surface<'_>,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: (u32, u32),
) -> bool {
    let (width, height) = size;
    if width == 0 || height == 0 {
        return false;
    }
    if (config.width, config.height) == size {
        return true;
    }

    config.width = width;
    config.height = height;
    surface.configure(device, config);
    log::debug!("surface configured: {width}x{height}");
    true
}

pub(crate) fn classify_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
