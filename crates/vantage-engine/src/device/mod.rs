//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - implementing [`RenderBackend`](crate::target::RenderBackend) on top of it

mod backend;
mod gpu;
mod init;
mod surface;

pub use backend::WgpuBackend;
pub use gpu::Gpu;
pub use init::GpuInit;
pub use surface::{GpuFrame, SurfaceErrorAction};
