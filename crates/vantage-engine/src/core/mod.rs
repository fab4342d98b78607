//! Core engine-facing contracts.
//!
//! This module defines the interface between the frame loop and application
//! code: input through `InputSink`, drawing through a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
