//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//!
//! Bring-up failures surface as typed [`InitError`] values so the runtime can
//! route them through its single shutdown path.

mod error;
mod gpu;

pub use error::InitError;
pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
