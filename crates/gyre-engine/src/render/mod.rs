//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw lists and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipeline, buffers, depth target).
//!
//! Convention:
//! - CPU geometry is in world units, +Y up, right-handed.
//! - The vertex shader applies model then view-projection, straight to clip
//!   space (wgpu 0..1 depth).

mod camera;
mod ctx;
mod primitives;

pub use camera::Camera;
pub use ctx::{RenderCtx, RenderTarget};
pub use primitives::PrimitiveRenderer;
