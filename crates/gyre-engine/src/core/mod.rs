//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and the application: the [`App`] trait plus the window and frame
//! contexts handed to its hooks. It avoids leaking runtime internals into
//! user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
