//! Input vocabulary.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into [`Event`]s before application
//! code sees them.

mod types;

pub use types::{Event, Key, KeyState};
