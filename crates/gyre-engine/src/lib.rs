//! Gyre engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo binary:
//! windowing, device bring-up, input translation, scene/primitive rendering
//! and frame accounting.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
pub mod scene;
