//! Time subsystem.
//!
//! Frame accounting utilities without coupling to the runtime. Intended
//! usage:
//! - one `FpsCounter` per render loop
//! - call `tick()` once per presented frame; print the report when one comes
//!   back

mod fps;

pub use fps::{FpsCounter, FpsReport};
