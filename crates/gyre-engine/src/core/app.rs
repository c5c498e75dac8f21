use anyhow::Result;

use crate::input::Event;

use super::ctx::{FrameCtx, WindowCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the binary crate.
pub trait App {
    /// Called for every translated input/window event.
    ///
    /// Return [`AppControl::Exit`] to shut the runtime down; the loop unwinds
    /// through its single exit path and `Runtime::run` returns `Ok`. The
    /// runtime forwards close requests here as [`Event::CloseRequested`]
    /// rather than acting on them itself.
    fn on_event(&mut self, window: &WindowCtx<'_>, event: &Event) -> AppControl {
        let _ = (window, event);
        AppControl::Continue
    }

    /// Called once per rendered frame.
    ///
    /// An `Err` is fatal: the runtime records it, exits the loop and
    /// `Runtime::run` hands it to the caller.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
