/// Key identity, reduced to the bindings this engine's applications use.
///
/// Every key without a named variant collapses to [`Key::Other`]; the
/// dispatcher treats those uniformly as "no binding".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    F1,
    W,
    S,
    Other,
}

/// Pressed/released edge of a key event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic events delivered to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Keyboard edge. `repeat` marks OS auto-repeat of a held key.
    Key {
        key: Key,
        state: KeyState,
        repeat: bool,
    },

    /// Relative pointer motion in device units, independent of any cursor
    /// position or window edge.
    PointerDelta { dx: f64, dy: f64 },

    /// Keyboard focus gained (`true`) or lost (`false`).
    Focused(bool),

    /// New drawable size in physical pixels. The runtime reconfigures the
    /// surface for the same platform event; both land before the next frame.
    Resized { width: u32, height: u32 },

    /// The user asked the window to close.
    CloseRequested,
}
