use glam::Vec3;
use gyre_engine::input::{Event, Key, KeyState};

/// Depth of the camera eye behind the scene origin.
const EYE_Z: f32 = -20.0;

/// Divisor applied to raw pointer deltas before they move the view.
const POINTER_SCALE: f32 = 10.0;

/// Scalar session/view state driven by input events.
///
/// `quit` is one-way: once set, nothing clears it and the runtime unwinds.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Horizontal view offset, world units.
    pub offset_x: f32,
    /// Vertical view offset, world units.
    pub offset_y: f32,
    /// The window has focus; frame work pauses while false.
    pub active: bool,
    /// Shutdown requested.
    pub quit: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            active: true,
            quit: false,
        }
    }
}

impl SessionState {
    /// Applies one event to the session.
    ///
    /// Key bindings keep the demo's historical behavior: `W` snaps the
    /// horizontal offset to 0.1 absolute, `S` subtracts 0.1 per press. Held
    /// keys do not auto-repeat into extra steps.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Focused(gained) => self.active = *gained,

            Event::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
            } => match key {
                Key::Escape => self.quit = true,
                Key::W => self.offset_x = 0.1,
                Key::S => self.offset_x -= 0.1,
                _ => {}
            },

            Event::PointerDelta { dx, dy } => {
                self.offset_x += *dx as f32 / POINTER_SCALE;
                self.offset_y += *dy as f32 / POINTER_SCALE;
            }

            Event::CloseRequested => self.quit = true,

            _ => {}
        }
    }

    /// Camera eye position for the look-at view.
    pub fn eye(&self) -> Vec3 {
        Vec3::new(self.offset_x, self.offset_y, EYE_Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: Key) -> Event {
        Event::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
        }
    }

    fn release(key: Key) -> Event {
        Event::Key {
            key,
            state: KeyState::Released,
            repeat: false,
        }
    }

    #[test]
    fn starts_active_with_centered_view() {
        let s = SessionState::default();
        assert_eq!(s.offset_x, 0.0);
        assert_eq!(s.offset_y, 0.0);
        assert!(s.active);
        assert!(!s.quit);
    }

    // ── keyboard ────────────────────────────────────────────────────────

    #[test]
    fn w_snaps_the_offset_to_a_tenth() {
        let mut s = SessionState::default();
        s.apply(&Event::PointerDelta { dx: 50.0, dy: 0.0 });
        assert!((s.offset_x - 5.0).abs() < 1e-6);

        s.apply(&press(Key::W));
        assert!((s.offset_x - 0.1).abs() < 1e-6);

        // Absolute, not additive: a second press changes nothing.
        s.apply(&press(Key::W));
        assert!((s.offset_x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn s_steps_the_offset_down_per_press() {
        let mut s = SessionState::default();
        s.apply(&press(Key::S));
        s.apply(&press(Key::S));
        s.apply(&press(Key::S));
        assert!((s.offset_x + 0.3).abs() < 1e-6);
    }

    #[test]
    fn w_then_pointer_sweep_lands_at_five_point_one() {
        let mut s = SessionState::default();
        s.apply(&press(Key::W));
        s.apply(&Event::PointerDelta { dx: 50.0, dy: 0.0 });
        assert!((s.offset_x - 5.1).abs() < 1e-6);
    }

    #[test]
    fn escape_requests_quit() {
        let mut s = SessionState::default();
        s.apply(&press(Key::Escape));
        assert!(s.quit);
    }

    #[test]
    fn releases_and_repeats_do_nothing() {
        let mut s = SessionState::default();
        s.apply(&release(Key::S));
        s.apply(&release(Key::Escape));
        s.apply(&Event::Key {
            key: Key::S,
            state: KeyState::Pressed,
            repeat: true,
        });
        assert_eq!(s.offset_x, 0.0);
        assert!(!s.quit);
    }

    #[test]
    fn unbound_keys_have_no_effect() {
        let mut s = SessionState::default();
        s.apply(&press(Key::Other));
        assert_eq!(s, SessionState::default());
    }

    // ── pointer ─────────────────────────────────────────────────────────

    #[test]
    fn pointer_deltas_accumulate_scaled() {
        let mut s = SessionState::default();
        s.apply(&Event::PointerDelta { dx: 3.0, dy: -7.0 });
        s.apply(&Event::PointerDelta { dx: 2.0, dy: 2.0 });
        assert!((s.offset_x - 0.5).abs() < 1e-6);
        assert!((s.offset_y + 0.5).abs() < 1e-6);
    }

    #[test]
    fn eye_tracks_offsets_at_fixed_depth() {
        let mut s = SessionState::default();
        s.apply(&Event::PointerDelta { dx: 10.0, dy: 20.0 });
        assert_eq!(s.eye(), Vec3::new(1.0, 2.0, -20.0));
    }

    // ── lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn focus_toggles_active() {
        let mut s = SessionState::default();
        s.apply(&Event::Focused(false));
        assert!(!s.active);
        s.apply(&Event::Focused(true));
        assert!(s.active);
    }

    #[test]
    fn close_request_quits() {
        let mut s = SessionState::default();
        s.apply(&Event::CloseRequested);
        assert!(s.quit);
    }

    #[test]
    fn quit_is_one_way() {
        let mut s = SessionState::default();
        s.apply(&Event::CloseRequested);
        s.apply(&Event::Focused(true));
        s.apply(&press(Key::W));
        s.apply(&Event::PointerDelta { dx: 1.0, dy: 1.0 });
        assert!(s.quit);
    }
}
