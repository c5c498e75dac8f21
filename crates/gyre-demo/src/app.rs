use anyhow::Result;
use glam::Mat4;
use gyre_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use gyre_engine::input::{Event, Key, KeyState};
use gyre_engine::render::{Camera, PrimitiveRenderer};
use gyre_engine::scene::DrawList;
use gyre_engine::time::FpsCounter;

use crate::scene::SpinScene;
use crate::session::SessionState;

/// The demo application: session state, a camera, the spinning scene and
/// the renderer that puts it on screen.
pub struct DemoApp {
    session: SessionState,
    camera: Camera,
    scene: SpinScene,
    renderer: PrimitiveRenderer,
    fps: FpsCounter,
}

impl DemoApp {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            session: SessionState::default(),
            camera: Camera::new(width, height),
            scene: SpinScene::new(),
            renderer: PrimitiveRenderer::new(),
            fps: FpsCounter::new(),
        }
    }

    fn control(&self) -> AppControl {
        if self.session.quit {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    /// One frame of application work, with the GPU submission injected.
    ///
    /// A quit or an unfocused window stops all frame work here, including
    /// the frame counter and the rotation steps. A render failure aborts
    /// the frame before either.
    fn step_frame<F>(&mut self, render: F) -> Result<AppControl>
    where
        F: FnOnce(&mut PrimitiveRenderer, Mat4, &DrawList) -> Result<()>,
    {
        if self.session.quit || !self.session.active {
            return Ok(self.control());
        }

        let view_proj = self.camera.view_projection(self.session.eye());
        let list = self.scene.draw_list();
        render(&mut self.renderer, view_proj, &list)?;

        if let Some(report) = self.fps.tick() {
            println!("{report}");
        }
        self.scene.advance();

        Ok(self.control())
    }
}

impl App for DemoApp {
    fn on_event(&mut self, window: &WindowCtx<'_>, event: &Event) -> AppControl {
        match event {
            Event::Key {
                key: Key::F1,
                state: KeyState::Pressed,
                repeat: false,
            } => window.toggle_fullscreen(),
            Event::Resized { width, height } => self.camera.set_viewport(*width, *height),
            _ => self.session.apply(event),
        }
        self.control()
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl> {
        self.step_frame(|renderer, view_proj, list| {
            ctx.render(wgpu::Color::BLACK, |rctx, target| {
                renderer.render(rctx, target, view_proj, list);
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    fn models(app: &DemoApp) -> Vec<Mat4> {
        app.scene.draw_list().iter().map(|p| p.model()).collect()
    }

    #[test]
    fn an_active_frame_renders_counts_and_advances() {
        let mut app = DemoApp::new(640, 480);
        // Keep the reporting window from closing mid-test.
        app.fps = FpsCounter::with_interval(Duration::from_secs(3600));
        let before = models(&app);

        let mut rendered = false;
        let control = app
            .step_frame(|_, view_proj, list| {
                rendered = true;
                assert_eq!(list.len(), 2);
                assert!(view_proj.to_cols_array().iter().all(|v| v.is_finite()));
                Ok(())
            })
            .unwrap();

        assert_eq!(control, AppControl::Continue);
        assert!(rendered);
        assert_eq!(app.fps.frames(), 1);
        assert_ne!(models(&app), before);
    }

    #[test]
    fn an_unfocused_window_freezes_all_frame_work() {
        let mut app = DemoApp::new(640, 480);
        app.session.apply(&Event::Focused(false));
        let before = models(&app);

        let mut rendered = false;
        let control = app
            .step_frame(|_, _, _| {
                rendered = true;
                Ok(())
            })
            .unwrap();

        assert_eq!(control, AppControl::Continue);
        assert!(!rendered);
        assert_eq!(app.fps.frames(), 0);
        assert_eq!(models(&app), before);
    }

    #[test]
    fn quit_stops_frames_before_any_work() {
        let mut app = DemoApp::new(640, 480);
        app.session.apply(&Event::CloseRequested);
        let before = models(&app);

        let mut rendered = false;
        let control = app
            .step_frame(|_, _, _| {
                rendered = true;
                Ok(())
            })
            .unwrap();

        assert_eq!(control, AppControl::Exit);
        assert!(!rendered);
        assert_eq!(app.fps.frames(), 0);
        assert_eq!(models(&app), before);
    }

    #[test]
    fn refocusing_resumes_frame_work() {
        let mut app = DemoApp::new(640, 480);
        app.fps = FpsCounter::with_interval(Duration::from_secs(3600));
        app.session.apply(&Event::Focused(false));
        app.step_frame(|_, _, _| Ok(())).unwrap();
        assert_eq!(app.fps.frames(), 0);

        app.session.apply(&Event::Focused(true));
        app.step_frame(|_, _, _| Ok(())).unwrap();
        assert_eq!(app.fps.frames(), 1);
    }

    #[test]
    fn a_failed_render_aborts_the_frame_without_bookkeeping() {
        let mut app = DemoApp::new(640, 480);
        let before = models(&app);

        let err = app
            .step_frame(|_, _, _| Err(anyhow::anyhow!("surface died")))
            .unwrap_err();

        assert!(err.to_string().contains("surface died"));
        assert_eq!(app.fps.frames(), 0);
        assert_eq!(models(&app), before);
    }
}
