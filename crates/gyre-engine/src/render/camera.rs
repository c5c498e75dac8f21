use glam::{Mat4, Vec3};

/// Perspective camera with a guarded aspect ratio.
///
/// Projection parameters are fixed at construction; the viewport follows the
/// window through [`Camera::set_viewport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,

    width: f32,
    height: f32,
}

impl Camera {
    /// Camera with the classic demo projection: 45 degree field of view,
    /// near 0.1, far 100.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
            width: 1.0,
            height: 1.0,
        };
        camera.set_viewport(width, height);
        camera
    }

    /// Records the drawable size used for the aspect ratio.
    ///
    /// A zero height is recorded as 1 so the ratio stays defined while the
    /// window is collapsed.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let height = if height == 0 { 1 } else { height };
        self.width = width as f32;
        self.height = height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Projection matrix (wgpu clip space, 0..1 depth).
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    /// Combined view-projection for a camera at `eye` looking at the origin,
    /// +Y up.
    pub fn view_projection(&self, eye: Vec3) -> Mat4 {
        self.projection() * Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finite(m: Mat4) -> bool {
        m.to_cols_array().iter().all(|v| v.is_finite())
    }

    #[test]
    fn aspect_follows_viewport() {
        let mut camera = Camera::new(640, 480);
        assert!((camera.aspect() - 640.0 / 480.0).abs() < 1e-6);

        camera.set_viewport(800, 600);
        assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_falls_back_to_one() {
        let mut camera = Camera::new(640, 480);
        camera.set_viewport(640, 0);
        assert!((camera.aspect() - 640.0).abs() < 1e-6);
        assert!(finite(camera.projection()));
    }

    #[test]
    fn view_projection_is_finite() {
        let camera = Camera::new(640, 480);
        assert!(finite(camera.view_projection(Vec3::new(0.0, 0.0, -20.0))));
    }

    #[test]
    fn view_projection_tracks_the_eye() {
        let camera = Camera::new(640, 480);
        let centered = camera.view_projection(Vec3::new(0.0, 0.0, -20.0));
        let offset = camera.view_projection(Vec3::new(5.1, 0.0, -20.0));
        assert_ne!(centered, offset);
    }
}
