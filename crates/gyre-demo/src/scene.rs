use glam::{Mat4, Vec3};
use gyre_engine::scene::{DrawList, Primitive, Vertex};

/// Degrees the triangle turns each frame.
const TRIANGLE_STEP_DEG: f32 = 0.2;
/// Degrees the quad turns each frame; negative spins the other way.
const QUAD_STEP_DEG: f32 = -0.15;

const TRIANGLE_AXIS: Vec3 = Vec3::new(0.0, 1.0, -6.0);
const QUAD_AXIS: Vec3 = Vec3::new(1.0, 0.0, -6.0);

/// The two spinning primitives of the demo scene.
#[derive(Debug, Clone)]
pub struct SpinScene {
    triangle_angle: f32,
    quad_angle: f32,
}

impl SpinScene {
    pub fn new() -> Self {
        Self {
            triangle_angle: 0.0,
            quad_angle: 0.0,
        }
    }

    /// Builds the draw list for the current rotation angles.
    ///
    /// The triangle sits 1.5 units left of the origin with a color per
    /// corner; the quad sits 1.5 units right in a single flat color.
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::new();

        let triangle_model = Mat4::from_translation(Vec3::new(-1.5, 0.0, 0.0))
            * Mat4::from_axis_angle(TRIANGLE_AXIS.normalize(), self.triangle_angle.to_radians());
        list.push(Primitive::triangle(
            [
                Vertex::new(Vec3::new(0.0, 1.0, 0.0), [1.0, 0.0, 0.0]),
                Vertex::new(Vec3::new(-1.0, -1.0, 0.0), [0.0, 1.0, 0.0]),
                Vertex::new(Vec3::new(1.0, -1.0, 0.0), [0.0, 0.0, 1.0]),
            ],
            triangle_model,
        ));

        let quad_model = Mat4::from_translation(Vec3::new(1.5, 0.0, 0.0))
            * Mat4::from_axis_angle(QUAD_AXIS.normalize(), self.quad_angle.to_radians());
        let quad_color = [0.5, 0.5, 1.0];
        list.push(Primitive::quad(
            [
                Vertex::new(Vec3::new(1.0, 1.0, 0.0), quad_color),
                Vertex::new(Vec3::new(-1.0, 1.0, 0.0), quad_color),
                Vertex::new(Vec3::new(-1.0, -1.0, 0.0), quad_color),
                Vertex::new(Vec3::new(1.0, -1.0, 0.0), quad_color),
            ],
            quad_model,
        ));

        list
    }

    /// Steps both rotations by one frame. Angles grow without wrapping.
    pub fn advance(&mut self) {
        self.triangle_angle += TRIANGLE_STEP_DEG;
        self.quad_angle += QUAD_STEP_DEG;
    }
}

impl Default for SpinScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_rotations_in_opposite_directions() {
        let mut scene = SpinScene::new();
        for _ in 0..10 {
            scene.advance();
        }
        assert!((scene.triangle_angle - 2.0).abs() < 1e-5);
        assert!((scene.quad_angle + 1.5).abs() < 1e-5);
    }

    #[test]
    fn angles_are_unbounded() {
        let mut scene = SpinScene::new();
        for _ in 0..3600 {
            scene.advance();
        }
        assert!(scene.triangle_angle > 360.0);
    }

    #[test]
    fn draw_list_carries_both_primitives() {
        let scene = SpinScene::new();
        let list = scene.draw_list();
        assert_eq!(list.len(), 2);
        // Three triangle vertices plus a quad fanned into six.
        assert_eq!(list.vertex_count(), 9);
    }

    #[test]
    fn triangle_corners_carry_distinct_colors() {
        let scene = SpinScene::new();
        let list = scene.draw_list();
        let triangle = list.iter().next().unwrap();
        let colors: Vec<_> = triangle.vertices().iter().map(|v| v.color).collect();
        assert_eq!(colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(colors[1], [0.0, 1.0, 0.0]);
        assert_eq!(colors[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn quad_is_flat_colored() {
        let scene = SpinScene::new();
        let list = scene.draw_list();
        let quad = list.iter().nth(1).unwrap();
        assert!(quad.vertices().iter().all(|v| v.color == [0.5, 0.5, 1.0]));
    }

    #[test]
    fn rotation_changes_the_models() {
        let mut scene = SpinScene::new();
        let before: Vec<_> = scene.draw_list().iter().map(|p| p.model()).collect();
        scene.advance();
        let after: Vec<_> = scene.draw_list().iter().map(|p| p.model()).collect();
        assert_ne!(before[0], after[0]);
        assert_ne!(before[1], after[1]);
    }

    #[test]
    fn primitives_sit_either_side_of_the_origin() {
        let scene = SpinScene::new();
        let models: Vec<_> = scene.draw_list().iter().map(|p| p.model()).collect();
        assert!(models[0].w_axis.x < 0.0);
        assert!(models[1].w_axis.x > 0.0);
    }
}
