//! CPU-side scene description.
//!
//! A frame is described as a [`DrawList`] of [`Primitive`]s: short runs of
//! pre-triangulated colored vertices, each with its own model matrix.
//! Renderers consume the list in submission order.

use glam::{Mat4, Vec3};

/// One colored vertex of a primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3, color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

/// A run of triangles sharing one model matrix.
///
/// Vertices are stored already triangulated; the count is always a multiple
/// of three.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    vertices: Vec<Vertex>,
    model: Mat4,
}

impl Primitive {
    /// A single triangle, vertices kept in submission order.
    pub fn triangle(vertices: [Vertex; 3], model: Mat4) -> Self {
        Self {
            vertices: vertices.to_vec(),
            model,
        }
    }

    /// A convex quad from four corners in winding order, fanned into the two
    /// triangles (0,1,2) and (0,2,3).
    pub fn quad(corners: [Vertex; 4], model: Mat4) -> Self {
        let [a, b, c, d] = corners;
        Self {
            vertices: vec![a, b, c, a, c, d],
            model,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }
}

/// Ordered list of primitives for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    primitives: Vec<Primitive>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Total vertex count across all primitives.
    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), [1.0, 1.0, 1.0])
    }

    #[test]
    fn triangle_keeps_vertex_order() {
        let prim = Primitive::triangle(
            [v(0.0, 1.0, 0.0), v(-1.0, -1.0, 0.0), v(1.0, -1.0, 0.0)],
            Mat4::IDENTITY,
        );
        assert_eq!(prim.vertices().len(), 3);
        assert_eq!(prim.vertices()[0].position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(prim.vertices()[2].position, Vec3::new(1.0, -1.0, 0.0));
    }

    #[test]
    fn quad_fans_into_two_triangles() {
        let corners = [
            v(1.0, 1.0, 0.0),
            v(-1.0, 1.0, 0.0),
            v(-1.0, -1.0, 0.0),
            v(1.0, -1.0, 0.0),
        ];
        let prim = Primitive::quad(corners, Mat4::IDENTITY);

        assert_eq!(prim.vertices().len(), 6);
        // Corners 0 and 2 sit on the shared diagonal and appear twice.
        assert_eq!(prim.vertices()[0], prim.vertices()[3]);
        assert_eq!(prim.vertices()[2], prim.vertices()[4]);
        assert_eq!(prim.vertices()[5], corners[3]);
    }

    #[test]
    fn draw_list_counts_primitives_and_vertices() {
        let mut list = DrawList::new();
        assert!(list.is_empty());

        list.push(Primitive::triangle(
            [v(0.0, 1.0, 0.0), v(-1.0, -1.0, 0.0), v(1.0, -1.0, 0.0)],
            Mat4::IDENTITY,
        ));
        list.push(Primitive::quad(
            [
                v(1.0, 1.0, 0.0),
                v(-1.0, 1.0, 0.0),
                v(-1.0, -1.0, 0.0),
                v(1.0, -1.0, 0.0),
            ],
            Mat4::IDENTITY,
        ));

        assert_eq!(list.len(), 2);
        assert_eq!(list.vertex_count(), 9);
    }
}
