use glam::{Mat4, Vec3};

use crate::support::Shape;

/// A convex shape given as a literal list of local-space vertices — no
/// analytic support function, just a point cloud and a transform.
#[derive(Debug, Clone)]
pub struct VertexCloud {
    vertices: Vec<Vec3>,
    transform: Mat4,
}

impl VertexCloud {
    pub fn new(vertices: Vec<Vec3>, transform: Mat4) -> Self {
        assert!(!vertices.is_empty(), "VertexCloud needs at least one vertex");
        Self { vertices, transform }
    }

    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }
}

impl Shape for VertexCloud {
    fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn transform(&self) -> Mat4 {
        self.transform
    }
}

/// An axis-aligned box with the given half-extents, centered on the origin
/// in local space.
pub fn cuboid(half_extents: Vec3, transform: Mat4) -> VertexCloud {
    let Vec3 { x, y, z } = half_extents;
    let vertices = vec![
        Vec3::new(-x, -y, -z),
        Vec3::new(x, -y, -z),
        Vec3::new(x, y, -z),
        Vec3::new(-x, y, -z),
        Vec3::new(-x, -y, z),
        Vec3::new(x, -y, z),
        Vec3::new(x, y, z),
        Vec3::new(-x, y, z),
    ];
    VertexCloud::new(vertices, transform)
}

/// A regular icosahedron scaled to `radius`, used as a cheap sphere
/// approximation — the support oracle is exact on its 12 vertices, not on
/// the curved surface between them.
pub fn icosphere(radius: f32, transform: Mat4) -> VertexCloud {
    let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
    let raw = [
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(-phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, 1.0),
    ];
    let scale = radius / raw[0].length();
    let vertices = raw.into_iter().map(|v| v * scale).collect();
    VertexCloud::new(vertices, transform)
}
