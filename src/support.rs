use glam::{Mat4, Vec3};

/// A convex shape the core can query through the support-function contract:
/// given a world-space direction, return the index of the vertex whose local
/// position has the largest dot product with the direction once transformed
/// to world space.
///
/// Implementors only need to expose their vertex list; the core never reads
/// anything else about the shape.
pub trait Shape {
    /// Local-space position of vertex `index`.
    fn vertex(&self, index: usize) -> Vec3;

    /// Number of vertices in the shape. Must be non-zero.
    fn vertex_count(&self) -> usize;

    /// World transform applied to every vertex before the support search.
    fn transform(&self) -> Mat4;

    /// Returns the index of the vertex that maximises `dir.dot(transform * vertex)`.
    ///
    /// `dir` is a world-space direction; it need not be normalized and must
    /// be finite and non-zero. Ties resolve to the smaller index so that
    /// repeated queries in the same direction are reproducible and the GJK
    /// driver's duplicate-support check is reliable.
    fn support(&self, dir: Vec3) -> usize {
        debug_assert!(self.vertex_count() > 0, "shape has no vertices");
        debug_assert!(dir.is_finite() && dir != Vec3::ZERO, "non-finite direction");

        let transform = self.transform();
        let mut best_index = 0;
        let mut best_dot = f32::NEG_INFINITY;
        for i in 0..self.vertex_count() {
            let world = transform.transform_point3(self.vertex(i));
            let dot = dir.dot(world);
            if dot > best_dot {
                best_dot = dot;
                best_index = i;
            }
        }
        best_index
    }

    /// World-space position of vertex `index`.
    fn world_vertex(&self, index: usize) -> Vec3 {
        self.transform().transform_point3(self.vertex(index))
    }
}

/// A point on the boundary of the Minkowski difference `A ⊖ B`, carrying the
/// pair of supports that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPoint {
    pub index_a: usize,
    pub index_b: usize,
    pub world_a: Vec3,
    pub world_b: Vec3,
    /// `world_a - world_b`.
    pub point: Vec3,
    /// Unnormalised barycentric weight; only meaningful after a sub-simplex
    /// solver has run.
    pub weight: f32,
}

impl SupportPoint {
    fn new(index_a: usize, world_a: Vec3, index_b: usize, world_b: Vec3) -> Self {
        Self {
            index_a,
            index_b,
            world_a,
            world_b,
            point: world_a - world_b,
            weight: 0.0,
        }
    }

    /// Two support points are the same simplex vertex iff they came from the
    /// same pair of indices — position equality is deliberately not used
    /// here: floating point equality on world-space positions is fragile,
    /// the index pair is cheap and robust.
    pub fn same_support_pair(&self, other: &Self) -> bool {
        self.index_a == other.index_a && self.index_b == other.index_b
    }
}

/// Pairs two `Shape` support queries into one vertex of the Minkowski
/// difference.
pub fn minkowski_support(a: &impl Shape, b: &impl Shape, dir: Vec3) -> SupportPoint {
    let index_a = a.support(dir);
    let index_b = b.support(-dir);
    let world_a = a.world_vertex(index_a);
    let world_b = b.world_vertex(index_b);
    SupportPoint::new(index_a, world_a, index_b, world_b)
}
