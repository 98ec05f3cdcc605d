use glam::Vec3;

/// A single witness-point contact on an overlapping pair. Does not carry a
/// persistent, impulse-resolution contact manifold — just the geometric
/// result of one `detect` call.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub point_a: Vec3,
    pub point_b: Vec3,
    /// Points from B towards A.
    pub normal: Vec3,
    pub depth: f32,
}

/// Outcome of a full `detect` call.
#[derive(Debug, Clone, Copy)]
pub enum DetectResult {
    /// The shapes do not overlap. `distance` is the separation between the
    /// two witness points.
    Disjoint {
        distance: f32,
        point_a: Vec3,
        point_b: Vec3,
    },
    Overlap(Contact),
    /// GJK or EPA hit a degenerate configuration (coincident vertices,
    /// collinear/coplanar simplex) or an iteration cap with no conclusive
    /// result.
    Degenerate,
}
