use glam::Vec3;

use crate::epa::{Face, Polytope};
use crate::simplex::Simplex;

/// A pair of witness points, one on each shape's boundary, in world space.
#[derive(Debug, Clone, Copy)]
pub struct WitnessPoints {
    pub point_a: Vec3,
    pub point_b: Vec3,
}

/// Reconstructs the witness points from a GJK-solved simplex (count 1-3,
/// never a full tetrahedron — that signals overlap, not separation). Each
/// vertex's weight is divided by the simplex's divisor to get its
/// barycentric coordinate, then applied to both shapes' support positions.
pub fn witness_points(simplex: &Simplex) -> WitnessPoints {
    let divisor = simplex.divisor();
    let t = 1.0 / divisor;

    let mut point_a = Vec3::ZERO;
    let mut point_b = Vec3::ZERO;
    for v in simplex.points() {
        let weight = v.weight * t;
        point_a += v.world_a * weight;
        point_b += v.world_b * weight;
    }

    WitnessPoints { point_a, point_b }
}

fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(v0);
    let d01 = v0.dot(v1);
    let d11 = v1.dot(v1);
    let d20 = v2.dot(v0);
    let d21 = v2.dot(v1);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() <= f32::EPSILON {
        return Vec3::new(1.0, 0.0, 0.0);
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    let u = 1.0 - v - w;
    Vec3::new(u, v, w)
}

/// Reconstructs the contact points from a converged EPA face: the origin's
/// projection onto the face plane is expressed in barycentric coordinates of
/// the face's three (Minkowski-space) vertices, then that same combination
/// is applied to each shape's own support positions.
///
/// Expresses the origin's projection onto the closest EPA face in
/// barycentric coordinates of that face's three vertices, then applies the
/// same combination to each shape's own support positions.
pub fn contact_points(polytope: &Polytope, face: &Face) -> WitnessPoints {
    let [ia, ib, ic] = face.indices;
    let va = &polytope.points[ia];
    let vb = &polytope.points[ib];
    let vc = &polytope.points[ic];

    let projected = face.normal * face.distance;
    let weights = barycentric(projected, va.point, vb.point, vc.point);

    let point_a = va.world_a * weights.x + vb.world_a * weights.y + vc.world_a * weights.z;
    let point_b = va.world_b * weights.x + vb.world_b * weights.y + vc.world_b * weights.z;

    WitnessPoints { point_a, point_b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::SupportPoint;

    fn sp(index: usize, world_a: Vec3, world_b: Vec3) -> SupportPoint {
        SupportPoint {
            index_a: index,
            index_b: index,
            world_a,
            world_b,
            point: world_a - world_b,
            weight: 0.0,
        }
    }

    #[test]
    fn witness_points_is_the_weighted_average_of_world_positions() {
        let mut a = sp(0, Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0));
        let mut b = sp(1, Vec3::new(4.0, 0.0, 0.0), Vec3::new(14.0, 0.0, 0.0));
        a.weight = 1.0;
        b.weight = 3.0;
        let simplex = Simplex::Line {
            verts: [a, b],
            divisor: 4.0,
        };

        let w = witness_points(&simplex);
        assert!((w.point_a - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
        assert!((w.point_b - Vec3::new(13.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn witness_points_on_a_single_point_simplex_returns_that_points_own_positions() {
        let mut a = sp(0, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, -2.0, -3.0));
        a.weight = 1.0;
        let simplex = Simplex::Point([a]);

        let w = witness_points(&simplex);
        assert_eq!(w.point_a, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(w.point_b, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn barycentric_recovers_a_vertex_exactly() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 4.0, 0.0);

        let weights = barycentric(a, a, b, c);
        assert!((weights - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);

        let centroid = (a + b + c) / 3.0;
        let weights = barycentric(centroid, a, b, c);
        assert!((weights - Vec3::splat(1.0 / 3.0)).length() < 1e-4);
    }
}
