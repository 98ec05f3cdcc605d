use glam::Vec3;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::simplex::Simplex;
use crate::support::SupportPoint;

/// A triangular face of the expanding polytope, oriented with `normal`
/// pointing away from the origin.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub indices: [usize; 3],
    pub normal: Vec3,
    /// Distance from the origin to the face's plane along `normal`.
    pub distance: f32,
}

impl Face {
    fn new(points: &[SupportPoint], indices: [usize; 3]) -> Option<Self> {
        let [ia, ib, ic] = indices;
        let a = points[ia].point;
        let b = points[ib].point;
        let c = points[ic].point;

        let mut normal = (b - a).cross(c - a);
        let len = normal.length();
        if len <= f32::EPSILON || !normal.is_finite() {
            tracing::warn!("EPA face normal degenerate or non-finite");
            return None;
        }
        normal /= len;

        let mut distance = normal.dot(a);
        let mut indices = indices;
        if distance < 0.0 {
            // Outward-facing normal pointed inward; flip winding and normal.
            normal = -normal;
            distance = -distance;
            indices.swap(1, 2);
        }

        Some(Face {
            indices,
            normal,
            distance,
        })
    }
}

/// The expanding polytope itself: the union of the GJK terminal
/// tetrahedron's vertices plus every support point pushed out by
/// `step_expand`, together with its current triangulated boundary.
#[derive(Debug, Clone)]
pub struct Polytope {
    pub points: SmallVec<[SupportPoint; 32]>,
    pub faces: SmallVec<[Face; 32]>,
}

impl Polytope {
    /// Builds the initial polytope from a GJK terminal `Tetrahedron` simplex,
    /// with the fixed seed topology `[0,1,2, 0,3,1, 0,2,3, 1,3,2]`.
    pub fn from_simplex(simplex: &Simplex) -> Option<Self> {
        let points: SmallVec<[SupportPoint; 32]> = simplex.points().iter().copied().collect();
        if points.len() != 4 {
            return None;
        }

        let seed_indices: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];
        let mut faces = SmallVec::new();
        for idx in seed_indices {
            faces.push(Face::new(&points, idx)?);
        }

        Some(Polytope { points, faces })
    }

    pub fn find_closest_face(&self) -> Face {
        *self
            .faces
            .iter()
            .min_by_key(|f| OrderedFloat(f.distance))
            .expect("polytope always has at least one face")
    }

    /// Expands the polytope with a new support point, removing every face
    /// the point can "see" and re-triangulating the resulting horizon: faces
    /// facing the new point are dropped, their edges are tallied, and any
    /// edge seen only once (the horizon) gets a new face connecting it to
    /// the new point.
    pub fn add_point(&mut self, support: SupportPoint) {
        let new_index = self.points.len();
        self.points.push(support);
        let p = support.point;

        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut kept = SmallVec::<[Face; 32]>::new();

        for face in self.faces.drain(..) {
            if face.normal.dot(p) - face.distance > 0.0 {
                let [a, b, c] = face.indices;
                add_or_remove_edge(&mut edges, a, b);
                add_or_remove_edge(&mut edges, b, c);
                add_or_remove_edge(&mut edges, c, a);
            } else {
                kept.push(face);
            }
        }

        self.faces = kept;
        for (a, b) in edges {
            if let Some(face) = Face::new(&self.points, [a, b, new_index]) {
                self.faces.push(face);
            }
        }
    }
}

/// Horizon-edge bookkeeping: an edge shared by two removed faces appears
/// twice (once in each winding direction) and cancels out; an edge on the
/// boundary between a removed and a kept face appears once and survives.
fn add_or_remove_edge(edges: &mut Vec<(usize, usize)>, a: usize, b: usize) {
    if let Some(pos) = edges.iter().position(|&(x, y)| x == b && y == a) {
        edges.swap_remove(pos);
    } else {
        edges.push((a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(index: usize, point: Vec3) -> SupportPoint {
        SupportPoint {
            index_a: index,
            index_b: index,
            world_a: point,
            world_b: Vec3::ZERO,
            point,
            weight: 0.0,
        }
    }

    fn enclosing_tetrahedron() -> Simplex {
        Simplex::Tetrahedron {
            verts: [
                sp(0, Vec3::new(1.0, 1.0, 1.0)),
                sp(1, Vec3::new(1.0, -1.0, -1.0)),
                sp(2, Vec3::new(-1.0, 1.0, -1.0)),
                sp(3, Vec3::new(-1.0, -1.0, 1.0)),
            ],
            divisor: 1.0,
        }
    }

    #[test]
    fn from_simplex_builds_four_outward_facing_faces() {
        let polytope = Polytope::from_simplex(&enclosing_tetrahedron()).unwrap();
        assert_eq!(polytope.points.len(), 4);
        assert_eq!(polytope.faces.len(), 4);
        for face in &polytope.faces {
            assert!(face.distance >= 0.0, "face distance was negative: {face:?}");
        }
    }

    #[test]
    fn from_simplex_rejects_anything_but_a_tetrahedron() {
        let triangle = Simplex::Triangle {
            verts: [
                sp(0, Vec3::new(1.0, 0.0, 0.0)),
                sp(1, Vec3::new(0.0, 1.0, 0.0)),
                sp(2, Vec3::new(0.0, 0.0, 1.0)),
            ],
            divisor: 1.0,
        };
        assert!(Polytope::from_simplex(&triangle).is_none());
    }

    #[test]
    fn find_closest_face_returns_the_minimum_distance_face() {
        let polytope = Polytope::from_simplex(&enclosing_tetrahedron()).unwrap();
        let closest = polytope.find_closest_face();
        for face in &polytope.faces {
            assert!(closest.distance <= face.distance);
        }
    }

    #[test]
    fn add_point_grows_the_polytope_and_keeps_the_horizon_closed() {
        let mut polytope = Polytope::from_simplex(&enclosing_tetrahedron()).unwrap();
        let before_faces = polytope.faces.len();

        // Push a point far outside one of the seed faces; it should see at
        // least one face, and the re-triangulated boundary should gain a net
        // two faces (remove 1 seen face, add 3 for the new apex... in
        // general adds (horizon edges) - (seen faces)).
        polytope.add_point(sp(4, Vec3::new(5.0, 5.0, 5.0)));

        assert_eq!(polytope.points.len(), 5);
        assert!(
            polytope.faces.len() >= before_faces,
            "expansion should not shrink the boundary"
        );
        for face in &polytope.faces {
            assert!(face.distance >= -1e-4, "face distance was negative: {face:?}");
        }
    }
}
