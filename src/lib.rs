//! A small 3D convex-collision core: GJK distance/overlap detection and EPA
//! penetration-depth expansion, built around an index-returning support
//! oracle so callers can track which vertex pair produced each witness point
//! instead of re-deriving it from floating-point positions.
//!
//! The entry point is [`detect`]; [`gjk::step_detect`] and
//! [`epa::step_expand`] expose the same algorithms one iteration at a time
//! for callers that want to trace or visualise the search.

pub mod config;
pub mod contact;
pub mod epa;
pub mod error;
pub mod gjk;
pub mod shapes;
pub mod simplex;
pub mod support;
pub mod witness;

pub use config::DetectConfig;
pub use contact::{Contact, DetectResult};
pub use error::{Error, Result};
pub use support::{minkowski_support, Shape, SupportPoint};

use epa::EpaOutcome;
use gjk::GjkOutcome;

/// Runs GJK, then EPA if the shapes overlap, and reports the result in
/// world space.
pub fn detect(a: &impl Shape, b: &impl Shape, config: &DetectConfig) -> Result<DetectResult> {
    if a.vertex_count() == 0 || b.vertex_count() == 0 {
        return Err(Error::EmptyShape);
    }

    match gjk::detect(a, b, config) {
        GjkOutcome::Disjoint(simplex, _direction) => {
            let w = witness::witness_points(&simplex);
            let distance = (w.point_a - w.point_b).length();
            Ok(DetectResult::Disjoint {
                distance,
                point_a: w.point_a,
                point_b: w.point_b,
            })
        }
        // A simplex with fewer than 4 vertices touches the origin exactly
        // (vertex/edge/face contact) rather than enclosing it: there is no
        // tetrahedron for EPA to expand from, so the penetration depth is 0
        // and the last search direction is the best available normal.
        GjkOutcome::Overlap(simplex, direction) if simplex.count() < 4 => {
            let w = witness::witness_points(&simplex);
            let normal = direction.try_normalize().unwrap_or(glam::Vec3::X);
            Ok(DetectResult::Overlap(Contact {
                point_a: w.point_a,
                point_b: w.point_b,
                normal,
                depth: 0.0,
            }))
        }
        GjkOutcome::Overlap(simplex, _direction) => match epa::expand(&simplex, a, b, config) {
            EpaOutcome::Converged(polytope, face) => {
                let w = witness::contact_points(&polytope, &face);
                Ok(DetectResult::Overlap(Contact {
                    point_a: w.point_a,
                    point_b: w.point_b,
                    normal: face.normal,
                    depth: face.distance,
                }))
            }
            EpaOutcome::Degenerate => Ok(DetectResult::Degenerate),
        },
        GjkOutcome::Degenerate => Ok(DetectResult::Degenerate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use shapes::{cuboid, VertexCloud};

    fn at(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(x, y, z))
    }

    #[test]
    fn disjoint_unit_cubes_report_gap_distance() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), at(5.0, 0.0, 0.0));
        let config = DetectConfig::default();

        match detect(&a, &b, &config).unwrap() {
            DetectResult::Disjoint { distance, .. } => {
                assert!((distance - 4.0).abs() < 1e-3, "distance was {distance}");
            }
            other => panic!("expected Disjoint, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_unit_cubes_report_penetration_depth() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), at(0.5, 0.0, 0.0));
        let config = DetectConfig::default();

        match detect(&a, &b, &config).unwrap() {
            DetectResult::Overlap(contact) => {
                assert!(
                    (contact.depth - 0.5).abs() < 1e-2,
                    "depth was {}",
                    contact.depth
                );
                assert!(
                    contact.normal.x.abs() > 0.99,
                    "normal was {:?}",
                    contact.normal
                );
            }
            other => panic!("expected Overlap, got {other:?}"),
        }
    }

    #[test]
    fn coincident_cubes_overlap() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let config = DetectConfig::default();

        assert!(matches!(
            detect(&a, &b, &config).unwrap(),
            DetectResult::Overlap(_)
        ));
    }

    #[test]
    fn empty_shape_is_rejected() {
        struct Empty;
        impl Shape for Empty {
            fn vertex(&self, _index: usize) -> Vec3 {
                Vec3::ZERO
            }
            fn vertex_count(&self) -> usize {
                0
            }
            fn transform(&self) -> Mat4 {
                Mat4::IDENTITY
            }
        }

        let empty = Empty;
        let cube = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let config = DetectConfig::default();
        assert!(matches!(
            detect(&empty, &cube, &config),
            Err(Error::EmptyShape)
        ));
    }

    #[test]
    fn detect_is_symmetric_under_swap() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), at(5.0, 0.0, 0.0));
        let config = DetectConfig::default();

        let ab = detect(&a, &b, &config).unwrap();
        let ba = detect(&b, &a, &config).unwrap();
        match (ab, ba) {
            (
                DetectResult::Disjoint { distance: d1, .. },
                DetectResult::Disjoint { distance: d2, .. },
            ) => assert!((d1 - d2).abs() < 1e-3),
            _ => panic!("expected both calls to agree on Disjoint"),
        }
    }

    fn random_point_cloud(rng: &mut Pcg32, count: usize, radius: f32) -> Vec<Vec3> {
        (0..count)
            .map(|_| {
                Vec3::new(
                    rng.random_range(-radius..radius),
                    rng.random_range(-radius..radius),
                    rng.random_range(-radius..radius),
                )
            })
            .collect()
    }

    #[test]
    fn distance_is_translation_invariant_for_random_clouds() {
        for seed in 0..8u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let verts_a = random_point_cloud(&mut rng, 8, 1.0);
            let verts_b = random_point_cloud(&mut rng, 8, 1.0);
            let gap = Vec3::new(20.0, 0.0, 0.0)
                + Vec3::new(
                    rng.random_range(-2.0..2.0),
                    rng.random_range(-2.0..2.0),
                    rng.random_range(-2.0..2.0),
                );
            let config = DetectConfig::default();

            let a = VertexCloud::new(verts_a.clone(), Mat4::IDENTITY);
            let b = VertexCloud::new(verts_b.clone(), Mat4::from_translation(gap));
            let baseline = detect(&a, &b, &config).unwrap();

            let shift = Vec3::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
            );
            let a_shifted = VertexCloud::new(verts_a, Mat4::from_translation(shift));
            let b_shifted = VertexCloud::new(verts_b, Mat4::from_translation(gap + shift));
            let shifted = detect(&a_shifted, &b_shifted, &config).unwrap();

            match (baseline, shifted) {
                (
                    DetectResult::Disjoint { distance: d1, .. },
                    DetectResult::Disjoint { distance: d2, .. },
                ) => assert!((d1 - d2).abs() < 1e-2, "seed {seed}: {d1} vs {d2}"),
                other => panic!("seed {seed}: expected both Disjoint, got {other:?}"),
            }
        }
    }

    #[test]
    fn detect_is_symmetric_under_swap_for_random_clouds() {
        for seed in 0..8u64 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let verts_a = random_point_cloud(&mut rng, 8, 1.0);
            let verts_b = random_point_cloud(&mut rng, 8, 1.0);
            let gap = Vec3::new(20.0, 0.0, 0.0);
            let config = DetectConfig::default();

            let a = VertexCloud::new(verts_a, Mat4::IDENTITY);
            let b = VertexCloud::new(verts_b, Mat4::from_translation(gap));

            let ab = detect(&a, &b, &config).unwrap();
            let ba = detect(&b, &a, &config).unwrap();
            match (ab, ba) {
                (
                    DetectResult::Disjoint { distance: d1, .. },
                    DetectResult::Disjoint { distance: d2, .. },
                ) => assert!((d1 - d2).abs() < 1e-2, "seed {seed}: {d1} vs {d2}"),
                other => panic!("seed {seed}: expected both Disjoint, got {other:?}"),
            }
        }
    }
}
