use glam::Vec3;

use crate::config::DetectConfig;
use crate::simplex::{Simplex, SolveOutcome};
use crate::support::{minkowski_support, Shape};

/// Everything the driver carries between iterations: the current simplex and
/// the direction the next support query should be cast in.
#[derive(Debug, Clone)]
pub struct GjkState {
    pub simplex: Simplex,
    pub direction: Vec3,
}

/// Result of a single `step_detect` call.
pub enum StepResult {
    /// No conclusion yet; call `step_detect` again with the returned state.
    Continue,
    /// The simplex now encloses the origin.
    Overlap,
    /// A separating axis was found (duplicate support or no further
    /// progress along `direction`).
    Disjoint,
    /// The simplex collapsed to a degenerate (zero-measure) feature.
    Degenerate,
}

/// Outcome of a full `detect` run. `Overlap` carries the last search
/// direction alongside the simplex: when the simplex has fewer than 4
/// vertices (the shapes touch at a vertex, edge, or face rather than
/// properly interpenetrating) there is no tetrahedron for EPA to expand
/// from, and the direction is the best available fallback contact normal.
pub enum GjkOutcome {
    Overlap(Simplex, Vec3),
    Disjoint(Simplex, Vec3),
    Degenerate,
}

fn closest_point(simplex: &Simplex) -> Vec3 {
    let divisor = simplex.divisor();
    let sum = simplex
        .points()
        .iter()
        .fold(Vec3::ZERO, |acc, v| acc + v.point * v.weight);
    sum / divisor
}

/// Single-iteration, caller-owned-simplex step of the GJK loop. Does not
/// loop or enforce an iteration cap itself — that is `detect`'s job, so a
/// caller wanting to visualise or bound the search by hand can drive this
/// directly.
pub fn step_detect(
    state: GjkState,
    a: &impl Shape,
    b: &impl Shape,
    config: &DetectConfig,
) -> (GjkState, StepResult) {
    let GjkState { simplex, direction } = state;

    if direction.length_squared() <= config.direction_epsilon {
        return (GjkState { simplex, direction }, StepResult::Overlap);
    }

    let candidate = minkowski_support(a, b, direction);

    // Same pair of supports already in the simplex: the search has
    // converged on this direction without enclosing the origin.
    if simplex
        .points()
        .iter()
        .any(|v| v.same_support_pair(&candidate))
    {
        return (GjkState { simplex, direction }, StepResult::Disjoint);
    }

    // No progress: the new support is no further along `direction` than the
    // simplex we already have, so `direction` is a separating axis.
    let support_dist = candidate.point.dot(direction);
    let best_existing = simplex
        .points()
        .iter()
        .map(|v| v.point.dot(direction))
        .fold(f32::NEG_INFINITY, f32::max);
    if support_dist <= best_existing {
        return (GjkState { simplex, direction }, StepResult::Disjoint);
    }

    let mut grown = simplex.clone();
    grown.push(candidate);

    match grown.solve(Vec3::ZERO) {
        SolveOutcome::Degenerate => {
            tracing::warn!("GJK simplex solve hit a degenerate feature");
            (GjkState { simplex, direction }, StepResult::Degenerate)
        }
        SolveOutcome::Solved(solved) => {
            if solved.count() == 4 {
                (
                    GjkState {
                        simplex: solved,
                        direction,
                    },
                    StepResult::Overlap,
                )
            } else {
                let next_direction = -closest_point(&solved);
                (
                    GjkState {
                        simplex: solved,
                        direction: next_direction,
                    },
                    StepResult::Continue,
                )
            }
        }
    }
}

/// Runs the GJK loop to completion, bounded by `config.gjk_max_iterations`.
pub fn detect(a: &impl Shape, b: &impl Shape, config: &DetectConfig) -> GjkOutcome {
    let seed_dir = Vec3::X;
    let seed = minkowski_support(a, b, seed_dir);
    let direction = -seed.point;

    let mut state = GjkState {
        simplex: Simplex::seed(seed),
        direction,
    };

    for _ in 0..config.gjk_max_iterations {
        let (next_state, result) = step_detect(state, a, b, config);
        match result {
            StepResult::Continue => state = next_state,
            StepResult::Overlap => {
                return GjkOutcome::Overlap(next_state.simplex, next_state.direction)
            }
            StepResult::Disjoint => {
                return GjkOutcome::Disjoint(next_state.simplex, next_state.direction)
            }
            StepResult::Degenerate => return GjkOutcome::Degenerate,
        }
    }

    tracing::warn!(
        max_iterations = config.gjk_max_iterations,
        "GJK reached max iterations without a conclusive result"
    );
    GjkOutcome::Degenerate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::cuboid;
    use glam::Mat4;

    fn at(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(x, y, z))
    }

    #[test]
    fn disjoint_cubes_report_disjoint_with_the_gap_as_direction() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), at(5.0, 0.0, 0.0));
        let config = DetectConfig::default();

        match detect(&a, &b, &config) {
            GjkOutcome::Disjoint(simplex, _) => assert!(simplex.count() <= 3),
            _ => panic!("expected Disjoint"),
        }
    }

    #[test]
    fn overlapping_cubes_grow_a_full_tetrahedron_or_report_overlap_directly() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), at(0.2, 0.0, 0.0));
        let config = DetectConfig::default();

        assert!(matches!(detect(&a, &b, &config), GjkOutcome::Overlap(_, _)));
    }

    #[test]
    fn step_detect_treats_a_near_zero_direction_as_overlap() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let config = DetectConfig::default();

        let seed = minkowski_support(&a, &b, Vec3::X);
        let state = GjkState {
            simplex: Simplex::seed(seed),
            direction: Vec3::splat(1e-7),
        };
        let (_, result) = step_detect(state, &a, &b, &config);
        assert!(matches!(result, StepResult::Overlap));
    }

    #[test]
    fn closest_point_is_the_weighted_average_of_simplex_vertices() {
        let a = cuboid(Vec3::splat(0.5), Mat4::IDENTITY);
        let b = cuboid(Vec3::splat(0.5), at(5.0, 0.0, 0.0));
        let seed = minkowski_support(&a, &b, Vec3::X);
        let simplex = Simplex::seed(seed);
        // A single-point simplex's closest point is just that point.
        assert_eq!(closest_point(&simplex), seed.point);
    }
}
