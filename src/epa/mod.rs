mod polytope;

pub use polytope::{Face, Polytope};

use crate::config::DetectConfig;
use crate::simplex::Simplex;
use crate::support::{minkowski_support, Shape};

/// Result of a single `step_expand` call.
pub enum StepResult {
    /// The closest face moved; call `step_expand` again.
    Continue,
    /// The closest face stopped moving (within `epa_tolerance`): `face` is
    /// the penetration face.
    Converged(Face),
    Degenerate,
}

pub enum EpaOutcome {
    Converged(Polytope, Face),
    Degenerate,
}

/// Single-iteration EPA step: find the closest face, cast a support query
/// along its normal, and either expand the polytope with the new point or
/// report convergence when the support doesn't move the boundary out any
/// further than `epa_tolerance`.
pub fn step_expand(
    mut polytope: Polytope,
    a: &impl Shape,
    b: &impl Shape,
    config: &DetectConfig,
) -> (Polytope, StepResult) {
    let closest = polytope.find_closest_face();
    let support = minkowski_support(a, b, closest.normal);
    let support_dist = support.point.dot(closest.normal);

    if support_dist - closest.distance < config.epa_tolerance {
        return (polytope, StepResult::Converged(closest));
    }

    if polytope
        .points
        .iter()
        .any(|v| v.same_support_pair(&support))
    {
        // No new information along this normal; treat the current closest
        // face as converged rather than looping forever.
        return (polytope, StepResult::Converged(closest));
    }

    polytope.add_point(support);
    (polytope, StepResult::Continue)
}

/// Runs EPA to completion from a GJK terminal `Tetrahedron` simplex,
/// bounded by `config.epa_max_iterations`.
pub fn expand(
    simplex: &Simplex,
    a: &impl Shape,
    b: &impl Shape,
    config: &DetectConfig,
) -> EpaOutcome {
    let Some(mut polytope) = Polytope::from_simplex(simplex) else {
        tracing::warn!("EPA seed tetrahedron was degenerate");
        return EpaOutcome::Degenerate;
    };

    for _ in 0..config.epa_max_iterations {
        let (next_polytope, result) = step_expand(polytope, a, b, config);
        polytope = next_polytope;
        match result {
            StepResult::Continue => continue,
            StepResult::Converged(face) => return EpaOutcome::Converged(polytope, face),
            StepResult::Degenerate => {
                tracing::warn!("EPA polytope expansion hit a degenerate face");
                return EpaOutcome::Degenerate;
            }
        }
    }

    tracing::warn!(
        max_iterations = config.epa_max_iterations,
        "EPA reached max iterations without converging; using the closest face found so far"
    );
    let closest = polytope.find_closest_face();
    EpaOutcome::Converged(polytope, closest)
}
