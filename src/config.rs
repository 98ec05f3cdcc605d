/// Tunables for a single `detect` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectConfig {
    /// Upper bound on GJK iterations before giving up and reporting
    /// `Degenerate`.
    pub gjk_max_iterations: u32,
    /// Upper bound on EPA iterations before returning the closest face found
    /// so far.
    pub epa_max_iterations: u32,
    /// Threshold on the search direction's *squared* length; below this the
    /// direction is treated as zero (the simplex already encloses the
    /// origin). Compared directly against `direction.length_squared()`, not
    /// re-squared.
    pub direction_epsilon: f32,
    /// EPA stops expanding once a new support point moves the boundary out
    /// by less than this, along the closest face's normal.
    pub epa_tolerance: f32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            gjk_max_iterations: 32,
            epa_max_iterations: 32,
            direction_epsilon: 1e-12,
            epa_tolerance: 1e-4,
        }
    }
}
