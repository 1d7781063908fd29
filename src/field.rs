//! Static concentration field around a circular target zone.

use crate::config;

/// Scalar stimulus field centered on a food or poison marker. Concentration
/// decays exponentially with distance from the target-zone *boundary*, not its
/// center, and is clamped into `[0, CONCENTRATION_MAX]`.
#[derive(Clone, Copy, Debug)]
pub struct ConcentrationField {
    target_x: f64,
    target_y: f64,
    target_radius: f64,
}

impl ConcentrationField {
    pub fn new(target_x: f64, target_y: f64, target_radius: f64) -> Self {
        Self {
            target_x,
            target_y,
            target_radius,
        }
    }

    pub fn target_radius(&self) -> f64 {
        self.target_radius
    }

    /// Sensed concentration at a point: 100 inside the target zone, an
    /// exponential decay out to the fitted cutoff, zero beyond it.
    pub fn concentration(&self, x: f64, y: f64) -> f64 {
        let center_dist = f64::hypot(self.target_x - x, self.target_y - y);
        let boundary_dist = center_dist - self.target_radius;
        if boundary_dist <= 0.0 {
            config::CONCENTRATION_MAX
        } else if boundary_dist <= config::decay_cutoff() {
            // The raw fit slightly exceeds 100 just outside the boundary;
            // clamping keeps the field within its stated range without moving
            // the 50-unit behavior threshold.
            (config::DECAY_B.exp() * (config::DECAY_A * boundary_dist).exp())
                .clamp(0.0, config::CONCENTRATION_MAX)
        } else {
            0.0
        }
    }

    /// True iff the point lies inside the target zone, boundary inclusive.
    pub fn is_at_target(&self, x: f64, y: f64) -> bool {
        f64::hypot(self.target_x - x, self.target_y - y) <= self.target_radius
    }
}
