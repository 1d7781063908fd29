//! Circular arena geometry: membership, wall distance, target sizing,
//! random placement.

use rand::Rng;

use crate::config;
use crate::SimError;

/// Circular arena of diameter `width`, centered at `(width/2, width/2)`.
#[derive(Clone, Copy, Debug)]
pub struct Arena {
    width: f64,
}

impl Arena {
    pub fn new(width: f64) -> Result<Self, SimError> {
        if !(width > 0.0) {
            return Err(SimError::InvalidInput(format!(
                "arena width must be positive, got {width}"
            )));
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn radius(&self) -> f64 {
        self.width * 0.5
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width * 0.5, self.width * 0.5)
    }

    /// True iff the point lies inside the arena, boundary inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (cx, cy) = self.center();
        f64::hypot(cx - x, cy - y) <= self.radius()
    }

    /// Distance from the point to the arena wall (negative outside).
    pub fn distance_to_wall(&self, x: f64, y: f64) -> f64 {
        let (cx, cy) = self.center();
        self.radius() - f64::hypot(cx - x, cy - y)
    }

    /// Radius of a centered target zone covering `fraction` of the arena area.
    pub fn target_radius(&self, fraction: f64) -> Result<f64, SimError> {
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(SimError::InvalidInput(format!(
                "target area fraction must be in (0, 1), got {fraction}"
            )));
        }
        Ok(fraction.sqrt() * self.radius())
    }

    /// Uniform random point inside the arena, rejection-sampled from the
    /// bounding square.
    pub fn random_point(&self, rng: &mut impl Rng) -> Result<(f64, f64), SimError> {
        for _ in 0..config::MAX_SAMPLE_RETRIES {
            let x = rng.gen_range(0.0..self.width);
            let y = rng.gen_range(0.0..self.width);
            if self.contains(x, y) {
                return Ok((x, y));
            }
        }
        Err(SimError::ArenaUnreachable {
            retries: config::MAX_SAMPLE_RETRIES,
        })
    }
}
