// All tunable simulation constants in one place.

// Arena / target zone
pub const DEFAULT_AREA_FRACTION: f64 = 0.03;

// Concentration decay, fitted against measured diffusion data:
// c(d) = exp(DECAY_B) * exp(DECAY_A * d) for 0 < d <= decay_cutoff(),
// where d is distance from the target-zone boundary.
pub const DECAY_A: f64 = -0.080_469_861_174_948_56;
pub const DECAY_B: f64 = 4.897_119_830_335_053;

/// Distance from the target-zone boundary beyond which concentration is zero.
/// Matches the extent of the arena the decay curve was fitted over.
pub fn decay_cutoff() -> f64 {
    f64::hypot(80.0, 30.0)
}

/// Concentration inside the target zone, and the field's upper bound.
pub const CONCENTRATION_MAX: f64 = 100.0;

// Behavior thresholds
/// Concentration at which kinesis-family strategies switch behavior.
pub const CONCENTRATION_LIMIT: f64 = 50.0;
/// Wall distance below which taxis strategies stop locking their heading.
pub const WALL_MARGIN: f64 = 3.0;
/// Fraction of the sorted speed pool treated as the slow half.
pub const PROP_SLOW: f64 = 0.5;

// Timing
/// Empirical tracking rate: two accepted steps per simulated second.
pub const STEPS_PER_SECOND: f64 = 2.0;
/// Step-loop iterations for the avoid-poison task: 15 minutes at two frames
/// per second, plus the starting frame.
pub const AVOID_STEPS: usize = 1801;

// Rejection sampling
/// Retry cap for placement and step proposals before the trial is abandoned.
pub const MAX_SAMPLE_RETRIES: usize = 10_000;
