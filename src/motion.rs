//! Motion primitives: resampling from empirical pools and point projection.

use rand::Rng;

/// Uniform draw with replacement from an empirical step-length pool.
/// Callers validate non-emptiness before the step loop starts.
pub fn sample_step(pool: &[f64], rng: &mut impl Rng) -> f64 {
    pool[rng.gen_range(0..pool.len())]
}

/// Uniform draw from an empirical turn-increment pool, applied to the previous
/// heading. The result may leave `[0, 360)`; only its sine and cosine are used.
pub fn sample_turn(pool: &[f64], prev_heading: f64, rng: &mut impl Rng) -> f64 {
    prev_heading + pool[rng.gen_range(0..pool.len())]
}

/// Project the next point from a heading (degrees) and step length.
pub fn advance(x: f64, y: f64, heading_deg: f64, step: f64) -> (f64, f64) {
    let rad = heading_deg.to_radians();
    (x + step * rad.cos(), y + step * rad.sin())
}

/// Split a speed pool into (slow, fast) halves by magnitude. Sorts a private
/// copy ascending and cuts at `floor(len * prop_slow)`; the caller's pool is
/// left untouched so concurrent trials can share it.
pub fn split_speed_pool(pool: &[f64], prop_slow: f64) -> (Vec<f64>, Vec<f64>) {
    let mut sorted = pool.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let cut = (sorted.len() as f64 * prop_slow) as usize;
    let fast = sorted.split_off(cut);
    (sorted, fast)
}
