//! Search-strategy policies: per-step heading and step-length rules.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::motion;
use crate::SimError;

/// The four search strategies under comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// No response to the stimulus: resample turn and speed every step.
    Undirected,
    /// Speed modulation: slow down (seek) or speed up (avoid) when the
    /// concentration is detectable.
    Orthokinesis,
    /// Heading lock while the concentration changes in the preferred
    /// direction fast enough.
    Chemotaxis,
    /// Heading lock while the absolute concentration is on the preferred
    /// side of the behavior threshold.
    Klinokinesis,
}

impl Strategy {
    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "undirected" | "anosmic" | "random" => Some(Self::Undirected),
            "orthokinesis" | "ortho" => Some(Self::Orthokinesis),
            "chemotaxis" | "chemo" => Some(Self::Chemotaxis),
            "klinokinesis" | "klino" => Some(Self::Klinokinesis),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Undirected => "undirected",
            Self::Orthokinesis => "orthokinesis",
            Self::Chemotaxis => "chemotaxis",
            Self::Klinokinesis => "klinokinesis",
        }
    }
}

/// Task variant a strategy runs under; decides the stimulus response
/// direction, the termination rule, and the outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Search until the food zone is reached; outcome is search time.
    #[serde(rename = "seek")]
    SeekFood,
    /// Wander for a fixed duration near a poison zone; outcome is the
    /// fraction of frames spent at high concentration.
    #[serde(rename = "avoid")]
    AvoidPoison,
}

impl Task {
    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "seek" | "food" | "seek-food" => Some(Self::SeekFood),
            "avoid" | "poison" | "avoid-poison" => Some(Self::AvoidPoison),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SeekFood => "seek",
            Self::AvoidPoison => "avoid",
        }
    }
}

/// Sensed inputs for one step decision, all measured at the pre-move position.
#[derive(Clone, Copy, Debug)]
pub struct StepContext {
    /// Concentration at the current position.
    pub concentration: f64,
    /// Change versus the previous accepted position's reading.
    pub concentration_delta: f64,
    /// Distance from the current position to the arena wall.
    pub wall_distance: f64,
    /// Heading (degrees) of the previous accepted step.
    pub prev_heading: f64,
}

/// Per-trial movement policy: one strategy/task pair bound to its sampling
/// pools. Orthokinesis owns a privately sorted split of the speed pool so the
/// shared input slice stays untouched.
pub struct Policy<'a> {
    strategy: Strategy,
    task: Task,
    sensitivity: f64,
    speeds: &'a [f64],
    turns: &'a [f64],
    slow: Vec<f64>,
    fast: Vec<f64>,
}

impl<'a> Policy<'a> {
    /// Builds the policy, failing fast on pools that cannot be sampled.
    pub fn new(
        strategy: Strategy,
        task: Task,
        speeds: &'a [f64],
        turns: &'a [f64],
        sensitivity: f64,
    ) -> Result<Self, SimError> {
        if speeds.is_empty() {
            return Err(SimError::InvalidInput("speed pool is empty".into()));
        }
        if turns.is_empty() {
            return Err(SimError::InvalidInput("turn-angle pool is empty".into()));
        }

        let (slow, fast) = if strategy == Strategy::Orthokinesis {
            let (slow, fast) = motion::split_speed_pool(speeds, config::PROP_SLOW);
            if slow.is_empty() || fast.is_empty() {
                return Err(SimError::InvalidInput(format!(
                    "speed pool of {} samples cannot be split into slow/fast halves",
                    speeds.len()
                )));
            }
            (slow, fast)
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self {
            strategy,
            task,
            sensitivity,
            speeds,
            turns,
            slow,
            fast,
        })
    }

    /// Whether the previous heading is kept instead of resampled. Taxis
    /// strategies release the lock near the wall regardless of the stimulus.
    fn keeps_heading(&self, ctx: &StepContext) -> bool {
        let near_wall = ctx.wall_distance <= config::WALL_MARGIN;
        match (self.strategy, self.task) {
            (Strategy::Undirected | Strategy::Orthokinesis, _) => false,
            (Strategy::Chemotaxis, Task::SeekFood) => {
                ctx.concentration_delta >= self.sensitivity && !near_wall
            }
            (Strategy::Chemotaxis, Task::AvoidPoison) => {
                ctx.concentration_delta <= -self.sensitivity && !near_wall
            }
            (Strategy::Klinokinesis, Task::SeekFood) => {
                ctx.concentration >= config::CONCENTRATION_LIMIT && !near_wall
            }
            (Strategy::Klinokinesis, Task::AvoidPoison) => {
                ctx.concentration < config::CONCENTRATION_LIMIT && !near_wall
            }
        }
    }

    /// Heading for the next proposal.
    pub fn decide_heading(&self, ctx: &StepContext, rng: &mut impl Rng) -> f64 {
        if self.keeps_heading(ctx) {
            ctx.prev_heading
        } else {
            motion::sample_turn(self.turns, ctx.prev_heading, rng)
        }
    }

    /// Step length for the next proposal.
    pub fn decide_step(&self, ctx: &StepContext, rng: &mut impl Rng) -> f64 {
        if self.strategy != Strategy::Orthokinesis {
            return motion::sample_step(self.speeds, rng);
        }
        let detectable = ctx.concentration >= config::CONCENTRATION_LIMIT;
        let pool = match (self.task, detectable) {
            // creep once the food is scented, rush away from strong poison
            (Task::SeekFood, true) | (Task::AvoidPoison, false) => &self.slow,
            (Task::SeekFood, false) | (Task::AvoidPoison, true) => &self.fast,
        };
        motion::sample_step(pool, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SPEEDS: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
    const TURNS: [f64; 3] = [-10.0, 0.0, 25.0];

    fn ctx(concentration: f64, delta: f64, wall: f64) -> StepContext {
        StepContext {
            concentration,
            concentration_delta: delta,
            wall_distance: wall,
            prev_heading: 90.0,
        }
    }

    fn policy(strategy: Strategy, task: Task) -> Policy<'static> {
        Policy::new(strategy, task, &SPEEDS, &TURNS, 1.0).unwrap()
    }

    #[test]
    fn empty_pools_fail_before_any_stepping() {
        let err = Policy::new(Strategy::Undirected, Task::SeekFood, &[], &TURNS, 1.0);
        assert!(matches!(err, Err(SimError::InvalidInput(_))));

        let err = Policy::new(Strategy::Undirected, Task::SeekFood, &SPEEDS, &[], 1.0);
        assert!(matches!(err, Err(SimError::InvalidInput(_))));

        // a singleton pool splits into an empty slow half
        let err = Policy::new(Strategy::Orthokinesis, Task::SeekFood, &[2.0], &TURNS, 1.0);
        assert!(matches!(err, Err(SimError::InvalidInput(_))));
    }

    #[test]
    fn undirected_always_resamples_the_heading() {
        let p = policy(Strategy::Undirected, Task::SeekFood);
        assert!(!p.keeps_heading(&ctx(100.0, 50.0, 10.0)));
    }

    #[test]
    fn chemotaxis_locks_heading_on_a_rising_gradient_when_seeking() {
        let p = policy(Strategy::Chemotaxis, Task::SeekFood);
        assert!(p.keeps_heading(&ctx(60.0, 1.0, 10.0)));
        assert!(p.keeps_heading(&ctx(60.0, 5.0, 10.0)));
        assert!(!p.keeps_heading(&ctx(60.0, 0.5, 10.0))); // below sensitivity
        assert!(!p.keeps_heading(&ctx(60.0, -2.0, 10.0))); // falling
        assert!(!p.keeps_heading(&ctx(60.0, 5.0, 2.0))); // wall imminent
    }

    #[test]
    fn chemotaxis_locks_heading_on_a_falling_gradient_when_avoiding() {
        let p = policy(Strategy::Chemotaxis, Task::AvoidPoison);
        assert!(p.keeps_heading(&ctx(60.0, -1.0, 10.0)));
        assert!(!p.keeps_heading(&ctx(60.0, 1.0, 10.0)));
        assert!(!p.keeps_heading(&ctx(60.0, -1.0, 3.0))); // wall margin is exclusive
    }

    #[test]
    fn klinokinesis_thresholds_invert_between_tasks() {
        let seek = policy(Strategy::Klinokinesis, Task::SeekFood);
        assert!(seek.keeps_heading(&ctx(50.0, 0.0, 10.0)));
        assert!(!seek.keeps_heading(&ctx(49.9, 0.0, 10.0)));
        assert!(!seek.keeps_heading(&ctx(50.0, 0.0, 1.0)));

        let avoid = policy(Strategy::Klinokinesis, Task::AvoidPoison);
        assert!(avoid.keeps_heading(&ctx(49.9, 0.0, 10.0)));
        assert!(!avoid.keeps_heading(&ctx(50.0, 0.0, 10.0)));
    }

    #[test]
    fn kept_heading_is_the_previous_heading_verbatim() {
        let p = policy(Strategy::Klinokinesis, Task::SeekFood);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let h = p.decide_heading(&ctx(90.0, 0.0, 10.0), &mut rng);
        assert_eq!(h, 90.0);
    }

    #[test]
    fn orthokinesis_picks_the_slow_half_near_food_and_fast_half_near_poison() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);

        let seek = policy(Strategy::Orthokinesis, Task::SeekFood);
        for _ in 0..50 {
            let s = seek.decide_step(&ctx(80.0, 0.0, 10.0), &mut rng);
            assert!(s <= 2.0, "expected a slow step near food, got {s}");
            let s = seek.decide_step(&ctx(20.0, 0.0, 10.0), &mut rng);
            assert!(s >= 3.0, "expected a fast step far from food, got {s}");
        }

        let avoid = policy(Strategy::Orthokinesis, Task::AvoidPoison);
        for _ in 0..50 {
            let s = avoid.decide_step(&ctx(80.0, 0.0, 10.0), &mut rng);
            assert!(s >= 3.0, "expected a fast step near poison, got {s}");
            let s = avoid.decide_step(&ctx(20.0, 0.0, 10.0), &mut rng);
            assert!(s <= 2.0, "expected a slow step far from poison, got {s}");
        }
    }

    #[test]
    fn labels_round_trip_through_cli_parsing() {
        for s in [
            Strategy::Undirected,
            Strategy::Orthokinesis,
            Strategy::Chemotaxis,
            Strategy::Klinokinesis,
        ] {
            assert_eq!(Strategy::parse_cli(s.label()), Some(s));
        }
        for t in [Task::SeekFood, Task::AvoidPoison] {
            assert_eq!(Task::parse_cli(t.label()), Some(t));
        }
        assert_eq!(Strategy::parse_cli("nope"), None);
    }
}
