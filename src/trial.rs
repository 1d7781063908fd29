//! Single-trial execution: the shared step loop, termination rules, and
//! trial outcomes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::config;
use crate::field::ConcentrationField;
use crate::motion;
use crate::strategy::{Policy, StepContext, Strategy, Task};
use crate::SimError;

/// One accepted agent position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Per-trial configuration, passed by value; nothing is shared across trials.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrialConfig {
    /// Arena diameter.
    pub width: f64,
    /// Fraction of the arena covered by the target zone.
    pub area_fraction: f64,
    /// Gradient-detection threshold for the chemotaxis family.
    pub sensitivity: f64,
    /// Fixed start position; random placement when absent.
    pub origin: Option<(f64, f64)>,
}

impl TrialConfig {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            area_fraction: config::DEFAULT_AREA_FRACTION,
            sensitivity: 1.0,
            origin: None,
        }
    }
}

/// Scalar result of a trial.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Outcome {
    /// Food located after `steps` accepted steps; two steps per simulated
    /// second, so `seconds = steps / 2`. Zero when the origin already lies
    /// inside the target zone.
    FoodFound { steps: usize, seconds: f64 },
    /// Fraction of sampled frames at or above the exposure threshold.
    Exposure { fraction: f64 },
}

impl Outcome {
    /// The value written into the results table.
    pub fn value(&self) -> f64 {
        match *self {
            Outcome::FoodFound { seconds, .. } => seconds,
            Outcome::Exposure { fraction } => fraction,
        }
    }
}

/// Outcome plus the full accepted-position trajectory (origin first).
#[derive(Clone, Debug, PartialEq)]
pub struct TrialResult {
    pub outcome: Outcome,
    pub trajectory: Vec<Point>,
}

/// Mutable agent state owned by one running trial.
struct AgentState {
    x: f64,
    y: f64,
    heading: f64,
    prev_concentration: f64,
}

/// Runs one trial to completion: seek-food loops until the target zone is
/// reached; avoid-poison runs a fixed number of steps and scores exposure.
pub fn run_trial(
    strategy: Strategy,
    task: Task,
    speeds: &[f64],
    turns: &[f64],
    cfg: &TrialConfig,
    rng: &mut impl Rng,
) -> Result<TrialResult, SimError> {
    let arena = Arena::new(cfg.width)?;
    let target_radius = arena.target_radius(cfg.area_fraction)?;
    let (cx, cy) = arena.center();
    let field = ConcentrationField::new(cx, cy, target_radius);
    let policy = Policy::new(strategy, task, speeds, turns, cfg.sensitivity)?;

    let (x0, y0) = match cfg.origin {
        Some(origin) => origin,
        None => arena.random_point(rng)?,
    };
    let mut agent = AgentState {
        x: x0,
        y: y0,
        heading: rng.gen_range(0.0..360.0),
        prev_concentration: field.concentration(x0, y0),
    };
    let mut trajectory = vec![Point { x: x0, y: y0 }];

    match task {
        Task::SeekFood => {
            let mut steps = 0usize;
            while !field.is_at_target(agent.x, agent.y) {
                step(&policy, &arena, &field, &mut agent, rng)?;
                trajectory.push(Point {
                    x: agent.x,
                    y: agent.y,
                });
                steps += 1;
            }
            Ok(TrialResult {
                outcome: Outcome::FoodFound {
                    steps,
                    seconds: steps as f64 / config::STEPS_PER_SECOND,
                },
                trajectory,
            })
        }
        Task::AvoidPoison => {
            // Concentration is sampled at the start of every iteration before
            // moving, then once more on the final position, so the exposure
            // denominator is AVOID_STEPS + 1.
            let mut exposed = 0usize;
            for _ in 0..config::AVOID_STEPS {
                if field.concentration(agent.x, agent.y) >= config::CONCENTRATION_LIMIT {
                    exposed += 1;
                }
                step(&policy, &arena, &field, &mut agent, rng)?;
                trajectory.push(Point {
                    x: agent.x,
                    y: agent.y,
                });
            }
            if field.concentration(agent.x, agent.y) >= config::CONCENTRATION_LIMIT {
                exposed += 1;
            }
            Ok(TrialResult {
                outcome: Outcome::Exposure {
                    fraction: exposed as f64 / (config::AVOID_STEPS + 1) as f64,
                },
                trajectory,
            })
        }
    }
}

/// Proposes headings and step lengths under the policy until one lands inside
/// the arena, then commits it. The sensed context is fixed for the whole
/// proposal loop; a locked heading stays locked across retries and only the
/// step length varies.
fn step(
    policy: &Policy<'_>,
    arena: &Arena,
    field: &ConcentrationField,
    agent: &mut AgentState,
    rng: &mut impl Rng,
) -> Result<(), SimError> {
    let concentration = field.concentration(agent.x, agent.y);
    let ctx = StepContext {
        concentration,
        concentration_delta: concentration - agent.prev_concentration,
        wall_distance: arena.distance_to_wall(agent.x, agent.y),
        prev_heading: agent.heading,
    };

    for _ in 0..config::MAX_SAMPLE_RETRIES {
        let heading = policy.decide_heading(&ctx, rng);
        let step_len = policy.decide_step(&ctx, rng);
        let (nx, ny) = motion::advance(agent.x, agent.y, heading, step_len);
        if arena.contains(nx, ny) {
            agent.x = nx;
            agent.y = ny;
            agent.heading = heading;
            agent.prev_concentration = concentration;
            return Ok(());
        }
    }
    Err(SimError::ArenaUnreachable {
        retries: config::MAX_SAMPLE_RETRIES,
    })
}
