//! Agent-based simulation of foraging and toxin avoidance in a circular arena.
//!
//! Four biologically inspired search strategies (undirected plus three
//! taxis/kinesis variants) move an agent through a static concentration field,
//! each in a seek-food and an avoid-poison task variant. The per-step decision
//! engine lives in [`strategy`] and [`trial`]; [`batch`] repeats trials across
//! arena widths and serializes the outcomes as a CSV table.

use thiserror::Error;

pub mod arena;
pub mod batch;
pub mod config;
pub mod field;
pub mod motion;
pub mod strategy;
pub mod trial;

pub use arena::Arena;
pub use batch::{run_batch, BatchConfig, ResultsTable};
pub use field::ConcentrationField;
pub use strategy::{Strategy, Task};
pub use trial::{run_trial, Outcome, Point, TrialConfig, TrialResult};

/// Errors surfaced by trial setup and execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Rejected before the step loop starts: empty sampling pool, non-positive
    /// arena width, or an area fraction outside (0, 1).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The rejection-sampling retry cap was exhausted while searching for a
    /// valid point, which signals a degenerate arena or oversized steps.
    #[error("no valid arena point found after {retries} retries")]
    ArenaUnreachable { retries: usize },
}
