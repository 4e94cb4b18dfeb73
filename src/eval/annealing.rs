//! Cost function for simulated annealing.
//!
//! Scores a live state. Shares the box terms with the genetic evaluator
//! but adds a flat stage cost on entering the key and gate phases, and
//! has no move-count term. Once the player has escaped the cost is 0.

use crate::core::GameState;

use super::heuristics::{gate_distance, key_distance, placement_cost, Phase};
use super::Evaluator;

/// Flat cost added while fetching the key or heading for the gate.
pub const STAGE_BONUS: f64 = 10.0;

/// Evaluator used by simulated annealing.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnnealingEvaluator;

impl Evaluator for AnnealingEvaluator {
    fn evaluate(&self, state: &GameState) -> f64 {
        match Phase::of(state) {
            Phase::PlaceBoxes => placement_cost(state),
            Phase::FetchKey => key_distance(state)
                .map_or(0.0, |d| STAGE_BONUS + f64::from(d)),
            Phase::ReachGate => gate_distance(state)
                .map_or(0.0, |d| STAGE_BONUS + f64::from(d)),
            Phase::Finished => 0.0,
        }
    }

    fn name(&self) -> &'static str {
        "annealing"
    }
}
