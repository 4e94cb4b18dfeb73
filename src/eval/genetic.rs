//! Cost function for move-sequence genomes.
//!
//! A genome is replayed from the start position. Rejected moves are
//! skipped, stuck boxes are pulled back, and the walk stops with cost 0
//! the moment a goal state is reached. Otherwise the cost is the number
//! of accepted moves plus the phase cost of the final state:
//!
//! - key hidden: box distance + 20 per cornered box
//! - key visible: distance to the key
//! - key picked: distance to the gate

use serde::{Deserialize, Serialize};

use crate::core::{Direction, GameState};
use crate::rules::pull_if_stuck;

use super::heuristics::{gate_distance, key_distance, placement_cost, Phase};
use super::Evaluator;

/// Result of replaying one genome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenomeScore {
    /// Cost to minimize.
    pub cost: f64,
    /// Moves the engine accepted.
    pub real_moves: usize,
    /// Moves the engine rejected.
    pub rejected: usize,
    /// Pulls applied after a stuck push.
    pub pulls: usize,
    /// A goal state was reached.
    pub solved: bool,
}

/// Evaluator used by the genetic search.
#[derive(Clone, Debug, Default)]
pub struct GeneticEvaluator {
    start: GameState,
}

impl GeneticEvaluator {
    /// Evaluator replaying genomes from the fixed start position.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay genomes from another position instead.
    #[must_use]
    pub fn with_start(mut self, start: GameState) -> Self {
        self.start = start;
        self
    }

    /// Position every replay starts from.
    #[must_use]
    pub fn start(&self) -> &GameState {
        &self.start
    }

    /// Replay `genome` on a fresh copy of the start position and score it.
    #[must_use]
    pub fn evaluate_genome(&self, genome: &[Direction]) -> GenomeScore {
        let (state, mut score) = self.replay(genome);
        if !score.solved {
            score.cost = score.real_moves as f64 + self.evaluate(&state);
        }
        score
    }

    /// Replay `genome` and return the state it ends in.
    ///
    /// Stops early on a goal state; the returned score has cost 0 then.
    #[must_use]
    pub fn replay(&self, genome: &[Direction]) -> (GameState, GenomeScore) {
        let mut state = self.start.clone();
        let mut score = GenomeScore {
            cost: 0.0,
            real_moves: 0,
            rejected: 0,
            pulls: 0,
            solved: false,
        };

        for &direction in genome {
            if state.apply_move(direction).is_err() {
                score.rejected += 1;
                continue;
            }
            score.real_moves += 1;

            if let Some(pulled) = pull_if_stuck(&state, direction) {
                state = pulled;
                score.pulls += 1;
            }

            if state.is_goal_state() {
                score.solved = true;
                return (state, score);
            }
        }

        (state, score)
    }
}

impl Evaluator for GeneticEvaluator {
    fn evaluate(&self, state: &GameState) -> f64 {
        match Phase::of(state) {
            Phase::PlaceBoxes => placement_cost(state),
            Phase::FetchKey => f64::from(key_distance(state).unwrap_or(0)),
            Phase::ReachGate | Phase::Finished => f64::from(gate_distance(state).unwrap_or(0)),
        }
    }

    fn name(&self) -> &'static str {
        "genetic"
    }
}
