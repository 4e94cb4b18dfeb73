//! State evaluation for the searches. Lower is better.
//!
//! Two evaluators exist on purpose and are not interchangeable:
//!
//! | | [`GeneticEvaluator`] | [`AnnealingEvaluator`] |
//! |---|---|---|
//! | input | move sequence, replayed | live state |
//! | box phase | distance + 20 per cornered box | same |
//! | key phase | distance to key | 10 + distance to key |
//! | gate phase | distance to gate | 10 + distance to gate |
//! | extra | + accepted moves, 0 on goal | none |

pub mod annealing;
pub mod genetic;
pub mod heuristics;

use crate::core::GameState;

pub use annealing::{AnnealingEvaluator, STAGE_BONUS};
pub use genetic::{GenomeScore, GeneticEvaluator};
pub use heuristics::{Phase, STUCK_PENALTY};

/// Maps a state to a non-negative cost.
pub trait Evaluator: Send + Sync {
    /// Cost of `state`.
    fn evaluate(&self, state: &GameState) -> f64;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
