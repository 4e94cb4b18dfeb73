//! # kurtan-solver
//!
//! Board engine and metaheuristic solvers for Kurtan, a push-box puzzle
//! with a twist: once every box sits on a target a key appears, and the
//! player must pick it up and leave through the gate.
//!
//! ## Design Principles
//!
//! 1. **Value States**: A [`GameState`] is a plain owned value. Every
//!    search step works on its own clone; nothing aliases board storage.
//!
//! 2. **Typed Moves**: Cells are an enum and moves return
//!    `Result<MoveOutcome, MoveError>`. A rejected move never changes state.
//!
//! 3. **Reproducible Search**: Both searches own a seeded ChaCha8 RNG, so
//!    a configuration plus a seed fully determines a run.
//!
//! ## Modules
//!
//! - `core`: Positions, cells, the board engine, RNG, errors
//! - `rules`: Stuck-box detection and the pull that undoes a stuck push
//! - `eval`: The two cost functions and their shared heuristics
//! - `search`: Genetic search and simulated annealing
//!
//! ## Example
//!
//! ```rust
//! use kurtan_solver::{Direction, GameState, MoveError};
//!
//! let mut state = GameState::initial();
//! assert_eq!(state.apply_move(Direction::Left), Err(MoveError::GateLocked));
//! assert!(state.apply_move(Direction::Up).is_ok());
//! println!("{state}");
//! ```

pub mod core;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    Cell, ConfigError, Direction, GameState, LayoutError, MoveError, MoveOutcome, Position,
    SearchRng,
};

pub use crate::rules::{apply_pull, is_box_stuck, pull_if_stuck};

pub use crate::eval::{AnnealingEvaluator, Evaluator, GeneticEvaluator, GenomeScore, Phase};

pub use crate::search::{
    run_annealing, run_genetic, AnnealingConfig, AnnealingOutcome, AnnealingSearch,
    GeneticConfig, GeneticOutcome, GeneticSearch, Genome, Individual, Neighbor, SearchEvent,
    SearchObserver, SearchStats, Sense,
};
