//! Metaheuristic solvers for the puzzle.
//!
//! ## Overview
//!
//! - **Genetic search** ([`GeneticSearch`]): evolves fixed-length move
//!   sequences scored by replay from the start position.
//! - **Simulated annealing** ([`AnnealingSearch`]): walks the state space
//!   one move at a time under an exponential cooling schedule.
//!
//! Both are seeded, report progress through [`SearchObserver`], log with
//! `tracing` and return a serializable outcome with [`SearchStats`].
//!
//! ## Usage
//!
//! ```rust
//! use kurtan_solver::search::{run_annealing, run_genetic};
//!
//! let ga = run_genetic(10, 20, 0.8, 0.2, "minimize").unwrap();
//! println!("best cost {:?} after {} evaluations", ga.best_cost(), ga.evaluations);
//!
//! let sa = run_annealing(100.0, 0.001, 0.5, 10, "minimize").unwrap();
//! println!("final cost {} at T = {:.4}", sa.final_cost, sa.temperature);
//! ```
//!
//! ## Custom Cost Functions
//!
//! Annealing takes any [`Evaluator`](crate::eval::Evaluator):
//!
//! ```rust
//! use kurtan_solver::core::GameState;
//! use kurtan_solver::eval::Evaluator;
//! use kurtan_solver::search::{AnnealingConfig, AnnealingSearch};
//!
//! struct PlayerRow;
//!
//! impl Evaluator for PlayerRow {
//!     fn evaluate(&self, state: &GameState) -> f64 {
//!         f64::from(state.player().row)
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "player-row"
//!     }
//! }
//!
//! let config = AnnealingConfig::default().with_cooling_rate(0.5);
//! let outcome = AnnealingSearch::new(config).with_evaluator(PlayerRow).run().unwrap();
//! assert!(outcome.final_cost >= 1.0);
//! ```

pub mod annealing;
pub mod config;
pub mod genetic;
pub mod genome;
pub mod observer;
pub mod stats;

pub use annealing::{run_annealing, AnnealingOutcome, AnnealingSearch, Neighbor, NEIGHBOR_ATTEMPTS};
pub use config::{AnnealingConfig, GeneticConfig, Sense};
pub use genetic::{run_genetic, GeneticOutcome, GeneticSearch, Individual};
pub use genome::{crossover, crossover_point, mutate, random_genome, Genome};
pub use observer::{EventLog, NoopObserver, SearchEvent, SearchObserver};
pub use stats::SearchStats;
