//! Simulated annealing over live game states.
//!
//! The current state is perturbed by one random accepted move (plus a pull
//! if that move left a box stuck). Better candidates are always taken;
//! worse ones with probability `exp(-delta / T)`. After every `k` trials
//! the temperature drops to `Tmax * exp(-R * step)` and the search stops
//! once it falls below `Tmin` or the player has left through the gate.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::core::{ConfigError, Direction, GameState, SearchRng};
use crate::eval::{AnnealingEvaluator, Evaluator};
use crate::rules::pull_if_stuck;

use super::config::{AnnealingConfig, Sense};
use super::observer::{NoopObserver, SearchEvent, SearchObserver};
use super::stats::SearchStats;

/// Attempts at finding a legal move before a neighbour counts as degenerate.
pub const NEIGHBOR_ATTEMPTS: usize = 10;

/// A candidate state one move away from the current one.
#[derive(Clone, Debug, PartialEq)]
pub enum Neighbor {
    /// A plain step or push.
    Moved(GameState, Direction),
    /// A push that left the box stuck, undone by a pull.
    Pulled(GameState, Direction),
    /// No direction was accepted.
    Degenerate,
}

impl Neighbor {
    /// The candidate state, if any.
    #[must_use]
    pub fn into_state(self) -> Option<GameState> {
        match self {
            Neighbor::Moved(state, _) | Neighbor::Pulled(state, _) => Some(state),
            Neighbor::Degenerate => None,
        }
    }
}

/// Result of an annealing run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnealingOutcome {
    /// State the search ended in.
    pub final_state: GameState,

    /// Cost of the final state.
    pub final_cost: f64,

    /// Temperature when the search stopped.
    pub temperature: f64,

    /// Cooling steps taken.
    pub cooling_steps: usize,

    /// Trials run, degenerate ones included.
    pub trials: usize,

    /// States evaluated, including the start state.
    pub evaluations: usize,

    /// Current cost at the start and after every non-degenerate trial.
    pub cost_trace: Vec<f64>,

    /// The player picked the key and left through the gate.
    pub reached_optimum: bool,

    /// Parameters the run used.
    pub config: AnnealingConfig,

    /// Counters collected during the run.
    pub stats: SearchStats,
}

/// Simulated annealing context.
pub struct AnnealingSearch {
    /// Search configuration.
    config: AnnealingConfig,

    /// Cost function.
    evaluator: Box<dyn Evaluator>,

    /// State the walk starts from.
    start: GameState,

    /// RNG for neighbours and acceptance.
    rng: SearchRng,

    /// Search statistics.
    stats: SearchStats,
}

impl AnnealingSearch {
    /// Create a search from the fixed start position.
    pub fn new(config: AnnealingConfig) -> Self {
        let rng = SearchRng::new(config.seed);
        Self {
            config,
            evaluator: Box::new(AnnealingEvaluator),
            start: GameState::initial(),
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom cost function.
    pub fn with_evaluator<E: Evaluator + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Start from another position.
    pub fn with_start(mut self, start: GameState) -> Self {
        self.start = start;
        self
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    /// Get statistics from the last run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Propose a neighbour of `current`.
    ///
    /// Each attempt tries the four directions in random order and takes
    /// the first the engine accepts. Gives up after [`NEIGHBOR_ATTEMPTS`].
    pub fn neighbor(&mut self, current: &GameState) -> Neighbor {
        for _ in 0..NEIGHBOR_ATTEMPTS {
            for direction in self.rng.shuffled_directions() {
                let mut candidate = current.clone();
                match candidate.apply_move(direction) {
                    Ok(_) => {
                        self.stats.accepted_moves += 1;
                        if let Some(pulled) = pull_if_stuck(&candidate, direction) {
                            self.stats.pulls += 1;
                            return Neighbor::Pulled(pulled, direction);
                        }
                        return Neighbor::Moved(candidate, direction);
                    }
                    Err(err) => {
                        self.stats.rejected_moves += 1;
                        trace!(%direction, %err, "neighbour move rejected");
                    }
                }
            }
        }
        Neighbor::Degenerate
    }

    /// Run the search without progress reporting.
    pub fn run(&mut self) -> Result<AnnealingOutcome, ConfigError> {
        self.run_with(&mut NoopObserver)
    }

    /// Run the search, reporting trials and cooling steps to `observer`.
    pub fn run_with(
        &mut self,
        observer: &mut dyn SearchObserver,
    ) -> Result<AnnealingOutcome, ConfigError> {
        self.config.validate()?;
        let start = Instant::now();
        self.stats.reset();

        let sense = self.config.sense;
        info!(
            t_max = self.config.t_max,
            t_min = self.config.t_min,
            cooling_rate = self.config.cooling_rate,
            trials_per_step = self.config.trials_per_step,
            evaluator = self.evaluator.name(),
            %sense,
            "starting simulated annealing"
        );

        let mut current = self.start.clone();
        let mut cost = self.evaluator.evaluate(&current);
        self.stats.evaluations = 1;
        let mut cost_trace = vec![cost];

        let mut temperature = self.config.t_max;
        let mut step = 0;
        let mut trials = 0;
        let mut found = is_optimum(&current);

        while !found {
            for _ in 0..self.config.trials_per_step {
                trials += 1;
                let Some(candidate) = self.neighbor(&current).into_state() else {
                    self.stats.degenerate_neighbors += 1;
                    continue;
                };

                let candidate_cost = self.evaluator.evaluate(&candidate);
                self.stats.evaluations += 1;

                let accepted = self.accept(sense, cost, candidate_cost, temperature);
                if accepted {
                    current = candidate;
                    cost = candidate_cost;
                }

                cost_trace.push(cost);
                trace!(trial = trials, cost, accepted, "trial");
                observer.on_event(&SearchEvent::Trial {
                    trial: trials,
                    cost,
                    accepted,
                });

                if is_optimum(&current) {
                    found = true;
                    break;
                }
            }
            if found {
                break;
            }

            step += 1;
            temperature = self.config.temperature_at(step);
            debug!(step, temperature, cost, "cooling");
            observer.on_event(&SearchEvent::Cooling { step, temperature });

            if temperature < self.config.t_min {
                break;
            }
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;
        let evaluations = self.stats.evaluations;
        observer.on_event(&SearchEvent::Finished { cost, evaluations });
        info!(
            cooling_steps = step,
            trials,
            evaluations,
            final_cost = cost,
            optimum_reached = found,
            "simulated annealing finished"
        );

        Ok(AnnealingOutcome {
            final_state: current,
            final_cost: cost,
            temperature,
            cooling_steps: step,
            trials,
            evaluations,
            cost_trace,
            reached_optimum: found,
            config: self.config.clone(),
            stats: self.stats.clone(),
        })
    }

    /// Metropolis acceptance.
    ///
    /// Improvements are always taken. A current cost of exactly 0 is never
    /// traded for anything that is not an improvement.
    fn accept(&mut self, sense: Sense, cost: f64, candidate_cost: f64, temperature: f64) -> bool {
        let delta = sense.worsening(cost, candidate_cost);
        if delta < 0.0 {
            return true;
        }
        let probability = if cost == 0.0 {
            0.0
        } else {
            (-delta / temperature).exp()
        };
        let accepted = self.rng.gen_f64() < probability;
        if accepted {
            self.stats.uphill_accepted += 1;
        }
        accepted
    }
}

/// Key picked and gate passed.
fn is_optimum(state: &GameState) -> bool {
    state.key_picked() && state.game_over()
}

/// Run simulated annealing from the fixed start position.
///
/// `sense` is `"minimize"` or `"maximize"`.
pub fn run_annealing(
    t_max: f64,
    t_min: f64,
    cooling_rate: f64,
    trials_per_step: usize,
    sense: &str,
) -> Result<AnnealingOutcome, ConfigError> {
    let config = AnnealingConfig::default()
        .with_t_max(t_max)
        .with_t_min(t_min)
        .with_cooling_rate(cooling_rate)
        .with_trials_per_step(trials_per_step)
        .with_sense(sense.parse::<Sense>()?);
    AnnealingSearch::new(config).run()
}
