//! Genetic search over fixed-length move sequences.
//!
//! Each generation runs tournament selection, single-point crossover and
//! single-gene mutation, then replays every genome through the
//! [`GeneticEvaluator`]. Replays are independent of the search RNG, so
//! evaluating a generation on the rayon pool gives the same result as
//! evaluating it serially.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{ConfigError, SearchRng};
use crate::eval::{GenomeScore, GeneticEvaluator};

use super::config::{GeneticConfig, Sense};
use super::genome::{crossover, crossover_point, mutate, random_genome, Genome};
use super::observer::{NoopObserver, SearchEvent, SearchObserver};
use super::stats::SearchStats;

/// A genome with its cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub genome: Genome,
    pub cost: f64,
}

/// Result of a genetic search run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneticOutcome {
    /// Best individual of the final generation. `None` for an empty population.
    pub best: Option<Individual>,

    /// Genomes evaluated, including the initial population.
    pub evaluations: usize,

    /// The search stopped early because a generation's best cost was at
    /// or below the configured optimum.
    pub reached_optimum: bool,

    /// Some genome of the final generation reaches the goal state.
    pub solved: bool,

    /// Generations run after the initial one.
    pub generations: usize,

    /// Best cost per generation, starting with the initial population.
    pub fitness_trace: Vec<f64>,

    /// Mean cost per generation, starting with the initial population.
    pub mean_trace: Vec<f64>,

    /// Parameters the run used.
    pub config: GeneticConfig,

    /// Counters collected during the run.
    pub stats: SearchStats,
}

impl GeneticOutcome {
    /// Cost of the best individual.
    #[must_use]
    pub fn best_cost(&self) -> Option<f64> {
        self.best.as_ref().map(|b| b.cost)
    }
}

/// Genetic search context.
///
/// Owns the configuration, the evaluator and the RNG. Construct once and
/// call [`run`](Self::run); a second run continues the RNG stream.
pub struct GeneticSearch {
    /// Search configuration.
    config: GeneticConfig,

    /// Replays genomes from the start position.
    evaluator: GeneticEvaluator,

    /// RNG for the variation operators.
    rng: SearchRng,

    /// Search statistics.
    stats: SearchStats,
}

impl GeneticSearch {
    /// Create a search over the fixed start position.
    pub fn new(config: GeneticConfig) -> Self {
        let rng = SearchRng::new(config.seed);
        Self {
            config,
            evaluator: GeneticEvaluator::new(),
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Use a different evaluator, for example one with another start position.
    pub fn with_evaluator(mut self, evaluator: GeneticEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Get statistics from the last run.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Run the search without progress reporting.
    pub fn run(&mut self) -> Result<GeneticOutcome, ConfigError> {
        self.run_with(&mut NoopObserver)
    }

    /// Run the search, reporting every generation to `observer`.
    pub fn run_with(
        &mut self,
        observer: &mut dyn SearchObserver,
    ) -> Result<GeneticOutcome, ConfigError> {
        self.config.validate()?;
        let start = Instant::now();
        self.stats.reset();

        let sense = self.config.sense;
        info!(
            generations = self.config.generations,
            population = self.config.population_size,
            genome_length = self.config.genome_length,
            %sense,
            "starting genetic search"
        );

        let mut population: Vec<Genome> = (0..self.config.population_size)
            .map(|_| random_genome(&mut self.rng, self.config.genome_length))
            .collect();

        let mut fitness_trace = Vec::new();
        let mut mean_trace = Vec::new();

        if population.is_empty() {
            self.stats.time_us = start.elapsed().as_micros() as u64;
            info!("empty population, nothing to search");
            return Ok(self.outcome(None, 0, false, false, fitness_trace, mean_trace));
        }

        let mut scores = self.evaluate_population(&population);
        let mut costs: Vec<f64> = scores.iter().map(|s| s.cost).collect();
        let mut found = self.record(0, &costs, &mut fitness_trace, &mut mean_trace, observer);

        let mut generation = 0;
        while generation < self.config.generations && !found {
            generation += 1;

            let parents = self.select(&population, &costs);
            let mut offspring = self.recombine(parents);
            self.mutate_all(&mut offspring);
            population = offspring;

            scores = self.evaluate_population(&population);
            costs = scores.iter().map(|s| s.cost).collect();
            found = self.record(generation, &costs, &mut fitness_trace, &mut mean_trace, observer);
        }

        let best = sense.best_index(&costs).map(|i| Individual {
            genome: population[i].clone(),
            cost: costs[i],
        });

        let solved = scores.iter().any(|s| s.solved);

        self.stats.time_us = start.elapsed().as_micros() as u64;
        let evaluations = self.stats.evaluations;
        let best_cost = best.as_ref().map_or(f64::NAN, |b| b.cost);
        observer.on_event(&SearchEvent::Finished { cost: best_cost, evaluations });
        info!(
            generations = generation,
            evaluations,
            best_cost,
            optimum_reached = found,
            solved,
            "genetic search finished"
        );

        Ok(self.outcome(best, generation, found, solved, fitness_trace, mean_trace))
    }

    /// Replay every genome and update the counters.
    fn evaluate_population(&mut self, population: &[Genome]) -> Vec<GenomeScore> {
        let evaluator = &self.evaluator;
        let scores: Vec<GenomeScore> = if self.config.parallel {
            population
                .par_iter()
                .map(|genome| evaluator.evaluate_genome(genome))
                .collect()
        } else {
            population
                .iter()
                .map(|genome| evaluator.evaluate_genome(genome))
                .collect()
        };

        self.stats.evaluations += scores.len();
        for score in &scores {
            self.stats.accepted_moves += score.real_moves;
            self.stats.rejected_moves += score.rejected;
            self.stats.pulls += score.pulls;
        }
        scores
    }

    /// Append to the traces and notify the observer.
    ///
    /// Returns whether the generation's best cost is at or below the
    /// optimum. The best cost follows the sense; the comparison does not.
    fn record(
        &self,
        generation: usize,
        costs: &[f64],
        fitness_trace: &mut Vec<f64>,
        mean_trace: &mut Vec<f64>,
        observer: &mut dyn SearchObserver,
    ) -> bool {
        let sense = self.config.sense;
        let best_cost = sense
            .best_index(costs)
            .map_or(f64::NAN, |i| costs[i]);
        let mean_cost = costs.iter().sum::<f64>() / costs.len() as f64;

        fitness_trace.push(best_cost);
        mean_trace.push(mean_cost);
        debug!(generation, best_cost, mean_cost, "generation evaluated");
        observer.on_event(&SearchEvent::Generation {
            generation,
            best_cost,
            mean_cost,
        });

        best_cost <= self.config.optimum
    }

    /// Tournament selection with replacement. The lower cost wins
    /// whatever the sense.
    fn select(&mut self, population: &[Genome], costs: &[f64]) -> Vec<Genome> {
        (0..population.len())
            .map(|_| {
                let mut winner = self.rng.gen_index(population.len());
                for _ in 1..self.config.tournament_size {
                    let contender = self.rng.gen_index(population.len());
                    if costs[contender] < costs[winner] {
                        winner = contender;
                    }
                }
                population[winner].clone()
            })
            .collect()
    }

    /// Pair consecutive parents and cross each pair with `cross_prob`.
    ///
    /// An odd parent out is copied unchanged.
    fn recombine(&mut self, parents: Vec<Genome>) -> Vec<Genome> {
        let mut offspring = Vec::with_capacity(parents.len());
        let mut parents = parents.into_iter();

        while let Some(first) = parents.next() {
            let Some(second) = parents.next() else {
                offspring.push(first);
                break;
            };

            let point = if self.rng.gen_bool(self.config.cross_prob) {
                crossover_point(&mut self.rng, first.len().min(second.len()))
            } else {
                None
            };

            match point {
                Some(point) => {
                    let (a, b) = crossover(&first, &second, point);
                    offspring.push(a);
                    offspring.push(b);
                }
                None => {
                    offspring.push(first);
                    offspring.push(second);
                }
            }
        }

        offspring
    }

    /// Mutate each genome with `mut_prob`.
    fn mutate_all(&mut self, population: &mut [Genome]) {
        for genome in population {
            if self.rng.gen_bool(self.config.mut_prob) {
                mutate(genome, &mut self.rng);
            }
        }
    }

    fn outcome(
        &self,
        best: Option<Individual>,
        generations: usize,
        reached_optimum: bool,
        solved: bool,
        fitness_trace: Vec<f64>,
        mean_trace: Vec<f64>,
    ) -> GeneticOutcome {
        GeneticOutcome {
            best,
            evaluations: self.stats.evaluations,
            reached_optimum,
            solved,
            generations,
            fitness_trace,
            mean_trace,
            config: self.config.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Run a genetic search on the fixed start position.
///
/// `sense` is `"minimize"` or `"maximize"`. The remaining parameters take
/// their [`GeneticConfig`] defaults.
pub fn run_genetic(
    generations: usize,
    population_size: usize,
    cross_prob: f64,
    mut_prob: f64,
    sense: &str,
) -> Result<GeneticOutcome, ConfigError> {
    let config = GeneticConfig::default()
        .with_generations(generations)
        .with_population_size(population_size)
        .with_cross_prob(cross_prob)
        .with_mut_prob(mut_prob)
        .with_sense(sense.parse::<Sense>()?);
    GeneticSearch::new(config).run()
}
