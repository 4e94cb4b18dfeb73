//! Search configuration parameters.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Whether a search minimizes or maximizes cost.
///
/// Both evaluators produce costs, so `Minimize` is the normal choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    /// Is `candidate` strictly better than `incumbent`?
    #[must_use]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Sense::Minimize => candidate < incumbent,
            Sense::Maximize => candidate > incumbent,
        }
    }

    /// How much worse `candidate` is than `current`. Negative means better.
    #[must_use]
    pub fn worsening(self, current: f64, candidate: f64) -> f64 {
        match self {
            Sense::Minimize => candidate - current,
            Sense::Maximize => current - candidate,
        }
    }

    /// Index of the first best value, or `None` for an empty slice.
    #[must_use]
    pub fn best_index(self, values: &[f64]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &v) in values.iter().enumerate() {
            if best.map_or(true, |b| self.is_better(v, values[b])) {
                best = Some(i);
            }
        }
        best
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

impl FromStr for Sense {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimize" => Ok(Sense::Minimize),
            "maximize" => Ok(Sense::Maximize),
            other => Err(ConfigError::UnknownSense(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_probability(name: &'static str, p: f64) -> Result<(), ConfigError> {
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("{p} is not within [0, 1]")))
    }
}

/// Genetic search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Maximum generations after the initial one (tmax).
    pub generations: usize,

    /// Individuals per generation.
    pub population_size: usize,

    /// Moves per genome (N).
    pub genome_length: usize,

    /// Probability that a parent pair is recombined.
    pub cross_prob: f64,

    /// Probability that an individual gets one gene replaced.
    pub mut_prob: f64,

    /// Optimization sense.
    pub sense: Sense,

    /// Stop once a generation's best cost is at or below this value.
    pub optimum: f64,

    /// Contestants per tournament, drawn with replacement.
    pub tournament_size: usize,

    /// Random seed. Same seed, same run.
    pub seed: u64,

    /// Evaluate each generation on the rayon thread pool.
    pub parallel: bool,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            population_size: 30,
            genome_length: 10,
            cross_prob: 0.8,
            mut_prob: 0.2,
            sense: Sense::Minimize,
            optimum: 0.0,
            tournament_size: 2,
            seed: 42,
            parallel: true,
        }
    }
}

impl GeneticConfig {
    /// Set the generation limit.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the genome length.
    pub fn with_genome_length(mut self, length: usize) -> Self {
        self.genome_length = length;
        self
    }

    /// Set the crossover probability.
    pub fn with_cross_prob(mut self, p: f64) -> Self {
        self.cross_prob = p;
        self
    }

    /// Set the mutation probability.
    pub fn with_mut_prob(mut self, p: f64) -> Self {
        self.mut_prob = p;
        self
    }

    /// Set the optimization sense.
    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }

    /// Set the target cost.
    pub fn with_optimum(mut self, optimum: f64) -> Self {
        self.optimum = optimum;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject parameters the search cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_probability("cross_prob", self.cross_prob)?;
        check_probability("mut_prob", self.mut_prob)?;
        if self.tournament_size == 0 {
            return Err(ConfigError::invalid("tournament_size", "must be at least 1"));
        }
        if self.optimum.is_nan() {
            return Err(ConfigError::invalid("optimum", "must be a number"));
        }
        Ok(())
    }
}

/// Simulated annealing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnealingConfig {
    /// Starting temperature (Tmax).
    pub t_max: f64,

    /// Stop once the temperature drops below this (Tmin).
    pub t_min: f64,

    /// Exponential cooling rate: `T = Tmax * exp(-R * step)`.
    pub cooling_rate: f64,

    /// Trials between cooling steps (k).
    pub trials_per_step: usize,

    /// Optimization sense.
    pub sense: Sense,

    /// Random seed. Same seed, same run.
    pub seed: u64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            t_max: 100.0,
            t_min: 0.001,
            cooling_rate: 0.01,
            trials_per_step: 10,
            sense: Sense::Minimize,
            seed: 42,
        }
    }
}

impl AnnealingConfig {
    /// Set the starting temperature.
    pub fn with_t_max(mut self, t_max: f64) -> Self {
        self.t_max = t_max;
        self
    }

    /// Set the stopping temperature.
    pub fn with_t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    /// Set the cooling rate.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Set the trials per cooling step.
    pub fn with_trials_per_step(mut self, k: usize) -> Self {
        self.trials_per_step = k;
        self
    }

    /// Set the optimization sense.
    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Temperature after `step` cooling steps.
    #[must_use]
    pub fn temperature_at(&self, step: usize) -> f64 {
        self.t_max * (-self.cooling_rate * step as f64).exp()
    }

    /// Reject parameters the search cannot run with.
    ///
    /// A schedule that never drops below `t_min` would never stop, so
    /// `cooling_rate` must be positive whenever `t_min < t_max`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.t_max.is_finite() && self.t_max > 0.0) {
            return Err(ConfigError::invalid("t_max", format!("{} must be positive", self.t_max)));
        }
        if !(self.t_min.is_finite() && self.t_min > 0.0) {
            return Err(ConfigError::invalid("t_min", format!("{} must be positive", self.t_min)));
        }
        if !self.cooling_rate.is_finite() {
            return Err(ConfigError::invalid("cooling_rate", "must be finite"));
        }
        if self.t_min < self.t_max && self.cooling_rate <= 0.0 {
            return Err(ConfigError::invalid(
                "cooling_rate",
                "must be positive or the temperature never reaches t_min",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sense_parse() {
        assert_eq!("minimize".parse::<Sense>(), Ok(Sense::Minimize));
        assert_eq!("maximize".parse::<Sense>(), Ok(Sense::Maximize));
        assert_eq!(
            "Minimise".parse::<Sense>(),
            Err(ConfigError::UnknownSense("Minimise".to_string()))
        );
    }

    #[test]
    fn test_sense_comparisons() {
        assert!(Sense::Minimize.is_better(1.0, 2.0));
        assert!(!Sense::Minimize.is_better(2.0, 2.0));
        assert!(Sense::Maximize.is_better(3.0, 2.0));

        assert_eq!(Sense::Minimize.worsening(5.0, 7.0), 2.0);
        assert_eq!(Sense::Maximize.worsening(5.0, 7.0), -2.0);
    }

    #[test]
    fn test_best_index_first_tie() {
        let values = [4.0, 2.0, 7.0, 2.0];
        assert_eq!(Sense::Minimize.best_index(&values), Some(1));
        assert_eq!(Sense::Maximize.best_index(&values), Some(2));
        assert_eq!(Sense::Minimize.best_index(&[]), None);
    }

    #[test]
    fn test_genetic_defaults() {
        let config = GeneticConfig::default();
        assert_eq!(config.generations, 100);
        assert_eq!(config.population_size, 30);
        assert_eq!(config.genome_length, 10);
        assert_eq!(config.tournament_size, 2);
        assert_eq!(config.sense, Sense::Minimize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_genetic_builder_and_validation() {
        let config = GeneticConfig::default()
            .with_generations(5)
            .with_population_size(8)
            .with_cross_prob(1.5);
        assert_eq!(config.generations, 5);
        assert_eq!(config.population_size, 8);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "cross_prob", .. })
        ));

        let config = GeneticConfig::default().with_mut_prob(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_annealing_defaults() {
        let config = AnnealingConfig::default();
        assert_eq!(config.t_max, 100.0);
        assert_eq!(config.t_min, 0.001);
        assert_eq!(config.cooling_rate, 0.01);
        assert_eq!(config.trials_per_step, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_temperature_schedule() {
        let config = AnnealingConfig::default();
        assert_eq!(config.temperature_at(0), 100.0);
        assert!((config.temperature_at(100) - 100.0 * (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_annealing_validation() {
        let zero_rate = AnnealingConfig::default().with_cooling_rate(0.0);
        assert!(matches!(
            zero_rate.validate(),
            Err(ConfigError::InvalidParameter { name: "cooling_rate", .. })
        ));

        // Already below t_min: the rate does not matter.
        let cold = AnnealingConfig::default()
            .with_t_max(1.0)
            .with_t_min(5.0)
            .with_cooling_rate(0.0);
        assert!(cold.validate().is_ok());

        assert!(AnnealingConfig::default().with_t_max(0.0).validate().is_err());
        assert!(AnnealingConfig::default().with_t_min(0.0).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GeneticConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: GeneticConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        let json = serde_json::to_string(&AnnealingConfig::default()).unwrap();
        assert!(json.contains("\"sense\":\"minimize\""));
    }
}
