//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Counters collected during a search run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Cost evaluations (genomes replayed or states scored).
    pub evaluations: usize,

    /// Moves the engine accepted while replaying or probing.
    pub accepted_moves: usize,

    /// Moves the engine rejected.
    pub rejected_moves: usize,

    /// Stuck boxes pulled back.
    pub pulls: usize,

    /// Annealing trials where no move was possible.
    pub degenerate_neighbors: usize,

    /// Annealing candidates accepted although not better.
    pub uphill_accepted: usize,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate evaluations per second.
    #[must_use]
    pub fn evaluations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.evaluations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of attempted moves the engine rejected.
    #[must_use]
    pub fn rejection_rate(&self) -> f64 {
        let attempted = self.accepted_moves + self.rejected_moves;
        if attempted == 0 {
            0.0
        } else {
            self.rejected_moves as f64 / attempted as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.evaluations, 0);
        assert_eq!(stats.pulls, 0);
        assert_eq!(stats.rejection_rate(), 0.0);
    }

    #[test]
    fn test_stats_evaluations_per_second() {
        let mut stats = SearchStats::new();
        stats.evaluations = 1000;
        stats.time_us = 1_000_000; // 1 second

        assert_eq!(stats.evaluations_per_second(), 1000.0);
    }

    #[test]
    fn test_rejection_rate() {
        let mut stats = SearchStats::new();
        stats.accepted_moves = 3;
        stats.rejected_moves = 1;
        assert_eq!(stats.rejection_rate(), 0.25);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.evaluations = 100;
        stats.pulls = 50;

        stats.reset();

        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = SearchStats::new();
        stats.evaluations = 42;

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats.evaluations, deserialized.evaluations);
    }
}
