//! Progress reporting hooks.
//!
//! Searches emit a [`SearchEvent`] per generation, trial and cooling step.
//! Any `FnMut(&SearchEvent)` closure is an observer:
//!
//! ```
//! use kurtan_solver::search::{GeneticConfig, GeneticSearch, SearchEvent};
//!
//! let config = GeneticConfig::default().with_generations(3).with_population_size(6);
//! let mut best = Vec::new();
//! let mut observer = |event: &SearchEvent| {
//!     if let SearchEvent::Generation { best_cost, .. } = event {
//!         best.push(*best_cost);
//!     }
//! };
//! GeneticSearch::new(config).run_with(&mut observer).unwrap();
//! assert!(!best.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// One step of search progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchEvent {
    /// A genetic generation was evaluated. Generation 0 is the initial population.
    Generation {
        generation: usize,
        best_cost: f64,
        mean_cost: f64,
    },
    /// An annealing candidate was evaluated.
    Trial {
        trial: usize,
        cost: f64,
        accepted: bool,
    },
    /// The annealing temperature dropped.
    Cooling { step: usize, temperature: f64 },
    /// The search stopped.
    Finished { cost: f64, evaluations: usize },
}

/// Receives search progress.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> SearchObserver for F {
    fn on_event(&mut self, event: &SearchEvent) {
        self(event);
    }
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Observer that stores every event.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<SearchEvent>,
}

impl SearchObserver for EventLog {
    fn on_event(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}
