//! Seedable move ordering.
//!
//! Randomized tie-breaking is kept out of the value computation: solvers
//! hand their action lists to an `ActionOrdering` before scanning them, and
//! a fixed seed makes the whole search reproducible.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::search::config::SearchConfig;

/// Reorders action lists before a solver scans them.
#[derive(Debug, Clone)]
pub struct ActionOrdering {
    /// `None` keeps the game's enumeration order.
    rng: Option<StdRng>,
}

impl ActionOrdering {
    /// Keep actions in enumeration order.
    pub fn natural() -> Self {
        Self { rng: None }
    }

    /// Shuffle actions with a reproducible seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }

    /// Build the ordering described by a search configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        if !config.shuffle_actions {
            return Self::natural();
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng: Some(rng) }
    }

    /// Whether this ordering shuffles.
    pub fn is_shuffled(&self) -> bool {
        self.rng.is_some()
    }

    /// Reorder `actions` in place.
    pub fn order<A>(&mut self, actions: &mut [A]) {
        if let Some(rng) = self.rng.as_mut() {
            actions.shuffle(rng);
        }
    }
}
