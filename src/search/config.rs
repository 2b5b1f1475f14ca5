//! Configuration and result types for the search solvers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::game::GameError;

/// Configuration shared by the exact and pruned solvers.
///
/// # Example
/// ```
/// use game_search::search::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert!(config.shuffle_actions);
/// assert!(config.seed.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Shuffle legal actions before scanning them.
    ///
    /// The exact solver shuffles the root actions once per decision, which
    /// only changes which of several equally valued actions is returned.
    /// The pruned solver shuffles at every node, which changes how much of
    /// the tree gets pruned but never the proven value.
    pub shuffle_actions: bool,

    /// Random seed for reproducibility.
    ///
    /// If set, action shuffling is reproducible. If `None`, a random seed
    /// is used.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shuffle_actions: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Create a new SearchConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan actions in the order the game enumerates them.
    pub fn deterministic() -> Self {
        Self {
            shuffle_actions: false,
            seed: None,
        }
    }

    /// Shuffle actions with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            shuffle_actions: true,
            seed: Some(seed),
        }
    }

    /// Builder method: set whether to shuffle actions.
    pub fn with_shuffle(mut self, enable: bool) -> Self {
        self.shuffle_actions = enable;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Instrumentation gathered during a single solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States visited below the root, terminal states included.
    pub nodes_expanded: u64,

    /// Wall time of the solve (in seconds).
    pub elapsed_seconds: f64,
}

impl SearchStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes per second, zero if no time was measured.
    pub fn nodes_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.nodes_expanded as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }
}

/// The action chosen by a solver together with its proven value.
///
/// `V` is a [`Utilities`](crate::search::Utilities) vector for the exact
/// solver and a scalar for the pruned solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A, V> {
    /// The chosen action.
    pub action: A,
    /// Value of the state reached by `action`.
    pub value: V,
    /// Instrumentation for this solve.
    pub stats: SearchStats,
}

/// Errors that can occur when asking a solver for a decision.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A decision was requested on a terminal state.
    Precondition(&'static str),
    /// The game violated its own contract.
    Game(GameError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Precondition(msg) => write!(f, "Precondition violated: {}", msg),
            SearchError::Game(err) => write!(f, "Game error: {}", err),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Game(err) => Some(err),
            SearchError::Precondition(_) => None,
        }
    }
}

impl From<GameError> for SearchError {
    fn from(err: GameError) -> Self {
        SearchError::Game(err)
    }
}
