//! Alpha-beta solver for zero-sum, perfect-information games.
//!
//! The scalar value of a state is the first party's utility. The first
//! party maximizes it and the second party minimizes it, so the role flips
//! at every ply. `alpha` is the value the maximizer is already guaranteed
//! elsewhere in the tree and `beta` the value the minimizer is guaranteed;
//! a node stops scanning its children as soon as its value crosses the
//! opposite bound.
//!
//! Actions are shuffled at every node when the configuration asks for it.
//! This changes how many nodes get expanded but never the proven value.

use std::time::Instant;

use crate::search::config::{Decision, SearchConfig, SearchError, SearchStats};
use crate::search::game::{GameError, Player, ZeroSum};
use crate::search::ordering::ActionOrdering;

/// Branch-and-bound minimax solver.
///
/// # Example
/// ```
/// use game_search::games::tic_tac_toe::TicTacToe;
/// use game_search::search::{AlphaBetaSolver, Game, SearchConfig};
///
/// let game = TicTacToe::new();
/// let mut solver = AlphaBetaSolver::new(game.clone(), SearchConfig::seeded(42));
/// let decision = solver.solve(&game.initial_state()).unwrap();
/// assert_eq!(decision.value, 0.0); // tic-tac-toe is a draw
/// ```
pub struct AlphaBetaSolver<G: ZeroSum> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: SearchConfig,

    /// Per-node action ordering.
    ordering: ActionOrdering,

    /// Node counter for the solve in progress.
    nodes: u64,

    /// Statistics of the last solve.
    stats: SearchStats,
}

impl<G: ZeroSum> AlphaBetaSolver<G> {
    /// Create a new alpha-beta solver for the given game.
    pub fn new(game: G, config: SearchConfig) -> Self {
        let ordering = ActionOrdering::from_config(&config);
        Self {
            game,
            config,
            ordering,
            nodes: 0,
            stats: SearchStats::new(),
        }
    }

    /// Pick an optimal action for the mover of `state`.
    ///
    /// The returned value is the first party's utility under optimal play
    /// after the chosen action.
    pub fn solve(&mut self, state: &G::State) -> Result<Decision<G::Action, f64>, SearchError> {
        if self.game.is_terminal(state) {
            return Err(SearchError::Precondition("solve requested on a terminal state"));
        }

        let start = Instant::now();
        self.nodes = 0;

        let mover = self.game.mover(state);
        let mut actions = self.game.legal_actions(state)?;
        self.ordering.order(&mut actions);

        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<(usize, f64)> = None;

        for (i, action) in actions.iter().enumerate() {
            let child = self.game.transition(state, action);
            let value = self.minimax(&child, alpha, beta)?;

            // Children searched after the first may return a bound at or
            // behind the running best; the strict comparison never picks them.
            match mover {
                Player::First => {
                    if best.map_or(true, |(_, v)| value > v) {
                        best = Some((i, value));
                    }
                    alpha = alpha.max(value);
                }
                Player::Second => {
                    if best.map_or(true, |(_, v)| value < v) {
                        best = Some((i, value));
                    }
                    beta = beta.min(value);
                }
            }
        }

        let (index, value) = best.ok_or_else(|| {
            SearchError::Game(GameError::InvalidState(self.game.state_description(state)))
        })?;

        self.stats = SearchStats {
            nodes_expanded: self.nodes,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
        log::debug!(
            "alpha-beta solve: {} chose {} with value {} ({} nodes)",
            mover,
            self.game.action_name(&actions[index]),
            value,
            self.nodes
        );

        Ok(Decision {
            action: actions.swap_remove(index),
            value,
            stats: self.stats,
        })
    }

    /// Minimax value of `state` from the first party's perspective.
    pub fn value(&mut self, state: &G::State) -> Result<f64, SearchError> {
        if self.game.is_terminal(state) {
            return Ok(self.game.payoffs(state)[Player::First]);
        }
        Ok(self.solve(state)?.value)
    }

    fn minimax(&mut self, state: &G::State, mut alpha: f64, mut beta: f64) -> Result<f64, GameError> {
        self.nodes += 1;

        if self.game.is_terminal(state) {
            return Ok(self.game.payoffs(state)[Player::First]);
        }

        let mut actions = self.game.available_actions(state);
        if actions.is_empty() {
            return Err(GameError::InvalidState(self.game.state_description(state)));
        }
        self.ordering.order(&mut actions);

        match self.game.mover(state) {
            Player::First => {
                let mut value = f64::NEG_INFINITY;
                for action in &actions {
                    let child = self.game.transition(state, action);
                    value = value.max(self.minimax(&child, alpha, beta)?);
                    if value >= beta {
                        return Ok(value);
                    }
                    alpha = alpha.max(value);
                }
                Ok(value)
            }
            Player::Second => {
                let mut value = f64::INFINITY;
                for action in &actions {
                    let child = self.game.transition(state, action);
                    value = value.min(self.minimax(&child, alpha, beta)?);
                    if value <= alpha {
                        return Ok(value);
                    }
                    beta = beta.min(value);
                }
                Ok(value)
            }
        }
    }

    /// Statistics of the last solve.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
