//! Game-tree search over two-party sequential games.
//!
//! This module provides the shared game model and the two perfect-information
//! solvers built on it.
//!
//! # Overview
//!
//! A game is described by the [`Game`] trait: a mover, a legal action set, a
//! deterministic transition and a terminal utility vector. Solvers are
//! generic over it and know nothing about the concrete game.
//!
//! - **[`ExactSolver`]**: full backward induction, one utility per party,
//!   cooperative tie-break. Works for general-sum games.
//! - **[`AlphaBetaSolver`]**: minimax with alpha-beta pruning for games that
//!   implement [`ZeroSum`]. Proves the same value as the exact solver while
//!   expanding fewer nodes.
//!
//! Both solvers return a [`Decision`] carrying the chosen action, its value
//! and a [`SearchStats`] node counter.
//!
//! # Example
//!
//! ```
//! use game_search::games::tic_tac_toe::TicTacToe;
//! use game_search::search::{AlphaBetaSolver, ExactSolver, Game, Player, SearchConfig};
//!
//! let game = TicTacToe::new();
//! let state = game.initial_state();
//!
//! let mut exact = ExactSolver::new(game.clone(), SearchConfig::seeded(1));
//! let mut pruned = AlphaBetaSolver::new(game.clone(), SearchConfig::seeded(1));
//!
//! let a = exact.solve(&state).unwrap();
//! let b = pruned.solve(&state).unwrap();
//! assert_eq!(a.value[Player::First], b.value);
//! assert!(b.stats.nodes_expanded < a.stats.nodes_expanded);
//! ```

pub mod config;
pub mod exact;
pub mod game;
pub mod ordering;
pub mod pruned;

// Re-export main types for convenient access
pub use config::{Decision, SearchConfig, SearchError, SearchStats};
pub use exact::ExactSolver;
pub use game::{Action, Game, GameError, GameState, Player, Utilities, ZeroSum};
pub use ordering::ActionOrdering;
pub use pruned::AlphaBetaSolver;
