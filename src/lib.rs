//! # Game Search
//!
//! Exact and pruned game-tree search for two-party sequential games, plus a
//! play-or-refuse estimator for a card game with hidden hands.
//!
//! ## Features
//!
//! - **Generic Game Model**: any game implementing the `Game` trait
//! - **Exact Solver**: backward induction with a cooperative tie-break,
//!   general-sum utilities
//! - **Alpha-Beta Solver**: pruned minimax for zero-sum games, same value
//!   with fewer nodes
//! - **Hidden-Information Estimator**: exact combinatorics and parallel
//!   Monte-Carlo over deals, with a JSON cache of expected maxima
//!
//! ## Quick Start
//!
//! ```
//! use game_search::games::nim::Nim;
//! use game_search::{ExactSolver, Game, Player, SearchConfig};
//!
//! let game = Nim::new(10);
//! let mut solver = ExactSolver::new(game.clone(), SearchConfig::seeded(3));
//! let decision = solver.solve(&game.initial_state()).unwrap();
//!
//! // 10 is not a multiple of 4, so the mover wins by taking 2.
//! assert_eq!(decision.action.amount(), 2);
//! assert_eq!(decision.value[Player::First], 1.0);
//! ```
//!
//! ## Modules
//!
//! - [`search`]: game model and solvers
//! - [`estimator`]: hidden-information estimates for the card game
//! - [`games`]: Nim, tic-tac-toe, the ones game and the card game
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │   ExactSolver / AlphaBeta    │     │   Estimator (Monte-Carlo,    │
//! │   (generic over Game)        │     │   combinatorics, cache)      │
//! └──────────────────────────────┘     └──────────────────────────────┘
//!                │                                    │
//!                │ implements Game                    │ reads hands of
//!                ▼                                    ▼
//!   ┌──────┬─────────────┬──────┐              ┌────────────┐
//!   │ Nim  │ Tic-tac-toe │ Ones │              │ Card game  │
//!   └──────┴─────────────┴──────┘              └────────────┘
//! ```

#![warn(missing_docs)]

/// Game model and perfect-information solvers.
pub mod search;

/// Hidden-information estimator for the card game.
pub mod estimator;

/// Game implementations module.
///
/// Contains the games used to exercise the solvers and the estimator.
pub mod games;

// Re-export commonly used types at crate root for convenience
pub use estimator::{EstimatorConfig, HiddenInfoPolicy, MonteCarloEstimator};
pub use search::{
    AlphaBetaSolver, ExactSolver, Game, GameError, Player, SearchConfig, SearchError, Utilities,
    ZeroSum,
};
