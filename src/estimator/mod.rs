//! Play-or-refuse estimates for the hidden-information card game.
//!
//! # Overview
//!
//! In the card game each party sees only its own hand, so the
//! perfect-information solvers in [`crate::search`] do not apply directly.
//! This module estimates the quantities each party needs instead:
//!
//! - **[`combinatorics`]**: exact probabilities that an unseen hand holds
//!   only lower cards, plus closed forms used to check the estimator.
//! - **[`MonteCarloEstimator`]**: first-party payoffs and expected hand
//!   maxima over random deals. A budget of at least `N!` enumerates every
//!   deal, which makes the result exact.
//! - **[`MaxValueCache`]**: expected maxima persisted in a JSON file keyed by
//!   `"(N, k)"`, so repeated runs skip the estimation.
//! - **[`HiddenInfoPolicy`]**: each party plays iff the expected payoff of
//!   playing strictly beats refusing.
//!
//! # Example
//!
//! ```
//! use game_search::estimator::{
//!     EstimatorConfig, HiddenInfoPolicy, MaxValueCache, MonteCarloEstimator,
//! };
//! use game_search::games::cards::CardGame;
//! use game_search::search::Game;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = EstimatorConfig::new(8, 2, 2.0).with_samples(2_000).with_seed(9);
//! let estimator = MonteCarloEstimator::new(config).unwrap();
//! let mut cache = MaxValueCache::in_memory();
//! let policy = HiddenInfoPolicy::from_estimator(&estimator, &mut cache);
//!
//! let mut rng = StdRng::seed_from_u64(9);
//! let game = CardGame::shuffled(8, 2, 2.0, &mut rng).unwrap();
//! let (first, second) = policy.solve_card_state(&game, &game.initial_state());
//! println!("P1 {} / P2 {}", first, second);
//! ```

pub mod cache;
pub mod combinatorics;
pub mod config;
pub mod deal;
pub mod decision;
pub mod monte_carlo;

pub use cache::{CacheError, MaxValueCache};
pub use config::{ConfigError, EstimatorConfig};
pub use deal::{Deal, PartyView};
pub use decision::{ChoiceValues, HiddenInfoPolicy, Payoffs};
pub use monte_carlo::{Budget, Estimate, MonteCarloEstimator, PolicyOutcome, Tally};
