//! Concrete games for the search and estimation engines.
//!
//! These serve as:
//!
//! 1. **Validation**: Nim and tic-tac-toe have well-known solutions that
//!    check both solvers.
//!
//! 2. **Examples**: each module shows how to implement the `Game` trait.
//!
//! 3. **Benchmarks**: tic-tac-toe is the standard workload for comparing the
//!    exact and pruned solvers.
//!
//! ## Available Games
//!
//! - [`nim`]: single-pile take-away game, zero-sum
//! - [`tic_tac_toe`]: 3x3 noughts and crosses, zero-sum
//! - [`ones`]: bit-writing game with a general-sum score
//! - [`cards`]: card game with hidden hands, see [`crate::estimator`]
//!
//! ## Adding New Games
//!
//! 1. Create a new module under `src/games/`
//! 2. Define state and action types
//! 3. Implement the `Game` trait (and `ZeroSum` if utilities always cancel)
//! 4. Add tests that solve small positions

pub mod cards;
pub mod nim;
pub mod ones;
pub mod tic_tac_toe;
