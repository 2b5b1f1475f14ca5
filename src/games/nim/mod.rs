//! Nim, the subtraction game.
//!
//! ## Game Rules
//!
//! - A single pile of objects
//! - Players alternate removing 1 to 3 objects (or up to `max_take`)
//! - The player who takes the last object wins; the player left facing an
//!   empty pile has lost
//!
//! ## Known Solution
//!
//! With `max_take = 3`, the mover loses under optimal play exactly when the
//! pile is a multiple of 4. The winning move always leaves a multiple of 4
//! for the opponent.

use std::fmt;

use crate::search::game::{Action, Game, GameState, Player, Utilities, ZeroSum};

/// Remove a number of objects from the pile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Take(u32);

impl Take {
    /// Take `amount` objects.
    pub fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Number of objects removed.
    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl Action for Take {
    fn label(&self) -> String {
        format!("take {}", self.0)
    }
}

impl fmt::Display for Take {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "removes 1 object"),
            n => write!(f, "removes {} objects", n),
        }
    }
}

/// Complete game state in Nim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NimState {
    /// Objects left on the pile.
    pub remaining: u32,
    /// Party to move.
    pub mover: Player,
}

impl GameState for NimState {}

impl fmt::Display for NimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remaining {
            1 => write!(f, "1 object left, {} to move", self.mover),
            n => write!(f, "{} objects left, {} to move", n, self.mover),
        }
    }
}

/// Nim game.
#[derive(Debug, Clone)]
pub struct Nim {
    /// Starting pile size.
    pile: u32,
    /// Largest amount that may be removed in one move.
    max_take: u32,
}

impl Nim {
    /// Create a new Nim game where up to 3 objects may be taken per move.
    pub fn new(pile: u32) -> Self {
        Self { pile, max_take: 3 }
    }

    /// Builder method: set the largest amount per move (at least 1).
    pub fn with_max_take(mut self, max_take: u32) -> Self {
        self.max_take = max_take.max(1);
        self
    }

    /// Starting pile size.
    pub fn pile(&self) -> u32 {
        self.pile
    }

    /// Largest amount per move.
    pub fn max_take(&self) -> u32 {
        self.max_take
    }

    /// Whether the mover loses a pile of `remaining` under optimal play.
    pub fn is_losing(&self, remaining: u32) -> bool {
        remaining % self.max_take.saturating_add(1) == 0
    }
}

impl Game for Nim {
    type State = NimState;
    type Action = Take;

    fn initial_state(&self) -> NimState {
        NimState {
            remaining: self.pile,
            mover: Player::First,
        }
    }

    fn mover(&self, state: &NimState) -> Player {
        state.mover
    }

    fn is_terminal(&self, state: &NimState) -> bool {
        state.remaining == 0
    }

    fn available_actions(&self, state: &NimState) -> Vec<Take> {
        (1..=self.max_take.min(state.remaining)).map(Take).collect()
    }

    fn transition(&self, state: &NimState, action: &Take) -> NimState {
        NimState {
            remaining: state.remaining - action.0,
            mover: state.mover.other(),
        }
    }

    fn payoffs(&self, state: &NimState) -> Utilities {
        // The party facing the empty pile did not take the last object.
        Utilities::win(state.mover.other(), 1.0)
    }

    fn state_description(&self, state: &NimState) -> String {
        state.to_string()
    }
}

impl ZeroSum for Nim {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::game::GameError;

    #[test]
    fn test_nim_actions() {
        let game = Nim::new(2);
        let state = game.initial_state();
        assert_eq!(game.legal_actions(&state).unwrap(), vec![Take(1), Take(2)]);

        let big = NimState {
            remaining: 10,
            mover: Player::Second,
        };
        assert_eq!(game.legal_actions(&big).unwrap().len(), 3);

        let wide = Nim::new(10).with_max_take(5);
        assert_eq!(wide.legal_actions(&wide.initial_state()).unwrap().len(), 5);
    }

    #[test]
    fn test_nim_transition_flips_mover() {
        let game = Nim::new(5);
        let state = game.apply(&game.initial_state(), &Take(2)).unwrap();
        assert_eq!(state.remaining, 3);
        assert_eq!(state.mover, Player::Second);
    }

    #[test]
    fn test_nim_last_taker_wins() {
        let game = Nim::new(1);
        let state = game.apply(&game.initial_state(), &Take(1)).unwrap();
        assert!(game.is_terminal(&state));

        let u = game.utilities(&state).unwrap();
        assert_eq!(u[Player::First], 1.0);
        assert_eq!(u[Player::Second], -1.0);
    }

    #[test]
    fn test_nim_checked_operations() {
        let game = Nim::new(2);
        let state = game.initial_state();

        assert!(matches!(
            game.apply(&state, &Take(3)),
            Err(GameError::InvalidAction { .. })
        ));
        assert!(matches!(
            game.utilities(&state),
            Err(GameError::Precondition(_))
        ));

        let done = game.apply(&state, &Take(2)).unwrap();
        assert!(game.legal_actions(&done).unwrap().is_empty());
        assert!(game.apply(&done, &Take(1)).is_err());
    }

    #[test]
    fn test_losing_positions() {
        let game = Nim::new(0);
        assert!(game.is_losing(8));
        assert!(!game.is_losing(9));
        assert!(Nim::new(0).with_max_take(2).is_losing(9));

        let unbounded = Nim::new(5).with_max_take(u32::MAX);
        assert!(unbounded.is_losing(0));
        assert!(!unbounded.is_losing(5));
        assert_eq!(unbounded.legal_actions(&unbounded.initial_state()).unwrap().len(), 5);
    }
}
