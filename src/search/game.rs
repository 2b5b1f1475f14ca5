//! Game trait definition for the search solvers.
//!
//! Any two-party sequential game that implements the `Game` trait can be
//! solved by the exact and pruned solvers. This keeps the algorithms free
//! of game-specific code.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::ops::Index;

/// Trait for actions that can be taken in a game.
///
/// Actions are only meaningful relative to the state they were enumerated
/// from. They must be cloneable, comparable, and hashable.
pub trait Action: Clone + Eq + Hash + Debug + Send + Sync {
    /// Short label for display and logging.
    fn label(&self) -> String;
}

/// Trait for game states.
///
/// A game state is an immutable snapshot. Transitions always return a new
/// state; nothing mutates a state after it was created.
pub trait GameState: Clone + Debug + Send + Sync {}

/// One of the two parties of a sequential game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    /// The party that moves first from the initial state.
    First,
    /// The party that answers.
    Second,
}

impl Player {
    /// Both parties, in turn order.
    pub const BOTH: [Player; 2] = [Player::First, Player::Second];

    /// The opposing party.
    pub const fn other(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Index into per-party arrays (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "Player 1"),
            Player::Second => write!(f, "Player 2"),
        }
    }
}

/// Terminal payoff for both parties, indexed by [`Player`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Utilities([f64; 2]);

impl Utilities {
    /// Build a utility vector from the first and second party's payoffs.
    pub const fn new(first: f64, second: f64) -> Self {
        Self([first, second])
    }

    /// Zero-sum outcome where `winner` gains `stake` and the other party loses it.
    pub fn win(winner: Player, stake: f64) -> Self {
        let mut values = [-stake; 2];
        values[winner.index()] = stake;
        Self(values)
    }

    /// Zero-sum draw.
    pub const fn draw() -> Self {
        Self([0.0, 0.0])
    }

    /// Payoff of a single party.
    pub fn get(&self, player: Player) -> f64 {
        self.0[player.index()]
    }

    /// Sum over both parties (zero for zero-sum games).
    pub fn sum(&self) -> f64 {
        self.0[0] + self.0[1]
    }

    /// Raw `[first, second]` pair.
    pub fn as_array(&self) -> [f64; 2] {
        self.0
    }
}

impl Index<Player> for Utilities {
    type Output = f64;

    fn index(&self, player: Player) -> &f64 {
        &self.0[player.index()]
    }
}

impl fmt::Display for Utilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0[0], self.0[1])
    }
}

/// Errors raised by the checked game operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The action is not legal in the given state.
    InvalidAction {
        /// Label of the rejected action.
        action: String,
        /// Description of the state it was applied to.
        state: String,
    },
    /// A non-terminal state without legal actions. Always a defect in the game.
    InvalidState(String),
    /// Utilities requested on a non-terminal state.
    Precondition(&'static str),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidAction { action, state } => {
                write!(f, "Action {} is not legal in state {}", action, state)
            }
            GameError::InvalidState(state) => {
                write!(f, "Non-terminal state has no legal actions: {}", state)
            }
            GameError::Precondition(msg) => write!(f, "Precondition violated: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

/// The main Game trait that defines the interface for any game.
///
/// Implementors provide the raw rules (`available_actions`, `transition`,
/// `payoffs`); the checked operations `legal_actions`, `apply` and
/// `utilities` are derived from them.
///
/// # Example
/// ```ignore
/// struct MyGame;
///
/// impl Game for MyGame {
///     type State = MyState;
///     type Action = MyAction;
///
///     // ... implement required methods
/// }
/// ```
pub trait Game: Clone + Send + Sync {
    /// The type representing a complete game state.
    type State: GameState;

    /// The type representing an action the mover can take.
    type Action: Action;

    /// Create the initial game state.
    fn initial_state(&self) -> Self::State;

    /// The party whose turn it is.
    fn mover(&self, state: &Self::State) -> Player;

    /// Check if the given state is terminal (game over).
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Enumerate the mover's actions.
    ///
    /// Must be non-empty for every non-terminal state. The value returned
    /// for terminal states is ignored.
    fn available_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply an action without checking legality.
    ///
    /// Must return a new state whose mover is the other party.
    fn transition(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Terminal payoffs. Only called on terminal states.
    fn payoffs(&self, state: &Self::State) -> Utilities;

    /// Legal actions of the mover, empty for terminal states.
    fn legal_actions(&self, state: &Self::State) -> Result<Vec<Self::Action>, GameError> {
        if self.is_terminal(state) {
            return Ok(Vec::new());
        }
        let actions = self.available_actions(state);
        if actions.is_empty() {
            return Err(GameError::InvalidState(self.state_description(state)));
        }
        Ok(actions)
    }

    /// Apply a legal action and return the resulting state.
    fn apply(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State, GameError> {
        if !self.legal_actions(state)?.contains(action) {
            return Err(GameError::InvalidAction {
                action: self.action_name(action),
                state: self.state_description(state),
            });
        }
        Ok(self.transition(state, action))
    }

    /// Utilities of a terminal state.
    fn utilities(&self, state: &Self::State) -> Result<Utilities, GameError> {
        if !self.is_terminal(state) {
            return Err(GameError::Precondition("utilities requested on a non-terminal state"));
        }
        Ok(self.payoffs(state))
    }

    /// Get a human-readable name for an action.
    fn action_name(&self, action: &Self::Action) -> String {
        action.label()
    }

    /// Get a human-readable description of a state.
    fn state_description(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}

/// Marker for games whose utilities always sum to zero.
///
/// The pruned solver reads a single scalar, the first party's utility,
/// and is only sound for games implementing this trait.
pub trait ZeroSum: Game {}

/// Macro to simplify implementing the Action trait for simple enums.
#[macro_export]
macro_rules! impl_action {
    ($type:ty) => {
        impl $crate::search::game::Action for $type {
            fn label(&self) -> String {
                format!("{:?}", self)
            }
        }
    };
}

/// Macro to simplify implementing the GameState trait.
#[macro_export]
macro_rules! impl_game_state {
    ($type:ty) => {
        impl $crate::search::game::GameState for $type {}
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_alternation() {
        assert_eq!(Player::First.other(), Player::Second);
        assert_eq!(Player::Second.other(), Player::First);
        assert_eq!(Player::First.index(), 0);
        assert_eq!(Player::Second.index(), 1);
    }

    #[test]
    fn test_utilities_win_is_zero_sum() {
        let u = Utilities::win(Player::Second, 2.5);
        assert_eq!(u[Player::First], -2.5);
        assert_eq!(u[Player::Second], 2.5);
        assert_eq!(u.sum(), 0.0);
        assert_eq!(Utilities::draw().as_array(), [0.0, 0.0]);
    }
}
