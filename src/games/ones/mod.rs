//! The ones game, a general-sum bit-playing game.
//!
//! ## Game Rules
//!
//! - The parties alternate playing a bit (0 or 1) for a fixed number of rounds
//! - Each party scores the number of ones it played
//! - A party scores one bonus point every time its bit differs from its
//!   previous one
//! - Every round in which both parties played a one costs both of them 2
//!
//! Payoffs are not linked by a zero-sum constraint, so the game exercises
//! the exact solver's per-party values and its cooperative tie-break.

use std::fmt;

use crate::search::game::{Action, Game, GameState, Player, Utilities};

/// Default number of rounds.
pub const DEFAULT_ROUNDS: usize = 8;

/// Cost charged to both parties for a round where both played a one.
const COLLISION_COST: f64 = 2.0;

/// The bit a party plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    /// Play a zero.
    Zero,
    /// Play a one.
    One,
}

impl Bit {
    fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl Action for Bit {
    fn label(&self) -> String {
        self.value().to_string()
    }
}

/// Complete game state in the ones game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OnesState {
    /// Party to move.
    pub mover: Player,
    /// Every bit played so far, alternating between the parties.
    pub history: Vec<u8>,
}

impl GameState for OnesState {}

impl OnesState {
    /// Bits played by one party, in order.
    pub fn bits_of(&self, player: Player) -> Vec<u8> {
        self.history
            .iter()
            .skip(player.index())
            .step_by(2)
            .copied()
            .collect()
    }
}

impl fmt::Display for OnesState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |bits: Vec<u8>| bits.iter().map(|b| b.to_string()).collect::<String>();
        write!(
            f,
            "P1: {} P2: {}",
            render(self.bits_of(Player::First)),
            render(self.bits_of(Player::Second))
        )
    }
}

/// The ones game.
#[derive(Debug, Clone)]
pub struct OnesGame {
    /// Rounds per party.
    rounds: usize,
}

impl Default for OnesGame {
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl OnesGame {
    /// Create a game with the given number of rounds per party.
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    /// Rounds per party.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Game for OnesGame {
    type State = OnesState;
    type Action = Bit;

    fn initial_state(&self) -> OnesState {
        OnesState {
            mover: Player::First,
            history: Vec::with_capacity(2 * self.rounds),
        }
    }

    fn mover(&self, state: &OnesState) -> Player {
        state.mover
    }

    fn is_terminal(&self, state: &OnesState) -> bool {
        state.history.len() >= 2 * self.rounds
    }

    fn available_actions(&self, _state: &OnesState) -> Vec<Bit> {
        vec![Bit::Zero, Bit::One]
    }

    fn transition(&self, state: &OnesState, action: &Bit) -> OnesState {
        let mut history = state.history.clone();
        history.push(action.value());
        OnesState {
            mover: state.mover.other(),
            history,
        }
    }

    fn payoffs(&self, state: &OnesState) -> Utilities {
        let first = state.bits_of(Player::First);
        let second = state.bits_of(Player::Second);

        let score = |bits: &[u8]| {
            let ones: u32 = bits.iter().map(|&b| b as u32).sum();
            let switches = bits.windows(2).filter(|w| w[0] != w[1]).count() as u32;
            (ones + switches) as f64
        };
        let collisions = first
            .iter()
            .zip(&second)
            .filter(|(&a, &b)| a == 1 && b == 1)
            .count() as f64;

        Utilities::new(
            score(&first) - COLLISION_COST * collisions,
            score(&second) - COLLISION_COST * collisions,
        )
    }

    fn state_description(&self, state: &OnesState) -> String {
        state.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ExactSolver, SearchConfig};

    fn play(game: &OnesGame, bits: &[Bit]) -> OnesState {
        bits.iter().fold(game.initial_state(), |state, bit| {
            game.apply(&state, bit).unwrap()
        })
    }

    #[test]
    fn test_payoffs() {
        use Bit::{One, Zero};
        let game = OnesGame::new(3);
        // P1 plays 1,0,1 and P2 plays 1,1,0.
        let state = play(&game, &[One, One, Zero, One, One, Zero]);
        assert!(game.is_terminal(&state));
        assert_eq!(state.bits_of(Player::First), vec![1, 0, 1]);
        assert_eq!(state.bits_of(Player::Second), vec![1, 1, 0]);

        // P1: 2 ones + 2 switches - 2 = 2; P2: 2 ones + 1 switch - 2 = 1.
        assert_eq!(game.utilities(&state).unwrap(), Utilities::new(2.0, 1.0));
    }

    #[test]
    fn test_single_round_solution() {
        let game = OnesGame::new(1);
        let mut solver = ExactSolver::new(game.clone(), SearchConfig::deterministic());
        let decision = solver.solve(&game.initial_state()).unwrap();

        assert_eq!(decision.action, Bit::One);
        assert_eq!(decision.value, Utilities::new(1.0, 0.0));
        assert_eq!(decision.stats.nodes_expanded, 6);
    }

    #[test]
    fn test_self_play_reaches_solved_value() {
        let game = OnesGame::default();
        let mut solver = ExactSolver::new(game.clone(), SearchConfig::seeded(17));
        let mut state = game.initial_state();
        let expected = solver.value(&state).unwrap();

        while !game.is_terminal(&state) {
            let decision = solver.solve(&state).unwrap();
            state = game.apply(&state, &decision.action).unwrap();
            assert_eq!(decision.value, solver.value(&state).unwrap());
        }

        assert_eq!(state.history.len(), 2 * DEFAULT_ROUNDS);
        assert_eq!(game.utilities(&state).unwrap(), expected);
    }

    #[test]
    fn test_display() {
        let game = OnesGame::new(2);
        let state = play(&game, &[Bit::One, Bit::Zero, Bit::Zero]);
        assert_eq!(state.to_string(), "P1: 10 P2: 0");
    }
}
