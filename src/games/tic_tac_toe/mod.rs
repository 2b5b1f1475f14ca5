//! Tic-tac-toe, the marking game on a 3x3 grid.
//!
//! The first party marks `x`, the second `o`. Three marks in a row, column
//! or diagonal win; a full board without a line is a draw. Utilities are
//! zero-sum: +1/-1 for a win, 0 for a draw.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::search::game::{Action, Game, GameState, Player, Utilities, ZeroSum};

/// Winning line indices on the 3x3 board (row-major).
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Place the mover's mark on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
    /// Row, 0-indexed.
    pub row: u8,
    /// Column, 0-indexed.
    pub col: u8,
}

impl Mark {
    /// Mark the cell at `(row, col)`.
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    fn index(&self) -> usize {
        self.row as usize * 3 + self.col as usize
    }

    fn from_index(index: usize) -> Self {
        Self {
            row: (index / 3) as u8,
            col: (index % 3) as u8,
        }
    }
}

impl Action for Mark {
    fn label(&self) -> String {
        format!("({}, {})", self.row + 1, self.col + 1)
    }
}

/// Complete game state in tic-tac-toe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    /// Cells in row-major order, `None` when empty.
    pub cells: [Option<Player>; 9],
    /// Party to move.
    pub mover: Player,
}

impl GameState for TicTacToeState {}

impl TicTacToeState {
    /// The party owning a complete line, if any.
    pub fn winner(&self) -> Option<Player> {
        WINNING_LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some(first)
        })
    }

    /// Whether every cell is marked.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Mark at `(row, col)`.
    pub fn cell(&self, row: u8, col: u8) -> Option<Player> {
        self.cells[Mark::new(row, col).index()]
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+---+")?;
        for row in self.cells.chunks(3) {
            write!(f, "|")?;
            for cell in row {
                let symbol = match cell {
                    Some(Player::First) => 'x',
                    Some(Player::Second) => 'o',
                    None => ' ',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+---+")
    }
}

/// Tic-tac-toe game.
#[derive(Debug, Clone, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new tic-tac-toe game.
    pub fn new() -> Self {
        Self
    }

    /// Every state reachable from the empty board, the empty board included.
    pub fn reachable_states(&self) -> Vec<TicTacToeState> {
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.initial_state()];
        let mut states = Vec::new();

        while let Some(state) = stack.pop() {
            if !seen.insert(state) {
                continue;
            }
            states.push(state);
            if self.is_terminal(&state) {
                continue;
            }
            for action in self.available_actions(&state) {
                stack.push(self.transition(&state, &action));
            }
        }

        states
    }
}

impl Game for TicTacToe {
    type State = TicTacToeState;
    type Action = Mark;

    fn initial_state(&self) -> TicTacToeState {
        TicTacToeState {
            cells: [None; 9],
            mover: Player::First,
        }
    }

    fn mover(&self, state: &TicTacToeState) -> Player {
        state.mover
    }

    fn is_terminal(&self, state: &TicTacToeState) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn available_actions(&self, state: &TicTacToeState) -> Vec<Mark> {
        state
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Mark::from_index(i))
            .collect()
    }

    fn transition(&self, state: &TicTacToeState, action: &Mark) -> TicTacToeState {
        let mut cells = state.cells;
        cells[action.index()] = Some(state.mover);
        TicTacToeState {
            cells,
            mover: state.mover.other(),
        }
    }

    fn payoffs(&self, state: &TicTacToeState) -> Utilities {
        match state.winner() {
            Some(winner) => Utilities::win(winner, 1.0),
            None => Utilities::draw(),
        }
    }

    fn state_description(&self, state: &TicTacToeState) -> String {
        state.to_string()
    }
}

impl ZeroSum for TicTacToe {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::game::GameError;

    fn play(game: &TicTacToe, moves: &[(u8, u8)]) -> TicTacToeState {
        moves.iter().fold(game.initial_state(), |state, &(r, c)| {
            game.apply(&state, &Mark::new(r, c)).unwrap()
        })
    }

    #[test]
    fn test_empty_board() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        assert!(!game.is_terminal(&state));
        assert_eq!(game.legal_actions(&state).unwrap().len(), 9);
        assert_eq!(game.mover(&state), Player::First);
    }

    #[test]
    fn test_row_win() {
        let game = TicTacToe::new();
        let state = play(&game, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(game.is_terminal(&state));
        assert_eq!(state.winner(), Some(Player::First));
        assert_eq!(game.utilities(&state).unwrap(), Utilities::new(1.0, -1.0));
    }

    #[test]
    fn test_diagonal_win_for_second_party() {
        let game = TicTacToe::new();
        let state = play(&game, &[(0, 1), (0, 0), (0, 2), (1, 1), (1, 0), (2, 2)]);
        assert_eq!(state.winner(), Some(Player::Second));
        assert_eq!(game.utilities(&state).unwrap()[Player::Second], 1.0);
    }

    #[test]
    fn test_draw() {
        let game = TicTacToe::new();
        let state = play(
            &game,
            &[(0, 0), (1, 1), (2, 2), (0, 1), (2, 1), (2, 0), (0, 2), (1, 2), (1, 0)],
        );
        assert!(state.is_full());
        assert_eq!(state.winner(), None);
        assert_eq!(game.utilities(&state).unwrap(), Utilities::draw());
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let game = TicTacToe::new();
        let state = play(&game, &[(1, 1)]);
        assert!(matches!(
            game.apply(&state, &Mark::new(1, 1)),
            Err(GameError::InvalidAction { .. })
        ));
        assert!(game.utilities(&state).is_err());
    }

    #[test]
    fn test_reachable_state_count() {
        let game = TicTacToe::new();
        let states = game.reachable_states();
        assert_eq!(states.len(), 5478);
        assert_eq!(states.iter().filter(|s| game.is_terminal(s)).count(), 958);
    }

    #[test]
    fn test_display() {
        let game = TicTacToe::new();
        let state = play(&game, &[(0, 0), (1, 1)]);
        assert_eq!(state.to_string(), "+---+\n|x  |\n| o |\n|   |\n+---+");
    }
}
