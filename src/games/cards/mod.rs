//! The card-drawing game with hidden hands.
//!
//! ## Game Rules
//!
//! - A deck holds the values `1..=N`, shuffled
//! - Each party privately receives `k` cards; the rest form the deck
//! - The first party announces Play or Refuse, then the second party does
//! - If the second party plays, it draws the top card of the deck (if any)
//! - A refusal settles the game at a fixed payoff: the refusing party loses
//!   `refusal`, the other gains it (the first party's refusal takes precedence)
//! - If both play, the higher maximum card wins the stake `α`
//!
//! The `Game` implementation exposes the full deal, which is what the
//! exact solver needs. Decisions under hidden information go through
//! [`crate::estimator`].

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::search::game::{Action, Game, GameError, GameState, Player, Utilities};

/// Play or refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardChoice {
    /// Compare highest cards for the stake.
    Play,
    /// Settle for the fixed refusal payoff.
    Refuse,
}

impl Action for CardChoice {
    fn label(&self) -> String {
        match self {
            CardChoice::Play => "play".to_string(),
            CardChoice::Refuse => "refuse".to_string(),
        }
    }
}

impl fmt::Display for CardChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardChoice::Play => write!(f, "Play"),
            CardChoice::Refuse => write!(f, "Refuse"),
        }
    }
}

/// Complete game state in the card game.
///
/// Hands and deck are owned by each state; a transition clones them before
/// drawing, so sibling branches never see each other's draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    /// Party to move.
    pub mover: Player,
    /// Private hands, indexed by `Player::index()`.
    pub hands: [Vec<u32>; 2],
    /// Undealt cards, top first.
    pub deck: Vec<u32>,
    /// Announced choices, indexed by `Player::index()`.
    pub choices: [Option<CardChoice>; 2],
}

impl GameState for CardState {}

impl CardState {
    /// Highest card in a party's hand (0 for an empty hand).
    pub fn max_card(&self, player: Player) -> u32 {
        self.hands[player.index()].iter().copied().max().unwrap_or(0)
    }

    /// A party's hand.
    pub fn hand(&self, player: Player) -> &[u32] {
        &self.hands[player.index()]
    }

    /// A party's announced choice.
    pub fn choice(&self, player: Player) -> Option<CardChoice> {
        self.choices[player.index()]
    }
}

impl fmt::Display for CardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let choice = |c: Option<CardChoice>| c.map_or("-".to_string(), |c| c.to_string());
        write!(
            f,
            "P1:{:?} ({}) P2:{:?} ({}) Deck:{:?}",
            self.hands[0],
            choice(self.choices[0]),
            self.hands[1],
            choice(self.choices[1]),
            self.deck
        )
    }
}

/// Card game over one fixed deal.
#[derive(Debug, Clone)]
pub struct CardGame {
    /// The shuffled deck, before dealing.
    permutation: Vec<u32>,
    /// Cards per hand.
    hand_size: usize,
    /// Payoff of a decisive showdown.
    stake: f64,
    /// Payoff lost by a refusing party.
    refusal: f64,
}

impl CardGame {
    /// Create a game over a given deck order.
    ///
    /// Fails if `permutation` is not an ordering of `1..=N`, if the deck
    /// cannot supply two hands of `hand_size` cards, or if the stake is not
    /// positive.
    pub fn from_permutation(
        permutation: Vec<u32>,
        hand_size: usize,
        stake: f64,
    ) -> Result<Self, GameError> {
        if hand_size == 0 || hand_size > permutation.len() / 2 {
            return Err(GameError::Precondition("deck must hold two non-empty hands"));
        }
        if !(stake.is_finite() && stake > 0.0) {
            return Err(GameError::Precondition("stake must be positive"));
        }

        // Distinct cards guarantee that showdown maxima never tie.
        let mut sorted = permutation.clone();
        sorted.sort_unstable();
        if !sorted.iter().copied().eq(1..=permutation.len() as u32) {
            return Err(GameError::Precondition("deck must be a permutation of 1..=N"));
        }
        Ok(Self {
            permutation,
            hand_size,
            stake,
            refusal: 1.0,
        })
    }

    /// Shuffle the values `1..=deck_size` and create a game over that deal.
    pub fn shuffled<R: Rng>(
        deck_size: u32,
        hand_size: usize,
        stake: f64,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut permutation: Vec<u32> = (1..=deck_size).collect();
        permutation.shuffle(rng);
        Self::from_permutation(permutation, hand_size, stake)
    }

    /// Builder method: set the refusal payoff.
    pub fn with_refusal(mut self, refusal: f64) -> Self {
        self.refusal = refusal;
        self
    }

    /// The deck order this game was dealt from.
    pub fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    /// Cards per hand.
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Deck size `N`.
    pub fn deck_size(&self) -> u32 {
        self.permutation.len() as u32
    }

    /// Showdown stake.
    pub fn stake(&self) -> f64 {
        self.stake
    }

    /// Refusal payoff.
    pub fn refusal(&self) -> f64 {
        self.refusal
    }
}

impl Game for CardGame {
    type State = CardState;
    type Action = CardChoice;

    fn initial_state(&self) -> CardState {
        let k = self.hand_size;
        CardState {
            mover: Player::First,
            hands: [
                self.permutation[..k].to_vec(),
                self.permutation[k..2 * k].to_vec(),
            ],
            deck: self.permutation[2 * k..].to_vec(),
            choices: [None, None],
        }
    }

    fn mover(&self, state: &CardState) -> Player {
        state.mover
    }

    fn is_terminal(&self, state: &CardState) -> bool {
        state.choices.iter().all(Option::is_some)
    }

    fn available_actions(&self, _state: &CardState) -> Vec<CardChoice> {
        vec![CardChoice::Play, CardChoice::Refuse]
    }

    fn transition(&self, state: &CardState, action: &CardChoice) -> CardState {
        let mut next = state.clone();
        next.choices[state.mover.index()] = Some(*action);

        if state.mover == Player::Second && *action == CardChoice::Play && !next.deck.is_empty() {
            let card = next.deck.remove(0);
            next.hands[Player::Second.index()].push(card);
        }

        next.mover = state.mover.other();
        next
    }

    fn payoffs(&self, state: &CardState) -> Utilities {
        if state.choice(Player::First) == Some(CardChoice::Refuse) {
            return Utilities::win(Player::Second, self.refusal);
        }
        if state.choice(Player::Second) == Some(CardChoice::Refuse) {
            return Utilities::win(Player::First, self.refusal);
        }
        if state.max_card(Player::First) > state.max_card(Player::Second) {
            Utilities::win(Player::First, self.stake)
        } else {
            Utilities::win(Player::Second, self.stake)
        }
    }

    fn state_description(&self, state: &CardState) -> String {
        state.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ExactSolver, SearchConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> CardGame {
        // P1 holds 3, 8; P2 holds 5, 1; the deck is 9, 2, ...
        CardGame::from_permutation(vec![3, 8, 5, 1, 9, 2, 4, 6, 7, 10], 2, 2.5).unwrap()
    }

    #[test]
    fn test_deal() {
        let game = game();
        let state = game.initial_state();
        assert_eq!(state.hand(Player::First), &[3, 8]);
        assert_eq!(state.hand(Player::Second), &[5, 1]);
        assert_eq!(state.deck.len(), 6);
        assert_eq!(state.max_card(Player::First), 8);
    }

    #[test]
    fn test_second_party_draws_when_playing() {
        let game = game();
        let root = game.initial_state();
        let state = game.apply(&root, &CardChoice::Play).unwrap();
        assert_eq!(state.mover, Player::Second);

        let played = game.apply(&state, &CardChoice::Play).unwrap();
        assert_eq!(played.hand(Player::Second), &[5, 1, 9]);
        assert_eq!(played.deck[0], 2);
        assert!(game.is_terminal(&played));
        assert_eq!(game.utilities(&played).unwrap(), Utilities::new(-2.5, 2.5));

        // The sibling branch never observes the draw.
        let refused = game.apply(&state, &CardChoice::Refuse).unwrap();
        assert_eq!(refused.hand(Player::Second), &[5, 1]);
        assert_eq!(state.deck.len(), 6);
        assert_eq!(game.utilities(&refused).unwrap(), Utilities::new(1.0, -1.0));
    }

    #[test]
    fn test_first_refusal_takes_precedence() {
        let game = game().with_refusal(0.5);
        let state = game.apply(&game.initial_state(), &CardChoice::Refuse).unwrap();
        let state = game.apply(&state, &CardChoice::Refuse).unwrap();
        assert_eq!(game.utilities(&state).unwrap(), Utilities::new(-0.5, 0.5));
    }

    #[test]
    fn test_no_draw_from_empty_deck() {
        let game = CardGame::from_permutation(vec![4, 1, 3, 2], 2, 1.0).unwrap();
        let state = game.apply(&game.initial_state(), &CardChoice::Play).unwrap();
        let state = game.apply(&state, &CardChoice::Play).unwrap();
        assert_eq!(state.hand(Player::Second), &[3, 2]);
        assert_eq!(game.utilities(&state).unwrap()[Player::First], 1.0);
    }

    #[test]
    fn test_invalid_deal() {
        assert!(CardGame::from_permutation(vec![1, 2, 3], 2, 1.0).is_err());
        assert!(CardGame::from_permutation(vec![1, 2, 3], 0, 1.0).is_err());
        assert!(CardGame::from_permutation(vec![1, 2, 3, 4], usize::MAX, 1.0).is_err());
    }

    #[test]
    fn test_deck_must_be_a_permutation() {
        assert_eq!(
            CardGame::from_permutation(vec![4, 4, 1, 2], 2, 1.0).unwrap_err(),
            GameError::Precondition("deck must be a permutation of 1..=N")
        );
        assert!(CardGame::from_permutation(vec![0, 1, 2, 3], 2, 1.0).is_err());
        assert!(CardGame::from_permutation(vec![5, 1, 2, 3], 2, 1.0).is_err());
        assert!(CardGame::from_permutation(vec![3, 1, 4, 2], 2, 1.0).is_ok());
    }

    #[test]
    fn test_stake_must_be_positive() {
        for stake in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                CardGame::from_permutation(vec![3, 1, 4, 2], 2, stake).unwrap_err(),
                GameError::Precondition("stake must be positive")
            );
        }
    }

    #[test]
    fn test_full_information_solution() {
        // With the deal visible, the second party plays exactly when the
        // draw lets it win, and the first party refuses a lost showdown.
        let game = game();
        let mut solver = ExactSolver::new(game.clone(), SearchConfig::deterministic());
        let decision = solver.solve(&game.initial_state()).unwrap();
        assert_eq!(decision.action, CardChoice::Refuse);
        assert_eq!(decision.value, Utilities::new(-1.0, 1.0));
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let game = CardGame::shuffled(10, 3, 1.0, &mut rng).unwrap();
        let mut cards = game.permutation().to_vec();
        cards.sort_unstable();
        assert_eq!(cards, (1..=10).collect::<Vec<_>>());
        assert_eq!(game.hand_size(), 3);
    }
}
