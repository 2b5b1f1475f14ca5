//! Views of a dealt deck.
//!
//! A deal is a permutation `σ` of `1..=N`: the first party holds
//! `σ[0..k]`, the second `σ[k..2k]`, and `σ[2k]` (if any) is the card the
//! second party draws when it plays.

use crate::estimator::combinatorics::prob_all_lower;
use crate::search::game::Player;

/// A permutation split into hands and deck.
#[derive(Debug, Clone, Copy)]
pub struct Deal<'a> {
    cards: &'a [u32],
    hand_size: usize,
}

impl<'a> Deal<'a> {
    /// View `cards` as a deal of two hands of `hand_size` cards.
    pub fn new(cards: &'a [u32], hand_size: usize) -> Self {
        debug_assert!(2 * hand_size <= cards.len(), "deck too small for two hands");
        Self { cards, hand_size }
    }

    /// Deck size `N`.
    pub fn deck_size(&self) -> usize {
        self.cards.len()
    }

    /// A party's initial hand.
    pub fn hand(&self, player: Player) -> &'a [u32] {
        let start = player.index() * self.hand_size;
        &self.cards[start..start + self.hand_size]
    }

    /// The card the second party draws if it plays.
    pub fn draw(&self) -> Option<u32> {
        self.cards.get(2 * self.hand_size).copied()
    }

    /// Highest card of a party's initial hand.
    pub fn max_card(&self, player: Player) -> u32 {
        self.hand(player).iter().copied().max().unwrap_or(0)
    }

    /// Highest card a party holds at showdown, the draw included.
    pub fn showdown_max(&self, player: Player) -> u32 {
        match player {
            Player::First => self.max_card(player),
            Player::Second => self.max_card(player).max(self.draw().unwrap_or(0)),
        }
    }

    /// Winner when both parties play, seen with full information.
    pub fn showdown_winner(&self) -> Player {
        if self.showdown_max(Player::First) > self.showdown_max(Player::Second) {
            Player::First
        } else {
            Player::Second
        }
    }

    /// What `player` knows about this deal.
    pub fn view(&self, player: Player) -> PartyView {
        PartyView::new(
            player,
            self.deck_size() as u32,
            self.hand_size as u32,
            self.hand(player),
        )
    }
}

/// What one party can infer from its own hand.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyView {
    /// The party holding the hand.
    pub player: Player,
    /// Highest card in the hand.
    pub own_max: u32,
    /// Cards the party has not seen.
    pub unseen: Vec<u32>,
    /// Unseen cards lower than `own_max`.
    pub lower_unseen: u64,
    /// Cards the opponent holds at showdown.
    pub opponent_hand: u64,
}

impl PartyView {
    /// Build the view of `player` holding `hand` in a deck of `deck_size`
    /// cards dealt into hands of `hand_size`.
    pub fn new(player: Player, deck_size: u32, hand_size: u32, hand: &[u32]) -> Self {
        let own_max = hand.iter().copied().max().unwrap_or(0);
        let unseen: Vec<u32> = (1..=deck_size).filter(|c| !hand.contains(c)).collect();
        let lower_unseen = unseen.iter().filter(|&&c| c < own_max).count() as u64;

        // The second party draws one extra card when the deck is not empty.
        let opponent_hand = u64::from(match player {
            Player::First if hand_size < deck_size.saturating_sub(hand_size) => hand_size + 1,
            _ => hand_size,
        });

        Self {
            player,
            own_max,
            unseen,
            lower_unseen,
            opponent_hand,
        }
    }

    /// Probability that the opponent holds no card above `own_max`.
    pub fn prob_opponent_all_lower(&self) -> f64 {
        prob_all_lower(self.lower_unseen, self.unseen.len() as u64, self.opponent_hand)
    }

    /// Fraction of unseen cards above both `own_max` and `threshold`.
    pub fn fraction_above(&self, threshold: f64) -> f64 {
        if self.unseen.is_empty() {
            return 0.0;
        }
        let above = self
            .unseen
            .iter()
            .filter(|&&c| c > self.own_max && c as f64 > threshold)
            .count();
        above as f64 / self.unseen.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_split() {
        let cards = [3, 8, 5, 1, 9, 2, 4, 6, 7, 10];
        let deal = Deal::new(&cards, 2);
        assert_eq!(deal.hand(Player::First), &[3, 8]);
        assert_eq!(deal.hand(Player::Second), &[5, 1]);
        assert_eq!(deal.draw(), Some(9));
        assert_eq!(deal.showdown_max(Player::Second), 9);
        assert_eq!(deal.showdown_winner(), Player::Second);
    }

    #[test]
    fn test_first_party_view() {
        let cards = [3, 8, 5, 1, 9, 2, 4, 6, 7, 10];
        let view = Deal::new(&cards, 2).view(Player::First);
        assert_eq!(view.own_max, 8);
        assert_eq!(view.unseen.len(), 8);
        // 1, 2, 4, 5, 6, 7
        assert_eq!(view.lower_unseen, 6);
        assert_eq!(view.opponent_hand, 3);

        // C(6, 3) / C(8, 3) = 20 / 56
        assert!((view.prob_opponent_all_lower() - 20.0 / 56.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_party_view() {
        let cards = [3, 8, 5, 1, 9, 2, 4, 6, 7, 10];
        let view = Deal::new(&cards, 2).view(Player::Second);
        assert_eq!(view.own_max, 5);
        assert_eq!(view.lower_unseen, 3);
        assert_eq!(view.opponent_hand, 2);

        // Unseen: 2, 3, 4, 6, 7, 8, 9, 10; above 5 and above 7.5: 8, 9, 10.
        assert!((view.fraction_above(7.5) - 3.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_oversized_hand_size_does_not_overflow() {
        let view = PartyView::new(Player::First, 10, 1 << 31, &[3, 8]);
        assert_eq!(view.opponent_hand, 1 << 31);
        assert_eq!(view.prob_opponent_all_lower(), 0.0);
    }

    #[test]
    fn test_half_deck_hands_are_finite() {
        // k == N / 2: no draw, the opponent holds exactly the unseen cards.
        let cards = [4, 2, 3, 1];
        let deal = Deal::new(&cards, 2);
        assert_eq!(deal.draw(), None);

        let first = deal.view(Player::First);
        assert_eq!(first.opponent_hand, 2);
        assert_eq!(first.prob_opponent_all_lower(), 1.0);

        let second = deal.view(Player::Second);
        let p = second.prob_opponent_all_lower();
        assert!(p.is_finite());
        assert_eq!(p, 0.0);
    }
}
