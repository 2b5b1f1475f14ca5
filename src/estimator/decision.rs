//! Play-or-refuse decisions under hidden information.
//!
//! Each party sees only its own hand. It estimates the probability that the
//! opponent holds nothing higher than its best card and compares the
//! expected payoff of playing with the fixed payoff of refusing.
//!
//! A peeking policy lets the first party see the second party's first card.
//! When that card beats the first party's best card, playing is priced as a
//! certain loss of the stake.

use crate::estimator::cache::MaxValueCache;
use crate::estimator::deal::{Deal, PartyView};
use crate::estimator::monte_carlo::MonteCarloEstimator;
use crate::games::cards::{CardChoice, CardGame, CardState};
use crate::search::game::{Player, Utilities};

/// Payoff scheme of the card game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payoffs {
    /// Won or lost in a showdown.
    pub stake: f64,
    /// Lost by a refusing party.
    pub refusal: f64,
}

impl Payoffs {
    /// Create a payoff scheme.
    pub fn new(stake: f64, refusal: f64) -> Self {
        Self { stake, refusal }
    }

    /// Multiply every payoff by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            stake: self.stake * factor,
            refusal: self.refusal * factor,
        }
    }
}

/// Expected payoff of each choice for one party.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceValues {
    /// Expected payoff of playing.
    pub play: f64,
    /// Expected payoff of refusing.
    pub refuse: f64,
}

impl ChoiceValues {
    /// Values for a party that wins a showdown with probability `p_win`.
    pub fn from_win_probability(p_win: f64, payoffs: &Payoffs) -> Self {
        Self {
            play: p_win * payoffs.stake - (1.0 - p_win) * payoffs.stake,
            refuse: -payoffs.refusal,
        }
    }

    /// Add `bonus` to the value of playing.
    pub fn with_play_bonus(mut self, bonus: f64) -> Self {
        self.play += bonus;
        self
    }

    /// Play iff playing is strictly better than refusing.
    pub fn best(&self) -> CardChoice {
        if self.play > self.refuse {
            CardChoice::Play
        } else {
            CardChoice::Refuse
        }
    }

    /// Value of a choice.
    pub fn get(&self, choice: CardChoice) -> f64 {
        match choice {
            CardChoice::Play => self.play,
            CardChoice::Refuse => self.refuse,
        }
    }
}

/// Decision rule of both parties in the card game.
///
/// The first party relies on the exact combinatorial probability only. The
/// second party additionally credits the chance that its draw beats the
/// first party's expected best card.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenInfoPolicy {
    payoffs: Payoffs,
    /// Expected best card of the first party's hand, as seen by the second.
    expected_first_max: f64,
    /// Whether the first party sees the second party's first card.
    peek: bool,
}

impl HiddenInfoPolicy {
    /// Create a policy from the payoffs and the expected maximum of the
    /// first party's hand.
    pub fn new(payoffs: Payoffs, expected_first_max: f64) -> Self {
        Self {
            payoffs,
            expected_first_max,
            peek: false,
        }
    }

    /// Builder method: let the first party see the second party's first card.
    pub fn with_peek(mut self, peek: bool) -> Self {
        self.peek = peek;
        self
    }

    /// Whether the first party peeks.
    pub fn peeks(&self) -> bool {
        self.peek
    }

    /// Build the policy for the estimator's configuration, looking up the
    /// expected first-party maximum in `cache` and estimating it on a miss.
    pub fn from_estimator(estimator: &MonteCarloEstimator, cache: &mut MaxValueCache) -> Self {
        let config = estimator.config();
        let expected_first_max = cache.get_or_insert_with(config.deck_size, config.hand_size, || {
            estimator.expected_opponent_max(config.hand_size)
        });
        Self::new(config.payoffs(), expected_first_max)
    }

    /// Payoffs used by this policy.
    pub fn payoffs(&self) -> &Payoffs {
        &self.payoffs
    }

    /// Expected first-party maximum fed to the second party's rule.
    pub fn expected_first_max(&self) -> f64 {
        self.expected_first_max
    }

    /// Expected payoffs for the party described by `view`.
    pub fn values(&self, view: &PartyView) -> ChoiceValues {
        let p_win = view.prob_opponent_all_lower();
        let values = ChoiceValues::from_win_probability(p_win, &self.payoffs);

        match view.player {
            Player::First => values,
            Player::Second => {
                let draw_wins = view.fraction_above(self.expected_first_max);
                values.with_play_bonus(draw_wins * self.payoffs.stake)
            }
        }
    }

    /// Choice of `player` given only its own hand in `state`.
    ///
    /// Ignores peeking; see [`HiddenInfoPolicy::solve_card_state`].
    pub fn choose(&self, game: &CardGame, state: &CardState, player: Player) -> CardChoice {
        self.values(&Self::view_of(game, state, player)).best()
    }

    /// Both parties' choices for a freshly dealt state.
    pub fn solve_card_state(&self, game: &CardGame, state: &CardState) -> (CardChoice, CardChoice) {
        self.decide(
            &Self::view_of(game, state, Player::First),
            &Self::view_of(game, state, Player::Second),
            state.hand(Player::Second)[0],
        )
    }

    /// Both parties' choices for a deal.
    pub fn choose_for_deal(&self, deal: &Deal<'_>) -> (CardChoice, CardChoice) {
        self.decide(
            &deal.view(Player::First),
            &deal.view(Player::Second),
            deal.hand(Player::Second)[0],
        )
    }

    /// Average realized utilities when both parties follow this policy on
    /// the estimator's deals.
    pub fn average_utilities(&self, estimator: &MonteCarloEstimator) -> Utilities {
        estimator
            .evaluate_policy(self)
            .average_utilities(&self.payoffs)
    }

    fn decide(
        &self,
        first: &PartyView,
        second: &PartyView,
        peeked: u32,
    ) -> (CardChoice, CardChoice) {
        let mut first_values = self.values(first);
        if self.peek && peeked > first.own_max {
            first_values.play = -self.payoffs.stake;
        }
        (first_values.best(), self.values(second).best())
    }

    fn view_of(game: &CardGame, state: &CardState, player: Player) -> PartyView {
        PartyView::new(
            player,
            game.deck_size(),
            game.hand_size() as u32,
            &state.hand(player)[..game.hand_size()],
        )
    }
}
