//! Monte-Carlo estimation over random deals.
//!
//! Every deal is scored with an integer outcome and outcomes are summed in
//! a [`Tally`]. Integer sums are associative, so the parallel reduction gives
//! the same result whatever the thread count or scheduling. Sampled runs are
//! split into fixed-size chunks, each with its own RNG seeded from the run
//! seed and the chunk index.
//!
//! Besides the first-party estimate, the same machinery plays a
//! [`HiddenInfoPolicy`] over many deals and reports the realized outcomes
//! ([`MonteCarloEstimator::evaluate_policy`]).

use std::time::Instant;

use indicatif::ProgressBar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::estimator::combinatorics::{next_permutation, permutation_count, shuffle_into};
use crate::estimator::config::{ConfigError, EstimatorConfig};
use crate::estimator::deal::Deal;
use crate::estimator::decision::{ChoiceValues, HiddenInfoPolicy, Payoffs};
use crate::games::cards::CardChoice;
use crate::search::game::{Player, Utilities};

/// Deals drawn with one RNG.
const CHUNK_SIZE: u64 = 1024;

/// How many deals a run looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Every permutation exactly once (`p >= N!`).
    Exhaustive(u64),
    /// Independent uniform permutations, duplicates allowed.
    Sampled(u64),
}

impl Budget {
    /// Number of deals.
    pub fn deals(&self) -> u64 {
        match self {
            Budget::Exhaustive(n) | Budget::Sampled(n) => *n,
        }
    }

    /// Whether the result is exact.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Budget::Exhaustive(_))
    }
}

/// Sum of integer outcomes over a number of deals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Sum of outcomes.
    pub sum: i64,
    /// Deals scored.
    pub count: u64,
}

impl Tally {
    fn record(&mut self, outcome: i64) {
        self.sum += outcome;
        self.count += 1;
    }

    /// Average outcome (0 for an empty tally).
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Per-chunk result that can be merged in any order.
trait DealAccumulator: Default + Send {
    fn merge(self, other: Self) -> Self;
    fn deals(&self) -> u64;
}

impl DealAccumulator for Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    fn deals(&self) -> u64 {
        self.count
    }
}

/// How games played under a policy ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyOutcome {
    /// The first party refused.
    pub first_refused: u64,
    /// The first party played and the second refused.
    pub second_refused: u64,
    /// Both played and the first party won the showdown.
    pub first_won: u64,
    /// Both played and the second party won the showdown.
    pub second_won: u64,
}

impl PolicyOutcome {
    fn record(&mut self, deal: &Deal<'_>, choices: (CardChoice, CardChoice)) {
        match choices {
            (CardChoice::Refuse, _) => self.first_refused += 1,
            (CardChoice::Play, CardChoice::Refuse) => self.second_refused += 1,
            (CardChoice::Play, CardChoice::Play) => match deal.showdown_winner() {
                Player::First => self.first_won += 1,
                Player::Second => self.second_won += 1,
            },
        }
    }

    /// Games counted.
    pub fn deals(&self) -> u64 {
        self.first_refused + self.second_refused + self.first_won + self.second_won
    }

    /// Games that reached a showdown.
    pub fn showdowns(&self) -> u64 {
        self.first_won + self.second_won
    }

    /// Average realized utilities of both parties under `payoffs`.
    pub fn average_utilities(&self, payoffs: &Payoffs) -> Utilities {
        let deals = self.deals();
        if deals == 0 {
            return Utilities::draw();
        }
        let refusals = self.second_refused as f64 - self.first_refused as f64;
        let showdowns = self.first_won as f64 - self.second_won as f64;
        let first = (refusals * payoffs.refusal + showdowns * payoffs.stake) / deals as f64;
        Utilities::new(first, -first)
    }
}

impl DealAccumulator for PolicyOutcome {
    fn merge(self, other: PolicyOutcome) -> PolicyOutcome {
        PolicyOutcome {
            first_refused: self.first_refused + other.first_refused,
            second_refused: self.second_refused + other.second_refused,
            first_won: self.first_won + other.first_won,
            second_won: self.second_won + other.second_won,
        }
    }

    fn deals(&self) -> u64 {
        PolicyOutcome::deals(self)
    }
}

/// Estimated first-party payoffs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Expected payoff of play and refuse.
    pub values: ChoiceValues,
    /// Probability that the first party wins a showdown.
    pub win_probability: f64,
    /// Deals scored.
    pub samples: u64,
    /// Whether every deal was enumerated.
    pub exhaustive: bool,
}

/// Parallel estimator over deals of the card game.
#[derive(Debug)]
pub struct MonteCarloEstimator {
    config: EstimatorConfig,
    seed: u64,
    pool: Option<rayon::ThreadPool>,
    progress: Option<ProgressBar>,
}

impl MonteCarloEstimator {
    /// Validate `config` and prepare an estimator.
    ///
    /// Without a configured seed one is drawn from entropy; it is available
    /// afterwards through [`MonteCarloEstimator::seed`].
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = match config.seed {
            Some(seed) => seed,
            None => StdRng::from_entropy().gen(),
        };

        let pool = match config.num_threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            config,
            seed,
            pool,
            progress: None,
        })
    }

    /// Builder method: report progress on `bar`, one tick per deal.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Seed the sampled runs derive their RNGs from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Deals a run will look at.
    pub fn budget(&self) -> Budget {
        match permutation_count(self.config.deck_size) {
            Some(total) if self.config.samples >= total => Budget::Exhaustive(total),
            _ => Budget::Sampled(self.config.samples),
        }
    }

    /// Estimate the first party's payoffs when both parties play with
    /// the deal revealed at showdown.
    pub fn estimate_first_party(&self) -> Estimate {
        let hand_size = self.config.hand_size as usize;
        let budget = self.budget();
        let start = Instant::now();

        // +1 for a first-party win, -1 for a loss.
        let tally = self.run::<Tally, _>(budget, |cards, tally| {
            tally.record(match Deal::new(cards, hand_size).showdown_winner() {
                Player::First => 1,
                Player::Second => -1,
            })
        });

        let win_probability = (tally.mean() + 1.0) / 2.0;
        let values = ChoiceValues {
            play: tally.mean() * self.config.stake,
            refuse: -self.config.refusal,
        };

        log::info!(
            "estimated ({}, {}) over {} deals{} in {:.2}s: play {:.4}, refuse {:.4}",
            self.config.deck_size,
            hand_size,
            tally.count,
            if budget.is_exhaustive() { " (exhaustive)" } else { "" },
            start.elapsed().as_secs_f64(),
            values.play,
            values.refuse
        );

        Estimate {
            values,
            win_probability,
            samples: tally.count,
            exhaustive: budget.is_exhaustive(),
        }
    }

    /// Expected highest card of a `hand_size`-card hand.
    pub fn expected_opponent_max(&self, hand_size: u32) -> f64 {
        let k = hand_size.min(self.config.deck_size) as usize;
        let tally = self.run::<Tally, _>(self.budget(), |cards, tally| {
            tally.record(cards[..k].iter().copied().max().map_or(0, i64::from))
        });

        log::debug!(
            "expected max of {} cards from {}: {:.4} over {} deals",
            k,
            self.config.deck_size,
            tally.mean(),
            tally.count
        );
        tally.mean()
    }

    /// Play `policy` on every deal of the budget and count the outcomes.
    ///
    /// Both parties decide from their own hands only; the deal is revealed
    /// at showdown.
    pub fn evaluate_policy(&self, policy: &HiddenInfoPolicy) -> PolicyOutcome {
        let hand_size = self.config.hand_size as usize;
        let budget = self.budget();
        let start = Instant::now();

        let outcome = self.run::<PolicyOutcome, _>(budget, |cards, outcome| {
            let deal = Deal::new(cards, hand_size);
            outcome.record(&deal, policy.choose_for_deal(&deal));
        });

        log::info!(
            "evaluated policy on ({}, {}) over {} deals in {:.2}s: {}",
            self.config.deck_size,
            hand_size,
            outcome.deals(),
            start.elapsed().as_secs_f64(),
            outcome.average_utilities(policy.payoffs())
        );
        outcome
    }

    fn run<T, F>(&self, budget: Budget, score: F) -> T
    where
        T: DealAccumulator,
        F: Fn(&[u32], &mut T) + Sync,
    {
        if let Some(bar) = &self.progress {
            bar.set_length(budget.deals());
            bar.set_position(0);
        }

        let work = || match budget {
            Budget::Exhaustive(_) => self.enumerate(&score),
            Budget::Sampled(samples) => self.sample(samples, &score),
        };
        let result = match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        };

        if let Some(bar) = &self.progress {
            bar.finish();
        }
        result
    }

    /// Score every permutation of `1..=N` once, split by leading card.
    fn enumerate<T, F>(&self, score: &F) -> T
    where
        T: DealAccumulator,
        F: Fn(&[u32], &mut T) + Sync,
    {
        let n = self.config.deck_size;

        (1..=n)
            .into_par_iter()
            .map(|lead| {
                let mut rest: Vec<u32> = (1..=n).filter(|&c| c != lead).collect();
                let mut cards = Vec::with_capacity(n as usize);
                let mut acc = T::default();

                loop {
                    cards.clear();
                    cards.push(lead);
                    cards.extend_from_slice(&rest);
                    score(&cards, &mut acc);
                    if !next_permutation(&mut rest) {
                        break;
                    }
                }

                if let Some(bar) = &self.progress {
                    bar.inc(acc.deals());
                }
                acc
            })
            .reduce(T::default, T::merge)
    }

    /// Score `samples` independent uniform permutations.
    fn sample<T, F>(&self, samples: u64, score: &F) -> T
    where
        T: DealAccumulator,
        F: Fn(&[u32], &mut T) + Sync,
    {
        let n = self.config.deck_size;
        let chunks = samples.div_ceil(CHUNK_SIZE);

        (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let mut rng = StdRng::seed_from_u64(chunk_seed(self.seed, chunk));
                let len = CHUNK_SIZE.min(samples - chunk * CHUNK_SIZE);
                let mut cards = Vec::with_capacity(n as usize);
                let mut acc = T::default();

                for _ in 0..len {
                    shuffle_into(&mut cards, n, &mut rng);
                    score(&cards, &mut acc);
                }

                if let Some(bar) = &self.progress {
                    bar.inc(len);
                }
                acc
            })
            .reduce(T::default, T::merge)
    }
}

fn chunk_seed(seed: u64, chunk: u64) -> u64 {
    seed ^ chunk.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
