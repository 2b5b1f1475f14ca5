//! Configuration for the hidden-information estimator.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::estimator::decision::Payoffs;

/// Parameters of the card game and of the Monte-Carlo budget.
///
/// # Example
/// ```
/// use game_search::estimator::EstimatorConfig;
///
/// let config = EstimatorConfig::new(10, 2, 2.2).with_samples(5_000).with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Deck size `N`; the deck holds the values `1..=N`.
    pub deck_size: u32,

    /// Cards per hand `k`, with `0 < k <= N / 2`.
    pub hand_size: u32,

    /// Stake `α` won or lost in a showdown.
    pub stake: f64,

    /// Fixed payoff lost by a refusing party.
    #[serde(default = "default_refusal")]
    pub refusal: f64,

    /// Monte-Carlo sample budget `p`.
    ///
    /// A budget of at least `N!` switches to exhaustive enumeration of
    /// every deal, which makes the estimate exact.
    pub samples: u64,

    /// Random seed for reproducibility.
    ///
    /// If `None`, a random seed is drawn when the estimator is built.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of threads for sampling.
    ///
    /// Set to `None` to use rayon's global pool.
    #[serde(default)]
    pub num_threads: Option<usize>,

    /// File holding cached expected-maximum estimates.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

fn default_refusal() -> f64 {
    1.0
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            deck_size: 10,
            hand_size: 2,
            stake: 2.2,
            refusal: default_refusal(),
            samples: 100_000,
            seed: None,
            num_threads: None,
            cache_path: None,
        }
    }
}

impl EstimatorConfig {
    /// Create a configuration for a deck of `deck_size` cards, hands of
    /// `hand_size` cards and showdown stake `stake`.
    pub fn new(deck_size: u32, hand_size: u32, stake: f64) -> Self {
        Self {
            deck_size,
            hand_size,
            stake,
            ..Default::default()
        }
    }

    /// Builder method: set the refusal payoff.
    pub fn with_refusal(mut self, refusal: f64) -> Self {
        self.refusal = refusal;
        self
    }

    /// Builder method: set the Monte-Carlo budget.
    pub fn with_samples(mut self, samples: u64) -> Self {
        self.samples = samples;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set the cache file.
    pub fn with_cache_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Showdown and refusal payoffs.
    pub fn payoffs(&self) -> Payoffs {
        Payoffs::new(self.stake, self.refusal)
    }

    /// Whether the second party can draw after dealing (`2k < N`).
    pub fn has_draw(&self) -> bool {
        self.hand_size < self.deck_size - self.hand_size.min(self.deck_size)
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deck_size < 2 {
            return Err(ConfigError::InvalidDeckSize(self.deck_size));
        }

        if self.hand_size == 0 || self.hand_size > self.deck_size / 2 {
            return Err(ConfigError::InvalidHandSize {
                hand_size: self.hand_size,
                deck_size: self.deck_size,
            });
        }

        if !(self.stake.is_finite() && self.stake > 0.0) {
            return Err(ConfigError::InvalidStake(self.stake));
        }

        if !(self.refusal.is_finite() && self.refusal >= 0.0) {
            return Err(ConfigError::InvalidRefusal(self.refusal));
        }

        if self.samples == 0 {
            return Err(ConfigError::InvalidSamples);
        }

        if self.num_threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }

        Ok(())
    }
}

/// Errors that can occur when validating estimator configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Deck must hold at least two cards.
    InvalidDeckSize(u32),
    /// Hand size must satisfy `0 < k <= N / 2`.
    InvalidHandSize {
        /// Requested hand size.
        hand_size: u32,
        /// Deck size it was checked against.
        deck_size: u32,
    },
    /// Stake must be positive and finite.
    InvalidStake(f64),
    /// Refusal payoff must be non-negative and finite.
    InvalidRefusal(f64),
    /// Sample budget must be positive.
    InvalidSamples,
    /// Thread count must be positive.
    InvalidThreads,
    /// The thread pool could not be built.
    ThreadPool(String),
    /// The configuration file could not be read.
    Io(String),
    /// The configuration file is not valid JSON.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDeckSize(n) => {
                write!(f, "Deck size {} is too small (need at least 2)", n)
            }
            ConfigError::InvalidHandSize {
                hand_size,
                deck_size,
            } => write!(
                f,
                "Hand size {} is out of range (0, {}] for a deck of {}",
                hand_size,
                deck_size / 2,
                deck_size
            ),
            ConfigError::InvalidStake(val) => write!(f, "Stake {} must be positive", val),
            ConfigError::InvalidRefusal(val) => {
                write!(f, "Refusal payoff {} must be non-negative", val)
            }
            ConfigError::InvalidSamples => write!(f, "Sample budget must be positive"),
            ConfigError::InvalidThreads => write!(f, "Thread count must be positive"),
            ConfigError::ThreadPool(msg) => write!(f, "Failed to build thread pool: {}", msg),
            ConfigError::Io(msg) => write!(f, "Failed to read config: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
