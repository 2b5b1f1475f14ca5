//! Hidden-information card game: estimates and single deals.
//!
//! Usage:
//!   cargo run --release --bin card_game -- estimate -n 10 -k 2 --stake 2.2 --samples 100000
//!   cargo run --release --bin card_game -- deal -n 10 -k 2 --stake 2.2 --cache max_cache.json
//!   cargo run --release --bin card_game -- sweep -n 10 -k 2 --from 1 --to 30 --steps 10
//!
//! `estimate` compares the Monte-Carlo first-party values with the exact
//! closed form. `deal` shuffles one deal, lets both parties decide from their
//! own hands only, and prints the outcome. `sweep` tabulates, for a range of
//! stakes, the estimated first-party values and the average utilities both
//! parties realize when they follow the decision rule.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use game_search::estimator::combinatorics::{expected_max, first_party_win_probability};
use game_search::estimator::{
    ChoiceValues, EstimatorConfig, HiddenInfoPolicy, MaxValueCache, MonteCarloEstimator,
};
use game_search::games::cards::CardGame;
use game_search::{Game, Player};

#[derive(Parser, Debug)]
#[command(
    name = "card_game",
    version,
    about = "Play-or-refuse estimates for the hidden-information card game"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the first party's play and refuse values
    Estimate {
        #[command(flatten)]
        params: Params,
        /// Show a progress bar while sampling
        #[arg(long)]
        progress: bool,
    },
    /// Deal one hand and let both parties decide
    Deal {
        #[command(flatten)]
        params: Params,
        /// JSON file caching expected maxima between runs
        #[arg(long, value_name = "FILE")]
        cache: Option<PathBuf>,
        /// Let the first party see the second party's first card
        #[arg(long)]
        peek: bool,
    },
    /// Tabulate values and average utilities over a range of stakes
    Sweep {
        #[command(flatten)]
        params: Params,
        /// Smallest stake
        #[arg(long, default_value_t = 1.0)]
        from: f64,
        /// Largest stake
        #[arg(long, default_value_t = 30.0)]
        to: f64,
        /// Number of stakes, evenly spaced
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// JSON file caching expected maxima between runs
        #[arg(long, value_name = "FILE")]
        cache: Option<PathBuf>,
        /// Let the first party see the second party's first card
        #[arg(long)]
        peek: bool,
    },
}

#[derive(Args, Debug)]
struct Params {
    /// Configuration JSON file; other flags are ignored when given
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Deck size N
    #[arg(short = 'n', long, default_value_t = 10)]
    deck: u32,
    /// Cards per hand k
    #[arg(short = 'k', long, default_value_t = 2)]
    hand: u32,
    /// Showdown stake
    #[arg(short = 'a', long, default_value_t = 2.2)]
    stake: f64,
    /// Payoff lost by refusing
    #[arg(long, default_value_t = 1.0)]
    refusal: f64,
    /// Monte-Carlo budget; at least N! enumerates every deal
    #[arg(short = 'p', long, default_value_t = 100_000)]
    samples: u64,
    /// Random seed
    #[arg(short = 's', long)]
    seed: Option<u64>,
    /// Worker threads (default: all cores)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

impl Params {
    fn to_config(&self) -> Result<EstimatorConfig, String> {
        if let Some(path) = &self.config {
            println!("Loading configuration from: {}", path.display());
            return EstimatorConfig::from_json_file(path).map_err(|e| e.to_string());
        }

        let mut config = EstimatorConfig::new(self.deck, self.hand, self.stake)
            .with_refusal(self.refusal)
            .with_samples(self.samples);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Estimate { params, progress } => estimate(&params, progress),
        Command::Deal {
            params,
            cache,
            peek,
        } => deal(&params, cache, peek),
        Command::Sweep {
            params,
            from,
            to,
            steps,
            cache,
            peek,
        } => sweep(&params, from, to, steps, cache, peek),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn estimate(params: &Params, progress: bool) -> Result<(), String> {
    let config = params.to_config()?;
    print_header(&config);

    let mut estimator = MonteCarloEstimator::new(config.clone()).map_err(|e| e.to_string())?;
    if progress {
        let pb = ProgressBar::new(estimator.budget().deals());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} deals ({eta})",
            )
            .map_err(|e| e.to_string())?
            .progress_chars("=>-"),
        );
        estimator = estimator.with_progress(pb);
    }

    let start = Instant::now();
    let estimate = estimator.estimate_first_party();
    let exact = ChoiceValues::from_win_probability(
        first_party_win_probability(config.deck_size, config.hand_size),
        &config.payoffs(),
    );

    println!(
        "\nDeals: {}{} (seed {})",
        estimate.samples,
        if estimate.exhaustive { ", exhaustive" } else { "" },
        estimator.seed()
    );
    println!("                  Monte-Carlo        Exact");
    println!(
        "P(first wins)     {:>11.6}  {:>11.6}",
        estimate.win_probability,
        first_party_win_probability(config.deck_size, config.hand_size)
    );
    println!("Play              {:>11.6}  {:>11.6}", estimate.values.play, exact.play);
    println!("Refuse            {:>11.6}  {:>11.6}", estimate.values.refuse, exact.refuse);
    println!(
        "E[max of k cards] {:>11.6}  {:>11.6}",
        estimator.expected_opponent_max(config.hand_size),
        expected_max(config.deck_size, config.hand_size)
    );
    println!("First party should: {}", estimate.values.best());
    println!("\nTime: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn open_cache(config: &EstimatorConfig) -> Result<MaxValueCache, String> {
    match &config.cache_path {
        Some(path) => MaxValueCache::open(path).map_err(|e| e.to_string()),
        None => Ok(MaxValueCache::in_memory()),
    }
}

fn deal(params: &Params, cache_path: Option<PathBuf>, peek: bool) -> Result<(), String> {
    let mut config = params.to_config()?;
    if let Some(path) = cache_path {
        config = config.with_cache_path(path);
    }
    print_header(&config);

    let estimator = MonteCarloEstimator::new(config.clone()).map_err(|e| e.to_string())?;
    let mut cache = open_cache(&config)?;
    let policy = HiddenInfoPolicy::from_estimator(&estimator, &mut cache).with_peek(peek);
    cache.flush().map_err(|e| e.to_string())?;
    println!("Expected first-party max: {:.4}", policy.expected_first_max());

    let mut rng = StdRng::seed_from_u64(estimator.seed());
    let game = CardGame::shuffled(
        config.deck_size,
        config.hand_size as usize,
        config.stake,
        &mut rng,
    )
    .map_err(|e| e.to_string())?
    .with_refusal(config.refusal);

    let mut state = game.initial_state();
    println!("\nDeal: {}", game.state_description(&state));

    let (first, second) = policy.solve_card_state(&game, &state);
    for (player, choice) in [(Player::First, first), (Player::Second, second)] {
        println!("{} chooses {}", player, choice);
        state = game.apply(&state, &choice).map_err(|e| e.to_string())?;
    }

    let utilities = game.utilities(&state).map_err(|e| e.to_string())?;
    println!("\nFinal: {}", game.state_description(&state));
    println!("Utilities: {}", utilities);
    Ok(())
}

fn sweep(
    params: &Params,
    from: f64,
    to: f64,
    steps: usize,
    cache_path: Option<PathBuf>,
    peek: bool,
) -> Result<(), String> {
    if steps == 0 || !(from.is_finite() && to.is_finite() && from > 0.0 && to >= from) {
        return Err("stakes must satisfy 0 < from <= to and steps must be positive".to_string());
    }

    let mut config = params.to_config()?;
    if let Some(path) = cache_path {
        config = config.with_cache_path(path);
    }
    print_header(&config);

    // The expected maximum does not depend on the stake.
    let mut cache = open_cache(&config)?;
    let base = MonteCarloEstimator::new(config.clone()).map_err(|e| e.to_string())?;
    let expected_first_max =
        HiddenInfoPolicy::from_estimator(&base, &mut cache).expected_first_max();
    cache.flush().map_err(|e| e.to_string())?;

    let start = Instant::now();
    println!(
        "\n{:>10} {:>11} {:>11} {:>11} {:>11}",
        "stake", "play", "refuse", "avg P1", "avg P2"
    );
    for i in 0..steps {
        let stake = if steps == 1 {
            from
        } else {
            from + (to - from) * i as f64 / (steps - 1) as f64
        };

        let mut config = config.clone();
        config.stake = stake;
        config.seed = Some(base.seed());
        let estimator = MonteCarloEstimator::new(config.clone()).map_err(|e| e.to_string())?;
        let estimate = estimator.estimate_first_party();
        let policy = HiddenInfoPolicy::new(config.payoffs(), expected_first_max).with_peek(peek);
        let average = policy.average_utilities(&estimator);

        println!(
            "{:>10.4} {:>11.6} {:>11.6} {:>11.6} {:>11.6}",
            stake,
            estimate.values.play,
            estimate.values.refuse,
            average[Player::First],
            average[Player::Second]
        );
    }
    println!("\nTime: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn print_header(config: &EstimatorConfig) {
    println!("=================================================");
    println!("  Card Game (N = {}, k = {})", config.deck_size, config.hand_size);
    println!("=================================================");
    println!(
        "Stake: {}, refusal: {}, budget: {}",
        config.stake, config.refusal, config.samples
    );
}
