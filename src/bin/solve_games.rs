//! Optimal self-play for the perfect-information games.
//!
//! Usage:
//!   cargo run --release --bin solve_games -- nim --count 21
//!   cargo run --release --bin solve_games -- tic-tac-toe --pruned
//!   cargo run --release --bin solve_games -- ones --rounds 6
//!
//! Every move is chosen by a fresh solve from the current state; the node
//! count of each solve is printed next to the move. Set `RUST_LOG=debug` for
//! per-solve log lines.

use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};

use game_search::games::nim::Nim;
use game_search::games::ones::{OnesGame, DEFAULT_ROUNDS};
use game_search::games::tic_tac_toe::TicTacToe;
use game_search::{
    AlphaBetaSolver, ExactSolver, Game, Player, SearchConfig, SearchError, Utilities, ZeroSum,
};

#[derive(Parser, Debug)]
#[command(
    name = "solve_games",
    version,
    about = "Play perfect-information games optimally against themselves"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Random seed for the root action ordering
    #[arg(short = 's', long, global = true)]
    seed: Option<u64>,

    /// Keep actions in their natural order instead of shuffling
    #[arg(long, global = true)]
    no_shuffle: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single-pile Nim, taking 1 to 3 objects per move
    Nim {
        /// Starting pile size
        #[arg(short = 'n', long, default_value_t = 21)]
        count: u32,
        /// Use the alpha-beta solver
        #[arg(long)]
        pruned: bool,
    },
    /// Tic-tac-toe from the empty board
    TicTacToe {
        /// Use the alpha-beta solver
        #[arg(long)]
        pruned: bool,
    },
    /// The ones game (general-sum, exact solver only)
    Ones {
        /// Bits written by each party
        #[arg(short = 'r', long, default_value_t = DEFAULT_ROUNDS)]
        rounds: usize,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = SearchConfig::new().with_shuffle(!cli.no_shuffle);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let start = Instant::now();
    let result = match cli.cmd {
        Command::Nim { count, pruned } => {
            println!("=== Nim ({} objects) ===\n", count);
            let game = Nim::new(count);
            if pruned {
                play_pruned(game, config)
            } else {
                play_exact(game, config)
            }
        }
        Command::TicTacToe { pruned } => {
            println!("=== Tic-tac-toe ===\n");
            if pruned {
                play_pruned(TicTacToe::new(), config)
            } else {
                play_exact(TicTacToe::new(), config)
            }
        }
        Command::Ones { rounds } => {
            println!("=== Ones game ({} rounds) ===\n", rounds);
            play_exact(OnesGame::new(rounds), config)
        }
    };

    match result {
        Ok(utilities) => {
            println!("\nFinal utilities: {}", utilities);
            println!("Total time: {:.3}s", start.elapsed().as_secs_f64());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Self-play with the exact solver; works for any game.
fn play_exact<G: Game>(game: G, config: SearchConfig) -> Result<Utilities, SearchError> {
    let mut solver = ExactSolver::new(game.clone(), config);
    let mut state = game.initial_state();
    println!("{}", game.state_description(&state));

    while !game.is_terminal(&state) {
        let mover = game.mover(&state);
        let decision = solver.solve(&state)?;
        print_move(mover, &game.action_name(&decision.action), decision.stats.nodes_expanded);
        println!("  value: {}", decision.value);

        state = game.apply(&state, &decision.action)?;
        println!("{}", game.state_description(&state));
    }

    Ok(game.utilities(&state)?)
}

/// Self-play with the alpha-beta solver.
fn play_pruned<G: ZeroSum>(game: G, config: SearchConfig) -> Result<Utilities, SearchError> {
    let mut solver = AlphaBetaSolver::new(game.clone(), config);
    let mut state = game.initial_state();
    println!("{}", game.state_description(&state));

    while !game.is_terminal(&state) {
        let mover = game.mover(&state);
        let decision = solver.solve(&state)?;
        print_move(mover, &game.action_name(&decision.action), decision.stats.nodes_expanded);
        println!("  value for {}: {}", Player::First, decision.value);

        state = game.apply(&state, &decision.action)?;
        println!("{}", game.state_description(&state));
    }

    Ok(game.utilities(&state)?)
}

fn print_move(mover: Player, action: &str, nodes: u64) {
    println!("{} plays {} ({} nodes)", mover, action, nodes);
}
