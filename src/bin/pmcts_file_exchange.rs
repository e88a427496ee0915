//! One-shot file-exchange entry point for an external orchestrator: read a
//! board+die+difficulty file, run one PMCTS search, write the post-move
//! board, exit.
//!
//! CLI shape grounded on the teacher's `src/bin/ai_arena.rs` (`#[derive(Parser)]`
//! `Args`, `flexi_logger` setup in `main`); the read/compute/write/exit-code
//! contract itself is grounded on `examples/original_source/core/file_handler.py`
//! and `core/config.py`'s file-pair-per-side convention.

use clap::Parser;
use einstein_pmcts::game::board::Player;
use einstein_pmcts::ioformat;
use einstein_pmcts::mcts::search::PmctsSearch;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "pmcts-file-exchange",
    about = "Single-shot PMCTS move computation over the file-exchange protocol"
)]
struct Args {
    /// Which side this invocation is computing a move for.
    #[arg(long, value_enum)]
    player: CliPlayer,

    /// Input file: "<difficulty> <die>" header followed by 5 board rows.
    #[arg(long)]
    input: PathBuf,

    /// Output file: 5 board rows, no header.
    #[arg(long)]
    output: PathBuf,

    /// Fix the search RNG for reproducible runs; omitted means OS entropy.
    #[arg(long)]
    seed: Option<u64>,

    /// UCB1 exploration constant.
    #[arg(long, default_value_t = 1.0)]
    exploration_constant: f64,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum CliPlayer {
    Red,
    Blue,
}

impl From<CliPlayer> for Player {
    fn from(value: CliPlayer) -> Self {
        match value {
            CliPlayer::Red => Player::Red,
            CliPlayer::Blue => Player::Blue,
        }
    }
}

fn main() -> ExitCode {
    if let Err(err) = einstein_pmcts::logging::setup_logging() {
        eprintln!("failed to set up logging: {err}");
    }

    let args = Args::parse();
    let player: Player = args.player.into();

    let parsed = match ioformat::parse_input_file(&args.input) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::error!("failed to parse input file {:?}: {err}", args.input);
            return ExitCode::FAILURE;
        }
    };

    let budget = match ioformat::budget_for_difficulty(parsed.difficulty) {
        Ok(budget) => budget,
        Err(err) => {
            log::error!("invalid difficulty: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "{:?} PMCTS thinking: difficulty={} die={}",
        player,
        parsed.difficulty,
        parsed.die.value()
    );

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut search = PmctsSearch::new(rng, args.exploration_constant);
    let chosen = search.search(&parsed.board, parsed.die, player, budget);

    let output_board = match chosen {
        Some(mv) => {
            log::info!("chosen move: {mv}");
            parsed.board.apply(mv)
        }
        None => {
            log::warn!("no legal move for {player:?}; writing input board back unchanged");
            parsed.board
        }
    };

    if let Err(err) = ioformat::write_output_file(&args.output, &output_board) {
        log::error!("failed to write output file {:?}: {err}", args.output);
        let _ = ioformat::write_output_file(&args.output, &parsed.board);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
