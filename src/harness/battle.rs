//! Single-game and batch battle orchestration.
//!
//! Grounded on the teacher's `src/bin/ai_arena.rs` (two-config AI-vs-AI match
//! runner, `--games`/`--simulations`/`--seed` CLI shape) generalized from a
//! CSV-logging single-process runner into the spec's serial/`rayon`-parallel
//! `batch_battle` with per-game isolation (§5: each worker owns its own RNG,
//! search instance, and game instance; no locks on the hot path).

use crate::game::board::{Board, Die, Player};
use crate::game::dice::{Dice, ThreadDie};
use crate::game::opening::seeded_opening;
use crate::game::result::{GameResult, Outcome};
use crate::game::rules;
use crate::mcts::search::{PmctsSearch, SearchBudget};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct SearcherConfig {
    pub name: String,
    pub side: Player,
    pub budget: SearchBudget,
    pub exploration_constant: f64,
}

impl SearcherConfig {
    pub fn new(name: impl Into<String>, side: Player, budget: SearchBudget) -> Self {
        SearcherConfig {
            name: name.into(),
            side,
            budget,
            exploration_constant: 1.0,
        }
    }

    pub fn with_side(&self, side: Player) -> Self {
        SearcherConfig {
            side,
            ..self.clone()
        }
    }
}

/// Derives a per-move RNG seed from a game seed and the ply index, so each
/// move's search gets a fresh, independent-looking but fully deterministic
/// stream (a search tree is never reused across moves, matching SPEC_FULL's
/// "no sharing across searches" lifecycle rule).
fn per_move_seed(game_seed: u64, ply: usize) -> u64 {
    game_seed
        .wrapping_add(ply as u64)
        .wrapping_mul(0x9E3779B97F4A7C15)
}

/// Plays one game between `config_a` and `config_b` (exactly one of which
/// must have `side == Player::Red` and the other `side == Player::Blue`).
/// Seeds the board from `initial_board` or the default opening, rolls dice
/// with a harness-owned [`ThreadDie`], passes the turn on an empty legal-move
/// set, and stops on terminal or `ply_cap` (Draw on cap).
pub fn single_battle(
    config_a: &SearcherConfig,
    config_b: &SearcherConfig,
    initial_board: Option<Board>,
    ply_cap: usize,
    seed: u64,
) -> GameResult {
    let (red_config, blue_config) = match (config_a.side, config_b.side) {
        (Player::Red, Player::Blue) => (config_a, config_b),
        (Player::Blue, Player::Red) => (config_b, config_a),
        _ => panic!("single_battle requires one Red config and one Blue config"),
    };

    let mut board = initial_board.unwrap_or_else(|| seeded_opening(seed));
    let mut dice = ThreadDie::seeded(seed);
    let mut side = Player::Red;

    let mut move_log = Vec::new();
    let mut snapshots = vec![board];
    let mut red_think = Duration::ZERO;
    let mut blue_think = Duration::ZERO;
    let mut plies = 0usize;
    let wall_start = Instant::now();
    let played_at = chrono::Utc::now().timestamp();

    let winner = loop {
        if rules::is_terminal(&board) {
            break rules::winner(&board);
        }
        if plies >= ply_cap {
            break None;
        }

        let die: Die = dice.roll();
        let legal = rules::legal_moves(&board, die, side);
        if legal.is_empty() {
            side = side.opponent();
            continue;
        }

        let config = match side {
            Player::Red => red_config,
            Player::Blue => blue_config,
        };

        let think_start = Instant::now();
        let mut searcher = PmctsSearch::new(
            StdRng::seed_from_u64(per_move_seed(seed, plies)),
            config.exploration_constant,
        );
        let chosen = searcher.search(&board, die, side, config.budget);
        let elapsed = think_start.elapsed();
        match side {
            Player::Red => red_think += elapsed,
            Player::Blue => blue_think += elapsed,
        }

        match chosen {
            Some(mv) => {
                board = board.apply(mv);
                move_log.push((mv, side, die));
                snapshots.push(board);
                plies += 1;
                side = side.opponent();
            }
            None => side = side.opponent(),
        }
    };

    GameResult {
        played_at,
        winner: match winner {
            Some(Player::Red) => Outcome::Red,
            Some(Player::Blue) => Outcome::Blue,
            None => Outcome::Draw,
        },
        plies,
        wall_time: wall_start.elapsed(),
        red_think_time: red_think,
        blue_think_time: blue_think,
        final_board: board,
        move_log,
        snapshots,
    }
}

/// Runs `num_games` independent games between `config_blue`'s and
/// `config_red`'s sides. `parallel` distributes games across a `rayon`
/// worker pool of `max_workers` threads; a panicking game is logged and
/// omitted from the result vector (`EngineError::WorkerFailure`), and the
/// progress callback fires once per completed game with a running count, not
/// a partial view into the results (callers must not read the returned
/// vector before this function returns).
#[allow(clippy::too_many_arguments)]
pub fn batch_battle(
    config_blue: &SearcherConfig,
    config_red: &SearcherConfig,
    num_games: usize,
    parallel: bool,
    max_workers: usize,
    base_seed: u64,
    on_progress: impl Fn(usize) + Sync,
) -> Vec<GameResult> {
    let run_one = |game_index: usize| -> Option<GameResult> {
        let seed = base_seed.wrapping_add(game_index as u64);
        let result = catch_unwind(AssertUnwindSafe(|| {
            single_battle(config_red, config_blue, None, 200, seed)
        }));
        match result {
            Ok(game_result) => Some(game_result),
            Err(_) => {
                log::error!("batch_battle: game {game_index} panicked, omitting from results");
                None
            }
        }
    };

    let completed = AtomicUsize::new(0);
    let report_progress = |result: Option<GameResult>| {
        let count = completed.fetch_add(1, Ordering::SeqCst) + 1;
        on_progress(count);
        result
    };

    if parallel {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(max_workers.max(1))
            .build()
            .expect("building a bounded rayon thread pool never fails for a sane thread count");
        pool.install(|| {
            use rayon::prelude::*;
            (0..num_games)
                .into_par_iter()
                .map(|i| report_progress(run_one(i)))
                .filter_map(|r| r)
                .collect()
        })
    } else {
        (0..num_games)
            .map(|i| report_progress(run_one(i)))
            .filter_map(|r| r)
            .collect()
    }
}
