//! Batch/tournament CLI: loads a JSON config describing searcher configs,
//! runs either a two-way batch or a round-robin tournament, and writes a
//! JSON report plus (batch mode only, where individual `GameResult`s are
//! still in hand) a training corpus.
//!
//! Grounded on the teacher's `src/bin/ai_arena.rs` (`--tournament` flag,
//! `--games`/`--seed`/`--output` CLI shape, summary logging at the end of a
//! run), generalized from a fixed two-model arena into a config-file-driven
//! N-way runner.

use clap::Parser;
use einstein_pmcts::game::board::Player;
use einstein_pmcts::harness::{batch_battle, tournament, SearcherConfig};
use einstein_pmcts::mcts::search::SearchBudget;
use einstein_pmcts::training::write_training_corpus;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "tournament-runner",
    about = "Run a batch match or round-robin tournament between PMCTS searcher configs"
)]
struct Args {
    /// JSON file listing the searcher configs to run.
    #[arg(long)]
    config: PathBuf,

    /// Games per match (pairwise, in tournament mode).
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Worker pool size for parallel games.
    #[arg(long, default_value_t = 4)]
    workers: usize,

    /// Base RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Where to write the JSON report (match/tournament results).
    #[arg(long, default_value = "tournament_report.json")]
    report: PathBuf,

    /// Where to write the training-sample corpus. Only produced in two-config
    /// batch mode, where individual game records survive the run.
    #[arg(long)]
    training_output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfiguredSearcher {
    name: String,
    simulations: u32,
    #[serde(default = "default_exploration_constant")]
    exploration_constant: f64,
}

fn default_exploration_constant() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct RunnerConfig {
    searchers: Vec<ConfiguredSearcher>,
}

impl From<&ConfiguredSearcher> for SearcherConfig {
    fn from(value: &ConfiguredSearcher) -> Self {
        let mut config = SearcherConfig::new(
            value.name.clone(),
            Player::Red,
            SearchBudget::simulations(value.simulations),
        );
        config.exploration_constant = value.exploration_constant;
        config
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Report {
    Batch {
        player_a: String,
        player_b: String,
        wins_a: usize,
        wins_b: usize,
        draws: usize,
    },
    Tournament(einstein_pmcts::harness::TournamentReport),
}

fn main() -> ExitCode {
    if let Err(err) = einstein_pmcts::logging::setup_logging() {
        eprintln!("failed to set up logging: {err}");
    }

    let args = Args::parse();

    let config: RunnerConfig = match File::open(&args.config).map(BufReader::new) {
        Ok(reader) => match serde_json::from_reader(reader) {
            Ok(config) => config,
            Err(err) => {
                log::error!("malformed config file {:?}: {err}", args.config);
                return ExitCode::FAILURE;
            }
        },
        Err(err) => {
            log::error!("could not open config file {:?}: {err}", args.config);
            return ExitCode::FAILURE;
        }
    };

    if config.searchers.len() < 2 {
        log::error!("need at least two searcher configs, got {}", config.searchers.len());
        return ExitCode::FAILURE;
    }

    let configs: Vec<SearcherConfig> = config.searchers.iter().map(SearcherConfig::from).collect();

    let report = if configs.len() == 2 {
        log::info!("running batch match: {} vs {}", configs[0].name, configs[1].name);
        let red = configs[0].with_side(Player::Red);
        let blue = configs[1].with_side(Player::Blue);
        let progress_total = args.games;
        let results = batch_battle(&blue, &red, args.games, true, args.workers, args.seed, |n| {
            if n % 10 == 0 || n == progress_total {
                log::info!("completed {n}/{progress_total} games");
            }
        });

        let wins_a = results
            .iter()
            .filter(|r| r.winner == einstein_pmcts::game::Outcome::Red)
            .count();
        let wins_b = results
            .iter()
            .filter(|r| r.winner == einstein_pmcts::game::Outcome::Blue)
            .count();
        let draws = results.len() - wins_a - wins_b;

        if let Some(path) = &args.training_output {
            if let Err(err) = write_training_corpus(&results, path) {
                log::error!("failed to write training corpus: {err}");
                return ExitCode::FAILURE;
            }
            log::info!("wrote training corpus to {path:?}");
        }

        Report::Batch {
            player_a: configs[0].name.clone(),
            player_b: configs[1].name.clone(),
            wins_a,
            wins_b,
            draws,
        }
    } else {
        log::info!("running {}-way round-robin tournament", configs.len());
        let report = tournament(&configs, args.games, args.seed);
        for standing in &report.standings {
            log::info!("  {}: {} pts", standing.0, standing.1);
        }
        Report::Tournament(report)
    };

    let file = match File::create(&args.report) {
        Ok(file) => file,
        Err(err) => {
            log::error!("failed to create report file {:?}: {err}", args.report);
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = serde_json::to_writer_pretty(file, &report) {
        log::error!("failed to write report: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
