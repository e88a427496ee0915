//! Converts completed games into per-ply training samples and serializes
//! them to JSON.
//!
//! Generalized from the teacher's `recording/game_record.rs`
//! (`encode_plateau`/CSV-row writer) into the spec's JSON array shape: one
//! `TrainingSample` per non-final board snapshot instead of one CSV row per
//! completed deal.

use crate::error::Result;
use crate::game::board::{Board, Player};
use crate::game::result::{GameResult, Outcome};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub board_state: Board,
    pub current_player: Player,
    /// +1 win, -1 loss, 0 draw, from `current_player`'s point of view.
    pub value: i8,
    pub game_length: usize,
    pub move_index: usize,
}

fn outcome_value(outcome: Outcome, player: Player) -> i8 {
    match (outcome, player) {
        (Outcome::Red, Player::Red) | (Outcome::Blue, Player::Blue) => 1,
        (Outcome::Draw, _) => 0,
        _ => -1,
    }
}

/// One sample per non-final snapshot: `snapshots[i]` paired with the player
/// who moved away from it (`move_log[i].1`), for every `i` in
/// `0..move_log.len()`. The final snapshot (the terminal board) has no
/// "player to move from it" and is excluded, matching §4.6.
pub fn extract_samples(result: &GameResult) -> Vec<TrainingSample> {
    result
        .move_log
        .iter()
        .enumerate()
        .map(|(move_index, &(_, player, _))| TrainingSample {
            board_state: result.snapshots[move_index],
            current_player: player,
            value: outcome_value(result.winner, player),
            game_length: result.plies,
            move_index,
        })
        .collect()
}

/// Flattens `extract_samples` over every game in `results` and writes the
/// whole corpus pretty-printed to `path`.
pub fn write_training_corpus(results: &[GameResult], path: impl AsRef<Path>) -> Result<()> {
    let samples: Vec<TrainingSample> = results.iter().flat_map(extract_samples).collect();
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &samples)
        .map_err(|err| crate::error::EngineError::WorkerFailure(err.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{Die, Move, Token};
    use std::time::Duration;

    fn sample_game_result() -> GameResult {
        let b0 = Board::empty().with_set(3, 4, Token::new(1));
        let b1 = b0.apply(Move {
            from_row: 3,
            from_col: 4,
            to_row: 4,
            to_col: 4,
        });
        GameResult {
            played_at: 0,
            winner: Outcome::Red,
            plies: 1,
            wall_time: Duration::ZERO,
            red_think_time: Duration::ZERO,
            blue_think_time: Duration::ZERO,
            final_board: b1,
            move_log: vec![(
                Move {
                    from_row: 3,
                    from_col: 4,
                    to_row: 4,
                    to_col: 4,
                },
                Player::Red,
                Die::new(1).unwrap(),
            )],
            snapshots: vec![b0, b1],
        }
    }

    #[test]
    fn extract_samples_excludes_the_terminal_snapshot() {
        let result = sample_game_result();
        let samples = extract_samples(&result);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].board_state, result.snapshots[0]);
        assert_eq!(samples[0].value, 1);
    }

    #[test]
    fn losing_side_gets_negative_value() {
        let mut result = sample_game_result();
        result.move_log[0].1 = Player::Blue;
        let samples = extract_samples(&result);
        assert_eq!(samples[0].value, -1);
    }

    #[test]
    fn write_training_corpus_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let results = vec![sample_game_result()];
        write_training_corpus(&results, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<TrainingSample> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
