//! The outcome of one played game. Grounded on the teacher's `GameRecord`
//! (`recording/game_record.rs`), narrowed to the fields the spec names and
//! generalized from a single-player-type recorder to the two-searcher battle
//! harness's (Move, Player, Die) move log.

use crate::game::board::{Board, Die, Move, Player};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Red,
    Blue,
    Draw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    /// Unix timestamp (seconds) of when the game started, matching the
    /// teacher's `GameRecord::timestamp` (`chrono::Utc::now().timestamp()`).
    pub played_at: i64,
    pub winner: Outcome,
    pub plies: usize,
    pub wall_time: Duration,
    pub red_think_time: Duration,
    pub blue_think_time: Duration,
    pub final_board: Board,
    pub move_log: Vec<(Move, Player, Die)>,
    pub snapshots: Vec<Board>,
}

impl GameResult {
    pub fn think_time(&self, player: Player) -> Duration {
        match player {
            Player::Red => self.red_think_time,
            Player::Blue => self.blue_think_time,
        }
    }
}
