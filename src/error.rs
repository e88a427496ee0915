//! Crate-wide error type.
//!
//! `SearchBudgetExceeded` and `TerminalMisuse` from the spec are deliberately
//! not variants here: a wall-time cap is not a failure (the search returns its
//! best move so far) and requesting a move on a terminal board collapses into
//! `NoLegalMove` at the call site.

use crate::game::{Board, Die, Player};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("malformed input: {0}")]
    IllegalInput(String),

    #[error("no legal move for {player:?} with die {die:?} on {board:?}")]
    NoLegalMove {
        board: Board,
        die: Die,
        player: Player,
    },

    #[error("worker game failed: {0}")]
    WorkerFailure(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
