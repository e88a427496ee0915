//! The file-exchange protocol: parsing an external orchestrator's input
//! file, writing the post-move board back out, and mapping difficulty to a
//! simulation budget.
//!
//! Grounded on `examples/original_source/core/file_handler.py`
//! (`parse_input_file`/`write_output_file`) for the exact wire shape and
//! `core/config.py`'s `MCTS_SIMULATIONS` table for the difficulty mapping;
//! re-expressed with `error::EngineError::IllegalInput` in place of the
//! original's best-effort fallback-to-defaults behaviour, since the spec
//! requires the boundary to refuse malformed input rather than silently
//! substitute a default board.

use crate::error::{EngineError, Result};
use crate::game::board::{Board, Die, Token, SIZE};
use crate::mcts::search::SearchBudget;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Parsed input: difficulty (still raw, 3..=5), the observed die, and the
/// board.
pub struct ParsedInput {
    pub difficulty: u8,
    pub die: Die,
    pub board: Board,
}

/// difficulty 3/4/5 -> 1000/10000/50000 simulations, per the original's
/// `Config.MCTS_SIMULATIONS` table.
pub fn budget_for_difficulty(difficulty: u8) -> Result<SearchBudget> {
    match difficulty {
        3 => Ok(SearchBudget::simulations(1_000)),
        4 => Ok(SearchBudget::simulations(10_000)),
        5 => Ok(SearchBudget::simulations(50_000)),
        other => Err(EngineError::IllegalInput(format!(
            "difficulty must be 3, 4, or 5, got {other}"
        ))),
    }
}

/// Parses the `<difficulty> <die>` header line followed by five
/// space-separated rows of five integers each (0 empty, 1..6 Red, 7..12
/// Blue). Any malformed line, out-of-range token, wrong row/column count, or
/// duplicate token is `IllegalInput`.
pub fn parse_input_file(path: impl AsRef<Path>) -> Result<ParsedInput> {
    let contents = fs::read_to_string(path)?;
    let mut lines = contents.lines();

    let header = lines
        .next()
        .ok_or_else(|| EngineError::IllegalInput("input file is empty".into()))?;
    let mut header_fields = header.split_whitespace();
    let difficulty: u8 = header_fields
        .next()
        .ok_or_else(|| EngineError::IllegalInput("missing difficulty field".into()))?
        .parse()
        .map_err(|_| EngineError::IllegalInput("difficulty is not an integer".into()))?;
    let die_value: u8 = header_fields
        .next()
        .ok_or_else(|| EngineError::IllegalInput("missing die field".into()))?
        .parse()
        .map_err(|_| EngineError::IllegalInput("die is not an integer".into()))?;
    let die = Die::new(die_value)
        .ok_or_else(|| EngineError::IllegalInput(format!("die out of range: {die_value}")))?;
    // Validated here so the error names the field; `Config.MCTS_SIMULATIONS`
    // range reused by `budget_for_difficulty`.
    if !(3..=5).contains(&difficulty) {
        return Err(EngineError::IllegalInput(format!(
            "difficulty out of range: {difficulty}"
        )));
    }

    let mut board = Board::empty();
    let mut seen = std::collections::HashSet::new();
    for row in 0..SIZE {
        let line = lines
            .next()
            .ok_or_else(|| EngineError::IllegalInput(format!("missing board row {row}")))?;
        let cells: Vec<&str> = line.split_whitespace().collect();
        if cells.len() != SIZE {
            return Err(EngineError::IllegalInput(format!(
                "row {row} has {} cells, expected {SIZE}",
                cells.len()
            )));
        }
        for (col, cell) in cells.into_iter().enumerate() {
            let value: u8 = cell
                .parse()
                .map_err(|_| EngineError::IllegalInput(format!("cell ({row},{col}) is not an integer")))?;
            if value == 0 {
                continue;
            }
            let token = Token::new(value)
                .ok_or_else(|| EngineError::IllegalInput(format!("token value out of range: {value}")))?;
            if !seen.insert(token.value()) {
                return Err(EngineError::IllegalInput(format!(
                    "token {value} appears more than once"
                )));
            }
            board = board.with_set(row, col, Some(token));
        }
    }

    Ok(ParsedInput {
        difficulty,
        die,
        board,
    })
}

/// Writes the five board rows only (no header), matching
/// `FileHandler.write_output_file`.
pub fn write_output_file(path: impl AsRef<Path>, board: &Board) -> Result<()> {
    let mut out = String::new();
    for row in 0..SIZE {
        for col in 0..SIZE {
            if col > 0 {
                out.push(' ');
            }
            let value = board.get(row, col).map(Token::value).unwrap_or(0);
            let _ = write!(out, "{value}");
        }
        out.push('\n');
    }
    fs::write(path, out)?;
    Ok(())
}
