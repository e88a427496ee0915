//! Board, token, player, die, and move types.
//!
//! The board is value-typed: every operation that changes a position returns
//! a new `Board` rather than mutating the receiver, mirroring the teacher's
//! `Plateau`/`Tile` value types in `game/plateau.rs`.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIZE: usize = 5;

/// One of the 12 distinct pieces on the board. Red owns 1..=6, Blue owns
/// 7..=12 (Blue's piece with face value `k` is token `6 + k`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Token(u8);

impl Token {
    pub fn new(value: u8) -> Option<Self> {
        if (1..=12).contains(&value) {
            Some(Token(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn owner(self) -> Player {
        if self.0 <= 6 {
            Player::Red
        } else {
            Player::Blue
        }
    }
}

/// The two sides. Red is +1, Blue is -1 in arithmetic contexts (sign flips in
/// back-propagation and the positional heuristic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn sign(self) -> f64 {
        match self {
            Player::Red => 1.0,
            Player::Blue => -1.0,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// The goal corner this player's pieces are moving toward.
    pub fn goal(self) -> (usize, usize) {
        match self {
            Player::Red => (SIZE - 1, SIZE - 1),
            Player::Blue => (0, 0),
        }
    }

    /// Canonical token range owned by this player.
    pub fn token_range(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Player::Red => 1..=6,
            Player::Blue => 7..=12,
        }
    }

    /// The token selected directly by a die roll (before the nearest-
    /// neighbours fallback).
    pub fn canonical_token(self, die: Die) -> Token {
        let value = match self {
            Player::Red => die.value(),
            Player::Blue => die.value() + 6,
        };
        Token::new(value).expect("die value in 1..=6 always yields a valid token")
    }

    /// The three direction vectors this player's pieces may move along.
    pub fn directions(self) -> [(isize, isize); 3] {
        match self {
            Player::Red => [(1, 0), (0, 1), (1, 1)],
            Player::Blue => [(-1, 0), (0, -1), (-1, -1)],
        }
    }
}

/// A die roll, constrained to `1..=6` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die(u8);

impl Die {
    pub fn new(value: u8) -> Option<Self> {
        if (1..=6).contains(&value) {
            Some(Die(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn all() -> [Die; 6] {
        [Die(1), Die(2), Die(3), Die(4), Die(5), Die(6)]
    }
}

/// A move from one cell to an adjacent-in-direction cell, both in-bounds.
/// Always tied to the `(board, die, player)` context that generated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.from_row, self.from_col, self.to_row, self.to_col
        )
    }
}

/// Immutable 5x5 position. Cells are stored row-major, 0 meaning empty and
/// 1..=12 a token value, matching the wire encoding used by the file-exchange
/// protocol (SPEC_FULL.md §6) so (de)serialization never needs translation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [u8; SIZE * SIZE],
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in 0..SIZE {
            write!(f, "  ")?;
            for col in 0..SIZE {
                write!(f, "{:2} ", self.cells[row * SIZE + col])?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [0; SIZE * SIZE],
        }
    }

    fn index(row: usize, col: usize) -> usize {
        row * SIZE + col
    }

    pub fn in_bounds(row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < SIZE && (col as usize) < SIZE
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        debug_assert!(row < SIZE && col < SIZE);
        Token::new(self.cells[Self::index(row, col)])
    }

    pub fn with_set(&self, row: usize, col: usize, token: Option<Token>) -> Board {
        let mut next = *self;
        next.cells[Self::index(row, col)] = token.map(Token::value).unwrap_or(0);
        next
    }

    /// Position of `token` on the board, if present.
    pub fn find(&self, token: Token) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&c| c == token.value())
            .map(|i| (i / SIZE, i % SIZE))
    }

    /// Every `(position, token)` pair belonging to `player`.
    pub fn tokens_of(&self, player: Player) -> impl Iterator<Item = ((usize, usize), Token)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, &c)| {
            Token::new(c).filter(|t| t.owner() == player).map(|t| ((i / SIZE, i % SIZE), t))
        })
    }

    pub fn count_of(&self, player: Player) -> usize {
        self.tokens_of(player).count()
    }

    /// Applies a move: writes the moving token into the destination, clears
    /// the source. Any pre-existing destination token (own or enemy) is
    /// overwritten. Never rejects; callers must pre-validate via
    /// `rules::legal_moves`.
    pub fn apply(&self, mv: Move) -> Board {
        let moving = self.get(mv.from_row, mv.from_col);
        self.with_set(mv.from_row, mv.from_col, None)
            .with_set(mv.to_row, mv.to_col, moving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_owner_splits_at_six() {
        assert_eq!(Token::new(1).unwrap().owner(), Player::Red);
        assert_eq!(Token::new(6).unwrap().owner(), Player::Red);
        assert_eq!(Token::new(7).unwrap().owner(), Player::Blue);
        assert_eq!(Token::new(12).unwrap().owner(), Player::Blue);
        assert!(Token::new(0).is_none());
        assert!(Token::new(13).is_none());
    }

    #[test]
    fn die_rejects_out_of_range() {
        assert!(Die::new(0).is_none());
        assert!(Die::new(7).is_none());
        assert_eq!(Die::new(3).unwrap().value(), 3);
    }

    #[test]
    fn apply_clears_source_and_overwrites_destination() {
        let board = Board::empty()
            .with_set(0, 0, Token::new(1))
            .with_set(1, 1, Token::new(7));
        let moved = board.apply(Move {
            from_row: 0,
            from_col: 0,
            to_row: 1,
            to_col: 1,
        });
        assert_eq!(moved.get(0, 0), None);
        assert_eq!(moved.get(1, 1), Token::new(1));
    }

    #[test]
    fn canonical_token_offsets_blue_by_six() {
        let die = Die::new(4).unwrap();
        assert_eq!(Player::Red.canonical_token(die).value(), 4);
        assert_eq!(Player::Blue.canonical_token(die).value(), 10);
    }
}
