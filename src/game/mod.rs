//! Core game engine: board/move/player/die types, rules, dice, the default
//! opening, and completed-game records.

pub mod board;
pub mod dice;
pub mod opening;
pub mod result;
pub mod rules;

pub use board::{Board, Die, Move, Player, Token};
pub use dice::{Dice, ThreadDie};
pub use opening::{default_opening, seeded_opening};
pub use result::{GameResult, Outcome};
