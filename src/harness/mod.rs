//! Batch tournament harness: single and batch AI-vs-AI games, plus
//! round-robin scoring across more than two configs.

pub mod battle;
pub mod tournament;

pub use battle::{batch_battle, single_battle, SearcherConfig};
pub use tournament::{tournament, MatchReport, TournamentReport};
