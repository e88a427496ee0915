//! # EinStein wurfelt nicht! engine and probability-guided MCTS
//!
//! A dice-driven two-player board game engine plus a probability-guided
//! Monte Carlo Tree Search (PMCTS) over it, and a batch tournament harness
//! for running many AI-vs-AI games in parallel.
//!
//! ## Modules
//!
//! - [`game`]: board/move/player/die types, legal-move rules, the default
//!   opening, and completed-game records.
//! - [`mcts`]: the chance/decision search tree and the PMCTS search loop.
//! - [`harness`]: single and batch AI-vs-AI games, round-robin tournaments.
//! - [`training`]: per-ply training-sample extraction and JSON export.
//! - [`ioformat`]: the external file-exchange protocol.
//! - [`error`]: the crate-wide error type.
//! - [`logging`]: rotating-file logging setup.

pub mod error;
pub mod game;
pub mod harness;
pub mod ioformat;
pub mod logging;
pub mod mcts;
pub mod training;

pub use error::{EngineError, Result};

/// Library version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description.
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
