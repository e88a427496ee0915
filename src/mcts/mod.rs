//! Probability-guided MCTS: the chance/decision tree and the search loop
//! built on top of it.

pub mod search;
pub mod tree;

pub use search::{PmctsSearch, RolloutPolicy, SearchBudget};
pub use tree::{ChanceId, ChanceNode, DecisionId, DecisionNode, Tree};
