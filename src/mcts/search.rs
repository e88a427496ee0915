//! The PMCTS search: selection, expansion, rollout, back-propagation, and
//! best-move extraction.
//!
//! The UCB1 shape and the overall four-phase loop are grounded on the
//! teacher's `mcts/selection.rs` (`select_decision_child`) and
//! `mcts/expectimax_algorithm.rs`; the exact selection/back-propagation
//! semantics (random chance-node draw, first-parent-only back-propagation,
//! the inverted rollout-value convention) are ground-truthed against
//! `examples/original_source/core/pmcts.py`
//! (`PMCTS._select`/`_expand`/`MCTSNode.simulate`/`MCTSNode.backpropagate`).

use crate::game::board::{Board, Die, Move, Player};
use crate::game::dice::Dice;
use crate::game::rules;
use crate::mcts::tree::{ChanceId, DecisionId, Tree};
use rand::Rng;
use std::time::{Duration, Instant};

/// Iteration budget for one `search()` call.
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    pub simulations: u32,
    pub time_cap: Option<Duration>,
}

impl SearchBudget {
    pub fn simulations(simulations: u32) -> Self {
        SearchBudget {
            simulations,
            time_cap: None,
        }
    }
}

/// Rollout value source. The spec's default contract is pure-random;
/// `Heuristic` is the explicit, off-by-default alternative the distilled
/// spec's §9 design notes call for so `rules::heuristic_value` is wired to a
/// real caller instead of being dead code: at each rollout ply, the legal
/// moves are ranked by `heuristic_value` of the resulting board and one is
/// drawn uniformly at random from the top `sample_top_k` (clamped to however
/// many legal moves exist), rather than always taking the single best move.
#[derive(Debug, Clone, Copy, Default)]
pub enum RolloutPolicy {
    #[default]
    PureRandom,
    Heuristic {
        sample_top_k: usize,
    },
}

const PLY_CAP: usize = 200;

pub struct PmctsSearch<R: Rng> {
    pub exploration_constant: f64,
    pub rollout_policy: RolloutPolicy,
    rng: R,
}

impl<R: Rng> PmctsSearch<R> {
    pub fn new(rng: R, exploration_constant: f64) -> Self {
        PmctsSearch {
            exploration_constant,
            rollout_policy: RolloutPolicy::default(),
            rng,
        }
    }

    /// `search(board, die, player, budget) -> Option<Move>` per SPEC_FULL.md
    /// §4.4.
    pub fn search(
        &mut self,
        board: &Board,
        die: Die,
        player: Player,
        budget: SearchBudget,
    ) -> Option<Move> {
        let initial_moves = rules::legal_moves(board, die, player);
        if initial_moves.is_empty() {
            return None;
        }
        if initial_moves.len() == 1 {
            return Some(initial_moves[0]);
        }

        let mut tree = Tree::new();
        let root = tree.new_root(*board, player, die);
        tree.expand(root);

        let start = Instant::now();
        for i in 0..budget.simulations {
            if let Some(cap) = budget.time_cap {
                if start.elapsed() >= cap {
                    break;
                }
            }
            let _ = i;
            self.iterate(&mut tree, root);
        }

        self.extract_best_move(&tree, root, die)
    }

    /// One selection/expansion/rollout/back-propagation cycle.
    fn iterate(&mut self, tree: &mut Tree, root: DecisionId) {
        let leaf = self.select(tree, root);

        if !rules::is_terminal(&tree.decision(leaf).board) && !tree.decision(leaf).is_fully_expanded() {
            tree.expand(leaf);
        }

        let rollout_player = tree.decision(leaf).player;
        let rollout_board = tree.decision(leaf).board;
        let result = self.rollout(&rollout_board, rollout_player);

        self.backpropagate(tree, leaf, result);
    }

    /// Phase 1: selection. Walks root -> leaf, drawing a chance node by the
    /// decision node's distribution (deterministic to the observed die at
    /// the root, uniform-random over six elsewhere) and then picking the
    /// UCB1-maximizing decision child. Stops as soon as the current node has
    /// no chance children, is terminal, or the drawn chance node has no
    /// decision children (no legal move under that die here).
    fn select(&mut self, tree: &Tree, root: DecisionId) -> DecisionId {
        let mut current = root;
        loop {
            let node = tree.decision(current);
            if node.chance_children.is_empty() || rules::is_terminal(&node.board) {
                return current;
            }

            let chance_id = self.sample_chance(tree, current);
            let chance = tree.chance(chance_id);
            if chance.children.is_empty() {
                return current;
            }

            current = self.select_by_ucb1(tree, current, chance_id);
        }
    }

    /// Draws a ChanceNode from a DecisionNode's distribution.
    fn sample_chance(&mut self, tree: &Tree, decision: DecisionId) -> ChanceId {
        let node = tree.decision(decision);
        let candidates: Vec<ChanceId> = node.chance_children.values().copied().collect();

        if node.is_root {
            return candidates
                .into_iter()
                .find(|&id| tree.chance(id).probability > 0.0)
                .expect("root always has the observed die's chance node with mass 1.0");
        }

        let index = self.rng.random_range(0..candidates.len());
        candidates[index]
    }

    /// UCB1 = mean_value + c * sqrt(2 * ln(N_parent) / n_child). Any child
    /// with zero visits is chosen immediately, ties broken in insertion
    /// order (the order `ChanceNode::children` was built in).
    fn select_by_ucb1(&self, tree: &Tree, parent: DecisionId, chance: ChanceId) -> DecisionId {
        let parent_visits = tree.decision(parent).visits as f64;
        let chance_node = tree.chance(chance);

        for &child in &chance_node.children {
            if tree.decision(child).visits == 0 {
                return child;
            }
        }

        let mut best = chance_node.children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &child in &chance_node.children {
            let child_node = tree.decision(child);
            let mean = child_node.mean_value().unwrap_or(0.0);
            let exploration = self.exploration_constant
                * (2.0 * parent_visits.ln() / child_node.visits as f64).sqrt();
            let score = mean + exploration;
            if score > best_score {
                best_score = score;
                best = child;
            }
        }
        best
    }

    /// Phase 3: rollout. Simulates to terminal or `PLY_CAP` plies, returning
    /// a scalar from the originating node's player's perspective: 0.0 if that
    /// player won, 1.0 if the opponent won, 0.5 otherwise. This inverted
    /// convention (win = 0.0) is intentional and combines with the sign flip
    /// in back-propagation; see SPEC_FULL.md §9(a) — do not "fix" it.
    fn rollout(&mut self, board: &Board, originating_player: Player) -> f64 {
        let mut current = *board;
        let mut side = originating_player;

        for _ in 0..PLY_CAP {
            if rules::is_terminal(&current) {
                break;
            }
            let die = Die::new(self.rng.random_range(1..=6)).unwrap();
            let mut moves = rules::legal_moves(&current, die, side);
            if moves.is_empty() {
                break;
            }
            let mv = match self.rollout_policy {
                RolloutPolicy::PureRandom => moves[self.rng.random_range(0..moves.len())],
                RolloutPolicy::Heuristic { sample_top_k } => {
                    moves.sort_by(|a, b| {
                        let va = rules::heuristic_value(&current.apply(*a), side);
                        let vb = rules::heuristic_value(&current.apply(*b), side);
                        vb.partial_cmp(&va).unwrap()
                    });
                    let k = sample_top_k.max(1).min(moves.len());
                    moves[self.rng.random_range(0..k)]
                }
            };
            current = current.apply(mv);
            side = side.opponent();
        }

        match rules::winner(&current) {
            Some(w) if w == originating_player => 0.0,
            Some(_) => 1.0,
            None => 0.5,
        }
    }

    /// Phase 4: back-propagation. Updates the originating node, then walks up
    /// via the *first* parent chance node only (stable insertion order),
    /// inverting the scalar at every hop, stopping at the root.
    fn backpropagate(&self, tree: &mut Tree, origin: DecisionId, result: f64) {
        let mut current = origin;
        let mut value = result;
        loop {
            let node = tree.decision_mut(current);
            node.visits += 1;
            node.value += value;

            let Some(&first_parent_chance) = node.parent_chance_nodes.first() else {
                return;
            };
            current = tree.chance(first_parent_chance).parent;
            value = -value;
        }
    }

    /// Root's ChanceNode for the observed die -> max-visits child, ties by
    /// insertion order.
    fn extract_best_move(&self, tree: &Tree, root: DecisionId, die: Die) -> Option<Move> {
        let root_node = tree.decision(root);
        let chance_id = *root_node.chance_children.get(&die.value())?;
        let chance = tree.chance(chance_id);

        let mut best: Option<(DecisionId, u32)> = None;
        for &child in &chance.children {
            let visits = tree.decision(child).visits;
            if best.map(|(_, v)| visits > v).unwrap_or(true) {
                best = Some((child, visits));
            }
        }
        best.and_then(|(id, _)| tree.decision(id).incoming_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Token;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn opening_board() -> Board {
        Board::empty()
            .with_set(3, 3, Token::new(3))
            .with_set(4, 4, Token::new(5))
            .with_set(0, 1, Token::new(8))
            .with_set(1, 0, Token::new(10))
    }

    #[test]
    fn single_legal_move_short_circuits_search() {
        let board = Board::empty()
            .with_set(3, 4, Token::new(1))
            .with_set(4, 4, Token::new(2));
        let mut search = PmctsSearch::new(StdRng::seed_from_u64(1), 1.0);
        let mv = search.search(&board, Die::new(1).unwrap(), Player::Red, SearchBudget::simulations(1));
        assert_eq!(
            mv,
            Some(Move {
                from_row: 3,
                from_col: 4,
                to_row: 4,
                to_col: 4
            })
        );
    }

    #[test]
    fn no_legal_moves_returns_none() {
        let board = Board::empty();
        let mut search = PmctsSearch::new(StdRng::seed_from_u64(1), 1.0);
        let mv = search.search(&board, Die::new(1).unwrap(), Player::Red, SearchBudget::simulations(10));
        assert_eq!(mv, None);
    }

    #[test]
    fn search_is_deterministic_given_a_seed() {
        let board = opening_board();
        let die = Die::new(4).unwrap();
        let mut s1 = PmctsSearch::new(StdRng::seed_from_u64(123), 1.0);
        let mv1 = s1.search(&board, die, Player::Red, SearchBudget::simulations(500));
        let mut s2 = PmctsSearch::new(StdRng::seed_from_u64(123), 1.0);
        let mv2 = s2.search(&board, die, Player::Red, SearchBudget::simulations(500));
        assert_eq!(mv1, mv2);
    }

    #[test]
    fn root_visit_count_matches_iteration_count() {
        let board = opening_board();
        let die = Die::new(4).unwrap();
        let mut search = PmctsSearch::new(StdRng::seed_from_u64(7), 1.0);
        let initial_moves = rules::legal_moves(&board, die, Player::Red);
        assert!(initial_moves.len() > 1, "test needs a branching position");

        let mut tree = Tree::new();
        let root = tree.new_root(board, Player::Red, die);
        tree.expand(root);
        for _ in 0..64 {
            search.iterate(&mut tree, root);
        }
        assert_eq!(tree.decision(root).visits, 64);
    }

    #[test]
    fn rollout_orientation_is_inverted() {
        // Red to move with only a winning move available: the rollout
        // originates at the pre-move Red-to-move node, so the *opponent*
        // effectively loses immediately -> originating player (Red) wins,
        // and the spec's convention returns 0.0 for that case.
        let board = Board::empty()
            .with_set(3, 4, Token::new(1))
            .with_set(0, 0, Token::new(7));
        let mut search = PmctsSearch::new(StdRng::seed_from_u64(1), 1.0);
        let value = search.rollout(&board.apply(Move { from_row: 3, from_col: 4, to_row: 4, to_col: 4 }), Player::Red);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn heuristic_rollout_with_top_k_one_prefers_the_terminal_move() {
        // Lone Red token at (3,3): of its three legal destinations,
        // (4,4) is the corner and strictly maximizes heuristic_value (the
        // other two leave distance 1, this one leaves distance 0), so
        // sample_top_k=1 must pick it deterministically regardless of die.
        let board = Board::empty().with_set(3, 3, Token::new(3));
        let mut search = PmctsSearch::new(StdRng::seed_from_u64(5), 1.0);
        search.rollout_policy = RolloutPolicy::Heuristic { sample_top_k: 1 };
        let value = search.rollout(&board, Player::Red);
        assert_eq!(value, 0.0);
    }

    #[test]
    fn heuristic_rollout_clamps_sample_top_k_to_available_moves() {
        let board = Board::empty().with_set(3, 3, Token::new(3));
        let mut search = PmctsSearch::new(StdRng::seed_from_u64(9), 1.0);
        search.rollout_policy = RolloutPolicy::Heuristic { sample_top_k: 100 };
        let value = search.rollout(&board, Player::Red);
        assert!((0.0..=1.0).contains(&value));
    }
}
