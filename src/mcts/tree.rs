//! Arena-backed DecisionNode/ChanceNode storage.
//!
//! Generalizes the teacher's owned-recursive `Vec<MCTSNode>` tree
//! (`mcts/node.rs`, `NodeType::Chance`/`Decision`) into an index arena: the
//! spec requires a single child DecisionNode to be reachable from more than
//! one ChanceNode of the *same* parent DecisionNode (a move legal under
//! several dice), which an owned-tree of `Vec<Child>` cannot express without
//! duplicating state. Two parallel arenas (`Vec<DecisionNode>`,
//! `Vec<ChanceNode>`) indexed by newtyped `u32`s give that sharing for free,
//! plus contiguous allocation and trivial teardown at the end of a search —
//! exactly the ownership model recorded as an explicit design goal in the
//! distilled spec's §9 design notes.

use crate::game::board::{Board, Die, Move, Player};
use crate::game::rules;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecisionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChanceId(pub u32);

#[derive(Debug, Clone)]
pub struct DecisionNode {
    pub board: Board,
    pub player: Player,
    pub incoming_move: Option<Move>,
    pub visits: u32,
    pub value: f64,
    pub is_root: bool,
    /// Only meaningful when `is_root`: the die actually observed at the root,
    /// which gets probability mass 1.0 at expansion time.
    pub observed_die: Option<Die>,
    pub chance_children: BTreeMap<u8, ChanceId>,
    pub parent_chance_nodes: Vec<ChanceId>,
}

impl DecisionNode {
    pub fn mean_value(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(self.value / self.visits as f64)
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.chance_children.len() == 6
    }
}

#[derive(Debug, Clone)]
pub struct ChanceNode {
    pub die: Die,
    pub probability: f64,
    pub parent: DecisionId,
    pub children: Vec<DecisionId>,
}

/// Owns every node created during one `search()` invocation. Dropped wholesale
/// when the search returns; never shared across searches.
#[derive(Debug, Default)]
pub struct Tree {
    decisions: Vec<DecisionNode>,
    chances: Vec<ChanceNode>,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            decisions: Vec::new(),
            chances: Vec::new(),
        }
    }

    pub fn new_root(&mut self, board: Board, player: Player, observed_die: Die) -> DecisionId {
        let id = DecisionId(self.decisions.len() as u32);
        self.decisions.push(DecisionNode {
            board,
            player,
            incoming_move: None,
            visits: 0,
            value: 0.0,
            is_root: true,
            observed_die: Some(observed_die),
            chance_children: BTreeMap::new(),
            parent_chance_nodes: Vec::new(),
        });
        id
    }

    pub fn decision(&self, id: DecisionId) -> &DecisionNode {
        &self.decisions[id.0 as usize]
    }

    pub fn decision_mut(&mut self, id: DecisionId) -> &mut DecisionNode {
        &mut self.decisions[id.0 as usize]
    }

    pub fn chance(&self, id: ChanceId) -> &ChanceNode {
        &self.chances[id.0 as usize]
    }

    fn push_decision(&mut self, node: DecisionNode) -> DecisionId {
        let id = DecisionId(self.decisions.len() as u32);
        self.decisions.push(node);
        id
    }

    fn push_chance(&mut self, node: ChanceNode) -> ChanceId {
        let id = ChanceId(self.chances.len() as u32);
        self.chances.push(node);
        id
    }

    /// One-shot expansion (spec §4.3/§4.4 phase 2): creates all six
    /// ChanceNode children with their probability mass, enumerates the union
    /// of legal moves across the six dice, creates one DecisionNode per
    /// unique move, and links it under every ChanceNode whose die admits it.
    ///
    /// Move creation order (and therefore the insertion order ties in
    /// selection/best-move-extraction break on) is: ascending die value,
    /// then the order `rules::legal_moves` emits moves for that die. The
    /// spec leaves the iteration order of the "union of legal moves" step
    /// unspecified; this is a deterministic, documented resolution (see
    /// DESIGN.md).
    pub fn expand(&mut self, id: DecisionId) {
        let node = self.decision(id).clone();
        debug_assert!(node.chance_children.is_empty());

        let mut chance_ids = BTreeMap::new();
        for die in Die::all() {
            let probability = if node.is_root {
                if node.observed_die == Some(die) {
                    1.0
                } else {
                    0.0
                }
            } else {
                1.0 / 6.0
            };
            let chance_id = self.push_chance(ChanceNode {
                die,
                probability,
                parent: id,
                children: Vec::new(),
            });
            chance_ids.insert(die.value(), chance_id);
        }

        let mut move_to_decision: BTreeMap<Move, DecisionId> = BTreeMap::new();
        for die in Die::all() {
            for mv in rules::legal_moves(&node.board, die, node.player) {
                move_to_decision.entry(mv).or_insert_with(|| {
                    let next_board = node.board.apply(mv);
                    self.push_decision(DecisionNode {
                        board: next_board,
                        player: node.player.opponent(),
                        incoming_move: Some(mv),
                        visits: 0,
                        value: 0.0,
                        is_root: false,
                        observed_die: None,
                        chance_children: BTreeMap::new(),
                        parent_chance_nodes: Vec::new(),
                    })
                });
            }
        }

        for die in Die::all() {
            let chance_id = chance_ids[&die.value()];
            for mv in rules::legal_moves(&node.board, die, node.player) {
                let decision_id = move_to_decision[&mv];
                self.chances[chance_id.0 as usize].children.push(decision_id);
                self.decisions[decision_id.0 as usize]
                    .parent_chance_nodes
                    .push(chance_id);
            }
        }

        self.decision_mut(id).chance_children = chance_ids;
    }
}

impl std::cmp::PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for Move {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.from_row, self.from_col, self.to_row, self.to_col).cmp(&(
            other.from_row,
            other.from_col,
            other.to_row,
            other.to_col,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Token;

    #[test]
    fn expansion_shares_a_move_legal_under_two_dice() {
        // Only token 3 present for Red: die=3 selects it directly, and since
        // no other Red token exists, dice 1,2,4,5,6 all fall back to the
        // same lone token via the nearest-neighbours rule, so every die's
        // legal-move set is identical and every move is shared 6-ways.
        let board = Board::empty()
            .with_set(2, 2, Token::new(3))
            .with_set(0, 0, Token::new(7));
        let mut tree = Tree::new();
        let root = tree.new_root(board, Player::Red, Die::new(3).unwrap());
        tree.expand(root);

        let node = tree.decision(root);
        assert!(node.is_fully_expanded());
        let chance_3 = node.chance_children[&3];
        let chance_5 = node.chance_children[&5];
        assert_eq!(tree.chance(chance_3).children, tree.chance(chance_5).children);
        assert!(!tree.chance(chance_3).children.is_empty());

        let shared_child = tree.chance(chance_3).children[0];
        let parents = &tree.decision(shared_child).parent_chance_nodes;
        assert!(parents.contains(&chance_3));
        assert!(parents.contains(&chance_5));
    }

    #[test]
    fn root_probability_mass_concentrates_on_observed_die() {
        let board = Board::empty().with_set(2, 2, Token::new(3));
        let mut tree = Tree::new();
        let root = tree.new_root(board, Player::Red, Die::new(4).unwrap());
        tree.expand(root);
        let node = tree.decision(root);
        for (&die_value, &chance_id) in &node.chance_children {
            let expected = if die_value == 4 { 1.0 } else { 0.0 };
            assert_eq!(tree.chance(chance_id).probability, expected);
        }
    }
}
