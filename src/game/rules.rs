//! Legal-move enumeration, move application, terminal/winner detection, and
//! the positional heuristic.
//!
//! Semantics (the nearest-neighbours fallback, the three direction vectors,
//! and the four terminal conditions) are ground-truthed against
//! `examples/original_source/core/game_engine.py`; enumeration is
//! restructured into the spec's `(board, die, player) -> Vec<Move>` shape
//! used throughout, generalizing the teacher's `get_legal_moves.rs` (which
//! only ever asked "which cells are empty", since Take It Easy has no
//! movement) into a from-and-to move generator.

use crate::game::board::{Board, Die, Move, Player, SIZE};

/// The set of tokens a die roll makes movable: the canonical token if still
/// on the board, else the nearest present neighbours above and below it
/// within the player's range (either or both may be absent).
fn movable_tokens(board: &Board, die: Die, player: Player) -> Vec<u8> {
    let canonical = player.canonical_token(die).value();
    if board.find(player.canonical_token(die)).is_some() {
        return vec![canonical];
    }

    let range = player.token_range();
    let upper = (canonical + 1..=*range.end())
        .find(|&v| board.find(crate::game::board::Token::new(v).unwrap()).is_some());
    let lower = (*range.start()..canonical)
        .rev()
        .find(|&v| board.find(crate::game::board::Token::new(v).unwrap()).is_some());

    let mut out = Vec::with_capacity(2);
    if let Some(u) = upper {
        out.push(u);
    }
    if let Some(l) = lower {
        out.push(l);
    }
    out
}

/// Enumerates every legal move for `player` given the rolled `die`.
/// Destination occupants (own or enemy) are never filtered: both capture-own
/// and capture-enemy are legal, handled by `Board::apply`.
pub fn legal_moves(board: &Board, die: Die, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for token_value in movable_tokens(board, die, player) {
        let token = crate::game::board::Token::new(token_value).unwrap();
        let Some((row, col)) = board.find(token) else {
            continue;
        };
        for (dr, dc) in player.directions() {
            let to_row = row as isize + dr;
            let to_col = col as isize + dc;
            if Board::in_bounds(to_row, to_col) {
                moves.push(Move {
                    from_row: row,
                    from_col: col,
                    to_row: to_row as usize,
                    to_col: to_col as usize,
                });
            }
        }
    }
    moves
}

/// True iff Red has reached (4,4), Blue has reached (0,0), or either side has
/// zero tokens left.
pub fn is_terminal(board: &Board) -> bool {
    if board
        .get(SIZE - 1, SIZE - 1)
        .map(|t| t.owner() == Player::Red)
        .unwrap_or(false)
    {
        return true;
    }
    if board.get(0, 0).map(|t| t.owner() == Player::Blue).unwrap_or(false) {
        return true;
    }
    board.count_of(Player::Red) == 0 || board.count_of(Player::Blue) == 0
}

/// Winner of a terminal position. Returns `None` for a non-terminal board
/// (callers that cap ply should treat that as a draw themselves).
pub fn winner(board: &Board) -> Option<Player> {
    if board
        .get(SIZE - 1, SIZE - 1)
        .map(|t| t.owner() == Player::Red)
        .unwrap_or(false)
    {
        return Some(Player::Red);
    }
    if board.get(0, 0).map(|t| t.owner() == Player::Blue).unwrap_or(false) {
        return Some(Player::Blue);
    }
    if board.count_of(Player::Red) == 0 {
        return Some(Player::Blue);
    }
    if board.count_of(Player::Blue) == 0 {
        return Some(Player::Red);
    }
    None
}

/// Material difference (scaled by 10) plus, for every token on the board,
/// `10 - L1 distance to that token's own owner's goal`: added when the token
/// belongs to `player`, subtracted when it belongs to the opponent. Ported
/// from `examples/original_source/core/game_engine.py::evaluate_position`,
/// which sums this term over both colours rather than only the requesting
/// player's own pieces — an opponent token sitting one step from its corner
/// must depress the score, not be invisible to it. Pure and exported per the
/// spec; the default PMCTS rollout does not consult it (see
/// `mcts::search::RolloutPolicy`).
pub fn heuristic_value(board: &Board, player: Player) -> f64 {
    let mine = board.count_of(player) as i64;
    let theirs = board.count_of(player.opponent()) as i64;
    let mut score = ((mine - theirs) * 10) as f64;

    for owner in [player, player.opponent()] {
        let (goal_row, goal_col) = owner.goal();
        let sign = if owner == player { 1.0 } else { -1.0 };
        for ((row, col), _token) in board.tokens_of(owner) {
            let distance = (goal_row as isize - row as isize).unsigned_abs()
                + (goal_col as isize - col as isize).unsigned_abs();
            score += sign * (10.0 - distance as f64);
        }
    }
    score
}
