//! End-to-end: play a handful of games, extract training samples, write the
//! corpus to disk, and read it back.

use einstein_pmcts::game::board::Player;
use einstein_pmcts::harness::{batch_battle, SearcherConfig};
use einstein_pmcts::mcts::search::SearchBudget;
use einstein_pmcts::training::{write_training_corpus, TrainingSample};

#[test]
fn batch_of_games_yields_a_readable_training_corpus() {
    let red = SearcherConfig::new("red", Player::Red, SearchBudget::simulations(25));
    let blue = SearcherConfig::new("blue", Player::Blue, SearchBudget::simulations(25));
    let results = batch_battle(&blue, &red, 3, false, 1, 404, |_| {});
    assert!(!results.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    write_training_corpus(&results, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let samples: Vec<TrainingSample> = serde_json::from_str(&contents).unwrap();

    let expected_len: usize = results.iter().map(|r| r.move_log.len()).sum();
    assert_eq!(samples.len(), expected_len);
    for sample in &samples {
        assert!(sample.value == -1 || sample.value == 0 || sample.value == 1);
    }
}
