//! Uniform die source. Seedable for deterministic replay; each worker in the
//! harness carries its own generator (no shared state), matching the
//! teacher's per-binary `SeedableRng`/`StdRng` convention
//! (`src/bin/self_play_trainer.rs`).

use crate::game::board::Die;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform die rolls.
pub trait Dice {
    fn roll(&mut self) -> Die;
}

/// `StdRng`-backed die source.
pub struct ThreadDie {
    rng: StdRng,
}

impl ThreadDie {
    pub fn seeded(seed: u64) -> Self {
        ThreadDie {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        ThreadDie {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Dice for ThreadDie {
    fn roll(&mut self) -> Die {
        Die::new(self.rng.random_range(1..=6)).expect("random_range(1..=6) is always a valid die")
    }
}
