use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::*;

pub trait DeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Board;
}

/// Duplicates the difficulty's symbol subset and applies an unbiased
/// Fisher-Yates shuffle. No adjacency constraints are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, difficulty: Difficulty) -> Board {
        let mut symbols: Vec<Symbol> = difficulty
            .symbols()
            .flat_map(|symbol| [symbol, symbol])
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        symbols.shuffle(&mut rng);

        log::trace!(
            "dealt {} cards for {} (seed {})",
            symbols.len(),
            difficulty,
            self.seed
        );
        Board::from_symbols_unchecked(&symbols)
    }
}
