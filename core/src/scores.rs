use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{Difficulty, MoveCount};

/// Durable per-difficulty record of the lowest winning move count.
pub trait BestScoreStore {
    fn best_score(&self, difficulty: Difficulty) -> Option<MoveCount>;

    fn set_best_score(&mut self, difficulty: Difficulty, moves: MoveCount);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScoreOutcome {
    NewBest { previous: Option<MoveCount> },
    Kept { best: MoveCount },
}

impl ScoreOutcome {
    pub const fn is_new_best(self) -> bool {
        matches!(self, Self::NewBest { .. })
    }
}

/// Writes `moves` only when no record exists or it is strictly lower.
pub fn record_score<S>(store: &mut S, difficulty: Difficulty, moves: MoveCount) -> ScoreOutcome
where
    S: BestScoreStore + ?Sized,
{
    match store.best_score(difficulty) {
        Some(best) if best <= moves => ScoreOutcome::Kept { best },
        previous => {
            store.set_best_score(difficulty, moves);
            log::debug!("new best for {}: {} (was {:?})", difficulty, moves, previous);
            ScoreOutcome::NewBest { previous }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryScoreStore {
    scores: HashMap<Difficulty, MoveCount>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestScoreStore for MemoryScoreStore {
    fn best_score(&self, difficulty: Difficulty) -> Option<MoveCount> {
        self.scores.get(&difficulty).copied()
    }

    fn set_best_score(&mut self, difficulty: Difficulty, moves: MoveCount) {
        self.scores.insert(difficulty, moves);
    }
}
