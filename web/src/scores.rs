use gloo::storage::{LocalStorage, Storage};
use pexeso_core::{BestScoreStore, Difficulty, MoveCount};

/// Best scores kept in the browser's local storage, one key per difficulty.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalBestScores;

impl LocalBestScores {
    const PREFIX: &'static str = "pexeso:best:";

    pub(crate) fn key(difficulty: Difficulty) -> String {
        format!("{}{}", Self::PREFIX, difficulty.as_str())
    }
}

impl BestScoreStore for LocalBestScores {
    fn best_score(&self, difficulty: Difficulty) -> Option<MoveCount> {
        LocalStorage::get(Self::key(difficulty)).ok()
    }

    fn set_best_score(&mut self, difficulty: Difficulty, moves: MoveCount) {
        if let Err(err) = LocalStorage::set(Self::key(difficulty), moves) {
            log::error!("Could not save best score for {}: {:?}", difficulty, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_per_difficulty() {
        assert_eq!(LocalBestScores::key(Difficulty::Easy), "pexeso:best:easy");
        assert_eq!(LocalBestScores::key(Difficulty::Hard), "pexeso:best:hard");
    }
}
