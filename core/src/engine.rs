use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    Idle,
    Playing,
    /// Two mismatched cards are face up and input is locked.
    Evaluating,
    Won,
}

impl EngineState {
    /// A session is running and its clock is ticking.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Playing | Self::Evaluating)
    }

    /// A new session may be started without restarting.
    pub const fn can_start(self) -> bool {
        matches!(self, Self::Idle | Self::Won)
    }

    pub const fn controls(self) -> Controls {
        if self.is_active() {
            Controls::RESTART
        } else {
            Controls::START.union(Controls::DIFFICULTY)
        }
    }
}

/// Session counter used to tag scheduled tasks. A task carrying an older
/// generation than the engine's belongs to a replaced board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u32);

impl Generation {
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayEngine {
    difficulty: Difficulty,
    board: Board,
    state: EngineState,
    first_pick: Option<Pos>,
    mismatch: Option<(Pos, Pos)>,
    moves: Saturating<MoveCount>,
    matches: PairCount,
    elapsed_secs: Saturating<u32>,
    generation: Generation,
}

impl PlayEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            board: Board::default(),
            state: Default::default(),
            first_pick: None,
            mismatch: None,
            moves: Saturating(0),
            matches: 0,
            elapsed_secs: Saturating(0),
            generation: Generation::default(),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> MoveCount {
        self.moves.0
    }

    pub fn matches(&self) -> PairCount {
        self.matches
    }

    pub fn total_pairs(&self) -> PairCount {
        if self.board.is_empty() {
            self.difficulty.total_pairs()
        } else {
            self.board.total_pairs()
        }
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs.0
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The face-up card still waiting for its partner, if any.
    pub fn pending(&self) -> Option<Pos> {
        self.first_pick
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, EngineState::Evaluating)
    }

    /// Only changes what the next deal uses; the current board is untouched.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Discards the current session and starts playing on `board`.
    pub fn begin(&mut self, board: Board) -> Generation {
        self.generation = self.generation.next();
        self.board = board;
        self.state = EngineState::Playing;
        self.first_pick = None;
        self.mismatch = None;
        self.moves = Saturating(0);
        self.matches = 0;
        self.elapsed_secs = Saturating(0);
        log::debug!(
            "session {:?} started with {} cards",
            self.generation,
            self.board.len()
        );
        self.generation
    }

    pub fn select(&mut self, pos: Pos) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        if !matches!(self.state, EngineState::Playing) {
            return Ok(Ignored);
        }

        let pos = self.board.validate_pos(pos)?;
        if self.first_pick == Some(pos) || self.board[pos].face() != CardFace::Hidden {
            return Ok(Ignored);
        }

        self.board.set_face(pos, CardFace::Shown);

        let Some(first) = self.first_pick.take() else {
            self.first_pick = Some(pos);
            return Ok(Flipped);
        };

        self.moves += 1;

        if self.board[first].symbol() != self.board[pos].symbol() {
            self.mismatch = Some((first, pos));
            self.state = EngineState::Evaluating;
            return Ok(Mismatched(self.generation));
        }

        self.board.set_face(first, CardFace::Matched);
        self.board.set_face(pos, CardFace::Matched);
        self.matches += 1;

        if self.matches == self.board.total_pairs() {
            self.state = EngineState::Won;
            log::debug!(
                "session {:?} won in {} moves, {}s",
                self.generation,
                self.moves.0,
                self.elapsed_secs.0
            );
            Ok(Won)
        } else {
            Ok(Matched)
        }
    }

    /// Turns a mismatched pair face down again and releases the lock.
    /// Returns `false` when `generation` belongs to a replaced board.
    pub fn flip_back(&mut self, generation: Generation) -> bool {
        if generation != self.generation || !self.is_locked() {
            log::debug!("ignoring stale flip-back from {:?}", generation);
            return false;
        }

        if let Some((a, b)) = self.mismatch.take() {
            self.board.set_face(a, CardFace::Hidden);
            self.board.set_face(b, CardFace::Hidden);
        }
        self.state = EngineState::Playing;
        true
    }

    /// Advances the session clock by one second.
    pub fn tick(&mut self, generation: Generation) -> bool {
        if generation != self.generation || !self.state.is_active() {
            return false;
        }

        self.elapsed_secs += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn board(symbols: &[u8]) -> Board {
        let symbols: Vec<_> = symbols.iter().map(|&i| Symbol::nth(i).unwrap()).collect();
        Board::from_symbols(&symbols).unwrap()
    }

    fn playing(symbols: &[u8]) -> PlayEngine {
        let mut engine = PlayEngine::new(Difficulty::Easy);
        engine.begin(board(symbols));
        engine
    }

    #[test]
    fn single_selection_does_not_count_a_move() {
        let mut engine = playing(&[0, 1, 0, 1]);

        assert_eq!(engine.select(0), Ok(SelectOutcome::Flipped));
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.pending(), Some(0));
        assert_eq!(engine.board()[0].face(), CardFace::Shown);
    }

    #[test]
    fn reselecting_pending_card_is_ignored() {
        let mut engine = playing(&[0, 1, 0, 1]);

        engine.select(0).unwrap();
        assert_eq!(engine.select(0), Ok(SelectOutcome::Ignored));
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.pending(), Some(0));
    }

    #[test]
    fn matching_pair_is_retired_without_lock() {
        let mut engine = playing(&[0, 1, 0, 1]);

        engine.select(0).unwrap();
        assert_eq!(engine.select(2), Ok(SelectOutcome::Matched));

        assert_eq!(engine.moves(), 1);
        assert_eq!(engine.matches(), 1);
        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.pending(), None);
        assert_eq!(engine.board()[0].face(), CardFace::Matched);
        assert_eq!(engine.board()[2].face(), CardFace::Matched);
        assert_eq!(engine.select(1), Ok(SelectOutcome::Flipped));
    }

    #[test]
    fn matched_card_is_ignored() {
        let mut engine = playing(&[0, 1, 0, 1]);

        engine.select(0).unwrap();
        engine.select(2).unwrap();

        assert_eq!(engine.select(2), Ok(SelectOutcome::Ignored));
        assert_eq!(engine.pending(), None);
    }

    #[test]
    fn mismatch_locks_until_flip_back() {
        let mut engine = playing(&[0, 1, 0, 1]);

        engine.select(0).unwrap();
        let generation = match engine.select(1).unwrap() {
            SelectOutcome::Mismatched(generation) => generation,
            outcome => panic!("unexpected {outcome:?}"),
        };

        assert_eq!(engine.moves(), 1);
        assert!(engine.is_locked());
        assert_eq!(engine.select(2), Ok(SelectOutcome::Ignored));
        assert_eq!(engine.board()[2].face(), CardFace::Hidden);

        assert!(engine.flip_back(generation));
        assert_eq!(engine.state(), EngineState::Playing);
        assert_eq!(engine.board()[0].face(), CardFace::Hidden);
        assert_eq!(engine.board()[1].face(), CardFace::Hidden);
        assert!(!engine.flip_back(generation));
    }

    #[test]
    fn stale_flip_back_leaves_new_board_alone() {
        let mut engine = playing(&[0, 1, 0, 1]);

        engine.select(0).unwrap();
        let SelectOutcome::Mismatched(stale) = engine.select(1).unwrap() else {
            panic!("expected mismatch");
        };

        engine.begin(board(&[0, 1, 0, 1]));
        engine.select(3).unwrap();

        assert!(!engine.flip_back(stale));
        assert_eq!(engine.board()[3].face(), CardFace::Shown);
        assert_eq!(engine.moves(), 0);
    }

    #[test]
    fn last_pair_wins() {
        let mut engine = playing(&[0, 1, 1, 0]);

        engine.select(0).unwrap();
        engine.select(3).unwrap();
        engine.select(1).unwrap();
        assert_eq!(engine.select(2), Ok(SelectOutcome::Won));

        assert_eq!(engine.state(), EngineState::Won);
        assert_eq!(engine.moves(), 2);
        assert_eq!(engine.select(0), Ok(SelectOutcome::Ignored));
    }

    #[test]
    fn tick_only_counts_current_active_session() {
        let mut engine = PlayEngine::new(Difficulty::Easy);
        assert!(!engine.tick(engine.generation()));

        let old = engine.begin(board(&[0, 0]));
        assert!(engine.tick(old));
        let new = engine.begin(board(&[0, 0]));

        assert!(!engine.tick(old));
        assert!(engine.tick(new));
        assert_eq!(engine.elapsed_secs(), 1);

        engine.select(0).unwrap();
        engine.select(1).unwrap();
        assert!(!engine.tick(new));
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn out_of_range_selection_errors() {
        let mut engine = playing(&[0, 0]);
        assert_eq!(engine.select(2), Err(GameError::InvalidPosition));
    }

    #[test]
    fn controls_follow_state() {
        assert_eq!(
            EngineState::Idle.controls(),
            Controls::START | Controls::DIFFICULTY
        );
        assert_eq!(EngineState::Evaluating.controls(), Controls::RESTART);
        assert!(EngineState::Won.controls().contains(Controls::DIFFICULTY));
    }
}
