use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinSummary {
    pub moves: MoveCount,
    pub elapsed_secs: u32,
}

/// Everything a renderer needs to redraw after a state change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub difficulty: Difficulty,
    pub state: EngineState,
    pub controls: Controls,
    pub cards: Vec<CardView>,
    pub moves: MoveCount,
    pub matches: PairCount,
    pub total_pairs: PairCount,
    pub elapsed_secs: u32,
    pub best_score: Option<MoveCount>,
    pub summary: Option<WinSummary>,
}

impl Snapshot {
    pub fn clock(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, EngineState::Evaluating)
    }
}

/// Drives a [`PlayEngine`] session: deals boards, owns the tick and
/// flip-back tasks, and records best scores on a win.
pub struct GameController<S: Scheduler, B: BestScoreStore> {
    engine: PlayEngine,
    scheduler: S,
    scores: B,
    seed: u64,
    ticker: Option<S::Handle>,
    flip_back: Option<S::Handle>,
}

impl<S: Scheduler, B: BestScoreStore> GameController<S, B> {
    pub fn new(difficulty: Difficulty, scheduler: S, scores: B, seed: u64) -> Self {
        Self {
            engine: PlayEngine::new(difficulty),
            scheduler,
            scores,
            seed,
            ticker: None,
            flip_back: None,
        }
    }

    pub fn engine(&self) -> &PlayEngine {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn scores(&self) -> &B {
        &self.scores
    }

    pub fn difficulty(&self) -> Difficulty {
        self.engine.difficulty()
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn best_score(&self) -> Option<MoveCount> {
        self.scores.best_score(self.engine.difficulty())
    }

    /// Selects the difficulty for the next deal. An active session is
    /// restarted on the new difficulty; returns whether that happened.
    pub fn configure(&mut self, difficulty: Difficulty) -> bool {
        if difficulty == self.engine.difficulty() {
            return false;
        }

        log::debug!("difficulty: {} -> {}", self.engine.difficulty(), difficulty);
        self.engine.set_difficulty(difficulty);
        if self.engine.state().is_active() {
            self.restart();
            true
        } else {
            false
        }
    }

    pub fn start(&mut self) -> Result<Generation> {
        if !self.engine.state().can_start() {
            return Err(GameError::SessionActive);
        }
        Ok(self.begin_session())
    }

    pub fn restart(&mut self) -> Generation {
        self.begin_session()
    }

    pub fn select_card(&mut self, pos: Pos) -> Result<SelectOutcome> {
        let outcome = self.engine.select(pos)?;

        match outcome {
            SelectOutcome::Mismatched(generation) => {
                if let Some(handle) = self.flip_back.take() {
                    self.scheduler.cancel(handle);
                }
                let handle = self
                    .scheduler
                    .schedule_once(FLIP_BACK_DELAY, Task::FlipBack(generation));
                self.flip_back = Some(handle);
            }
            SelectOutcome::Won => self.finish(),
            SelectOutcome::Ignored | SelectOutcome::Flipped | SelectOutcome::Matched => {}
        }

        Ok(outcome)
    }

    /// Runs a task handed back by the scheduler; returns whether state changed.
    pub fn run(&mut self, task: Task) -> bool {
        match task {
            Task::Tick(generation) => self.engine.tick(generation),
            Task::FlipBack(generation) => {
                let updated = self.engine.flip_back(generation);
                if updated {
                    self.flip_back = None;
                }
                updated
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let engine = &self.engine;
        let state = engine.state();
        let summary = matches!(state, EngineState::Won).then(|| WinSummary {
            moves: engine.moves(),
            elapsed_secs: engine.elapsed_secs(),
        });

        Snapshot {
            difficulty: engine.difficulty(),
            state,
            controls: state.controls(),
            cards: engine.board().iter().map(CardView::from).collect(),
            moves: engine.moves(),
            matches: engine.matches(),
            total_pairs: engine.total_pairs(),
            elapsed_secs: engine.elapsed_secs(),
            best_score: self.best_score(),
            summary,
        }
    }

    fn begin_session(&mut self) -> Generation {
        self.cancel_tasks();

        let board = RandomDeckGenerator::new(self.next_seed()).generate(self.engine.difficulty());
        let generation = self.engine.begin(board);

        let ticker = self
            .scheduler
            .schedule_repeating(TICK_PERIOD, Task::Tick(generation));
        self.ticker = Some(ticker);
        generation
    }

    fn finish(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
        }

        let difficulty = self.engine.difficulty();
        let moves = self.engine.moves();
        match record_score(&mut self.scores, difficulty, moves) {
            ScoreOutcome::NewBest { .. } => {
                log::info!("new best on {}: {} moves", difficulty, moves)
            }
            ScoreOutcome::Kept { best } => log::debug!("best on {} stays at {}", difficulty, best),
        }
    }

    fn cancel_tasks(&mut self) {
        if let Some(handle) = self.ticker.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.flip_back.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(SEED_STEP);
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    type TestController = GameController<ManualScheduler, MemoryScoreStore>;

    fn controller(difficulty: Difficulty) -> TestController {
        GameController::new(difficulty, ManualScheduler::new(), MemoryScoreStore::new(), 1)
    }

    fn advance(game: &mut TestController, millis: u64) {
        let due = game.scheduler_mut().advance(Duration::from_millis(millis));
        for task in due {
            game.run(task);
        }
    }

    fn partner_of(game: &TestController, pos: Pos) -> Pos {
        let board = game.engine().board();
        let symbol = board[pos].symbol();
        (0..board.len() as Pos)
            .find(|&other| other != pos && board[other].symbol() == symbol)
            .unwrap()
    }

    fn non_partner_of(game: &TestController, pos: Pos) -> Pos {
        let board = game.engine().board();
        let symbol = board[pos].symbol();
        (0..board.len() as Pos)
            .find(|&other| board[other].symbol() != symbol)
            .unwrap()
    }

    fn solve(game: &mut TestController) {
        for pos in 0..game.engine().board().len() as Pos {
            if game.engine().board()[pos].face() == CardFace::Hidden {
                let partner = partner_of(game, pos);
                game.select_card(pos).unwrap();
                game.select_card(partner).unwrap();
            }
        }
    }

    #[test]
    fn idle_snapshot_offers_start() {
        let game = controller(Difficulty::Hard);
        let snapshot = game.snapshot();

        assert_eq!(snapshot.state, EngineState::Idle);
        assert!(snapshot.cards.is_empty());
        assert_eq!(snapshot.total_pairs, 12);
        assert_eq!(snapshot.controls, Controls::START | Controls::DIFFICULTY);
        assert_eq!(snapshot.clock(), "00:00");
    }

    #[test]
    fn start_deals_hidden_board_and_starts_clock() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cards.len(), 12);
        assert!(snapshot.cards.iter().all(|card| *card == CardView::Hidden));
        assert_eq!(snapshot.controls, Controls::RESTART);

        advance(&mut game, 3000);
        assert_eq!(game.snapshot().clock(), "00:03");
    }

    #[test]
    fn start_is_rejected_while_playing() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();

        assert_eq!(game.start(), Err(GameError::SessionActive));
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn mismatch_flips_back_after_delay() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();
        let other = non_partner_of(&game, 0);

        game.select_card(0).unwrap();
        assert!(matches!(
            game.select_card(other).unwrap(),
            SelectOutcome::Mismatched(_)
        ));
        assert!(game.snapshot().is_locked());

        advance(&mut game, 999);
        assert_eq!(game.select_card(partner_of(&game, 0)), Ok(SelectOutcome::Ignored));

        advance(&mut game, 1);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.state, EngineState::Playing);
        assert_eq!(snapshot.cards[0], CardView::Hidden);
        assert_eq!(snapshot.cards[other as usize], CardView::Hidden);
        assert_eq!(snapshot.moves, 1);
    }

    #[test]
    fn win_freezes_clock_and_records_best() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();
        advance(&mut game, 2000);

        solve(&mut game);
        advance(&mut game, 5000);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.state, EngineState::Won);
        assert_eq!(snapshot.matches, 6);
        assert_eq!(snapshot.moves, 6);
        assert_eq!(snapshot.clock(), "00:02");
        assert_eq!(
            snapshot.summary,
            Some(WinSummary {
                moves: 6,
                elapsed_secs: 2
            })
        );
        assert_eq!(snapshot.best_score, Some(6));
        assert!(snapshot.controls.contains(Controls::START | Controls::DIFFICULTY));
        assert_eq!(game.scheduler().pending(), 0);
    }

    #[test]
    fn worse_win_keeps_previous_best() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();
        solve(&mut game);
        assert_eq!(game.best_score(), Some(6));

        game.start().unwrap();
        let other = non_partner_of(&game, 0);
        game.select_card(0).unwrap();
        game.select_card(other).unwrap();
        advance(&mut game, 1000);
        solve(&mut game);

        assert_eq!(game.snapshot().moves, 7);
        assert_eq!(game.best_score(), Some(6));
    }

    #[test]
    fn restart_mid_lock_ignores_stale_flip_back() {
        let mut game = controller(Difficulty::Easy);
        let stale = game.start().unwrap();
        let other = non_partner_of(&game, 0);
        game.select_card(0).unwrap();
        game.select_card(other).unwrap();

        advance(&mut game, 500);
        game.restart();
        game.select_card(0).unwrap();

        assert!(!game.run(Task::FlipBack(stale)));
        advance(&mut game, 1000);

        let snapshot = game.snapshot();
        assert_eq!(snapshot.moves, 0);
        assert_eq!(snapshot.matches, 0);
        assert!(matches!(snapshot.cards[0], CardView::Shown(_)));
        assert_eq!(snapshot.state, EngineState::Playing);
    }

    #[test]
    fn restart_replaces_ticker() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();
        advance(&mut game, 4000);

        game.restart();
        assert_eq!(game.scheduler().pending(), 1);
        advance(&mut game, 1000);

        assert_eq!(game.snapshot().elapsed_secs, 1);
    }

    #[test]
    fn configure_restarts_active_session() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();
        game.select_card(0).unwrap();

        assert!(game.configure(Difficulty::Hard));

        let snapshot = game.snapshot();
        assert_eq!(snapshot.cards.len(), 24);
        assert_eq!(snapshot.total_pairs, 12);
        assert!(snapshot.cards.iter().all(|card| *card == CardView::Hidden));
        assert_eq!(game.scheduler().pending(), 1);
    }

    #[test]
    fn configure_while_idle_only_changes_next_deal() {
        let mut game = controller(Difficulty::Easy);

        assert!(!game.configure(Difficulty::Hard));
        assert_eq!(game.state(), EngineState::Idle);
        assert_eq!(game.snapshot().total_pairs, 12);
    }

    #[test]
    fn best_score_display_follows_difficulty() {
        let mut game = controller(Difficulty::Easy);
        game.start().unwrap();
        solve(&mut game);

        game.configure(Difficulty::Hard);
        assert_eq!(game.snapshot().best_score, None);

        game.configure(Difficulty::Easy);
        assert_eq!(game.snapshot().best_score, Some(6));
    }

    #[test]
    fn consecutive_deals_use_fresh_seeds() {
        let mut game = controller(Difficulty::Hard);
        game.start().unwrap();
        let first = game.engine().board().clone();
        game.restart();

        assert_ne!(&first, game.engine().board());
    }
}
