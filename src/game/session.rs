use std::time::Duration;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use super::deck::build_deck;
use super::records::{BestScores, RunScore, ScoreStore, ScoreTracker};
use super::scheduler::{Fired, Scheduler, TaskId};
use super::state::{Card, Difficulty, Phase};
use super::turn::{ClickOutcome, IgnoreReason, Resolution, TurnState};

pub const MATCH_RESOLVE_MS: u64 = 500;
pub const MISMATCH_RESOLVE_MS: u64 = 1000;
pub const TICK_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Resolve(Resolution),
    Tick,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub board_difficulty: Difficulty,
    pub cards: Vec<Card>,
    pub flipped_indices: Vec<usize>,
    pub moves: u32,
    pub matches: usize,
    pub total_pairs: usize,
    pub seconds_elapsed: u32,
    pub lock_input: bool,
    pub new_record: bool,
}

/// Owns one player's game: the deck, the turn state, the clock and the
/// best-score tracker. Every input is a method call; scheduled work only
/// runs from [`GameSession::advance`].
pub struct GameSession {
    phase: Phase,
    difficulty: Difficulty,
    board_difficulty: Difficulty,
    cards: Vec<Card>,
    turn: TurnState,
    seconds_elapsed: u32,
    game_id: u64,
    timer: Scheduler<Pending>,
    timer_handle: Option<TaskId>,
    resolution_handle: Option<TaskId>,
    scores: ScoreTracker,
    last_run: Option<(Difficulty, RunScore)>,
    rng: Box<dyn RngCore>,
}

impl GameSession {
    pub fn new(store: Box<dyn ScoreStore>, rng: Box<dyn RngCore>) -> Self {
        GameSession {
            phase: Phase::Start,
            difficulty: Difficulty::default(),
            board_difficulty: Difficulty::default(),
            cards: Vec::new(),
            turn: TurnState::default(),
            seconds_elapsed: 0,
            game_id: 0,
            timer: Scheduler::new(),
            timer_handle: None,
            resolution_handle: None,
            scores: ScoreTracker::new(store),
            last_run: None,
            rng,
        }
    }

    pub fn with_seed(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self::new(store, Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn with_os_rng(store: Box<dyn ScoreStore>) -> Self {
        Self::new(store, Box::new(StdRng::from_os_rng()))
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.difficulty == difficulty {
            return;
        }
        log::debug!(
            "difficulty {} -> {}",
            self.difficulty.key(),
            difficulty.key()
        );
        self.difficulty = difficulty;
        if self.phase == Phase::Playing {
            self.reset_run();
        }
    }

    pub fn start_game(&mut self) {
        self.reset_run();
    }

    /// Restart from `playing`, or play again from `complete`.
    pub fn reset_game(&mut self) {
        if self.phase == Phase::Start {
            return;
        }
        self.reset_run();
    }

    pub fn return_to_menu(&mut self) {
        self.stop_timers();
        self.game_id = self.game_id.wrapping_add(1);
        self.cards.clear();
        self.turn.clear();
        self.seconds_elapsed = 0;
        self.last_run = None;
        self.scores.clear_new_record();
        self.phase = Phase::Start;
        log::debug!("back to menu");
    }

    pub fn click_card(&mut self, index: usize) -> ClickOutcome {
        if self.phase != Phase::Playing {
            return ClickOutcome::Ignored(IgnoreReason::NotPlaying);
        }
        if let Err(reason) = self.turn.check_click(&self.cards, index) {
            log::trace!("click on {} ignored: {:?}", index, reason);
            return ClickOutcome::Ignored(reason);
        }

        log::trace!("flip {}", index);
        match self.turn.flip(&self.cards, index) {
            None => ClickOutcome::Flipped,
            Some(resolution) => {
                let (delay_ms, matched) = match resolution {
                    Resolution::Match(..) => (MATCH_RESOLVE_MS, true),
                    Resolution::Mismatch => (MISMATCH_RESOLVE_MS, false),
                };
                let handle = self.timer.timeout_once(
                    Duration::from_millis(delay_ms),
                    self.game_id,
                    Pending::Resolve(resolution),
                );
                self.resolution_handle = Some(handle);
                ClickOutcome::PairPending { matched }
            }
        }
    }

    /// One second of play. Driven by the session clock; call it directly
    /// only when the caller runs its own one-second timer instead of
    /// [`GameSession::advance`].
    pub fn tick(&mut self) {
        if self.phase == Phase::Playing {
            self.seconds_elapsed = self.seconds_elapsed.saturating_add(1);
        }
    }

    /// Moves the session clock forward, firing every task that falls due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timer.deadline(elapsed);
        while let Some(fired) = self.timer.pop_due(until) {
            self.apply(fired);
        }
        self.timer.settle(until);
    }

    /// Time until a pending pair resolution fires, if any.
    pub fn pending_resolution_in(&self) -> Option<Duration> {
        self.timer.next_timeout_in()
    }

    fn apply(&mut self, fired: Fired<Pending>) {
        if fired.generation != self.game_id || self.phase != Phase::Playing {
            log::warn!("dropping stale {:?} from game {}", fired.action, fired.generation);
            return;
        }
        match fired.action {
            Pending::Tick => self.tick(),
            Pending::Resolve(resolution) => {
                log::trace!("resolving {:?}", resolution);
                self.resolution_handle = None;
                self.turn.resolve(&mut self.cards, resolution);
                if self.turn.is_complete(self.total_pairs()) {
                    self.complete_run();
                }
            }
        }
    }

    fn complete_run(&mut self) {
        self.stop_timers();
        self.phase = Phase::Complete;
        let run = RunScore {
            moves: self.turn.moves,
            time_secs: self.seconds_elapsed,
        };
        self.last_run = Some((self.board_difficulty, run));
        let new_record = self.scores.register_run(self.board_difficulty, run);
        log::debug!(
            "{} complete: {} moves, {}s, record: {}",
            self.board_difficulty.key(),
            run.moves,
            run.time_secs,
            new_record
        );
    }

    fn stop_timers(&mut self) {
        for handle in [self.timer_handle.take(), self.resolution_handle.take()]
            .into_iter()
            .flatten()
        {
            self.timer.cancel(handle);
        }
    }

    fn reset_run(&mut self) {
        self.stop_timers();
        self.game_id = self.game_id.wrapping_add(1);
        self.board_difficulty = self.difficulty;
        self.cards = build_deck(self.difficulty, &mut *self.rng);
        self.turn.clear();
        self.seconds_elapsed = 0;
        self.last_run = None;
        self.scores.clear_new_record();
        self.phase = Phase::Playing;
        let handle = self.timer.timeout_repeating(
            Duration::from_millis(TICK_MS),
            self.game_id,
            Pending::Tick,
        );
        self.timer_handle = Some(handle);
        log::debug!("game {} started on {}", self.game_id, self.difficulty.key());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The difficulty the current cards were dealt for. Differs from
    /// [`GameSession::difficulty`] after a change on the complete screen.
    pub fn board_difficulty(&self) -> Difficulty {
        self.board_difficulty
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flipped_indices(&self) -> &[usize] {
        &self.turn.flipped_indices
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.cards.get(index).is_some_and(|card| card.matched)
            || self.turn.flipped_indices.contains(&index)
    }

    pub fn moves(&self) -> u32 {
        self.turn.moves
    }

    pub fn matches(&self) -> usize {
        self.turn.matches
    }

    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn seconds_elapsed(&self) -> u32 {
        self.seconds_elapsed
    }

    pub fn is_locked(&self) -> bool {
        self.turn.lock_input
    }

    pub fn new_record(&self) -> bool {
        self.scores.new_record()
    }

    /// Difficulty and score of the run that just finished.
    pub fn last_run(&self) -> Option<(Difficulty, RunScore)> {
        self.last_run
    }

    pub fn best_scores(&self) -> &BestScores {
        self.scores.bests()
    }

    pub fn best(&self, difficulty: Difficulty) -> Option<RunScore> {
        self.scores.best(difficulty)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            board_difficulty: self.board_difficulty,
            cards: self.cards.clone(),
            flipped_indices: self.turn.flipped_indices.clone(),
            moves: self.turn.moves,
            matches: self.turn.matches,
            total_pairs: self.total_pairs(),
            seconds_elapsed: self.seconds_elapsed,
            lock_input: self.turn.lock_input,
            new_record: self.scores.new_record(),
        }
    }
}
