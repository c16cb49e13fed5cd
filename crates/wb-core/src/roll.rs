//! The roll state machine: idle, rolling, settled.
//!
//! A roll consumes its word the moment it is accepted. The display then
//! shows scrambled tokens of the same length until the scramble timer
//! expires, at which point it settles on the drawn word.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::BingoError;
use crate::pool::WordPool;
use crate::scramble::{ScrambleTimer, TimerStep, scramble_token};
use crate::words::WordList;

/// Text shown before the first roll and after a reset.
pub const PLACEHOLDER: &str = "READY?";

/// Where the current roll is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollStatus {
    /// No roll has happened since start or reset.
    #[default]
    Idle,
    /// A word is drawn and the display is scrambling.
    Rolling,
    /// The display shows the drawn word; ready for the next roll.
    Settled,
}

/// Visible state of the current roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSession {
    /// Current status.
    pub status: RollStatus,
    /// The word committed to by the last accepted roll.
    pub target_word: Option<String>,
    /// The string currently on display, scrambled while rolling.
    pub display_token: String,
}

impl Default for RollSession {
    fn default() -> Self {
        Self {
            status: RollStatus::Idle,
            target_word: None,
            display_token: PLACEHOLDER.to_string(),
        }
    }
}

/// Result of a roll request.
#[derive(Debug)]
pub enum RollOutcome {
    /// The roll was accepted and a word drawn.
    Started,
    /// The request was a no-op; the error says why.
    Ignored(BingoError),
}

impl RollOutcome {
    /// Returns true if the roll was accepted.
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

/// What a call to [`RollMachine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Nothing changed.
    Idle,
    /// The display shows a new scrambled token.
    Scrambled,
    /// The display settled on the drawn word.
    Settled,
}

/// Owns the word pool, the visible roll session and the scramble timer.
pub struct RollMachine {
    pool: WordPool,
    session: RollSession,
    timer: Option<ScrambleTimer>,
    rng: StdRng,
}

impl RollMachine {
    /// Create a machine over the given words, seeded from the OS.
    pub fn new(words: WordList) -> Self {
        Self::with_rng(words, StdRng::from_os_rng())
    }

    /// Create a machine with a deterministic seed.
    pub fn with_seed(words: WordList, seed: u64) -> Self {
        Self::with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn with_rng(words: WordList, rng: StdRng) -> Self {
        Self {
            pool: WordPool::new(words),
            session: RollSession::default(),
            timer: None,
            rng,
        }
    }

    /// Ask for a new word.
    ///
    /// Ignored while a roll is scrambling or when the pool is empty. On
    /// acceptance the word is drawn immediately and the display starts
    /// scrambling at the word's length.
    pub fn request_roll(&mut self, now: Instant) -> RollOutcome {
        if self.session.status == RollStatus::Rolling {
            tracing::debug!("roll ignored: already rolling");
            return RollOutcome::Ignored(BingoError::RollInProgress);
        }
        let word = match self.pool.draw(&mut self.rng) {
            Ok(word) => word,
            Err(e) => {
                tracing::debug!("roll ignored: {e}");
                return RollOutcome::Ignored(e);
            }
        };

        let len = word.chars().count();
        self.session = RollSession {
            status: RollStatus::Rolling,
            display_token: scramble_token(len, &mut self.rng),
            target_word: Some(word),
        };
        self.timer = Some(ScrambleTimer::start(now));
        tracing::info!(
            remaining = self.pool.remaining_count(),
            called = self.pool.called_count(),
            "roll started"
        );
        RollOutcome::Started
    }

    /// Advance the scramble to `now`.
    ///
    /// Only an armed timer can change the display, so once [`reset`] or
    /// [`cancel`] has run no tick will touch it.
    ///
    /// [`reset`]: Self::reset
    /// [`cancel`]: Self::cancel
    pub fn tick(&mut self, now: Instant) -> TickEvent {
        let Some(timer) = self.timer.as_mut() else {
            return TickEvent::Idle;
        };
        match timer.poll(now) {
            TimerStep::Wait => TickEvent::Idle,
            TimerStep::Scramble => {
                let len = self.target_len();
                self.session.display_token = scramble_token(len, &mut self.rng);
                TickEvent::Scrambled
            }
            TimerStep::Expire => {
                self.timer = None;
                if let Some(word) = &self.session.target_word {
                    self.session.display_token.clone_from(word);
                }
                self.session.status = RollStatus::Settled;
                tracing::info!(word = %self.session.display_token, "roll settled");
                TickEvent::Settled
            }
        }
    }

    /// Disarm the scramble timer without touching the pool.
    ///
    /// A cancelled roll keeps its drawn word; the display shows it at once.
    pub fn cancel(&mut self) {
        if self.timer.take().is_some() {
            if let Some(word) = &self.session.target_word {
                self.session.display_token.clone_from(word);
            }
            self.session.status = RollStatus::Settled;
            tracing::debug!("scramble cancelled");
        }
    }

    /// Start over: cancel any scramble, restore the pool and the placeholder.
    pub fn reset(&mut self) {
        self.timer = None;
        self.session = RollSession::default();
        self.pool.reset();
        tracing::info!(words = self.pool.remaining_count(), "game reset");
    }

    /// The earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.as_ref().map(ScrambleTimer::next_deadline)
    }

    /// How long the current roll has been scrambling, if it is.
    pub fn roll_elapsed(&self, now: Instant) -> Option<Duration> {
        self.timer
            .as_ref()
            .map(|t| now.saturating_duration_since(t.started_at()))
    }

    /// Whether a roll request would be accepted right now.
    pub fn can_roll(&self) -> bool {
        !self.is_rolling() && !self.pool.is_exhausted()
    }

    /// Returns true while the display is scrambling.
    pub fn is_rolling(&self) -> bool {
        self.session.status == RollStatus::Rolling
    }

    /// Current status.
    pub fn status(&self) -> RollStatus {
        self.session.status
    }

    /// The string currently on display.
    pub fn display_token(&self) -> &str {
        &self.session.display_token
    }

    /// The word drawn by the last accepted roll.
    pub fn target_word(&self) -> Option<&str> {
        self.session.target_word.as_deref()
    }

    /// The visible session state.
    pub fn session(&self) -> &RollSession {
        &self.session
    }

    /// The word pool.
    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    fn target_len(&self) -> usize {
        self.session
            .target_word
            .as_deref()
            .map_or(0, |w| w.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scramble::{SCRAMBLE_DURATION, SCRAMBLE_TICK};

    fn animals(seed: u64) -> RollMachine {
        RollMachine::with_seed(WordList::new(["CAT", "DOG", "BIRD"]), seed)
    }

    /// Drive the machine until it settles, checking the length invariant
    /// after every tick.
    fn run_to_settle(machine: &mut RollMachine, start: Instant) -> Instant {
        let target_len = machine.target_word().unwrap().chars().count();
        let mut now = start;
        loop {
            now = machine.next_deadline().unwrap_or(now);
            let event = machine.tick(now);
            assert_eq!(machine.display_token().chars().count(), target_len);
            if event == TickEvent::Settled {
                return now;
            }
            assert!(now < start + SCRAMBLE_DURATION);
        }
    }

    #[test]
    fn starts_idle_with_placeholder() {
        let machine = animals(1);
        assert_eq!(machine.status(), RollStatus::Idle);
        assert_eq!(machine.display_token(), PLACEHOLDER);
        assert_eq!(machine.target_word(), None);
        assert!(machine.can_roll());
        assert_eq!(machine.next_deadline(), None);
    }

    #[test]
    fn roll_draws_immediately() {
        let mut machine = animals(2);
        let t0 = Instant::now();
        assert!(machine.request_roll(t0).is_started());
        assert_eq!(machine.status(), RollStatus::Rolling);
        assert_eq!(machine.pool().remaining_count(), 2);
        let target = machine.target_word().unwrap().to_string();
        assert_eq!(machine.pool().called(), [target.clone()]);
        assert_eq!(machine.display_token().len(), target.len());
        assert!(!machine.can_roll());
    }

    #[test]
    fn scramble_settles_on_target() {
        let mut machine = animals(3);
        let t0 = Instant::now();
        machine.request_roll(t0);
        let settled_at = run_to_settle(&mut machine, t0);
        assert_eq!(settled_at, t0 + SCRAMBLE_DURATION);
        assert_eq!(machine.status(), RollStatus::Settled);
        assert_eq!(Some(machine.display_token()), machine.target_word());
        assert_eq!(machine.tick(settled_at + SCRAMBLE_TICK), TickEvent::Idle);
    }

    #[test]
    fn second_roll_while_rolling_is_ignored() {
        let mut machine = animals(4);
        let t0 = Instant::now();
        machine.request_roll(t0);
        let outcome = machine.request_roll(t0 + SCRAMBLE_TICK);
        assert!(matches!(
            outcome,
            RollOutcome::Ignored(BingoError::RollInProgress)
        ));
        assert_eq!(machine.pool().remaining_count(), 2);
        assert_eq!(machine.pool().called_count(), 1);
    }

    #[test]
    fn three_words_then_exhausted() {
        let mut machine = animals(5);
        let mut now = Instant::now();
        for _ in 0..3 {
            assert!(machine.request_roll(now).is_started());
            now = run_to_settle(&mut machine, now);
        }
        assert!(machine.pool().is_exhausted());
        assert!(!machine.can_roll());

        let token = machine.display_token().to_string();
        let outcome = machine.request_roll(now);
        assert!(matches!(outcome, RollOutcome::Ignored(BingoError::EmptyPool)));
        assert_eq!(machine.display_token(), token);
        assert_eq!(machine.pool().called_count(), 3);
        assert_eq!(machine.status(), RollStatus::Settled);
    }

    #[test]
    fn reset_after_two_rolls() {
        let mut machine = animals(6);
        let mut now = Instant::now();
        for _ in 0..2 {
            machine.request_roll(now);
            now = run_to_settle(&mut machine, now);
        }
        machine.reset();
        assert_eq!(machine.pool().remaining_count(), 3);
        assert_eq!(machine.pool().called_count(), 0);
        assert_eq!(machine.display_token(), PLACEHOLDER);
        assert_eq!(machine.status(), RollStatus::Idle);
    }

    #[test]
    fn reset_mid_roll_stops_updates() {
        let mut machine = animals(7);
        let t0 = Instant::now();
        machine.request_roll(t0);
        machine.tick(t0 + SCRAMBLE_TICK);
        machine.reset();

        assert_eq!(machine.next_deadline(), None);
        for ms in (0..=1500).step_by(40) {
            let event = machine.tick(t0 + Duration::from_millis(ms));
            assert_eq!(event, TickEvent::Idle);
            assert_eq!(machine.display_token(), PLACEHOLDER);
        }
        assert_eq!(machine.pool().called_count(), 0);
        assert!(machine.can_roll());
    }

    #[test]
    fn cancel_settles_without_refund() {
        let mut machine = animals(8);
        let t0 = Instant::now();
        machine.request_roll(t0);
        machine.cancel();
        assert_eq!(machine.status(), RollStatus::Settled);
        assert_eq!(Some(machine.display_token()), machine.target_word());
        assert_eq!(machine.pool().called_count(), 1);
        assert_eq!(machine.tick(t0 + SCRAMBLE_DURATION), TickEvent::Idle);
    }

    #[test]
    fn empty_word_list_never_rolls() {
        let mut machine = RollMachine::with_seed(WordList::default(), 9);
        assert!(!machine.can_roll());
        let outcome = machine.request_roll(Instant::now());
        assert!(!outcome.is_started());
        assert_eq!(machine.status(), RollStatus::Idle);
        assert_eq!(machine.display_token(), PLACEHOLDER);
    }

    #[test]
    fn roll_elapsed_tracks_active_scramble() {
        let mut machine = animals(10);
        let t0 = Instant::now();
        assert_eq!(machine.roll_elapsed(t0), None);
        machine.request_roll(t0);
        assert_eq!(
            machine.roll_elapsed(t0 + SCRAMBLE_TICK),
            Some(SCRAMBLE_TICK)
        );
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = animals(99);
        let mut b = animals(99);
        let now = Instant::now();
        a.request_roll(now);
        b.request_roll(now);
        assert_eq!(a.target_word(), b.target_word());
        assert_eq!(a.display_token(), b.display_token());
    }
}
