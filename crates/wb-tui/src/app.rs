//! Top-level application state: the roll machine plus presentation flags.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use wb_core::{RollMachine, TickEvent, WordList};

use crate::audio::Cue;
use crate::confetti::ConfettiField;
use crate::input::{Command, Focus};

/// Poll interval while confetti is on screen.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Poll interval when nothing is animating.
pub const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Length of the emphasis pulse at the start of a roll.
pub const PULSE_DURATION: Duration = Duration::from_millis(600);

/// Main application state for the caller.
pub struct BingoApp {
    /// Word pool and roll state.
    pub machine: RollMachine,
    /// Audible cue for accepted rolls.
    pub cue: Cue,
    /// Live celebration particles.
    pub confetti: ConfettiField,
    /// Which overlay has the keyboard.
    pub focus: Focus,
    /// First visible grid row of the called-words list.
    pub review_scroll: usize,
    /// Last grid row the list can scroll to, measured when it was last drawn.
    pub review_max_scroll: usize,
    /// Whether presentation mode is on.
    pub presentation: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
    rng: StdRng,
}

impl BingoApp {
    /// Create a new app over the given words.
    ///
    /// With a seed, both the draws and the confetti are reproducible.
    pub fn new(words: WordList, seed: Option<u64>, cue: Cue) -> Self {
        let (machine, rng) = match seed {
            Some(seed) => (
                RollMachine::with_seed(words, seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (RollMachine::new(words), StdRng::from_os_rng()),
        };
        Self {
            machine,
            cue,
            confetti: ConfettiField::new(),
            focus: Focus::Stage,
            review_scroll: 0,
            review_max_scroll: 0,
            presentation: false,
            should_quit: false,
            rng,
        }
    }

    /// Carry out a command at `now`.
    pub fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Roll => {
                self.roll(now);
            }
            Command::OpenReview => {
                self.focus = Focus::Review;
                self.review_scroll = 0;
            }
            Command::CloseReview => self.focus = Focus::Stage,
            Command::ScrollUp => self.review_scroll = self.review_scroll.saturating_sub(1),
            Command::ScrollDown => {
                self.review_scroll = (self.review_scroll + 1).min(self.review_max_scroll);
            }
            Command::Reset => self.reset(),
            Command::Celebrate => self.celebrate(now),
            Command::CelebrateFromHistory => {
                if self.machine.pool().called_count() > 0 {
                    self.celebrate(now);
                }
            }
            Command::TogglePresentation => {
                self.presentation = !self.presentation;
                tracing::debug!(on = self.presentation, "presentation mode");
            }
            Command::ToggleHelp => {
                self.focus = if self.focus == Focus::Help {
                    Focus::Stage
                } else {
                    Focus::Help
                };
            }
            Command::Quit => self.should_quit = true,
        }
    }

    /// Request a roll, beeping if it was accepted.
    pub fn roll(&mut self, now: Instant) -> bool {
        let started = self.machine.request_roll(now).is_started();
        if started {
            self.cue.beep();
        }
        started
    }

    /// Start over with the full pool.
    pub fn reset(&mut self) {
        self.machine.reset();
        self.review_scroll = 0;
    }

    /// Fire a confetti burst.
    pub fn celebrate(&mut self, now: Instant) {
        self.confetti.burst(now, &mut self.rng);
    }

    /// Advance timers to `now`. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let rolled = self.machine.tick(now) != TickEvent::Idle;
        let animating = self.confetti.is_active();
        let expired = self.confetti.tick(now) > 0;
        rolled || animating || expired || self.machine.is_rolling()
    }

    /// How long the event loop may wait before the next [`tick`](Self::tick).
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = if self.confetti.is_active() {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        if let Some(deadline) = self.machine.next_deadline() {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }
        timeout
    }

    /// Emphasis of the word display, from `0.0` at roll start to `1.0`.
    pub fn pulse(&self, now: Instant) -> f32 {
        match self.machine.roll_elapsed(now) {
            Some(elapsed) => (elapsed.as_secs_f32() / PULSE_DURATION.as_secs_f32()).min(1.0),
            None => 1.0,
        }
    }

    /// Stop all timers and release the audio output.
    pub fn shutdown(&mut self) {
        self.machine.cancel();
        self.confetti.clear();
        self.cue.close();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::audio::{AudioState, Tone, ToneOutput};
    use crate::input::command_for;
    use wb_core::{BingoResult, PLACEHOLDER, RollStatus, SCRAMBLE_DURATION, SCRAMBLE_TICK};

    struct CountingOutput(Rc<RefCell<usize>>);

    impl ToneOutput for CountingOutput {
        fn state(&self) -> AudioState {
            AudioState::Running
        }

        fn resume(&mut self) -> BingoResult<()> {
            Ok(())
        }

        fn play(&mut self, _tone: Tone) -> BingoResult<()> {
            *self.0.borrow_mut() += 1;
            Ok(())
        }

        fn close(&mut self) {}
    }

    fn app() -> BingoApp {
        BingoApp::new(WordList::new(["CAT", "DOG", "BIRD"]), Some(42), Cue::silent())
    }

    fn settle(app: &mut BingoApp, mut now: Instant) -> Instant {
        while app.machine.is_rolling() {
            now += app.poll_timeout(now);
            app.tick(now);
        }
        now
    }

    #[test]
    fn beeps_once_per_accepted_roll() {
        let beeps = Rc::new(RefCell::new(0));
        let cue = Cue::with_output(Box::new(CountingOutput(Rc::clone(&beeps))));
        let mut app = BingoApp::new(WordList::new(["CAT", "DOG"]), Some(1), cue);
        let t0 = Instant::now();

        assert!(app.roll(t0));
        assert!(!app.roll(t0 + SCRAMBLE_TICK));
        assert_eq!(*beeps.borrow(), 1);

        let now = settle(&mut app, t0);
        app.roll(now);
        let now = settle(&mut app, now);
        assert!(!app.roll(now));
        assert_eq!(*beeps.borrow(), 2);
    }

    #[test]
    fn roll_settles_through_event_loop_timing() {
        let mut app = app();
        let t0 = Instant::now();
        app.apply(Command::Roll, t0);
        assert!(app.poll_timeout(t0) <= SCRAMBLE_TICK);
        let now = settle(&mut app, t0);
        assert!(now >= t0 + SCRAMBLE_DURATION);
        assert_eq!(app.machine.status(), RollStatus::Settled);
        assert_eq!(
            Some(app.machine.display_token()),
            app.machine.target_word()
        );
    }

    #[test]
    fn reset_mid_roll_keeps_placeholder() {
        let mut app = app();
        let t0 = Instant::now();
        app.apply(Command::Roll, t0);
        app.apply(Command::Reset, t0 + SCRAMBLE_TICK);
        app.tick(t0 + SCRAMBLE_DURATION);
        assert_eq!(app.machine.display_token(), PLACEHOLDER);
        assert_eq!(app.machine.pool().remaining_count(), 3);
        assert_eq!(app.poll_timeout(t0), IDLE_INTERVAL);
    }

    #[test]
    fn review_opens_and_scrolls_within_history() {
        let mut app = app();
        let mut now = Instant::now();
        for _ in 0..3 {
            app.apply(Command::Roll, now);
            now = settle(&mut app, now);
        }
        app.apply(Command::OpenReview, now);
        assert_eq!(app.focus, Focus::Review);

        // Three short words fit on one grid row.
        app.apply(Command::ScrollDown, now);
        assert_eq!(app.review_scroll, 0);

        app.review_max_scroll = 2;
        for _ in 0..10 {
            app.apply(Command::ScrollDown, now);
        }
        assert_eq!(app.review_scroll, 2);
        app.apply(Command::ScrollUp, now);
        assert_eq!(app.review_scroll, 1);
        app.apply(Command::CloseReview, now);
        assert_eq!(app.focus, Focus::Stage);
    }

    #[test]
    fn review_celebrate_key_needs_history() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Command::OpenReview, now);
        app.apply(Command::CelebrateFromHistory, now);
        assert!(!app.confetti.is_active());

        app.apply(Command::Roll, now);
        let now = settle(&mut app, now);
        app.apply(Command::CelebrateFromHistory, now);
        assert!(app.confetti.is_active());
        assert_eq!(app.poll_timeout(now), FRAME_INTERVAL);
    }

    #[test]
    fn ctrl_c_celebrates_in_review_without_history() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Command::OpenReview, now);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let command = command_for(ctrl_c, app.focus).unwrap();
        app.apply(command, now);
        assert!(app.confetti.is_active());
        assert_eq!(app.machine.pool().called_count(), 0);
    }

    #[test]
    fn celebration_leaves_pool_alone() {
        let mut app = app();
        let now = Instant::now();
        app.celebrate(now);
        assert_eq!(app.machine.pool().remaining_count(), 3);
        assert_eq!(app.machine.status(), RollStatus::Idle);
    }

    #[test]
    fn toggles() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Command::TogglePresentation, now);
        assert!(app.presentation);
        app.apply(Command::TogglePresentation, now);
        assert!(!app.presentation);
        app.apply(Command::ToggleHelp, now);
        assert_eq!(app.focus, Focus::Help);
        app.apply(Command::ToggleHelp, now);
        assert_eq!(app.focus, Focus::Stage);
        app.apply(Command::Quit, now);
        assert!(app.should_quit);
    }

    #[test]
    fn pulse_ramps_during_roll() {
        let mut app = app();
        let t0 = Instant::now();
        assert_eq!(app.pulse(t0), 1.0);
        app.roll(t0);
        assert_eq!(app.pulse(t0), 0.0);
        assert_eq!(app.pulse(t0 + PULSE_DURATION), 1.0);
    }

    #[test]
    fn shutdown_cancels_scramble() {
        let mut app = app();
        let t0 = Instant::now();
        app.roll(t0);
        app.shutdown();
        assert_eq!(app.machine.next_deadline(), None);
        assert!(!app.tick(t0 + SCRAMBLE_TICK));
    }
}
