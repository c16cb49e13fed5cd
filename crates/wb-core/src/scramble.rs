//! Scramble tokens and the timer that paces them.

use std::time::{Duration, Instant};

use rand::Rng;

/// Letters used for scrambled tokens.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Total time a roll spends scrambling before it settles.
pub const SCRAMBLE_DURATION: Duration = Duration::from_millis(1000);

/// Interval between two scrambled tokens.
pub const SCRAMBLE_TICK: Duration = Duration::from_millis(80);

/// A random uppercase string of `len` characters.
pub fn scramble_token<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// What a [`ScrambleTimer`] wants done at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStep {
    /// Nothing is due yet.
    Wait,
    /// A new scrambled token is due.
    Scramble,
    /// The duration has elapsed; the roll should settle.
    Expire,
}

/// Handle for one armed scramble: a repeating tick with a bounded lifetime.
///
/// The timer never fires on its own. The owner polls it with the current
/// time, and cancelling means dropping the handle.
#[derive(Debug, Clone)]
pub struct ScrambleTimer {
    started_at: Instant,
    next_tick_at: Instant,
    duration: Duration,
    interval: Duration,
}

impl ScrambleTimer {
    /// Arm a timer with the standard duration and cadence.
    pub fn start(now: Instant) -> Self {
        Self::with_timing(now, SCRAMBLE_DURATION, SCRAMBLE_TICK)
    }

    /// Arm a timer with explicit timing.
    pub fn with_timing(now: Instant, duration: Duration, interval: Duration) -> Self {
        Self {
            started_at: now,
            next_tick_at: now + interval,
            duration,
            interval,
        }
    }

    /// Advance the timer to `now` and report what is due.
    ///
    /// Late polls collapse missed ticks into one scramble step.
    pub fn poll(&mut self, now: Instant) -> TimerStep {
        if now >= self.expires_at() {
            return TimerStep::Expire;
        }
        if now < self.next_tick_at {
            return TimerStep::Wait;
        }
        while self.next_tick_at <= now {
            self.next_tick_at += self.interval;
        }
        TimerStep::Scramble
    }

    /// The earliest instant at which [`poll`](Self::poll) has something to do.
    pub fn next_deadline(&self) -> Instant {
        self.next_tick_at.min(self.expires_at())
    }

    /// When the scramble ends.
    pub fn expires_at(&self) -> Instant {
        self.started_at + self.duration
    }

    /// When the timer was armed.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn token_has_requested_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        for len in [0, 1, 3, 4, 12] {
            let token = scramble_token(len, &mut rng);
            assert_eq!(token.chars().count(), len);
            assert!(token.bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn waits_until_first_tick() {
        let t0 = Instant::now();
        let mut timer = ScrambleTimer::start(t0);
        assert_eq!(timer.poll(t0), TimerStep::Wait);
        assert_eq!(timer.poll(t0 + Duration::from_millis(79)), TimerStep::Wait);
        assert_eq!(timer.poll(t0 + SCRAMBLE_TICK), TimerStep::Scramble);
        assert_eq!(timer.poll(t0 + SCRAMBLE_TICK), TimerStep::Wait);
    }

    #[test]
    fn ticks_at_fixed_cadence_then_expires() {
        let t0 = Instant::now();
        let mut timer = ScrambleTimer::start(t0);
        let mut scrambles = 0;
        let at = loop {
            let at = timer.next_deadline();
            match timer.poll(at) {
                TimerStep::Scramble => scrambles += 1,
                TimerStep::Expire => break at,
                TimerStep::Wait => panic!("deadline reported with nothing due"),
            }
        };
        assert_eq!(at, t0 + SCRAMBLE_DURATION);
        // 80, 160, ..., 960
        assert_eq!(scrambles, 12);
    }

    #[test]
    fn late_poll_collapses_missed_ticks() {
        let t0 = Instant::now();
        let mut timer = ScrambleTimer::start(t0);
        assert_eq!(
            timer.poll(t0 + Duration::from_millis(500)),
            TimerStep::Scramble
        );
        assert_eq!(timer.next_deadline(), t0 + Duration::from_millis(560));
    }

    #[test]
    fn deadline_never_passes_expiry() {
        let t0 = Instant::now();
        let timer = ScrambleTimer::with_timing(
            t0,
            Duration::from_millis(50),
            Duration::from_millis(80),
        );
        assert_eq!(timer.next_deadline(), t0 + Duration::from_millis(50));
    }
}
