//! Cancellable one-shot countdowns for timed behaviors
//!
//! Dash end, wall-slide pacing, and the collectable's hide/show cycle are
//! scheduled continuations: started, checked every fixed tick, cancelled when
//! the behavior is interrupted. Starting a timer replaces any countdown
//! already pending on it; cancelling is idempotent.

/// One-shot countdown driven by fixed-tick `dt`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    remaining: Option<f32>,
}

impl Timer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self { remaining: None }
    }

    /// Schedule the countdown, replacing any pending one.
    pub fn start(&mut self, duration: f32) {
        self.remaining = Some(duration.max(0.0));
    }

    /// Drop the pending countdown. No-op when idle or already fired.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Whether a countdown is pending.
    pub fn pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Seconds left on the pending countdown, if any.
    pub fn remaining(&self) -> Option<f32> {
        self.remaining
    }

    /// Advance by `dt`. Returns true exactly once, on the tick the countdown
    /// expires; an idle timer ticks to false forever.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining {
            Some(left) => {
                let left = left - dt;
                if left <= 0.0 {
                    self.remaining = None;
                    true
                } else {
                    self.remaining = Some(left);
                    false
                }
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    #[test]
    fn test_fires_exactly_once() {
        let mut timer = Timer::new();
        timer.start(3.0 * DT);

        assert!(!timer.tick(DT));
        assert!(!timer.tick(DT));
        assert!(timer.tick(DT));
        // Fired and went idle; never fires again
        for _ in 0..10 {
            assert!(!timer.tick(DT));
        }
        assert!(!timer.pending());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut timer = Timer::new();
        timer.start(1.0);
        timer.cancel();
        timer.cancel(); // already cancelled
        assert!(!timer.pending());
        assert!(!timer.tick(DT));

        // Cancelling an already-fired timer is also a no-op
        timer.start(DT);
        assert!(timer.tick(DT));
        timer.cancel();
        assert!(!timer.tick(DT));
    }

    #[test]
    fn test_start_replaces_pending() {
        let mut timer = Timer::new();
        timer.start(10.0);
        timer.start(2.0 * DT);

        assert!(!timer.tick(DT));
        assert!(timer.tick(DT)); // the 10s countdown is gone
    }

    #[test]
    fn test_zero_duration_fires_next_tick() {
        let mut timer = Timer::new();
        timer.start(0.0);
        assert!(timer.tick(DT));
    }

    #[test]
    fn test_fires_after_expected_tick_count() {
        let mut timer = Timer::new();
        timer.start(0.35);

        let mut ticks = 0;
        while !timer.tick(DT) {
            ticks += 1;
            assert!(ticks < 1000, "timer never fired");
        }
        // 0.35s at 50 Hz is 17.5 ticks, so expiry lands on the 18th
        assert_eq!(ticks, 17);
    }
}
