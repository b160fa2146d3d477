//! Double-jump collectable
//!
//! A trigger volume that hands a consumed double jump back, then hides
//! itself for a while: shrink, gone, regrow, ready again. The show/hide
//! cycle is a four-phase machine driven by one countdown; collection is
//! still possible while the pickup shrinks, but a second touch never
//! restarts the cycle.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::movement::DoubleJumpReset;
use crate::timer::Timer;

/// Show/hide cycle tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectableTuning {
    /// Seconds the shrink and the regrow each take
    pub appear_time: f32,
    /// Seconds the pickup stays gone between them
    pub reset_time: f32,
}

impl Default for CollectableTuning {
    fn default() -> Self {
        Self {
            appear_time: 0.1,
            reset_time: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Full size, collectable
    Idle,
    /// Shrinking, still collectable
    Vanishing,
    /// Collider and visual off
    Hidden,
    /// Growing back, not yet collectable
    Reappearing,
}

/// A pickup that restores the toucher's double jump.
#[derive(Debug)]
pub struct DoubleJumpResetter {
    tuning: CollectableTuning,
    phase: Phase,
    timer: Timer,
}

impl DoubleJumpResetter {
    pub fn new(tuning: CollectableTuning) -> Self {
        Self {
            tuning,
            phase: Phase::Idle,
            timer: Timer::new(),
        }
    }

    /// A body overlaps the trigger volume. Restores the target's double
    /// jump whenever the collider is live and starts the hide cycle on
    /// the first touch; returns whether anything was collected.
    pub fn try_collect(&mut self, target: &mut dyn DoubleJumpReset) -> bool {
        if !self.collider_enabled() {
            return false;
        }
        info!("Double jump collected");
        target.reset_double_jump();

        if self.phase == Phase::Idle {
            self.phase = Phase::Vanishing;
            self.timer.start(self.tuning.appear_time);
        }
        true
    }

    /// Advance the show/hide cycle one fixed step.
    pub fn tick(&mut self, dt: f32) {
        if !self.timer.tick(dt) {
            return;
        }
        self.phase = match self.phase {
            Phase::Idle => Phase::Idle,
            Phase::Vanishing => {
                debug!("Collectable hidden");
                self.timer.start(self.tuning.reset_time);
                Phase::Hidden
            }
            Phase::Hidden => {
                self.timer.start(self.tuning.appear_time);
                Phase::Reappearing
            }
            Phase::Reappearing => {
                debug!("Collectable ready again");
                Phase::Idle
            }
        };
    }

    /// The trigger volume reacts to touches. On while idle and while
    /// shrinking, off from the moment the pickup is gone until it has
    /// fully regrown.
    pub fn collider_enabled(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Vanishing)
    }

    /// Whether a renderer should draw the pickup at all.
    pub fn visible(&self) -> bool {
        self.phase != Phase::Hidden
    }

    /// Current size as a fraction of the resting size.
    pub fn scale(&self) -> f32 {
        match self.phase {
            Phase::Idle => 1.0,
            Phase::Hidden => 0.0,
            Phase::Vanishing => self.appear_ratio(),
            Phase::Reappearing => 1.0 - self.appear_ratio(),
        }
    }

    /// Fraction of the appear countdown still left, 0 on degenerate tuning
    fn appear_ratio(&self) -> f32 {
        match self.timer.remaining() {
            Some(left) if self.tuning.appear_time > 0.0 => {
                (left / self.tuning.appear_time).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;

    struct Catcher {
        resets: u32,
    }

    impl DoubleJumpReset for Catcher {
        fn reset_double_jump(&mut self) {
            self.resets += 1;
        }
    }

    fn ticks_for(seconds: f32) -> u32 {
        (seconds / TICK_DT).ceil() as u32 + 1
    }

    #[test]
    fn test_collect_resets_and_starts_cycle() {
        let mut pickup = DoubleJumpResetter::new(CollectableTuning::default());
        let mut player = Catcher { resets: 0 };

        assert!(pickup.try_collect(&mut player));
        assert_eq!(player.resets, 1);
        assert_eq!(pickup.phase, Phase::Vanishing);
        assert!(pickup.collider_enabled(), "still collectable while shrinking");
        assert!(pickup.visible());
    }

    #[test]
    fn test_second_touch_collects_but_does_not_restart() {
        let mut pickup = DoubleJumpResetter::new(CollectableTuning::default());
        let mut player = Catcher { resets: 0 };

        pickup.try_collect(&mut player);
        pickup.tick(TICK_DT);
        let remaining = pickup.timer.remaining();

        assert!(pickup.try_collect(&mut player));
        assert_eq!(player.resets, 2);
        assert_eq!(
            pickup.timer.remaining(),
            remaining,
            "the shrink countdown must not restart"
        );
    }

    #[test]
    fn test_hidden_pickup_collects_nothing() {
        let mut pickup = DoubleJumpResetter::new(CollectableTuning::default());
        let mut player = Catcher { resets: 0 };

        pickup.try_collect(&mut player);
        for _ in 0..ticks_for(pickup.tuning.appear_time) {
            pickup.tick(TICK_DT);
        }
        assert_eq!(pickup.phase, Phase::Hidden);
        assert!(!pickup.visible());
        assert_eq!(pickup.scale(), 0.0);

        assert!(!pickup.try_collect(&mut player));
        assert_eq!(player.resets, 1);
    }

    #[test]
    fn test_full_cycle_returns_to_idle() {
        let tuning = CollectableTuning {
            appear_time: 0.1,
            reset_time: 0.3,
        };
        let mut pickup = DoubleJumpResetter::new(tuning.clone());
        let mut player = Catcher { resets: 0 };

        pickup.try_collect(&mut player);
        for _ in 0..ticks_for(tuning.appear_time) {
            pickup.tick(TICK_DT);
        }
        assert_eq!(pickup.phase, Phase::Hidden);

        for _ in 0..ticks_for(tuning.reset_time) {
            pickup.tick(TICK_DT);
        }
        assert_eq!(pickup.phase, Phase::Reappearing);
        assert!(pickup.visible());
        assert!(!pickup.collider_enabled(), "not collectable until regrown");

        for _ in 0..ticks_for(tuning.appear_time) {
            pickup.tick(TICK_DT);
        }
        assert_eq!(pickup.phase, Phase::Idle);
        assert!(pickup.collider_enabled());
        assert_eq!(pickup.scale(), 1.0);

        assert!(pickup.try_collect(&mut player));
        assert_eq!(player.resets, 2);
    }

    #[test]
    fn test_scale_shrinks_then_regrows() {
        let mut pickup = DoubleJumpResetter::new(CollectableTuning::default());
        let mut player = Catcher { resets: 0 };

        pickup.try_collect(&mut player);
        let mut last = pickup.scale();
        assert!(last <= 1.0);
        pickup.tick(TICK_DT);
        while pickup.phase == Phase::Vanishing {
            let scale = pickup.scale();
            assert!(scale <= last, "shrinking monotonically");
            last = scale;
            pickup.tick(TICK_DT);
        }
    }
}
