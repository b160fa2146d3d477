//! Camera follow
//!
//! Exponential chase: every fixed tick the camera lerps a speed-scaled
//! fraction of the way toward its target, so it trails fast movement and
//! settles smoothly when the target stops.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Camera tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Chase rate; the per-tick blend factor is `dt * camera_speed`
    pub camera_speed: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self { camera_speed: 4.0 }
    }
}

/// Follows a target point with a smoothed trailing motion.
#[derive(Debug, Clone, Copy)]
pub struct CameraFollower {
    position: Vec2,
    speed: f32,
}

impl CameraFollower {
    pub fn new(position: Vec2, tuning: &CameraTuning) -> Self {
        Self {
            position,
            speed: tuning.camera_speed,
        }
    }

    /// Move a speed-scaled fraction toward the target. The fraction is
    /// clamped, an overdriven speed lands exactly on the target instead
    /// of overshooting.
    pub fn tick(&mut self, target: Vec2, dt: f32) {
        let t = (dt * self.speed).clamp(0.0, 1.0);
        self.position = self.position.lerp(target, t);
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_DT;

    #[test]
    fn test_camera_closes_in_on_target() {
        let tuning = CameraTuning::default();
        let mut camera = CameraFollower::new(Vec2::ZERO, &tuning);
        let target = Vec2::new(10.0, 5.0);

        let mut last_distance = camera.position().distance(target);
        for _ in 0..50 {
            camera.tick(target, TICK_DT);
            let distance = camera.position().distance(target);
            assert!(distance < last_distance, "every tick must close the gap");
            last_distance = distance;
        }
        assert!(last_distance < 2.0);
    }

    #[test]
    fn test_overdriven_speed_snaps_without_overshoot() {
        let tuning = CameraTuning {
            camera_speed: 1000.0,
        };
        let mut camera = CameraFollower::new(Vec2::ZERO, &tuning);
        let target = Vec2::new(3.0, -2.0);

        camera.tick(target, TICK_DT);

        assert_eq!(camera.position(), target);
    }

    #[test]
    fn test_zero_speed_never_moves() {
        let tuning = CameraTuning { camera_speed: 0.0 };
        let mut camera = CameraFollower::new(Vec2::new(1.0, 1.0), &tuning);

        for _ in 0..10 {
            camera.tick(Vec2::new(50.0, 50.0), TICK_DT);
        }

        assert_eq!(camera.position(), Vec2::new(1.0, 1.0));
    }
}
