//! Physics body seam
//!
//! The movement core drives an external rigid body through a narrow
//! capability trait: impulses, velocity writes, gravity scaling, and direct
//! repositioning. Collision resolution stays on the other side of the seam;
//! contact notifications flow back in through the controller's methods.
//!
//! `SimpleBody` is a reference implementation (unit mass, semi-implicit
//! Euler) so the demo and tests run without an engine behind them.

use glam::Vec2;

use crate::consts::GRAVITY;

/// Capabilities the movement core needs from a rigid body.
pub trait PhysicsBody {
    /// Current world position of the body center.
    fn position(&self) -> Vec2;

    /// Current linear velocity.
    fn velocity(&self) -> Vec2;

    /// Overwrite the linear velocity.
    fn set_velocity(&mut self, velocity: Vec2);

    /// Apply an instantaneous impulse (a velocity delta at unit mass).
    fn apply_impulse(&mut self, impulse: Vec2);

    /// Current gravity multiplier (1 = normal, 0 = gravity off).
    fn gravity_scale(&self) -> f32;

    /// Set the gravity multiplier.
    fn set_gravity_scale(&mut self, scale: f32);

    /// Teleport the body, bypassing velocity integration.
    fn move_position_to(&mut self, position: Vec2);
}

/// Minimal unit-mass rigid body for hosts without a physics engine.
#[derive(Debug, Clone, Copy)]
pub struct SimpleBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub gravity_scale: f32,
}

impl SimpleBody {
    /// Create a resting body at `position` under normal gravity.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }

    /// Integrate one fixed step: gravity into velocity, velocity into
    /// position. No collision handling.
    pub fn step(&mut self, dt: f32) {
        self.velocity.y -= GRAVITY * self.gravity_scale * dt;
        self.position += self.velocity * dt;
    }
}

impl Default for SimpleBody {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl PhysicsBody for SimpleBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn move_position_to(&mut self, position: Vec2) {
        self.position = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    #[test]
    fn test_gravity_accelerates_fall() {
        let mut body = SimpleBody::new(Vec2::new(0.0, 10.0));
        body.step(DT);
        assert!(body.velocity.y < 0.0);
        assert!(body.position.y < 10.0);
    }

    #[test]
    fn test_zero_gravity_scale_freezes_vertical() {
        let mut body = SimpleBody::new(Vec2::ZERO);
        body.set_gravity_scale(0.0);
        for _ in 0..50 {
            body.step(DT);
        }
        assert_eq!(body.velocity.y, 0.0);
        assert_eq!(body.position.y, 0.0);
    }

    #[test]
    fn test_impulse_is_velocity_delta() {
        let mut body = SimpleBody::new(Vec2::ZERO);
        body.apply_impulse(Vec2::new(3.0, 4.0));
        assert_eq!(body.velocity, Vec2::new(3.0, 4.0));
        body.apply_impulse(Vec2::new(-1.0, 0.0));
        assert_eq!(body.velocity, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_move_position_bypasses_velocity() {
        let mut body = SimpleBody::new(Vec2::ZERO);
        body.velocity = Vec2::new(100.0, 0.0);
        body.move_position_to(Vec2::new(1.0, 2.0));
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vec2::new(100.0, 0.0));
    }
}
