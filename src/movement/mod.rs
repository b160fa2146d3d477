//! Character locomotion state machine
//!
//! Intents (move axis, jump press/release, dash, forced land) and contact
//! notifications (ground enter/exit, wall contact changes) mutate a single
//! state object; a fixed-rate tick turns that state into velocity and
//! impulse commands against an external [`PhysicsBody`]. No engine callbacks,
//! no coroutines: timed behaviors are explicit countdowns checked every tick.
//!
//! [`PhysicsBody`]: crate::physics::PhysicsBody

pub mod controller;
pub mod state;
pub mod tuning;

pub use controller::{MovementController, classify_wall_contact};
pub use state::{Facing, MovementEvent, VisualFlags, WallSide, WallSlide};
pub use tuning::MovementTuning;

/// Contract between collectables and anything that consumes a double jump:
/// the collectable hands the jump back.
pub trait DoubleJumpReset {
    fn reset_double_jump(&mut self);
}
