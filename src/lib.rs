//! Coyote 2D - a tick-driven platformer core
//!
//! Core modules:
//! - `movement`: Character locomotion state machine (jump, dash, wall slide)
//! - `physics`: The narrow body capability the controller steers
//! - `pool`: Fixed-capacity FIFO object pool for transient entities
//! - `projectile`: Pooled shots and the launcher that fires them
//! - `collectable`: Double-jump pickup with a timed show/hide cycle
//! - `timer`: One-shot countdowns checked every tick
//! - `tuning`: Data-driven game balance
//!
//! Everything is host-driven: the embedding game loop forwards input
//! intents and contact notifications as they happen, then calls the
//! fixed-rate tick entry points. No threads, no engine callbacks.

pub mod camera;
pub mod collectable;
pub mod movement;
pub mod physics;
pub mod points;
pub mod pool;
pub mod projectile;
pub mod timer;
pub mod tuning;

pub use movement::{DoubleJumpReset, MovementController, MovementTuning};
pub use pool::{Pool, PoolError, PoolHandle};
pub use projectile::ProjectileLauncher;
pub use tuning::GameTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz physics)
    pub const TICK_DT: f32 = 1.0 / 50.0;
    /// Downward acceleration at gravity scale 1, units/s²
    pub const GRAVITY: f32 = 9.81;
    /// Contact points within this height of the body center count as
    /// side-wall touches, anything farther is floor or ceiling
    pub const WALL_CONTACT_EPSILON: f32 = 0.02;
}
