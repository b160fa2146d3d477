//! Locomotion tuning knobs
//!
//! Grouped the way a designer thinks about them: ground movement, jump,
//! dash, forced land, wall slide. Loaded as part of [`GameTuning`].
//!
//! [`GameTuning`]: crate::tuning::GameTuning

use serde::{Deserialize, Serialize};

/// Tuning for one character's movement state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    // === Movement ===
    /// Horizontal speed written to the body every tick the axis is held
    pub move_speed: f32,

    // === Jump ===
    /// Upward impulse of a jump
    pub jump_force: f32,
    /// Extra upward impulse per tick while the jump button stays held
    pub jump_adjust_force: f32,
    /// Seconds after a jump during which holding the button keeps boosting
    pub jump_adjust_time: f32,
    /// Seconds after leaving the ground during which a jump still counts
    /// as grounded
    pub coyote_time: f32,

    // === Dash ===
    /// Impulse along the face direction
    pub dash_force: f32,
    /// Seconds a dash lasts before gravity and steering come back
    pub dash_duration: f32,
    /// Minimum seconds between dash starts
    pub dash_timeout: f32,

    // === Land ===
    /// Downward impulse of a forced land
    pub land_force: f32,

    // === Wall slide ===
    /// Whether pressing into a touched wall engages the slide at all
    pub wall_grip: bool,
    /// Seconds the slide holds its entry height before descending
    pub wall_slide_delay: f32,
    /// Height lost per tick once the descent begins
    pub slide_speed: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            // Movement
            move_speed: 8.0,

            // Jump
            jump_force: 11.0,
            jump_adjust_force: 0.5,
            jump_adjust_time: 0.25,
            coyote_time: 0.15,

            // Dash
            dash_force: 18.0,
            dash_duration: 0.2,
            dash_timeout: 1.0,

            // Land
            land_force: 16.0,

            // Wall slide
            wall_grip: true,
            wall_slide_delay: 0.4,
            slide_speed: 0.04,
        }
    }
}
