//! Movement state data
//!
//! Small copyable types shared between the controller, its host, and
//! whatever renders or animates the character.

/// Horizontal facing, also the dash direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Unit sign along the x axis
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal axis value, `None` when neutral
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Facing::Right)
        } else if axis < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Which side of the body a wall touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Facing that presses into this wall
    pub fn toward(self) -> Facing {
        match self {
            WallSide::Left => Facing::Left,
            WallSide::Right => Facing::Right,
        }
    }
}

/// Live wall-slide sub-state, present only while sliding.
#[derive(Debug, Clone, Copy)]
pub struct WallSlide {
    /// Side the wall is on
    pub side: WallSide,
    /// Height the body is repositioned to every tick; descends once the
    /// hold delay has elapsed
    pub anchor_y: f32,
    /// True after the hold delay, the anchor now drops each tick
    pub descending: bool,
}

/// Animator-facing booleans, a snapshot of the controller after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualFlags {
    /// Horizontal velocity is nonzero
    pub run: bool,
    /// Standing on the ground
    pub grounded: bool,
    /// Wall slide engaged
    pub on_wall: bool,
    /// Dash in progress
    pub dashing: bool,
}

/// One-shot transitions a host may care about (animation triggers, sound).
///
/// Pushed by the controller as they happen, drained by the host with
/// [`MovementController::take_events`].
///
/// [`MovementController::take_events`]: super::MovementController::take_events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementEvent {
    /// A jump fired; `double` is true when it consumed the double jump
    Jumped { double: bool },
    DashStarted,
    DashEnded,
    WallSlideStarted { side: WallSide },
    WallSlideEnded,
    /// Touched down
    Grounded,
    /// Left the ground
    Airborne,
    /// A forced land began
    LandStarted,
    /// Visuals turned to face the new direction
    Flipped(Facing),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_sign() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
    }

    #[test]
    fn test_facing_from_axis() {
        assert_eq!(Facing::from_axis(1.0), Some(Facing::Right));
        assert_eq!(Facing::from_axis(-1.0), Some(Facing::Left));
        assert_eq!(Facing::from_axis(0.0), None);
    }

    #[test]
    fn test_wall_side_toward() {
        assert_eq!(WallSide::Left.toward(), Facing::Left);
        assert_eq!(WallSide::Right.toward(), Facing::Right);
    }
}
