//! Points tally
//!
//! Collectable pickups report into this and a HUD reads it back out.

use std::fmt;

use log::debug;

/// Running score of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsCounter {
    points: u32,
}

impl PointsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// One pickup collected.
    pub fn award(&mut self) {
        self.points = self.points.saturating_add(1);
        debug!("Points: {}", self.points);
    }

    pub fn total(&self) -> u32 {
        self.points
    }
}

impl fmt::Display for PointsCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points)
    }
}
