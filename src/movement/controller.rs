//! The locomotion controller
//!
//! One struct owns every movement flag and timestamp; the physics body
//! stays outside and is borrowed into each call that steers it. Intent
//! handlers and contact notifications may run in any order between ticks,
//! `tick` then applies the continuous part at a fixed rate against a
//! monotonic clock it advances itself.

use glam::Vec2;
use log::{debug, info, trace};

use super::DoubleJumpReset;
use super::state::{Facing, MovementEvent, VisualFlags, WallSide, WallSlide};
use super::tuning::MovementTuning;
use crate::consts::WALL_CONTACT_EPSILON;
use crate::physics::PhysicsBody;
use crate::timer::Timer;

/// Classify a contact point against the body center: a contact at center
/// height is a side wall, anything clearly above or below is floor or
/// ceiling and yields `None`.
pub fn classify_wall_contact(contact: Vec2, body_center: Vec2) -> Option<WallSide> {
    if (contact.y - body_center.y).abs() >= WALL_CONTACT_EPSILON {
        return None;
    }
    Some(if contact.x > body_center.x {
        WallSide::Right
    } else {
        WallSide::Left
    })
}

/// Locomotion state machine for one character.
pub struct MovementController {
    tuning: MovementTuning,

    /// Monotonic clock in seconds, advanced at the top of every tick
    now: f64,

    // Movement
    move_axis: f32,
    facing: Facing,
    shown_facing: Facing,
    run: bool,

    // Ground
    grounded: bool,
    last_grounded: f64,
    has_double_jump: bool,

    // Jump
    jumping: bool,
    jump_started: f64,

    // Dash
    dashing: bool,
    last_dash_start: Option<f64>,
    dash_end: Timer,

    // Land
    landing: bool,

    // Wall
    wall_contact: Option<WallSide>,
    slide: Option<WallSlide>,
    slide_delay: Timer,

    events: Vec<MovementEvent>,
}

impl MovementController {
    /// Controller in its initial state: grounded, double jump available,
    /// facing right.
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            now: 0.0,
            move_axis: 0.0,
            facing: Facing::default(),
            shown_facing: Facing::default(),
            run: false,
            grounded: true,
            last_grounded: 0.0,
            has_double_jump: true,
            jumping: false,
            jump_started: 0.0,
            dashing: false,
            last_dash_start: None,
            dash_end: Timer::new(),
            landing: false,
            wall_contact: None,
            slide: None,
            slide_delay: Timer::new(),
            events: Vec::new(),
        }
    }

    // === Intents ===

    /// Update the horizontal intent, quantized to -1, 0 or +1. A nonzero
    /// axis also turns the face direction; neutral keeps the last one.
    pub fn set_move_axis(&mut self, axis: f32) {
        self.move_axis = axis.round().clamp(-1.0, 1.0);
        if let Some(facing) = Facing::from_axis(self.move_axis) {
            self.facing = facing;
        }
    }

    /// Try to jump. Allowed from the ground, within the coyote window
    /// after leaving it, or on an available double jump; never from a
    /// wall slide. A success replaces the current velocity with the jump
    /// impulse and opens the boost window.
    pub fn request_jump(&mut self, body: &mut dyn PhysicsBody) {
        if self.slide.is_some() {
            return;
        }
        let coyote = self.now - self.last_grounded <= self.tuning.coyote_time as f64;
        if !self.grounded && !coyote && !self.has_double_jump {
            return;
        }

        info!("Jump");
        self.jumping = true;
        self.landing = false;
        self.jump_started = self.now;

        // Every jump starts from rest
        body.set_velocity(Vec2::ZERO);
        body.apply_impulse(Vec2::new(0.0, self.tuning.jump_force));

        let double = !self.grounded && !coyote;
        if double {
            self.has_double_jump = false;
        }
        self.events.push(MovementEvent::Jumped { double });
    }

    /// Stop boosting; holding again later within the window does nothing.
    pub fn release_jump(&mut self) {
        self.jumping = false;
    }

    /// Try to dash along the face direction. Rejected while a dash is
    /// active, while wall sliding, and until `dash_timeout` has passed
    /// since the previous dash start.
    pub fn request_dash(&mut self, body: &mut dyn PhysicsBody) {
        if self.dashing || self.slide.is_some() {
            return;
        }
        if let Some(start) = self.last_dash_start {
            if self.now - start < self.tuning.dash_timeout as f64 {
                debug!("Dash rejected, cooldown not elapsed");
                return;
            }
        }

        info!("Dash");
        self.dashing = true;
        self.last_dash_start = Some(self.now);
        self.dash_end.start(self.tuning.dash_duration);

        body.set_gravity_scale(0.0);
        body.set_velocity(Vec2::ZERO);
        body.apply_impulse(Vec2::new(self.facing.sign() * self.tuning.dash_force, 0.0));
        self.events.push(MovementEvent::DashStarted);
    }

    /// Slam downward. Only meaningful in free fall: rejected while already
    /// landing, while grounded, and while on a wall.
    pub fn request_land(&mut self, body: &mut dyn PhysicsBody) {
        if self.landing || self.grounded || self.slide.is_some() {
            return;
        }
        debug!("Forced land");
        self.landing = true;
        body.apply_impulse(Vec2::new(0.0, -self.tuning.land_force));
        self.events.push(MovementEvent::LandStarted);
    }

    // === Contact notifications ===

    /// Ground contact gained. Idempotent: overlapping ground sensors may
    /// report enter more than once per touchdown.
    pub fn on_ground_enter(&mut self, body: &mut dyn PhysicsBody) {
        if self.grounded {
            debug!("Ground enter while grounded, ignored");
            return;
        }
        self.exit_wall_slide(body);
        self.grounded = true;
        self.landing = false;
        self.has_double_jump = true;
        self.events.push(MovementEvent::Grounded);
    }

    /// Ground contact lost; opens the coyote window.
    pub fn on_ground_exit(&mut self) {
        if !self.grounded {
            return;
        }
        self.grounded = false;
        self.last_grounded = self.now;
        self.events.push(MovementEvent::Airborne);
    }

    /// Report which side a wall is currently touched on, `None` once the
    /// contact ends. Losing the contact ends an active slide.
    pub fn set_wall_contact(&mut self, body: &mut dyn PhysicsBody, contact: Option<WallSide>) {
        self.wall_contact = contact;
        if contact.is_none() {
            self.exit_wall_slide(body);
        }
    }

    // === Fixed-rate step ===

    /// Advance one fixed step: horizontal control, held-jump boost,
    /// wall-slide engage/hold/descent, dash-end countdown, face flip,
    /// in that order.
    pub fn tick(&mut self, body: &mut dyn PhysicsBody, dt: f32) {
        self.now += dt as f64;

        // Steering is surrendered for the length of a dash
        if !self.dashing {
            let vertical = body.velocity().y;
            body.set_velocity(Vec2::new(self.move_axis * self.tuning.move_speed, vertical));
        }
        self.run = body.velocity().x != 0.0;

        // Holding the button inside the window keeps adding lift
        if self.jumping && self.now - self.jump_started <= self.tuning.jump_adjust_time as f64 {
            body.apply_impulse(Vec2::new(0.0, self.tuning.jump_adjust_force));
        }

        self.update_wall_slide(body, dt);

        if self.dash_end.tick(dt) {
            self.dashing = false;
            body.set_gravity_scale(1.0);
            self.events.push(MovementEvent::DashEnded);
            debug!("Dash ended");
        }

        if self.facing != self.shown_facing {
            self.shown_facing = self.facing;
            self.events.push(MovementEvent::Flipped(self.facing));
        }
    }

    fn update_wall_slide(&mut self, body: &mut dyn PhysicsBody, dt: f32) {
        // Engage or release depending on whether the intent still presses
        // into the touched side
        if self.tuning.wall_grip && !self.grounded && !self.dashing {
            if let Some(side) = self.wall_contact {
                let pressing = Facing::from_axis(self.move_axis) == Some(side.toward());
                if pressing && self.slide.is_none() {
                    self.enter_wall_slide(body, side);
                } else if !pressing && self.slide.is_some() {
                    self.exit_wall_slide(body);
                }
            }
        }

        let Some(slide) = &mut self.slide else {
            return;
        };
        trace!("Wall sliding at y {}", slide.anchor_y);
        let x = body.position().x;
        body.move_position_to(Vec2::new(x, slide.anchor_y));
        if self.slide_delay.tick(dt) {
            slide.descending = true;
        }
        if slide.descending {
            slide.anchor_y -= self.tuning.slide_speed;
        }
    }

    fn enter_wall_slide(&mut self, body: &mut dyn PhysicsBody, side: WallSide) {
        info!("Wall slide enter ({side:?})");
        self.slide = Some(WallSlide {
            side,
            anchor_y: body.position().y,
            descending: false,
        });
        self.landing = false;
        self.has_double_jump = true;
        self.slide_delay.start(self.tuning.wall_slide_delay);

        body.set_gravity_scale(0.0);
        body.set_velocity(Vec2::ZERO);
        self.events.push(MovementEvent::WallSlideStarted { side });
    }

    fn exit_wall_slide(&mut self, body: &mut dyn PhysicsBody) {
        if self.slide.take().is_none() {
            return;
        }
        info!("Wall slide exit");
        // Leaving the wall opens the same grace window as leaving the ground
        self.last_grounded = self.now;
        self.slide_delay.cancel();

        body.set_gravity_scale(1.0);
        body.set_velocity(Vec2::ZERO);
        self.events.push(MovementEvent::WallSlideEnded);
    }

    // === Observation ===

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn dashing(&self) -> bool {
        self.dashing
    }

    pub fn landing(&self) -> bool {
        self.landing
    }

    pub fn has_double_jump(&self) -> bool {
        self.has_double_jump
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn wall_contact(&self) -> Option<WallSide> {
        self.wall_contact
    }

    pub fn wall_slide(&self) -> Option<&WallSlide> {
        self.slide.as_ref()
    }

    /// Seconds of simulated time this controller has ticked through
    pub fn time(&self) -> f64 {
        self.now
    }

    /// Snapshot for an animator or debug overlay.
    pub fn visual_flags(&self) -> VisualFlags {
        VisualFlags {
            run: self.run,
            grounded: self.grounded,
            on_wall: self.slide.is_some(),
            dashing: self.dashing,
        }
    }

    /// Drain the transitions recorded since the last call.
    pub fn take_events(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.events)
    }
}

impl DoubleJumpReset for MovementController {
    fn reset_double_jump(&mut self) {
        debug!("Double jump restored");
        self.has_double_jump = true;
    }
}
