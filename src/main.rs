//! Coyote 2D demo
//!
//! A headless scripted session: one character crosses a small hand-made
//! level (flat ground, one wall, one pickup, a target line for shots)
//! while a tick-indexed script feeds it intents. State transitions
//! stream to the log; a summary prints at the end.
//!
//! Run with `RUST_LOG=info` (or `debug`) to watch the machine work. An
//! optional argument names the tuning file, `tuning.json` by default; a
//! default file is written on first run so every knob is editable.

use std::path::Path;

use glam::Vec2;

use coyote2d::GameTuning;
use coyote2d::camera::CameraFollower;
use coyote2d::collectable::DoubleJumpResetter;
use coyote2d::consts::TICK_DT;
use coyote2d::movement::{MovementController, classify_wall_contact};
use coyote2d::physics::SimpleBody;
use coyote2d::points::PointsCounter;
use coyote2d::projectile::ProjectileLauncher;

const STEPS: u32 = 260;

// The level: ground along y = 0, one full-height wall, one pickup, and
// a vertical line far right that counts as a projectile hit
const GROUND_Y: f32 = 0.0;
const WALL_X: f32 = 14.0;
const PLAYER_HALF_WIDTH: f32 = 0.3;
const PICKUP_POS: Vec2 = Vec2::new(2.5, 0.5);
const PICKUP_RADIUS: f32 = 0.7;
const TARGET_X: f32 = 30.0;

fn main() {
    env_logger::init();
    log::info!("Coyote 2D demo starting");

    let tuning_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tuning.json".into());
    let tuning_path = Path::new(&tuning_path);
    let fresh = !tuning_path.exists();
    let tuning = GameTuning::load(tuning_path);
    if fresh {
        tuning.save(tuning_path);
    }

    let mut player = MovementController::new(tuning.movement.clone());
    let mut body = SimpleBody::new(Vec2::new(0.0, GROUND_Y));
    let mut launcher = ProjectileLauncher::new(tuning.pool, tuning.projectile);
    let mut pickup = DoubleJumpResetter::new(tuning.collectable.clone());
    let mut points = PointsCounter::new();
    let mut camera = CameraFollower::new(body.position, &tuning.camera);
    let mut over_pickup = false;

    for step in 0..STEPS {
        script(step, &mut player, &mut body, &mut launcher);

        player.tick(&mut body, TICK_DT);
        launcher.tick(TICK_DT);
        pickup.tick(TICK_DT);
        body.step(TICK_DT);

        resolve_level(&mut player, &mut body);

        // Trigger-enter semantics: collect on the way in, not every tick
        // spent overlapping
        let overlapping =
            pickup.collider_enabled() && body.position.distance(PICKUP_POS) < PICKUP_RADIUS;
        if overlapping && !over_pickup && pickup.try_collect(&mut player) {
            points.award();
        }
        over_pickup = overlapping;

        let impacted: Vec<_> = launcher
            .iter_live()
            .filter(|(_, shot)| shot.body.position.x >= TARGET_X)
            .map(|(handle, _)| handle)
            .collect();
        for handle in impacted {
            if let Err(err) = launcher.on_impact(handle) {
                log::error!("Impact bookkeeping failed: {err}");
            }
        }

        camera.tick(body.position, TICK_DT);

        for event in player.take_events() {
            log::info!("[tick {step:3}] {event:?}");
        }
    }

    println!("\nSession over after {STEPS} ticks");
    println!("  points:    {points}");
    println!(
        "  player at: ({:.2}, {:.2})",
        body.position.x, body.position.y
    );
    println!(
        "  camera at: ({:.2}, {:.2})",
        camera.position().x,
        camera.position().y
    );
    println!("  shots:     {:?}", launcher.pool().stats());
}

/// The choreography, keyed by tick number.
fn script(
    step: u32,
    player: &mut MovementController,
    body: &mut SimpleBody,
    launcher: &mut ProjectileLauncher,
) {
    match step {
        // Run right, across the pickup
        10 => player.set_move_axis(1.0),
        // A held jump, released partway through the boost window
        30 => player.request_jump(body),
        38 => player.release_jump(),
        // A quick volley toward the target line
        60..=63 => {
            if launcher.fire(body.position, Vec2::X).is_none() {
                log::warn!("Out of shots, trigger click ignored");
            }
        }
        // Dash toward the wall; the follow-up press sits inside the
        // cooldown and is swallowed
        70 => player.request_dash(body),
        75 => player.request_dash(body),
        // Jump into the wall while still pressing right: wall slide,
        // held long enough for the descent to kick in
        82 => player.request_jump(body),
        // Let go of the wall, jump off it within the grace window,
        // then steer away
        112 => player.set_move_axis(0.0),
        114 => player.request_jump(body),
        116 => player.set_move_axis(-1.0),
        // Far past the grace window now, this one costs the double jump
        135 => player.request_jump(body),
        // And slam back down
        150 => player.request_land(body),
        _ => {}
    }
}

/// Stand-in for a physics engine: flat ground, one wall, and the contact
/// notifications a real engine would deliver.
fn resolve_level(player: &mut MovementController, body: &mut SimpleBody) {
    if body.position.y <= GROUND_Y && body.velocity.y <= 0.0 {
        body.position.y = GROUND_Y;
        body.velocity.y = 0.0;
        if !player.grounded() {
            player.on_ground_enter(body);
        }
    } else if player.grounded() && body.position.y > GROUND_Y + 0.05 {
        player.on_ground_exit();
    }

    let reach = WALL_X - PLAYER_HALF_WIDTH;
    if body.position.x >= reach {
        body.position.x = reach;
        let contact = classify_wall_contact(Vec2::new(WALL_X, body.position.y), body.position);
        player.set_wall_contact(body, contact);
    } else if player.wall_contact().is_some() {
        player.set_wall_contact(body, None);
    }
}
