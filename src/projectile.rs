//! Pooled projectiles and the launcher that drives them
//!
//! The launcher is the pool's only client: it leases a projectile, configures
//! it from tuning, and launches it. Leased projectiles fly in a straight line
//! and count down a lifetime; on expiry, or on an impact reported by the
//! host, they return to the pool, exactly once per lease.

use glam::Vec2;
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::physics::{PhysicsBody, SimpleBody};
use crate::pool::{Pool, PoolConfig, PoolError, PoolHandle, PoolItem};

/// Flight tuning applied to every shot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Launch impulse magnitude (velocity at unit mass).
    pub initial_force: f32,
    /// Seconds a shot stays live before returning itself to the pool.
    pub live_time: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            initial_force: 14.0,
            live_time: 3.0,
        }
    }
}

/// A pooled shot. Inactive instances sit in the free queue at the origin;
/// active ones fly until their lifetime runs out or the host reports impact.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub body: SimpleBody,
    pub remaining_life: f32,
    pub active: bool,
}

impl Projectile {
    /// Fresh, inactive instance. Projectiles fly ballistically with gravity
    /// off; arcs are the host's call via `body.gravity_scale`.
    pub fn inactive() -> Self {
        let mut body = SimpleBody::default();
        body.gravity_scale = 0.0;
        Self {
            body,
            remaining_life: 0.0,
            active: false,
        }
    }

    fn launch(&mut self, origin: Vec2, direction: Vec2, tuning: ProjectileTuning) {
        self.body.move_position_to(origin);
        self.body.set_velocity(Vec2::ZERO);
        self.body
            .apply_impulse(direction.normalize_or_zero() * tuning.initial_force);
        self.remaining_life = tuning.live_time;
        self.active = true;
    }

    fn step(&mut self, dt: f32) {
        self.body.step(dt);
        self.remaining_life -= dt;
    }

    /// Whether the lifetime countdown has run out.
    pub fn expired(&self) -> bool {
        self.remaining_life <= 0.0
    }
}

impl Default for Projectile {
    fn default() -> Self {
        Self::inactive()
    }
}

impl PoolItem for Projectile {
    fn reset(&mut self) {
        self.body.move_position_to(Vec2::ZERO);
        self.body.set_velocity(Vec2::ZERO);
        self.remaining_life = 0.0;
        self.active = false;
    }
}

/// Allocates, configures, and launches pooled projectiles, and walks their
/// lifetimes every fixed tick. Owns its pool outright; callers that want to
/// fire hold a launcher, not a pool reference.
pub struct ProjectileLauncher {
    pool: Pool<Projectile>,
    tuning: ProjectileTuning,
}

impl ProjectileLauncher {
    /// Build a launcher with a warmed pool.
    pub fn new(pool_config: PoolConfig, tuning: ProjectileTuning) -> Self {
        let mut pool = Pool::new(pool_config, Projectile::inactive);
        pool.warm_up();
        Self { pool, tuning }
    }

    /// Fire a shot from `origin` along `direction`. An exhausted
    /// non-expandable pool drops the shot and returns `None`; the attack
    /// simply does not happen.
    pub fn fire(&mut self, origin: Vec2, direction: Vec2) -> Option<PoolHandle> {
        let handle = match self.pool.allocate() {
            Some(handle) => handle,
            None => {
                debug!("shot dropped, no projectile available");
                return None;
            }
        };

        let tuning = self.tuning;
        if let Some(shot) = self.pool.get_mut(handle) {
            shot.launch(origin, direction, tuning);
        }
        debug!("projectile {handle} launched from ({:.2}, {:.2})", origin.x, origin.y);
        Some(handle)
    }

    /// Advance every live shot and return the expired ones to the pool.
    pub fn tick(&mut self, dt: f32) {
        let mut expired = Vec::new();
        for (handle, shot) in self.pool.iter_leased_mut() {
            shot.step(dt);
            if shot.expired() {
                expired.push(handle);
            }
        }

        for handle in expired {
            debug!("projectile {handle} expired");
            if let Err(err) = self.pool.release(handle) {
                error!("expired projectile could not be returned: {err}");
            }
        }
    }

    /// Host-reported terminating event (the shot hit something). Returns the
    /// lease; a second return of the same lease is reported as an error.
    pub fn on_impact(&mut self, handle: PoolHandle) -> Result<(), PoolError> {
        debug!("projectile {handle} impact");
        self.pool.release(handle)
    }

    /// The backing pool, for inspection.
    pub fn pool(&self) -> &Pool<Projectile> {
        &self.pool
    }

    /// Shots currently in flight.
    pub fn live_count(&self) -> usize {
        self.pool.leased_count()
    }

    /// Iterate over shots currently in flight.
    pub fn iter_live(&self) -> impl Iterator<Item = (PoolHandle, &Projectile)> {
        self.pool.iter_leased()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    fn fixed_launcher(capacity: usize, tuning: ProjectileTuning) -> ProjectileLauncher {
        ProjectileLauncher::new(
            PoolConfig {
                capacity,
                expandable: false,
            },
            tuning,
        )
    }

    #[test]
    fn test_pool_of_three_drops_fourth_shot() {
        let mut launcher = fixed_launcher(3, ProjectileTuning::default());

        let a = launcher.fire(Vec2::ZERO, Vec2::Y);
        let b = launcher.fire(Vec2::ZERO, Vec2::Y);
        let c = launcher.fire(Vec2::ZERO, Vec2::Y);
        assert!(a.is_some() && b.is_some() && c.is_some());

        // Fourth shot is dropped, not an error
        assert_eq!(launcher.fire(Vec2::ZERO, Vec2::Y), None);
        assert_eq!(launcher.live_count(), 3);

        // Returning one makes exactly that one available again
        launcher.on_impact(b.unwrap()).unwrap();
        assert_eq!(launcher.fire(Vec2::ZERO, Vec2::Y), b);
    }

    #[test]
    fn test_shot_flies_along_direction() {
        let tuning = ProjectileTuning {
            initial_force: 10.0,
            live_time: 5.0,
        };
        let mut launcher = fixed_launcher(1, tuning);
        let handle = launcher.fire(Vec2::new(1.0, 2.0), Vec2::X).unwrap();

        launcher.tick(DT);
        let shot = launcher.pool().get(handle).unwrap();
        assert!((shot.body.position.x - (1.0 + 10.0 * DT)).abs() < 1e-4);
        assert_eq!(shot.body.position.y, 2.0, "no gravity on shots");
        assert!(shot.active);
    }

    #[test]
    fn test_lifetime_expiry_returns_shot_once() {
        let tuning = ProjectileTuning {
            initial_force: 10.0,
            live_time: 2.5 * DT,
        };
        let mut launcher = fixed_launcher(1, tuning);
        let handle = launcher.fire(Vec2::ZERO, Vec2::X).unwrap();

        launcher.tick(DT);
        launcher.tick(DT);
        assert_eq!(launcher.live_count(), 1);
        launcher.tick(DT);
        assert_eq!(launcher.live_count(), 0, "expired on the third tick");

        // Ticking an empty launcher is harmless
        launcher.tick(DT);
        assert_eq!(launcher.live_count(), 0);

        // Impact reported after expiry of the same lease is a double release
        assert_eq!(
            launcher.on_impact(handle),
            Err(PoolError::AlreadyFree(handle.index()))
        );
    }

    #[test]
    fn test_reused_shot_starts_fresh() {
        let tuning = ProjectileTuning {
            initial_force: 10.0,
            live_time: 1.0,
        };
        let mut launcher = fixed_launcher(1, tuning);

        let first = launcher.fire(Vec2::new(5.0, 5.0), Vec2::X).unwrap();
        launcher.tick(DT);
        launcher.on_impact(first).unwrap();

        let second = launcher.fire(Vec2::new(-2.0, 0.0), Vec2::new(0.0, 1.0)).unwrap();
        let shot = launcher.pool().get(second).unwrap();
        assert_eq!(shot.body.position, Vec2::new(-2.0, 0.0));
        assert_eq!(shot.body.velocity, Vec2::new(0.0, 10.0));
        assert!((shot.remaining_life - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_expandable_launcher_never_drops() {
        let mut launcher = ProjectileLauncher::new(
            PoolConfig {
                capacity: 1,
                expandable: true,
            },
            ProjectileTuning::default(),
        );

        for _ in 0..5 {
            assert!(launcher.fire(Vec2::ZERO, Vec2::Y).is_some());
        }
        assert_eq!(launcher.live_count(), 5);
        assert_eq!(launcher.pool().total(), 5);
    }
}
