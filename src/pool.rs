//! Reusable-instance pool with a FIFO free queue
//!
//! Transient entities (projectiles here) are created up front and leased out
//! instead of allocated per shot. The free queue is first-in-first-out, so
//! the longest-inactive instance is always the next one reused. Once warmed,
//! a non-expandable pool performs no allocation at all; an expandable pool
//! grows by exactly one instance when it runs dry.
//!
//! Exhaustion of a non-expandable pool is a soft failure: `allocate` returns
//! `None` and the caller is expected to skip the action. Releasing a lease
//! twice is a programming error and is reported, never absorbed into the
//! free queue.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

/// Sizing and growth policy for a [`Pool`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Instances pre-created by [`Pool::warm_up`].
    pub capacity: usize,
    /// Whether allocation past capacity grows the pool (by one) or fails.
    pub expandable: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            expandable: false,
        }
    }
}

/// Items a pool can recycle. `reset` must return the item to its neutral,
/// inactive state; it runs on every release, before the item re-enters the
/// free queue.
pub trait PoolItem {
    fn reset(&mut self);
}

/// Lease ticket for a pooled item. Only meaningful to the pool that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle(usize);

impl PoolHandle {
    /// Slot index, for logging and display.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PoolHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Misuse of a lease ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The handle was never issued by this pool.
    UnknownHandle(usize),
    /// The item behind the handle is already in the free queue.
    AlreadyFree(usize),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::UnknownHandle(index) => {
                write!(f, "handle #{index} does not belong to this pool")
            }
            PoolError::AlreadyFree(index) => {
                write!(f, "item #{index} is already in the free queue")
            }
        }
    }
}

impl Error for PoolError {}

/// Counters for observing pool behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Successful allocations (including ones served by growth).
    pub allocated: usize,
    /// Leases returned to the free queue.
    pub released: usize,
    /// Times an expandable pool grew past its warmed capacity.
    pub grown: usize,
    /// Allocations denied because a non-expandable pool was empty.
    pub denied: usize,
}

#[derive(Debug)]
struct Slot<T> {
    item: T,
    leased: bool,
}

/// Fixed-capacity, optionally expandable instance pool.
pub struct Pool<T> {
    slots: Vec<Slot<T>>,
    free: VecDeque<usize>,
    config: PoolConfig,
    factory: Box<dyn Fn() -> T>,
    stats: PoolStats,
}

impl<T: PoolItem> Pool<T> {
    /// Create an empty pool. `factory` builds fresh instances (the prefab);
    /// nothing is created until [`warm_up`](Self::warm_up) or growth.
    pub fn new(config: PoolConfig, factory: impl Fn() -> T + 'static) -> Self {
        Self {
            slots: Vec::with_capacity(config.capacity),
            free: VecDeque::with_capacity(config.capacity),
            config,
            factory: Box::new(factory),
            stats: PoolStats::default(),
        }
    }

    /// Pre-create instances up to the configured capacity. Idempotent: a
    /// second call tops up only what is missing.
    pub fn warm_up(&mut self) {
        if self.config.capacity == 0 && !self.config.expandable {
            warn!("pool warmed with zero capacity and no growth; every allocation will fail");
        }
        while self.slots.len() < self.config.capacity {
            let index = self.create_slot();
            self.free.push_back(index);
        }
    }

    /// Lease the longest-inactive instance, or grow by one if the pool is
    /// expandable. Returns `None` when a non-expandable pool is empty;
    /// callers must treat that as "skip the action".
    pub fn allocate(&mut self) -> Option<PoolHandle> {
        let index = match self.free.pop_front() {
            Some(index) => index,
            None if self.config.expandable => {
                let index = self.create_slot();
                self.stats.grown += 1;
                debug!("pool empty, grew by one to {} instances", self.slots.len());
                index
            }
            None => {
                self.stats.denied += 1;
                warn!(
                    "pool exhausted ({} leased, not expandable), allocation denied",
                    self.slots.len()
                );
                return None;
            }
        };

        self.slots[index].leased = true;
        self.stats.allocated += 1;
        Some(PoolHandle(index))
    }

    /// Return a lease: reset the item to its neutral state and append it to
    /// the back of the free queue. Releasing an already-free or foreign
    /// handle is a programming error, reported without touching the queue.
    pub fn release(&mut self, handle: PoolHandle) -> Result<(), PoolError> {
        let slot = self.slots.get_mut(handle.0).ok_or_else(|| {
            error!("release of handle {handle} that this pool never issued");
            PoolError::UnknownHandle(handle.0)
        })?;

        if !slot.leased {
            error!("double release of pooled item {handle}");
            return Err(PoolError::AlreadyFree(handle.0));
        }

        slot.item.reset();
        slot.leased = false;
        self.free.push_back(handle.0);
        self.stats.released += 1;
        Ok(())
    }

    /// Borrow a leased item. `None` for free or foreign handles.
    pub fn get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.0)
            .filter(|slot| slot.leased)
            .map(|slot| &slot.item)
    }

    /// Mutably borrow a leased item. `None` for free or foreign handles.
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.0)
            .filter(|slot| slot.leased)
            .map(|slot| &mut slot.item)
    }

    /// Whether the handle refers to a currently leased item.
    pub fn is_leased(&self, handle: PoolHandle) -> bool {
        self.slots
            .get(handle.0)
            .map(|slot| slot.leased)
            .unwrap_or(false)
    }

    /// Iterate over leased items in slot order.
    pub fn iter_leased(&self) -> impl Iterator<Item = (PoolHandle, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.leased)
            .map(|(index, slot)| (PoolHandle(index), &slot.item))
    }

    /// Mutably iterate over leased items in slot order.
    pub fn iter_leased_mut(&mut self) -> impl Iterator<Item = (PoolHandle, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter(|(_, slot)| slot.leased)
            .map(|(index, slot)| (PoolHandle(index), &mut slot.item))
    }

    /// Instances currently leased to the world.
    pub fn leased_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Instances waiting in the free queue.
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Every instance this pool has ever created.
    pub fn total(&self) -> usize {
        self.slots.len()
    }

    /// The policy this pool was built with.
    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// Running counters.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    fn create_slot(&mut self) -> usize {
        let index = self.slots.len();
        self.slots.push(Slot {
            item: (self.factory)(),
            leased: false,
        });
        index
    }
}

impl<T: fmt::Debug> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("total", &self.slots.len())
            .field("free", &self.free.len())
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish()
    }
}
