//! Entity handles and the recycling allocator.

use serde::{Deserialize, Serialize};

/// Opaque handle identifying a conceptual object in the world.
///
/// An entity has no intrinsic behavior; components attached to it decide
/// which systems observe it. Handle `0` is reserved as "none/unbound" and
/// is never returned by the allocator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Entity(u64);

impl Entity {
    /// The reserved "no entity" handle.
    pub const NONE: Self = Self(0);

    /// Creates an entity handle from its raw value.
    ///
    /// Intended for snapshot restoration; normal code obtains handles from
    /// the allocator.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true if this is the reserved "none" handle.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// Recycling entity allocator.
///
/// Allocation pops the free list if non-empty, otherwise increments a
/// monotonic counter. Given the same sequence of create/destroy calls the
/// returned handles are reproducible across runs, which the snapshot
/// equivalence guarantees depend on.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Highest handle ever produced.
    next: u64,
    /// LIFO stack of destroyed handles awaiting reuse.
    free: Vec<Entity>,
}

impl EntityAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces a unique entity handle.
    pub fn create(&mut self) -> Entity {
        if let Some(e) = self.free.pop() {
            return e;
        }
        self.next += 1;
        Entity(self.next)
    }

    /// Returns a handle to the free list.
    ///
    /// A handle that was never allocated, is `NONE`, or is already free is
    /// ignored, so double-destroy cannot put a handle on the free list
    /// twice.
    pub fn recycle(&mut self, e: Entity) -> bool {
        if e.is_none() || e.raw() > self.next || self.free.contains(&e) {
            return false;
        }
        self.free.push(e);
        true
    }

    /// Returns true if the handle is currently allocated.
    #[must_use]
    pub fn is_live(&self, e: Entity) -> bool {
        !e.is_none() && e.raw() <= self.next && !self.free.contains(&e)
    }

    /// Number of currently allocated entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.next as usize - self.free.len()
    }

    /// The monotonic counter value (for snapshots).
    #[must_use]
    pub const fn next(&self) -> u64 {
        self.next
    }

    /// The free list, oldest destruction first (for snapshots).
    #[must_use]
    pub fn free_list(&self) -> &[Entity] {
        &self.free
    }

    /// Restores allocator state captured by a snapshot.
    pub fn restore(&mut self, next: u64, free: Vec<Entity>) {
        self.next = next;
        self.free = free;
    }
}
