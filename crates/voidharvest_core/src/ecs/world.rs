//! The world: store registry, entity allocator, context, and RNG.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::context::WorldContext;
use super::entity::{Entity, EntityAllocator};
use super::store::{Component, Store};

/// Type-erased registry entry: the store behind an `Any` handle plus the
/// monomorphized operations the world needs without knowing `T`.
struct StoreEntry {
    store: Arc<dyn Any + Send + Sync>,
    remove: fn(&(dyn Any + Send + Sync), Entity),
}

impl StoreEntry {
    fn new<T: Component>() -> Self {
        Self {
            store: Arc::new(Store::<T>::new()),
            remove: |any, e| {
                if let Some(store) = any.downcast_ref::<Store<T>>() {
                    store.remove(e);
                }
            },
        }
    }

    fn typed<T: Component>(&self) -> Arc<Store<T>> {
        // The registry keys entries by TypeId::of::<T>(), so the handle
        // under that key is always a Store<T>.
        Arc::clone(&self.store)
            .downcast::<Store<T>>()
            .unwrap_or_else(|_| Arc::new(Store::new()))
    }
}

/// Container for all component stores, the entity allocator, the world
/// context, and the world's seeded RNG.
///
/// Every accessor takes `&self`; interior locking lets systems hold a
/// shared world reference for the duration of a tick while an external
/// snapshot writer reads under the save mutex.
pub struct World {
    alloc: Mutex<EntityAllocator>,
    stores: RwLock<HashMap<TypeId, StoreEntry>>,
    context: RwLock<WorldContext>,
    rng: Mutex<StdRng>,
    seed: Mutex<u64>,
    info_entity: RwLock<Entity>,
    player_entity: RwLock<Entity>,
    save_lock: Mutex<()>,
}

impl World {
    /// Creates an empty world seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            alloc: Mutex::new(EntityAllocator::new()),
            stores: RwLock::new(HashMap::new()),
            context: RwLock::new(WorldContext::default()),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Mutex::new(seed),
            info_entity: RwLock::new(Entity::NONE),
            player_entity: RwLock::new(Entity::NONE),
            save_lock: Mutex::new(()),
        }
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Produces a unique entity handle, recycling destroyed handles.
    pub fn create(&self) -> Entity {
        self.alloc.lock().create()
    }

    /// Destroys an entity: detaches it from every registered store and
    /// returns the handle to the free list. Idempotent.
    pub fn destroy(&self, e: Entity) {
        let handles: Vec<(Arc<dyn Any + Send + Sync>, fn(&(dyn Any + Send + Sync), Entity))> = self
            .stores
            .read()
            .values()
            .map(|entry| (Arc::clone(&entry.store), entry.remove))
            .collect();
        for (store, remove) in handles {
            remove(store.as_ref(), e);
        }
        self.alloc.lock().recycle(e);
    }

    /// Number of currently allocated entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.alloc.lock().live_count()
    }

    /// Returns true if the handle is currently allocated.
    #[must_use]
    pub fn is_live(&self, e: Entity) -> bool {
        self.alloc.lock().is_live(e)
    }

    /// Allocator state `(next, free)` for snapshots.
    #[must_use]
    pub fn allocator_state(&self) -> (u64, Vec<Entity>) {
        let alloc = self.alloc.lock();
        (alloc.next(), alloc.free_list().to_vec())
    }

    /// Restores allocator state from a snapshot.
    pub fn restore_allocator(&self, next: u64, free: Vec<Entity>) {
        self.alloc.lock().restore(next, free);
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    /// Returns the store for component type `T`, creating and registering
    /// it on first use.
    pub fn store_of<T: Component>(&self) -> Arc<Store<T>> {
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self.stores.read().get(&type_id) {
            return entry.typed::<T>();
        }
        let mut stores = self.stores.write();
        stores
            .entry(type_id)
            .or_insert_with(StoreEntry::new::<T>)
            .typed::<T>()
    }

    /// Attaches a component to `e`, replacing any prior value.
    pub fn insert<T: Component>(&self, e: Entity, value: T) {
        self.store_of::<T>().insert(e, value);
    }

    /// Returns a copy of the component of type `T` attached to `e`.
    #[must_use]
    pub fn get<T: Component>(&self, e: Entity) -> Option<T> {
        self.store_of::<T>().get(e)
    }

    /// Detaches the component of type `T` from `e`.
    pub fn remove<T: Component>(&self, e: Entity) {
        self.store_of::<T>().remove(e);
    }

    /// Returns true if `e` has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self, e: Entity) -> bool {
        self.store_of::<T>().contains(e)
    }

    // ------------------------------------------------------------------
    // Context
    // ------------------------------------------------------------------

    /// Returns a copy of the world context.
    #[must_use]
    pub fn context(&self) -> WorldContext {
        *self.context.read()
    }

    /// Replaces the world context. Immediately visible to subsequent
    /// reads; the scheduler branch for the current tick is unaffected.
    pub fn set_context(&self, ctx: WorldContext) {
        *self.context.write() = ctx;
    }

    // ------------------------------------------------------------------
    // RNG
    // ------------------------------------------------------------------

    /// Runs `f` with exclusive access to the world RNG.
    pub fn with_rng<R>(&self, f: impl FnOnce(&mut StdRng) -> R) -> R {
        f(&mut self.rng.lock())
    }

    /// The seed the RNG was last seeded with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        *self.seed.lock()
    }

    /// Reseeds the world RNG, reproducing the draw sequence of a fresh
    /// world constructed with `seed`. Used on snapshot load.
    pub fn reseed(&self, seed: u64) {
        *self.seed.lock() = seed;
        *self.rng.lock() = StdRng::seed_from_u64(seed);
    }

    // ------------------------------------------------------------------
    // Named singleton handles
    // ------------------------------------------------------------------

    /// Handle of the world-info singleton entity.
    #[must_use]
    pub fn info_entity(&self) -> Entity {
        *self.info_entity.read()
    }

    /// Assigns the world-info singleton handle.
    pub fn set_info_entity(&self, e: Entity) {
        *self.info_entity.write() = e;
    }

    /// Handle of the player entity.
    #[must_use]
    pub fn player_entity(&self) -> Entity {
        *self.player_entity.read()
    }

    /// Assigns the player entity handle.
    pub fn set_player_entity(&self, e: Entity) {
        *self.player_entity.write() = e;
    }

    // ------------------------------------------------------------------
    // Save coordination
    // ------------------------------------------------------------------

    /// Acquires the save mutex. Held for the duration of a snapshot
    /// traversal and released before encoding.
    pub fn save_guard(&self) -> MutexGuard<'_, ()> {
        self.save_lock.lock()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Pos {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Tag;

    #[test]
    fn insert_get_roundtrip() {
        let world = World::new(1);
        let e = world.create();
        world.insert(e, Pos { x: 1.0, y: 2.0 });
        assert_eq!(world.get::<Pos>(e), Some(Pos { x: 1.0, y: 2.0 }));
        assert!(world.has::<Pos>(e));
    }

    #[test]
    fn destroy_detaches_from_all_stores() {
        let world = World::new(1);
        let e = world.create();
        world.insert(e, Pos { x: 0.0, y: 0.0 });
        world.insert(e, Tag);

        world.destroy(e);

        assert!(!world.has::<Pos>(e));
        assert!(!world.has::<Tag>(e));
        assert_eq!(world.entity_count(), 0);

        // Destroyed handle is recycled on the next create.
        assert_eq!(world.create(), e);
    }

    #[test]
    fn destroy_is_idempotent() {
        let world = World::new(1);
        let e = world.create();
        world.destroy(e);
        world.destroy(e);
        assert_eq!(world.entity_count(), 0);
        // Only one copy of the handle was freed.
        let first = world.create();
        let second = world.create();
        assert_eq!(first, e);
        assert_ne!(second, e);
    }

    #[test]
    fn handles_reproducible_across_runs() {
        let drive = |world: &World| {
            let a = world.create();
            let _b = world.create();
            world.destroy(a);
            (world.create(), world.create())
        };
        let w1 = World::new(7);
        let w2 = World::new(7);
        assert_eq!(drive(&w1), drive(&w2));
    }

    #[test]
    fn context_copy_semantics() {
        let world = World::new(1);
        let mut ctx = world.context();
        ctx.planet_id = 3;
        // Local mutation is invisible until written back.
        assert_eq!(world.context().planet_id, 0);
        world.set_context(ctx);
        assert_eq!(world.context().planet_id, 3);
    }

    #[test]
    fn reseed_reproduces_draws() {
        use rand::Rng;
        let world = World::new(42);
        let first: Vec<u32> = world.with_rng(|rng| (0..4).map(|_| rng.gen()).collect());
        world.reseed(42);
        let second: Vec<u32> = world.with_rng(|rng| (0..4).map(|_| rng.gen()).collect());
        assert_eq!(first, second);
    }
}
