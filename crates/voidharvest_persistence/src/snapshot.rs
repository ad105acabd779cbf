//! Versioned world snapshots and the component codec registry.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use voidharvest_core::{Component, Entity, World, WorldContext};

use crate::error::PersistError;

/// Snapshot version this build reads and writes.
pub const CURRENT_VERSION: u32 = 1;

/// A versioned, serializable capture of the full world.
///
/// Component maps are `BTreeMap`s keyed by registered type name and then
/// entity handle, so canonical encoding (sorted keys, stable field order)
/// falls out of the serializer and the save-load-save fixed point holds
/// byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version; migrations advance it to [`CURRENT_VERSION`].
    pub version: u32,
    /// RNG seed; restored worlds reproduce subsequent draws.
    pub seed: u64,
    /// Allocator monotonic counter.
    pub next: u64,
    /// Allocator free list, oldest destruction first.
    pub free: Vec<Entity>,
    /// The reified world context.
    pub context: WorldContext,
    /// Per-type component maps: `type name -> entity -> encoded value`.
    pub components: BTreeMap<String, BTreeMap<u64, Value>>,
}

type DumpFn = fn(&World) -> Result<BTreeMap<u64, Value>, String>;
type RestoreFn = fn(&World, &BTreeMap<u64, Value>) -> Result<(), String>;

struct RegistryEntry {
    name: &'static str,
    dump: DumpFn,
    restore: RestoreFn,
}

/// Write-once table of component types a snapshot covers.
///
/// The game layer registers every persistent component type at program
/// start; `save` dumps each registered store and `load` clears and refills
/// it. Types absent from a snapshot's component map are left cleared.
#[derive(Default)]
pub struct ComponentRegistry {
    entries: Vec<RegistryEntry>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers component type `T` under `name`.
    ///
    /// The name is the stable key in the snapshot's component map; renaming
    /// a registered type requires a migration.
    pub fn register<T>(&mut self, name: &'static str)
    where
        T: Component + Serialize + DeserializeOwned,
    {
        self.entries.push(RegistryEntry {
            name,
            dump: dump_store::<T>,
            restore: restore_store::<T>,
        });
    }

    /// Names of all registered component types, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }
}

fn dump_store<T>(world: &World) -> Result<BTreeMap<u64, Value>, String>
where
    T: Component + Serialize + DeserializeOwned,
{
    let store = world.store_of::<T>();
    let mut map = BTreeMap::new();
    for e in store.entities() {
        if let Some(value) = store.get(e) {
            let encoded = serde_json::to_value(&value).map_err(|err| err.to_string())?;
            map.insert(e.raw(), encoded);
        }
    }
    Ok(map)
}

fn restore_store<T>(world: &World, data: &BTreeMap<u64, Value>) -> Result<(), String>
where
    T: Component + Serialize + DeserializeOwned,
{
    let store = world.store_of::<T>();
    // Clear first so the restored store matches the snapshot exactly.
    store.clear();
    for (raw, encoded) in data {
        let value: T = serde_json::from_value(encoded.clone()).map_err(|err| err.to_string())?;
        store.insert(Entity::from_raw(*raw), value);
    }
    Ok(())
}

/// Forward migration steps keyed by the version they upgrade from.
///
/// The table is built once at program start. While a loaded snapshot's
/// version is below [`CURRENT_VERSION`], the matching migrator transforms
/// the snapshot data in place and the chain bumps the version by one;
/// a missing step fails with [`PersistError::Migration`].
#[derive(Default)]
pub struct Migrations {
    table: BTreeMap<u32, fn(&mut Snapshot) -> Result<(), String>>,
}

impl Migrations {
    /// Creates an empty migration table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the migrator that upgrades snapshots of `from_version`.
    pub fn register(&mut self, from_version: u32, migrator: fn(&mut Snapshot) -> Result<(), String>) {
        self.table.insert(from_version, migrator);
    }

    /// Applies migration steps until the snapshot reaches the current
    /// version.
    pub fn apply(&self, snapshot: &mut Snapshot) -> Result<(), PersistError> {
        while snapshot.version < CURRENT_VERSION {
            let from = snapshot.version;
            let Some(migrator) = self.table.get(&from) else {
                return Err(PersistError::Migration { from });
            };
            migrator(snapshot).map_err(|detail| {
                debug!(from, detail, "snapshot migration failed");
                PersistError::Migration { from }
            })?;
            snapshot.version = from + 1;
        }
        Ok(())
    }
}

/// Captures the full world state as a snapshot.
///
/// Holds the world's save mutex for the duration of the store traversal;
/// encoding to bytes happens after the guard is released.
pub fn save(world: &World, registry: &ComponentRegistry) -> Result<Snapshot, PersistError> {
    let _guard = world.save_guard();
    let (next, free) = world.allocator_state();
    let mut components = BTreeMap::new();
    for entry in &registry.entries {
        let map = (entry.dump)(world).map_err(|detail| PersistError::Serialize {
            component: entry.name.to_string(),
            detail,
        })?;
        components.insert(entry.name.to_string(), map);
    }
    Ok(Snapshot {
        version: CURRENT_VERSION,
        seed: world.seed(),
        next,
        free,
        context: world.context(),
        components,
    })
}

/// Restores a snapshot into `world`, migrating it forward first.
///
/// Fails with [`PersistError::VersionTooNew`] before touching the world if
/// the snapshot comes from a newer build. Every registered store is
/// cleared and refilled from the snapshot's component maps; allocator
/// state, context, and the RNG seed are restored so the world is
/// observationally equivalent to the one saved.
pub fn load(
    world: &World,
    snapshot: &mut Snapshot,
    registry: &ComponentRegistry,
    migrations: &Migrations,
) -> Result<(), PersistError> {
    if snapshot.version > CURRENT_VERSION {
        return Err(PersistError::VersionTooNew {
            found: snapshot.version,
            current: CURRENT_VERSION,
        });
    }
    migrations.apply(snapshot)?;

    world.reseed(snapshot.seed);
    world.restore_allocator(snapshot.next, snapshot.free.clone());
    world.set_context(snapshot.context);

    static EMPTY: BTreeMap<u64, Value> = BTreeMap::new();
    for entry in &registry.entries {
        let data = snapshot
            .components
            .get(entry.name)
            .unwrap_or(&EMPTY);
        (entry.restore)(world, data).map_err(|detail| PersistError::Load {
            component: entry.name.to_string(),
            detail,
        })?;
    }
    debug!(version = snapshot.version, "snapshot restored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Pos {
        x: f64,
        y: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Stats {
        fuel: i32,
    }

    fn registry() -> ComponentRegistry {
        let mut reg = ComponentRegistry::new();
        reg.register::<Pos>("Pos");
        reg.register::<Stats>("Stats");
        reg
    }

    #[test]
    fn save_captures_components_and_allocator() {
        let world = World::new(9);
        let a = world.create();
        let b = world.create();
        world.insert(a, Pos { x: 1.0, y: 2.0 });
        world.insert(b, Stats { fuel: 50 });
        world.destroy(b);

        let snapshot = save(&world, &registry()).expect("save");
        assert_eq!(snapshot.version, CURRENT_VERSION);
        assert_eq!(snapshot.seed, 9);
        assert_eq!(snapshot.next, 2);
        assert_eq!(snapshot.free, vec![b]);
        assert_eq!(snapshot.components["Pos"].len(), 1);
        // Destroyed entity's components are gone.
        assert!(snapshot.components["Stats"].is_empty());
    }

    #[test]
    fn load_restores_equivalent_world() {
        let reg = registry();
        let migrations = Migrations::new();

        let world = World::new(42);
        let e = world.create();
        world.insert(e, Pos { x: 3.5, y: -1.25 });
        world.insert(e, Stats { fuel: 77 });

        let mut snapshot = save(&world, &reg).expect("save");

        let fresh = World::new(1);
        load(&fresh, &mut snapshot, &reg, &migrations).expect("load");

        assert_eq!(fresh.seed(), 42);
        assert_eq!(fresh.get::<Pos>(e), Some(Pos { x: 3.5, y: -1.25 }));
        assert_eq!(fresh.get::<Stats>(e), Some(Stats { fuel: 77 }));
        // Identical handles come out of the restored allocator.
        assert_eq!(fresh.create(), world.create());
    }

    #[test]
    fn save_load_save_is_fixed_point() {
        let reg = registry();
        let migrations = Migrations::new();

        let world = World::new(7);
        for i in 0..10 {
            let e = world.create();
            world.insert(
                e,
                Pos {
                    x: f64::from(i) * 0.1,
                    y: f64::from(i),
                },
            );
        }

        let first = save(&world, &reg).expect("first save");
        let fresh = World::new(1);
        let mut loaded = first.clone();
        load(&fresh, &mut loaded, &reg, &migrations).expect("load");
        let second = save(&fresh, &reg).expect("second save");

        let bytes_a = serde_json::to_vec(&first).expect("encode first");
        let bytes_b = serde_json::to_vec(&second).expect("encode second");
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn load_restores_seed_zero() {
        use rand::Rng;

        let reg = registry();
        let migrations = Migrations::new();

        let source = World::new(0);
        let e = source.create();
        source.insert(e, Pos { x: 1.0, y: 1.0 });
        let mut snapshot = save(&source, &reg).expect("save");
        assert_eq!(snapshot.seed, 0);

        // The destination's own seed must not survive the load.
        let target = World::new(99);
        load(&target, &mut snapshot, &reg, &migrations).expect("load");
        assert_eq!(target.seed(), 0);

        let fresh = World::new(0);
        let restored: Vec<u32> = target.with_rng(|rng| (0..8).map(|_| rng.gen()).collect());
        let expected: Vec<u32> = fresh.with_rng(|rng| (0..8).map(|_| rng.gen()).collect());
        assert_eq!(restored, expected);
    }

    #[test]
    fn load_clears_stale_components() {
        let reg = registry();
        let world = World::new(1);
        let e = world.create();
        world.insert(e, Pos { x: 0.0, y: 0.0 });
        let mut snapshot = save(&world, &reg).expect("save");

        let target = World::new(1);
        let stale = target.create();
        target.insert(stale, Pos { x: 9.0, y: 9.0 });
        target.insert(stale, Stats { fuel: 1 });

        load(&target, &mut snapshot, &reg, &Migrations::new()).expect("load");
        assert_eq!(target.store_of::<Pos>().len(), 1);
        assert!(target.store_of::<Stats>().is_empty());
    }

    #[test]
    fn version_too_new_is_rejected_without_mutation() {
        let reg = registry();
        let world = World::new(1);
        let e = world.create();
        world.insert(e, Stats { fuel: 5 });

        let mut snapshot = save(&world, &reg).expect("save");
        snapshot.version = CURRENT_VERSION + 1;

        let err = load(&world, &mut snapshot, &reg, &Migrations::new()).unwrap_err();
        assert!(matches!(err, PersistError::VersionTooNew { .. }));
        // World untouched.
        assert_eq!(world.get::<Stats>(e), Some(Stats { fuel: 5 }));
    }

    #[test]
    fn missing_migrator_fails() {
        let reg = registry();
        let world = World::new(1);
        let mut snapshot = save(&world, &reg).expect("save");
        snapshot.version = 0;

        let err = load(&world, &mut snapshot, &reg, &Migrations::new()).unwrap_err();
        assert!(matches!(err, PersistError::Migration { from: 0 }));
    }

    #[test]
    fn migration_chain_reaches_current() {
        let reg = registry();
        let world = World::new(1);
        let mut snapshot = save(&world, &reg).expect("save");
        snapshot.version = 0;
        snapshot.seed = 0;

        let mut migrations = Migrations::new();
        migrations.register(0, |s| {
            s.seed = 123;
            Ok(())
        });

        load(&world, &mut snapshot, &reg, &migrations).expect("load");
        assert_eq!(snapshot.version, CURRENT_VERSION);
        assert_eq!(world.seed(), 123);
    }
}
