//! Save-slot file management.
//!
//! Saves live in a host-chosen directory (`.saves/` by convention):
//! `autosave.gz` plus three numbered slots `slot1.gz`..`slot3.gz`, all
//! compressed snapshots. A legacy uncompressed `autosave.json` is accepted
//! on read only.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};
use voidharvest_core::World;

use crate::codec::{decode, encode, SaveOptions};
use crate::error::PersistError;
use crate::snapshot::{load, save, ComponentRegistry, Migrations};

/// Number of numbered save slots.
pub const SLOT_COUNT: u32 = 3;

/// Description of one numbered save slot.
#[derive(Debug, Clone)]
pub struct SaveSlotInfo {
    /// Slot number, 1-based.
    pub slot: u32,
    /// True if the slot file exists.
    pub exists: bool,
    /// Last modification time, when available.
    pub modified: Option<SystemTime>,
}

/// Manages the save directory and its file naming scheme.
pub struct SaveSlotManager {
    dir: PathBuf,
    registry: ComponentRegistry,
    migrations: Migrations,
}

impl SaveSlotManager {
    /// Creates a manager rooted at `dir` with the given codec registry and
    /// migration table.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, registry: ComponentRegistry, migrations: Migrations) -> Self {
        Self {
            dir: dir.into(),
            registry,
            migrations,
        }
    }

    /// Creates a manager rooted at the conventional `.saves/` directory.
    #[must_use]
    pub fn with_default_dir(registry: ComponentRegistry, migrations: Migrations) -> Self {
        Self::new(".saves", registry, migrations)
    }

    /// The save directory path.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn autosave_path(&self) -> PathBuf {
        self.dir.join("autosave.gz")
    }

    fn legacy_autosave_path(&self) -> PathBuf {
        self.dir.join("autosave.json")
    }

    fn slot_path(&self, slot: u32) -> PathBuf {
        self.dir.join(format!("slot{slot}.gz"))
    }

    /// Returns true if an autosave file exists (compressed or legacy).
    #[must_use]
    pub fn has_autosave(&self) -> bool {
        self.autosave_path().exists() || self.legacy_autosave_path().exists()
    }

    /// Describes every numbered slot.
    #[must_use]
    pub fn slots(&self) -> Vec<SaveSlotInfo> {
        (1..=SLOT_COUNT)
            .map(|slot| {
                let meta = fs::metadata(self.slot_path(slot)).ok();
                SaveSlotInfo {
                    slot,
                    exists: meta.is_some(),
                    modified: meta.and_then(|m| m.modified().ok()),
                }
            })
            .collect()
    }

    /// Writes the world to the autosave file, compressed.
    pub fn save_autosave(&self, world: &World) -> Result<(), PersistError> {
        self.write_file(world, &self.autosave_path())
    }

    /// Writes the world to a numbered slot, compressed.
    pub fn save_slot(&self, world: &World, slot: u32) -> Result<(), PersistError> {
        self.write_file(world, &self.slot_path(slot))
    }

    /// Loads the autosave into `world`.
    ///
    /// Falls back to the legacy uncompressed `autosave.json` if the
    /// compressed file is absent.
    pub fn load_autosave(&self, world: &World) -> Result<(), PersistError> {
        let path = self.autosave_path();
        if path.exists() {
            return self.read_file(world, &path, &SaveOptions::compressed());
        }
        self.read_file(world, &self.legacy_autosave_path(), &SaveOptions::default())
    }

    /// Loads a numbered slot into `world`.
    pub fn load_slot(&self, world: &World, slot: u32) -> Result<(), PersistError> {
        self.read_file(world, &self.slot_path(slot), &SaveOptions::compressed())
    }

    /// Continue-game helper: loads the autosave if present and readable.
    ///
    /// Returns true on success. A missing or corrupt autosave is logged
    /// and reported as false so the host can silently start a new game.
    pub fn load_autosave_or_new(&self, world: &World) -> bool {
        if !self.has_autosave() {
            return false;
        }
        match self.load_autosave(world) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "autosave unreadable, starting new game");
                false
            }
        }
    }

    fn write_file(&self, world: &World, path: &Path) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let snapshot = save(world, &self.registry)?;
        let bytes = encode(&snapshot, &SaveOptions::compressed())?;
        fs::write(path, bytes)?;
        info!(path = %path.display(), "world saved");
        Ok(())
    }

    fn read_file(
        &self,
        world: &World,
        path: &Path,
        options: &SaveOptions,
    ) -> Result<(), PersistError> {
        let bytes = fs::read(path)?;
        let mut snapshot = decode(&bytes, options)?;
        load(world, &mut snapshot, &self.registry, &self.migrations)?;
        info!(path = %path.display(), "world loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use voidharvest_core::World;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    struct Fuel {
        amount: i32,
    }

    fn manager(dir: &Path) -> SaveSlotManager {
        let mut registry = ComponentRegistry::new();
        registry.register::<Fuel>("Fuel");
        SaveSlotManager::new(dir, registry, Migrations::new())
    }

    #[test]
    fn autosave_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mgr = manager(tmp.path());

        let world = World::new(5);
        let e = world.create();
        world.insert(e, Fuel { amount: 88 });
        mgr.save_autosave(&world).expect("save");
        assert!(mgr.has_autosave());

        let fresh = World::new(1);
        mgr.load_autosave(&fresh).expect("load");
        assert_eq!(fresh.get::<Fuel>(e), Some(Fuel { amount: 88 }));
        assert_eq!(fresh.seed(), 5);
    }

    #[test]
    fn slot_scan_reports_existence() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mgr = manager(tmp.path());

        let world = World::new(1);
        mgr.save_slot(&world, 2).expect("save slot");

        let slots = mgr.slots();
        assert_eq!(slots.len(), SLOT_COUNT as usize);
        assert!(!slots[0].exists);
        assert!(slots[1].exists);
        assert!(slots[1].modified.is_some());
        assert!(!slots[2].exists);
    }

    #[test]
    fn missing_autosave_continues_to_new_game() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mgr = manager(tmp.path());
        let world = World::new(1);
        assert!(!mgr.load_autosave_or_new(&world));
    }

    #[test]
    fn corrupt_autosave_continues_to_new_game() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mgr = manager(tmp.path());
        std::fs::create_dir_all(tmp.path()).expect("mkdir");
        std::fs::write(tmp.path().join("autosave.gz"), b"not a gzip").expect("write");

        let world = World::new(1);
        assert!(!mgr.load_autosave_or_new(&world));
    }

    #[test]
    fn legacy_json_autosave_is_readable() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let mgr = manager(tmp.path());

        let world = World::new(3);
        let e = world.create();
        world.insert(e, Fuel { amount: 7 });
        let snapshot = save(&world, &{
            let mut reg = ComponentRegistry::new();
            reg.register::<Fuel>("Fuel");
            reg
        })
        .expect("snapshot");
        let bytes = encode(&snapshot, &SaveOptions::default()).expect("encode");
        std::fs::create_dir_all(tmp.path()).expect("mkdir");
        std::fs::write(tmp.path().join("autosave.json"), bytes).expect("write");

        let fresh = World::new(1);
        mgr.load_autosave(&fresh).expect("legacy load");
        assert_eq!(fresh.get::<Fuel>(e), Some(Fuel { amount: 7 }));
    }
}
