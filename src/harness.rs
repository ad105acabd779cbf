//! Deterministic simulation driver.
//!
//! Bootstraps a seeded world with the standard system schedule, injects
//! key inputs, steps ticks, and reports a compact JSON state snapshot.
//! Both the `sim` CLI and the end-to-end tests drive the core through
//! this controller.

use std::time::Instant;

use serde::Serialize;
use voidharvest_core::{diag, update_global_timer, Entity, LayerScheduler, World};
use voidharvest_persistence::{
    decode, encode, load, save, ComponentRegistry, Migrations, PersistError, SaveOptions,
    Snapshot,
};

use crate::actions::{apply_action, HostAction};
use crate::components::{
    snapshot_registry, Action, Camera, Input, Inventory, Player, PlayerStats, Position, Sprite,
    Tile, TileKind, Velocity, WorldInfo,
};
use crate::systems::{
    CameraFollow, Combat, DepthProgression, FuelDrain, Harvest, InputTranslation, Movement,
    PressureWear, QuestTracker, SurfaceCleanup, WorldTick,
};

/// Controller construction options.
#[derive(Debug, Clone, Copy)]
pub struct SimOptions {
    /// World RNG seed.
    pub seed: u64,
    /// World width in cells; zero falls back to 200.
    pub width: i32,
    /// World height in cells; zero falls back to 80.
    pub height: i32,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 200,
            height: 80,
        }
    }
}

/// Player state in the reported snapshot.
#[derive(Debug, Serialize)]
pub struct PlayerState {
    /// X cell.
    pub x: i32,
    /// Y cell.
    pub y: i32,
    /// Remaining fuel.
    pub fuel: i32,
    /// Hull integrity.
    pub hull: i32,
    /// Drive level.
    pub drive: i32,
}

/// Camera state in the reported snapshot.
#[derive(Debug, Serialize)]
pub struct CameraState {
    /// Viewport left edge.
    pub x: i32,
    /// Viewport top edge.
    pub y: i32,
    /// Viewport width.
    pub w: i32,
    /// Viewport height.
    pub h: i32,
}

/// Deterministic state report written by the simulator.
#[derive(Debug, Serialize)]
pub struct SimState {
    /// Player position and stats.
    pub player: PlayerState,
    /// Camera viewport.
    pub camera: CameraState,
    /// World tick counter.
    pub tick: i64,
}

/// Drives a seeded world through the standard system schedule.
pub struct Controller {
    world: World,
    scheduler: LayerScheduler,
    registry: ComponentRegistry,
    migrations: Migrations,
}

impl Controller {
    /// Bootstraps a world: player with full kit, world-info singleton, a
    /// sparse starfield, and the universal plus per-layer schedules.
    #[must_use]
    pub fn new(options: SimOptions) -> Self {
        let width = if options.width == 0 { 200 } else { options.width };
        let height = if options.height == 0 { 80 } else { options.height };

        let world = World::new(options.seed);

        let player = world.create();
        world.insert(player, Position::default());
        world.insert(
            player,
            Sprite {
                glyph: '@',
                kind: TileKind::Unknown,
            },
        );
        world.insert(player, Input::default());
        world.insert(player, Action::default());
        world.insert(player, Velocity::default());
        world.insert(
            player,
            PlayerStats {
                fuel: 100,
                hull: 100,
                drive: 1,
            },
        );
        world.insert(
            player,
            Camera {
                x: 0,
                y: 0,
                width,
                height,
            },
        );
        world.insert(player, Inventory::default());
        world.insert(player, Player);
        world.set_player_entity(player);

        let info = world.create();
        world.insert(
            info,
            WorldInfo {
                tick: 0,
                width,
                height,
            },
        );
        world.set_info_entity(info);

        // Sparse deterministic starfield.
        for y in 0..height {
            for x in 0..width {
                if (x + y) % 11 == 0 {
                    let star = world.create();
                    world.insert(
                        star,
                        Position {
                            x: f64::from(x),
                            y: f64::from(y),
                        },
                    );
                    world.insert(
                        star,
                        Tile {
                            glyph: '*',
                            kind: TileKind::Star,
                        },
                    );
                }
            }
        }

        let mut scheduler = LayerScheduler::new();
        scheduler.add_universal(Box::new(InputTranslation));
        scheduler.add_universal(Box::new(Movement));
        scheduler.add_universal(Box::new(CameraFollow));
        scheduler.add_universal(Box::new(Harvest));
        scheduler.add_universal(Box::new(Combat));
        scheduler.add_universal(Box::new(WorldTick));
        scheduler.add_universal(Box::new(QuestTracker));
        scheduler.add_space(Box::new(FuelDrain));
        scheduler.add_surface(Box::new(DepthProgression));
        scheduler.add_surface(Box::new(SurfaceCleanup));
        scheduler.add_deep(Box::new(PressureWear));

        Self {
            world,
            scheduler,
            registry: snapshot_registry(),
            migrations: Migrations::new(),
        }
    }

    /// The controlled world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity handle.
    #[must_use]
    pub fn player(&self) -> Entity {
        self.world.player_entity()
    }

    /// Applies a script key to the player's input component.
    pub fn inject_key(&self, key: &str) {
        apply_action(&self.world, self.player(), HostAction::from_key(key));
    }

    /// Runs `n` ticks of `dt` seconds each.
    pub fn tick(&mut self, n: u32, dt: f64) {
        for _ in 0..n {
            let start = Instant::now();
            self.scheduler.update(dt, &self.world);
            update_global_timer();
            if diag::tick_debug_enabled() {
                diag::push(format!("engine dt:{dt:.4} tick:{:?}", start.elapsed()));
            }
        }
    }

    /// Reports the deterministic state snapshot as pretty JSON.
    pub fn state_json(&self) -> Result<String, serde_json::Error> {
        let player = self.player();
        let pos = self.world.get::<Position>(player).unwrap_or_default();
        let stats = self.world.get::<PlayerStats>(player).unwrap_or_default();
        let cam = self.world.get::<Camera>(player).unwrap_or_default();
        let info = self
            .world
            .get::<WorldInfo>(self.world.info_entity())
            .unwrap_or_default();
        let state = SimState {
            player: PlayerState {
                x: pos.x as i32,
                y: pos.y as i32,
                fuel: stats.fuel,
                hull: stats.hull,
                drive: stats.drive,
            },
            camera: CameraState {
                x: cam.x,
                y: cam.y,
                w: cam.width,
                h: cam.height,
            },
            tick: info.tick,
        };
        serde_json::to_string_pretty(&state)
    }

    /// Captures a full world snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, PersistError> {
        save(&self.world, &self.registry)
    }

    /// Restores a snapshot into the controlled world.
    pub fn restore(&self, snapshot: &mut Snapshot) -> Result<(), PersistError> {
        load(&self.world, snapshot, &self.registry, &self.migrations)
    }

    /// Captures and encodes a snapshot per the options.
    pub fn encode_save(&self, options: &SaveOptions) -> Result<Vec<u8>, PersistError> {
        let snapshot = self.snapshot()?;
        encode(&snapshot, options)
    }

    /// Decodes and restores a snapshot blob per the options.
    pub fn load_save(&self, bytes: &[u8], options: &SaveOptions) -> Result<(), PersistError> {
        let mut snapshot = decode(bytes, options)?;
        self.restore(&mut snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_creates_player_and_info() {
        let controller = Controller::new(SimOptions {
            seed: 1,
            width: 20,
            height: 10,
        });
        let player = controller.player();
        assert!(!player.is_none());
        assert!(controller.world().has::<PlayerStats>(player));
        assert!(controller.world().has::<Camera>(player));
        let info = controller.world().info_entity();
        assert!(controller.world().has::<WorldInfo>(info));
    }

    #[test]
    fn ticks_advance_world_tick() {
        let mut controller = Controller::new(SimOptions {
            seed: 1,
            width: 10,
            height: 5,
        });
        controller.tick(3, 1.0);
        let info = controller
            .world()
            .get::<WorldInfo>(controller.world().info_entity())
            .expect("world info");
        assert_eq!(info.tick, 3);
    }

    #[test]
    fn state_json_contains_player_block() {
        let controller = Controller::new(SimOptions::default());
        let json = controller.state_json().expect("state json");
        assert!(json.contains("\"player\""));
        assert!(json.contains("\"fuel\": 100"));
    }
}
