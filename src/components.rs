//! Plain-data components attached to world entities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use voidharvest_persistence::ComponentRegistry;

/// World-space position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    /// X coordinate in cells.
    pub x: f64,
    /// Y coordinate in cells.
    pub y: f64,
}

/// Velocity in cells per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Velocity {
    /// Horizontal velocity.
    pub vx: f64,
    /// Vertical velocity.
    pub vy: f64,
}

/// Viewport tracking an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Camera {
    /// Viewport left edge.
    pub x: i32,
    /// Viewport top edge.
    pub y: i32,
    /// Viewport width in cells.
    pub width: i32,
    /// Viewport height in cells.
    pub height: i32,
}

/// Directional input state for a controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Input {
    /// Moving left.
    pub left: bool,
    /// Moving right.
    pub right: bool,
    /// Moving up.
    pub up: bool,
    /// Moving down.
    pub down: bool,
    /// Confirm pressed.
    pub enter: bool,
}

/// One-shot action flags for a controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Action {
    /// Harvest the resource under the entity this tick.
    pub harvest: bool,
}

/// Ship condition readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlayerStats {
    /// Remaining fuel units.
    pub fuel: i32,
    /// Hull integrity.
    pub hull: i32,
    /// Drive level.
    pub drive: i32,
}

/// Singleton world bookkeeping, attached to the info entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WorldInfo {
    /// Simulation tick counter.
    pub tick: i64,
    /// World width in cells.
    pub width: i32,
    /// World height in cells.
    pub height: i32,
}

/// Carried items keyed by resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Inventory {
    /// Item counts by kind. Defaults to empty on deserialization so old
    /// saves without the field restore cleanly.
    #[serde(default)]
    pub items: BTreeMap<String, i64>,
}

impl Inventory {
    /// Adds `amount` of `kind`.
    pub fn add(&mut self, kind: &str, amount: i64) {
        *self.items.entry(kind.to_string()).or_insert(0) += amount;
    }

    /// The carried amount of `kind`.
    #[must_use]
    pub fn count(&self, kind: &str) -> i64 {
        self.items.get(kind).copied().unwrap_or(0)
    }
}

/// A harvestable deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Resource {
    /// Resource kind, e.g. `"ore"`.
    pub kind: String,
    /// Units contained.
    pub amount: i64,
}

/// Classification of map tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TileKind {
    /// Unclassified.
    #[default]
    Unknown,
    /// A distant galaxy.
    Galaxy,
    /// A star.
    Star,
    /// A landable planet.
    Planet,
    /// Surface forest.
    Forest,
    /// Surface mountain.
    Mountain,
    /// Surface river.
    River,
    /// Lava.
    Lava,
    /// A nebula.
    Nebula,
    /// The galactic core.
    GalaxyCore,
    /// An asteroid.
    Asteroid,
    /// A comet.
    Comet,
}

/// A static map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Display character.
    pub glyph: char,
    /// Tile classification.
    pub kind: TileKind,
}

/// Drawable marker for dynamic entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// Display character.
    pub glyph: char,
    /// Tile classification used for styling.
    pub kind: TileKind,
}

/// Hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Health {
    /// Remaining hit points.
    pub hp: i32,
}

/// Pending damage to apply next combat pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Damage {
    /// Hit points to subtract.
    pub amount: i32,
}

/// Marker for the player entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Player;

/// Builds the snapshot codec registry covering every persistent
/// component type. Call once at program start.
#[must_use]
pub fn snapshot_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register::<Position>("Position");
    registry.register::<Velocity>("Velocity");
    registry.register::<Camera>("Camera");
    registry.register::<Input>("Input");
    registry.register::<Action>("Action");
    registry.register::<PlayerStats>("PlayerStats");
    registry.register::<WorldInfo>("WorldInfo");
    registry.register::<Inventory>("Inventory");
    registry.register::<Resource>("Resource");
    registry.register::<Tile>("Tile");
    registry.register::<Sprite>("Sprite");
    registry.register::<Health>("Health");
    registry.register::<Damage>("Damage");
    registry.register::<Player>("Player");
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_accumulates() {
        let mut inv = Inventory::default();
        inv.add("ore", 1);
        inv.add("ore", 2);
        assert_eq!(inv.count("ore"), 3);
        assert_eq!(inv.count("ice"), 0);
    }

    #[test]
    fn inventory_items_default_on_missing_field() {
        let inv: Inventory = serde_json::from_str("{}").expect("deserialize");
        assert!(inv.items.is_empty());
    }

    #[test]
    fn registry_covers_every_persistent_component() {
        let registry = snapshot_registry();
        let names = registry.names();
        for expected in [
            "Position",
            "Velocity",
            "Camera",
            "Input",
            "Action",
            "PlayerStats",
            "WorldInfo",
            "Inventory",
            "Resource",
            "Tile",
            "Sprite",
            "Health",
            "Damage",
            "Player",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }
}
