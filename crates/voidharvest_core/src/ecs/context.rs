//! Process-wide runtime state that drives scheduler branching.

use serde::{Deserialize, Serialize};

/// Simulation phase selecting which systems run each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameLayer {
    /// Open space flight.
    #[default]
    Space,
    /// On the surface of a planet.
    PlanetSurface,
    /// Below the surface of a planet.
    PlanetDeep,
}

/// Progress toward the current contract quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestProgress {
    /// Contracts collected so far.
    pub collected: u32,
    /// Contracts required for completion.
    pub needed: u32,
    /// Set once `collected >= needed`.
    pub complete: bool,
}

/// Singleton world context record.
///
/// Copy-by-value: readers receive a snapshot at call time, and writes are
/// visible to subsequent reads within the same tick. The scheduler reads
/// the layer once at the top of a tick, so a mid-tick layer change takes
/// effect the following tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WorldContext {
    /// Current simulation layer.
    pub current_layer: GameLayer,
    /// Identifier of the planet being visited (0 in open space).
    pub planet_id: i32,
    /// Depth below the surface, in levels.
    pub depth: i32,
    /// Biome identifier for the current location.
    pub biome: i32,
    /// Contract quest progress.
    pub quest: QuestProgress,
}
