//! World tick bookkeeping.

use voidharvest_core::{System, World};

use crate::components::WorldInfo;

/// Advances the world-info tick counter once per scheduler pass.
pub struct WorldTick;

impl System for WorldTick {
    fn update(&mut self, _dt: f64, world: &World) {
        let info_entity = world.info_entity();
        if info_entity.is_none() {
            return;
        }
        let mut info = world.get::<WorldInfo>(info_entity).unwrap_or_default();
        info.tick += 1;
        world.insert(info_entity, info);
    }
}
