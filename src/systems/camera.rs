//! Camera follow.

use voidharvest_core::{System, World};

use crate::components::{Camera, Position};

/// Keeps the player's camera centered on the player.
pub struct CameraFollow;

impl System for CameraFollow {
    fn update(&mut self, _dt: f64, world: &World) {
        let target = world.player_entity();
        if target.is_none() {
            return;
        }
        let Some(pos) = world.get::<Position>(target) else {
            return;
        };
        let mut cam = world.get::<Camera>(target).unwrap_or_default();
        cam.x = pos.x as i32 - cam.width / 2;
        cam.y = pos.y as i32 - cam.height / 2;
        world.insert(target, cam);
    }
}
