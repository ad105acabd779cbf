//! Position integration.

use voidharvest_core::{System, World};

use crate::components::{Position, Velocity};

/// Integrates velocity into position.
pub struct Movement;

impl System for Movement {
    fn update(&mut self, dt: f64, world: &World) {
        world.view2::<Position, Velocity>().each(|_, pos, vel| {
            pos.x += vel.vx * dt;
            pos.y += vel.vy * dt;
        });
    }
}
