//! Space-layer systems.

use voidharvest_core::{System, World};

use crate::components::{PlayerStats, Velocity};

/// Burns fuel in proportion to speed while in open space.
///
/// Even a drifting ship pays one unit per tick for life support; an empty
/// tank stays at zero.
pub struct FuelDrain;

impl System for FuelDrain {
    fn update(&mut self, dt: f64, world: &World) {
        world.view2::<PlayerStats, Velocity>().each(|_, stats, vel| {
            if stats.fuel <= 0 {
                return;
            }
            let burn = ((vel.vx.abs() + vel.vy.abs()) * dt) as i32 + 1;
            stats.fuel = (stats.fuel - burn).max(0);
        });
    }
}
