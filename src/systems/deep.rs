//! Deep-layer systems.

use voidharvest_core::{System, World};

use crate::components::PlayerStats;

/// Grinds hull integrity down with depth pressure.
///
/// Wear grows with every hundred levels of depth; the hull bottoms out at
/// zero rather than going negative.
pub struct PressureWear;

impl System for PressureWear {
    fn update(&mut self, _dt: f64, world: &World) {
        let depth = world.context().depth;
        if depth <= 0 {
            return;
        }
        let wear = 1 + depth / 100;
        world.view1::<PlayerStats>().each(|_, stats| {
            stats.hull = (stats.hull - wear).max(0);
        });
    }
}
