//! Damage resolution.

use voidharvest_core::{Entity, System, World};

use crate::components::{Damage, Health};

/// Applies pending damage to health, destroying entities at zero.
pub struct Combat;

impl System for Combat {
    fn update(&mut self, _dt: f64, world: &World) {
        let mut dead: Vec<Entity> = Vec::new();
        world.view2::<Damage, Health>().each(|e, damage, health| {
            health.hp -= damage.amount;
            if health.hp <= 0 {
                dead.push(e);
            }
        });
        // Damage is one-shot: drop it after application.
        for e in world.store_of::<Damage>().entities() {
            world.remove::<Damage>(e);
        }
        for e in dead {
            world.destroy(e);
        }
    }
}
