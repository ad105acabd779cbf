//! Resource harvesting.

use voidharvest_core::{Entity, System, World};

use crate::components::{Action, Inventory, Position, Resource};

/// Moves a co-located resource into the harvesting entity's inventory.
///
/// Triggered by the `harvest` action flag. The resource component is
/// detached from the deposit entity once collected.
pub struct Harvest;

impl System for Harvest {
    fn update(&mut self, _dt: f64, world: &World) {
        world.view2::<Action, Position>().each(|e, action, pos| {
            if !action.harvest {
                return;
            }
            let cell = (pos.x as i64, pos.y as i64);

            let mut target = Entity::NONE;
            let mut found = Resource::default();
            world.view2::<Position, Resource>().each(|re, rpos, res| {
                if (rpos.x as i64, rpos.y as i64) == cell {
                    target = re;
                    found = res.clone();
                }
            });
            if target.is_none() {
                return;
            }

            let mut inventory = world.get::<Inventory>(e).unwrap_or_default();
            inventory.add(&found.kind, found.amount);
            world.insert(e, inventory);
            world.remove::<Resource>(target);
        });
    }
}
