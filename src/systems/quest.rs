//! Contract quest tracking.

use tracing::info;
use voidharvest_core::{System, World};

use crate::components::Inventory;

/// Item kind counted toward the contract quest.
const CONTRACT_KIND: &str = "contract";

/// Mirrors collected contracts into the context's quest progress.
pub struct QuestTracker;

impl System for QuestTracker {
    fn update(&mut self, _dt: f64, world: &World) {
        let player = world.player_entity();
        if player.is_none() {
            return;
        }
        let Some(inventory) = world.get::<Inventory>(player) else {
            return;
        };
        let collected = inventory.count(CONTRACT_KIND).max(0) as u32;

        let mut ctx = world.context();
        if ctx.quest.collected == collected {
            return;
        }
        ctx.quest.collected = collected;
        if ctx.quest.needed > 0 && collected >= ctx.quest.needed && !ctx.quest.complete {
            ctx.quest.complete = true;
            info!(collected, "contract quest complete");
        }
        world.set_context(ctx);
    }
}
