//! Planet-surface systems.

use tracing::info;
use voidharvest_core::{Entity, System, World};

use crate::components::{Input, Position, Sprite, Tile};

/// Adjusts dig depth from the player's vertical input.
///
/// Down digs deeper, up climbs back; depth never goes below the surface.
pub struct DepthProgression;

/// Upper bound on dig depth.
const MAX_DEPTH: i32 = 10_000;

impl System for DepthProgression {
    fn update(&mut self, _dt: f64, world: &World) {
        let player = world.player_entity();
        if player.is_none() {
            return;
        }
        let Some(input) = world.get::<Input>(player) else {
            return;
        };
        let mut ctx = world.context();
        if input.down && ctx.depth < MAX_DEPTH {
            ctx.depth += 1;
        }
        if input.up && ctx.depth > 0 {
            ctx.depth -= 1;
        }
        world.set_context(ctx);
    }
}

/// Destroys space-only visuals after a descent to a planet surface.
///
/// Stars and planet markers have no business rendering on the surface
/// map; their entities are reaped on the first surface tick.
pub struct SurfaceCleanup;

fn is_space_visual(glyph: char) -> bool {
    glyph == '*' || ('1'..='3').contains(&glyph)
}

impl System for SurfaceCleanup {
    fn update(&mut self, _dt: f64, world: &World) {
        let mut doomed: Vec<Entity> = Vec::new();
        world.view2::<Tile, Position>().each(|e, tile, _| {
            if is_space_visual(tile.glyph) {
                doomed.push(e);
            }
        });
        world.view2::<Sprite, Position>().each(|e, sprite, _| {
            if is_space_visual(sprite.glyph) {
                doomed.push(e);
            }
        });
        if doomed.is_empty() {
            return;
        }
        info!(count = doomed.len(), "reaping space visuals on surface");
        for e in doomed {
            world.destroy(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TileKind;

    #[test]
    fn down_digs_and_up_climbs() {
        let world = World::new(1);
        let player = world.create();
        world.set_player_entity(player);
        world.insert(
            player,
            Input {
                down: true,
                ..Input::default()
            },
        );

        DepthProgression.update(1.0, &world);
        DepthProgression.update(1.0, &world);
        assert_eq!(world.context().depth, 2);

        world.insert(
            player,
            Input {
                up: true,
                ..Input::default()
            },
        );
        DepthProgression.update(1.0, &world);
        assert_eq!(world.context().depth, 1);
    }

    #[test]
    fn depth_clamps_at_surface() {
        let world = World::new(1);
        let player = world.create();
        world.set_player_entity(player);
        world.insert(
            player,
            Input {
                up: true,
                ..Input::default()
            },
        );

        DepthProgression.update(1.0, &world);
        assert_eq!(world.context().depth, 0);
    }

    #[test]
    fn cleanup_reaps_stars_keeps_terrain() {
        let world = World::new(1);
        let star = world.create();
        world.insert(star, Position { x: 1.0, y: 1.0 });
        world.insert(
            star,
            Tile {
                glyph: '*',
                kind: TileKind::Star,
            },
        );

        let forest = world.create();
        world.insert(forest, Position { x: 2.0, y: 2.0 });
        world.insert(
            forest,
            Tile {
                glyph: '#',
                kind: TileKind::Forest,
            },
        );

        SurfaceCleanup.update(1.0, &world);

        assert!(!world.is_live(star));
        assert!(world.is_live(forest));
    }
}
