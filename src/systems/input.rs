//! Input-to-velocity translation.

use voidharvest_core::{System, World};

use crate::components::{Input, Velocity};

/// Turns directional input into unit velocity for controlled entities.
pub struct InputTranslation;

impl System for InputTranslation {
    fn update(&mut self, _dt: f64, world: &World) {
        world.view2::<Input, Velocity>().each(|_, input, vel| {
            let mut vx = 0.0;
            let mut vy = 0.0;
            if input.left {
                vx = -1.0;
            }
            if input.right {
                vx = 1.0;
            }
            if input.up {
                vy = -1.0;
            }
            if input.down {
                vy = 1.0;
            }
            vel.vx = vx;
            vel.vy = vy;
        });
    }
}
