//! Ordered, layer-conditional system execution.

use tracing::trace;

use super::context::GameLayer;
use super::world::World;

/// A function driven each tick that reads and mutates components.
///
/// Systems are total: they cannot fail by signature. A panic raised inside
/// a system aborts the tick and unwinds to the host; tick execution is not
/// transactional, so hosts that need rollback should snapshot at tick
/// boundaries.
pub trait System {
    /// Advances the system by `dt` seconds against `world`.
    fn update(&mut self, dt: f64, world: &World);
}

/// Runs a fixed list of systems in declared order.
pub struct Scheduler {
    systems: Vec<Box<dyn System>>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    /// Appends a system to the execution order.
    pub fn push(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// Executes every system once, strictly sequentially.
    pub fn update(&mut self, dt: f64, world: &World) {
        for system in &mut self.systems {
            system.update(dt, world);
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Scheduler that branches on the world context's current layer.
///
/// Each tick runs the `universal` list first, then exactly one of the
/// layer lists. The branch is chosen from the context read at the top of
/// the tick; a layer change made by a system takes effect next tick.
pub struct LayerScheduler {
    universal: Vec<Box<dyn System>>,
    space: Vec<Box<dyn System>>,
    surface: Vec<Box<dyn System>>,
    deep: Vec<Box<dyn System>>,
}

impl LayerScheduler {
    /// Creates a scheduler with empty system lists.
    #[must_use]
    pub fn new() -> Self {
        Self {
            universal: Vec::new(),
            space: Vec::new(),
            surface: Vec::new(),
            deep: Vec::new(),
        }
    }

    /// Appends a system that runs every tick regardless of layer.
    pub fn add_universal(&mut self, system: Box<dyn System>) {
        self.universal.push(system);
    }

    /// Appends a system that runs only in the `Space` layer.
    pub fn add_space(&mut self, system: Box<dyn System>) {
        self.space.push(system);
    }

    /// Appends a system that runs only in the `PlanetSurface` layer.
    pub fn add_surface(&mut self, system: Box<dyn System>) {
        self.surface.push(system);
    }

    /// Appends a system that runs only in the `PlanetDeep` layer.
    pub fn add_deep(&mut self, system: Box<dyn System>) {
        self.deep.push(system);
    }

    /// Runs one tick: universal systems, then the branch selected by the
    /// layer read at entry.
    pub fn update(&mut self, dt: f64, world: &World) {
        let layer = world.context().current_layer;
        trace!(?layer, dt, "tick");
        for system in &mut self.universal {
            system.update(dt, world);
        }
        let branch = match layer {
            GameLayer::Space => &mut self.space,
            GameLayer::PlanetSurface => &mut self.surface,
            GameLayer::PlanetDeep => &mut self.deep,
        };
        for system in branch {
            system.update(dt, world);
        }
    }
}

impl Default for LayerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ecs::context::WorldContext;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl System for Recorder {
        fn update(&mut self, _dt: f64, _world: &World) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Box<dyn System> {
        Box::new(Recorder {
            name,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn scheduler_runs_in_declared_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sched = Scheduler::new();
        sched.push(recorder("a", &log));
        sched.push(recorder("b", &log));
        sched.push(recorder("c", &log));

        let world = World::new(1);
        sched.update(1.0, &world);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn layer_scheduler_branches_on_current_layer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sched = LayerScheduler::new();
        sched.add_universal(recorder("universal", &log));
        sched.add_space(recorder("space", &log));
        sched.add_surface(recorder("surface", &log));

        let world = World::new(1);
        sched.update(1.0, &world);
        assert_eq!(*log.borrow(), vec!["universal", "space"]);

        log.borrow_mut().clear();
        world.set_context(WorldContext {
            current_layer: GameLayer::PlanetSurface,
            ..WorldContext::default()
        });
        sched.update(1.0, &world);
        assert_eq!(*log.borrow(), vec!["universal", "surface"]);
    }

    #[test]
    fn mid_tick_layer_change_does_not_reselect_branch() {
        struct LayerFlip;
        impl System for LayerFlip {
            fn update(&mut self, _dt: f64, world: &World) {
                let mut ctx = world.context();
                ctx.current_layer = GameLayer::PlanetDeep;
                world.set_context(ctx);
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut sched = LayerScheduler::new();
        sched.add_universal(Box::new(LayerFlip));
        sched.add_space(recorder("space", &log));
        sched.add_deep(recorder("deep", &log));

        let world = World::new(1);
        // Branch was chosen as Space before LayerFlip ran.
        sched.update(1.0, &world);
        assert_eq!(*log.borrow(), vec!["space"]);

        // The new layer takes effect on the following tick.
        log.borrow_mut().clear();
        sched.update(1.0, &world);
        assert_eq!(*log.borrow(), vec!["deep"]);
    }
}
