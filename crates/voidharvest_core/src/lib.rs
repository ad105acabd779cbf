//! # Voidharvest Core
//!
//! Simulation core for the tick-driven terminal game world:
//!
//! - **ECS**: recycling entity allocator, per-type component stores with a
//!   reader-writer discipline, joined query views, and a world context
//!   that drives layer-conditional scheduling
//! - **Scheduling**: strictly sequential, deterministic system execution
//!   per tick, branching on the current gameplay layer
//! - **Timing**: global monotonic tick counter and a non-blocking frame
//!   limiter the host polls for pacing
//!
//! The world and all stores are mutated exclusively during the tick
//! thread's update; an external snapshot writer reads under the world's
//! save mutex.
//!
//! ## Example
//!
//! ```rust,ignore
//! use voidharvest_core::{LayerScheduler, World};
//!
//! let world = World::new(42);
//! let player = world.create();
//! let mut scheduler = LayerScheduler::new();
//! scheduler.update(1.0 / 60.0, &world);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diag;
pub mod ecs;
pub mod timing;

pub use ecs::{
    Component, Entity, EntityAllocator, GameLayer, LayerScheduler, QuestProgress, Scheduler,
    Store, System, View1, View2, View3, World, WorldContext,
};
pub use timing::{update_global_timer, FrameLimiter, GlobalTimer};
