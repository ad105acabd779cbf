//! Entity-component-system core.
//!
//! A world owns a type-indexed registry of component stores, a recycling
//! entity allocator, a seeded RNG, and the layer context that drives
//! scheduler branching. Stores hand out value copies under a
//! reader-writer discipline so systems can iterate while inserting and
//! removing components.

mod context;
mod entity;
mod query;
mod scheduler;
mod store;
mod world;

pub use context::{GameLayer, QuestProgress, WorldContext};
pub use entity::{Entity, EntityAllocator};
pub use query::{View1, View2, View3};
pub use scheduler::{LayerScheduler, Scheduler, System};
pub use store::{Component, Store};
pub use world::World;
