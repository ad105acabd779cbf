//! Tick systems: universal passes plus the per-layer sets.

mod camera;
mod combat;
mod deep;
mod harvest;
mod input;
mod movement;
mod quest;
mod space;
mod surface;
mod tick;

pub use camera::CameraFollow;
pub use combat::Combat;
pub use deep::PressureWear;
pub use harvest::Harvest;
pub use input::InputTranslation;
pub use movement::Movement;
pub use quest::QuestTracker;
pub use space::FuelDrain;
pub use surface::{DepthProgression, SurfaceCleanup};
pub use tick::WorldTick;
