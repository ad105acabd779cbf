//! # Voidharvest
//!
//! Tick-driven terminal space-harvester simulation built on the
//! `voidharvest_core` ECS, the `voidharvest_persistence` snapshot stack,
//! and the `voidharvest_rendering` compositor.
//!
//! This crate supplies the concrete game layer: plain-data components,
//! the universal and per-layer tick systems, the host action contract,
//! and the deterministic simulator harness behind the `sim` binary.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actions;
pub mod components;
pub mod harness;
pub mod render;
pub mod systems;

pub use actions::{apply_action, HostAction};
pub use harness::{Controller, SimOptions};
