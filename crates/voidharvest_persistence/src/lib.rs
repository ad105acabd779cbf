//! # Voidharvest Persistence
//!
//! Versioned, compressible, password-wrappable world snapshots:
//!
//! - **Snapshot**: canonical capture of allocator state, RNG seed, world
//!   context, and every registered component store
//! - **Codec**: canonical JSON, optional gzip, optional AES-256-CTR
//!   envelope keyed by SHA-256 of a password (zero IV — a low-grade
//!   privacy wrapper, not real cryptographic protection)
//! - **Migrations**: forward-only per-version transforms applied on load
//! - **Save slots**: `.saves/` directory layout with autosave and three
//!   numbered slots
//!
//! A save-load-save cycle is a byte-for-byte fixed point under canonical
//! encoding; loading a snapshot into a fresh world reproduces component
//! values, entity handles, allocator state, and the RNG seed.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

mod codec;
mod error;
mod slots;
mod snapshot;

pub use codec::{decode, encode, SaveOptions};
pub use error::PersistError;
pub use slots::{SaveSlotInfo, SaveSlotManager, SLOT_COUNT};
pub use snapshot::{load, save, ComponentRegistry, Migrations, Snapshot, CURRENT_VERSION};
