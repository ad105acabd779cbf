//! Snapshot and save-file error types.

use thiserror::Error;

/// Errors raised by the snapshot, codec, and save-slot layers.
///
/// All variants surface to the host as typed values; the host decides the
/// user-visible behavior (ignore, retry, start a new game). The core never
/// panics on bad input data.
#[derive(Error, Debug)]
pub enum PersistError {
    /// A component refused to encode during `save`.
    #[error("component {component} refused to encode: {detail}")]
    Serialize {
        /// Registered name of the offending component type.
        component: String,
        /// Underlying serializer message.
        detail: String,
    },

    /// The compression or encryption layer failed during `encode`.
    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    /// The decoded bytes were not well-formed snapshot JSON.
    #[error("snapshot bytes were not well-formed JSON: {0}")]
    Decode(String),

    /// The gzip header or payload was malformed.
    #[error("gzip payload malformed: {0}")]
    Decompress(String),

    /// Cipher setup failed (e.g. a zero-length key).
    #[error("cipher setup failed: {0}")]
    Decrypt(String),

    /// The snapshot was produced by a newer build than this one.
    #[error("snapshot version {found} exceeds current version {current}")]
    VersionTooNew {
        /// Version recorded in the snapshot.
        found: u32,
        /// Version this build writes.
        current: u32,
    },

    /// No migrator is registered for a required version step.
    #[error("no migrator registered for snapshot version {from}")]
    Migration {
        /// The version the chain stalled at.
        from: u32,
    },

    /// A per-component restoration step failed during `load`.
    #[error("failed to restore component {component}: {detail}")]
    Load {
        /// Registered name of the offending component type.
        component: String,
        /// Underlying deserializer message.
        detail: String,
    },

    /// A save file could not be read or written.
    #[error("save file error: {0}")]
    Io(#[from] std::io::Error),
}
