//! In-process diagnostics ring buffer.
//!
//! Hosts that set `DEBUG_TICK=1` get per-tick duration strings appended
//! here by the driver; an overlay can drain the most recent entries
//! without touching the renderer. Structured engine events go through
//! `tracing` instead — this buffer only carries display strings.

use std::collections::VecDeque;
use std::sync::OnceLock;

use parking_lot::RwLock;

/// Default number of retained lines.
const DEFAULT_CAPACITY: usize = 1000;

/// Bounded buffer of diagnostic lines, evicting the oldest on overflow.
#[derive(Debug)]
pub struct DiagBuffer {
    entries: VecDeque<String>,
    capacity: usize,
}

impl DiagBuffer {
    /// Creates a buffer retaining at most `capacity` lines.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Appends a line, evicting the oldest if at capacity.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(line.into());
    }

    /// The most recent `n` lines, oldest first.
    #[must_use]
    pub fn recent(&self, n: usize) -> Vec<String> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Number of retained lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no lines are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all retained lines.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn global() -> &'static RwLock<DiagBuffer> {
    static BUFFER: OnceLock<RwLock<DiagBuffer>> = OnceLock::new();
    BUFFER.get_or_init(|| RwLock::new(DiagBuffer::new(DEFAULT_CAPACITY)))
}

/// Appends a line to the process-wide diagnostics buffer.
pub fn push(line: impl Into<String>) {
    global().write().push(line);
}

/// The most recent `n` lines of the process-wide buffer, oldest first.
#[must_use]
pub fn recent(n: usize) -> Vec<String> {
    global().read().recent(n)
}

/// Clears the process-wide buffer.
pub fn clear() {
    global().write().clear();
}

/// Returns true when the host asked for per-tick timing diagnostics.
#[must_use]
pub fn tick_debug_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("DEBUG_TICK").as_deref() == Ok("1"))
}
