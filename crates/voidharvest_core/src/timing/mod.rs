//! Frame timing: the global tick timer and the cooperative frame limiter.

mod limiter;
mod timer;

pub use limiter::FrameLimiter;
pub use timer::{
    current_tick, delta_time, frame_count, update_global_timer, GlobalTimer,
};
