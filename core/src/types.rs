//! Shared primitive types used across the framework.

/// A frame number. Frame 0 is the startup frame; the first update is frame 1.
pub type Frame = u64;

/// Time in seconds, as reported by the host's frame tick.
pub type Seconds = f64;

/// Identifier handed out by the scheduler for a queued task.
pub type TaskId = u64;
