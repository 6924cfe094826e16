//! Motion execution
//!
//! Interpolates the actuator bank toward its targets in fixed ticks.

pub mod engine;

pub use engine::{MotionEngine, MotionOutcome, MotionReport};
