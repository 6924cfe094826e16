//! Motion and task timing configuration

/// What the task player does when a stop cancels one of its waypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopPolicy {
    /// Freeze the cancelled waypoint, then continue with the next one
    #[default]
    FinishSequence,
    /// Freeze the cancelled waypoint and end the task
    AbortSequence,
}

/// Motion timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Length of one interpolation tick (µs)
    pub tick_us: u32,
    /// Pause between task waypoints (ms)
    pub waypoint_pause_ms: u32,
    /// Uniform rate (ticks per step) used for task waypoints
    pub task_rate: u16,
    /// Buzzer pulse length (ms)
    pub beep_ms: u32,
    /// Settling delay before and after the boot move (ms)
    pub settle_ms: u32,
    /// Task player behaviour on stop
    pub stop_policy: StopPolicy,
}

impl MotionConfig {
    /// Factory timing: 1 ms ticks, rate 2 for tasks
    pub const DEFAULT: Self = Self {
        tick_us: 1_000,
        waypoint_pause_ms: 2,
        task_rate: 2,
        beep_ms: 200,
        settle_ms: 500,
        stop_policy: StopPolicy::FinishSequence,
    };
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
