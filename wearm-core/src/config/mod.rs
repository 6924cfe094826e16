//! Configuration type definitions
//!
//! The firmware builds an [`ArmConfig`] at compile time from `arm.toml`;
//! [`ArmConfig::DEFAULT`] is the factory calibration of the reference arm.

pub mod calibration;
pub mod motion;

pub use calibration::{
    ActuatorCalibration, ACTUATOR_COUNT, BASE_ANGLE_MAX, BASE_PULSE_MAX, BASE_PULSE_MIN,
};
pub use motion::{MotionConfig, StopPolicy};

/// Complete arm configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmConfig {
    /// Per-actuator calibration, indexed by actuator id
    pub actuators: [ActuatorCalibration; ACTUATOR_COUNT],
    /// Motion and task timing
    pub motion: MotionConfig,
}

impl ArmConfig {
    /// Factory configuration
    pub const DEFAULT: Self = Self {
        actuators: calibration::DEFAULT_CALIBRATION,
        motion: MotionConfig::DEFAULT,
    };
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
