//! Arm configuration compiled in from arm.toml
//!
//! build.rs validates the file and writes `ARM_CONFIG`; edit arm.toml and
//! rebuild to recalibrate.

use wearm_core::config::{ActuatorCalibration, ArmConfig, MotionConfig, StopPolicy};

include!(concat!(env!("OUT_DIR"), "/arm_config.rs"));
