//! Calibrated servo actuators

pub mod actuator;
pub mod bank;

pub use actuator::Actuator;
pub use bank::ActuatorBank;
